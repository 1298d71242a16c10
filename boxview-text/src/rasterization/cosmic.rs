use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use boxview_common::types::FaceId;
use cosmic_text::{fontdb, CacheKey, FontSystem, SwashCache, SwashContent};

use crate::{
    error::BoxviewTextError,
    measurement::{
        cosmic::{build_font_system, from_cosmic_style, make_cosmic_text_buffer, measure_text_buffer},
        TextBounds, TextMeasurementConfig, TextMeasurer,
    },
    types::{FontStyle, LoadedFont},
};

use super::{
    GlyphBBox, GlyphData, PhysicalGlyphPosition, TextRasterizationBuffer,
    TextRasterizationConfig, TextRasterizer,
};

type CosmicCacheKey = (CacheKey, [u8; 4]);

#[derive(Debug, Clone)]
struct FaceAttributes {
    family: String,
    weight: u16,
    style: FontStyle,
}

/// Text backend built on cosmic-text shaping and swash rasterization.
pub struct CosmicTextRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    faces: HashMap<PathBuf, FaceAttributes>,
    // None for glyphs with an empty bitmap, like spaces
    glyph_cache: HashMap<CosmicCacheKey, Option<(image::RgbaImage, GlyphBBox)>>,
}

impl CosmicTextRasterizer {
    pub fn new() -> Self {
        Self {
            font_system: build_font_system(),
            swash_cache: SwashCache::new(),
            faces: HashMap::new(),
            glyph_cache: HashMap::new(),
        }
    }

    fn face_attributes(&mut self, path: &Path) -> Result<FaceAttributes, BoxviewTextError> {
        if let Some(attrs) = self.faces.get(path) {
            return Ok(attrs.clone());
        }

        let db = self.font_system.db_mut();
        let ids = db.load_font_source(fontdb::Source::File(path.to_path_buf()));
        let attrs = ids
            .first()
            .and_then(|id| db.face(*id))
            .and_then(|info| {
                let (family, _lang) = info.families.first()?;
                Some(FaceAttributes {
                    family: family.clone(),
                    weight: info.weight.0,
                    style: from_cosmic_style(info.style),
                })
            })
            .ok_or_else(|| BoxviewTextError::FontLoad {
                path: path.to_path_buf(),
            })?;

        tracing::debug!("loaded font family `{}` from {}", attrs.family, path.display());
        self.faces.insert(path.to_path_buf(), attrs.clone());
        Ok(attrs)
    }

    fn rasterize_glyph(
        &mut self,
        cache_key: CacheKey,
        text_color: [u8; 4],
    ) -> Result<Option<(image::RgbaImage, GlyphBBox)>, BoxviewTextError> {
        if let Some(cached) = self.glyph_cache.get(&(cache_key, text_color)) {
            return Ok(cached.clone());
        }

        let image = self
            .swash_cache
            .get_image(&mut self.font_system, cache_key)
            .as_ref()
            .filter(|image| image.placement.width > 0 && image.placement.height > 0);
        let Some(image) = image else {
            // Nothing to draw, e.g. whitespace
            self.glyph_cache.insert((cache_key, text_color), None);
            return Ok(None);
        };

        let width = image.placement.width;
        let height = image.placement.height;

        let bbox = GlyphBBox {
            top: image.placement.top,
            left: image.placement.left,
            width,
            height,
        };

        let img = match image.content {
            SwashContent::Color => {
                // Image is rgba (like an emoji)
                image::RgbaImage::from_vec(width, height, image.data.clone()).ok_or_else(|| {
                    BoxviewTextError::ImageAllocationError(
                        "Failed to parse text rasterization as Rgba image".to_string(),
                    )
                })?
            }
            SwashContent::Mask | SwashContent::SubpixelMask => {
                // Image is monochrome (like regular text)
                let monochrome_img = image::GrayImage::from_vec(width, height, image.data.clone())
                    .ok_or_else(|| {
                        BoxviewTextError::ImageAllocationError(
                            "Failed to parse text rasterization as Grayscale image".to_string(),
                        )
                    })?;

                let mut img = image::RgbaImage::new(width, height);
                for (x, y, pixel) in monochrome_img.enumerate_pixels() {
                    // Scale text alpha by coverage
                    let mut pixel_color = text_color;
                    pixel_color[3] =
                        ((text_color[3] as f32) * (pixel.0[0] as f32 / 255.0)).round() as u8;
                    img.put_pixel(x, y, image::Rgba(pixel_color));
                }
                img
            }
        };

        let entry = Some((img, bbox));
        self.glyph_cache.insert((cache_key, text_color), entry.clone());
        Ok(entry)
    }
}

impl Default for CosmicTextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for CosmicTextRasterizer {
    fn measure_text_bounds(&mut self, config: &TextMeasurementConfig) -> TextBounds {
        if config.text.is_empty() {
            return TextBounds::empty(config.font.size);
        }
        let buffer = make_cosmic_text_buffer(config, &mut self.font_system);
        measure_text_buffer(&buffer, config.font.size)
    }
}

impl TextRasterizer for CosmicTextRasterizer {
    fn load_font(
        &mut self,
        face: FaceId,
        path: &Path,
        font_size: f32,
    ) -> Result<LoadedFont, BoxviewTextError> {
        let attrs = self.face_attributes(path)?;
        Ok(LoadedFont {
            face,
            family: attrs.family,
            weight: attrs.weight,
            style: attrs.style,
            size: font_size,
        })
    }

    fn rasterize(
        &mut self,
        config: &TextRasterizationConfig,
    ) -> Result<TextRasterizationBuffer, BoxviewTextError> {
        let measurement_config = config.to_measurement_config();
        if config.text.is_empty() {
            return Ok(TextRasterizationBuffer {
                glyphs: Vec::new(),
                text_bounds: TextBounds::empty(config.font.size),
            });
        }

        let buffer = make_cosmic_text_buffer(&measurement_config, &mut self.font_system);
        let text_bounds = measure_text_buffer(&buffer, config.font.size);

        let mut glyphs = Vec::new();
        for run in buffer.layout_runs() {
            for glyph in run.glyphs.iter() {
                let physical_glyph = glyph.physical((0.0, run.line_y), 1.0);
                let Some((image, bbox)) =
                    self.rasterize_glyph(physical_glyph.cache_key, config.color)?
                else {
                    continue;
                };
                glyphs.push(GlyphData {
                    image,
                    bbox,
                    physical_position: PhysicalGlyphPosition {
                        x: physical_glyph.x,
                        y: physical_glyph.y,
                    },
                });
            }
        }

        Ok(TextRasterizationBuffer {
            glyphs,
            text_bounds,
        })
    }
}
