use std::path::Path;

use boxview_common::types::FaceId;

use crate::{
    error::BoxviewTextError,
    measurement::{TextBounds, TextMeasurementConfig, TextMeasurer},
    types::{FontStyle, LoadedFont},
};

use super::{
    GlyphBBox, GlyphData, PhysicalGlyphPosition, TextRasterizationBuffer,
    TextRasterizationConfig, TextRasterizer,
};

/// Draws every non-whitespace character as a solid block on a fixed advance.
///
/// Never reads font files, so output is identical on every machine. Useful
/// when only box geometry matters and for pixel-exact tests.
#[derive(Debug, Clone, Default)]
pub struct BlockTextRasterizer;

impl BlockTextRasterizer {
    pub fn new() -> Self {
        Self
    }

    fn advance(font_size: f32) -> f32 {
        font_size * 0.5
    }
}

impl TextMeasurer for BlockTextRasterizer {
    fn measure_text_bounds(&mut self, config: &TextMeasurementConfig) -> TextBounds {
        let size = config.font.size;
        TextBounds {
            width: config.text.chars().count() as f32 * Self::advance(size),
            ..TextBounds::empty(size)
        }
    }
}

impl TextRasterizer for BlockTextRasterizer {
    fn load_font(
        &mut self,
        face: FaceId,
        path: &Path,
        font_size: f32,
    ) -> Result<LoadedFont, BoxviewTextError> {
        let family = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(LoadedFont {
            face,
            family,
            weight: 400,
            style: FontStyle::Normal,
            size: font_size,
        })
    }

    fn rasterize(
        &mut self,
        config: &TextRasterizationConfig,
    ) -> Result<TextRasterizationBuffer, BoxviewTextError> {
        let size = config.font.size;
        let text_bounds = self.measure_text_bounds(&config.to_measurement_config());

        let width = ((size * 0.4) as u32).max(1);
        let height = ((size * 0.7) as u32).max(1);
        let baseline = text_bounds.ascent as i32;
        let block = image::RgbaImage::from_pixel(width, height, image::Rgba(config.color));

        let glyphs = config
            .text
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, _)| GlyphData {
                image: block.clone(),
                bbox: GlyphBBox {
                    top: height as i32,
                    left: 0,
                    width,
                    height,
                },
                physical_position: PhysicalGlyphPosition {
                    x: (i as f32 * Self::advance(size)) as i32,
                    y: baseline,
                },
            })
            .collect();

        Ok(TextRasterizationBuffer {
            glyphs,
            text_bounds,
        })
    }
}
