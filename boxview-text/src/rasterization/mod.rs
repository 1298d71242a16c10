use std::path::Path;

use boxview_common::types::FaceId;

pub mod block;
#[cfg(feature = "cosmic-text")]
pub mod cosmic;

use crate::{
    error::BoxviewTextError,
    measurement::{TextBounds, TextMeasurementConfig, TextMeasurer},
    types::LoadedFont,
};

// Position of glyph origin relative to the text origin (top-left of the line)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalGlyphPosition {
    pub x: i32,
    pub y: i32,
}

// Glyph bounding box relative to glyph origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphBBox {
    pub top: i32,
    pub left: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct TextRasterizationConfig<'a> {
    pub text: &'a str,
    pub color: [u8; 4],
    pub font: &'a LoadedFont,
}

impl<'a> TextRasterizationConfig<'a> {
    pub fn to_measurement_config(&self) -> TextMeasurementConfig<'a> {
        TextMeasurementConfig {
            text: self.text,
            font: self.font,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GlyphData {
    /// Coverage already tinted with the text color
    pub image: image::RgbaImage,
    pub bbox: GlyphBBox,
    pub physical_position: PhysicalGlyphPosition,
}

impl GlyphData {
    /// Top-left pixel of the glyph image when the text origin is at `origin`.
    pub fn placement(&self, origin: [i32; 2]) -> [i32; 2] {
        [
            origin[0]
                .saturating_add(self.physical_position.x)
                .saturating_add(self.bbox.left),
            origin[1]
                .saturating_add(self.physical_position.y)
                .saturating_sub(self.bbox.top),
        ]
    }
}

#[derive(Clone, Debug)]
pub struct TextRasterizationBuffer {
    pub glyphs: Vec<GlyphData>,
    pub text_bounds: TextBounds,
}

/// Turns text into positioned glyph images.
///
/// Implementations own whatever font state they need; one instance serves a
/// single box render.
pub trait TextRasterizer: TextMeasurer {
    /// Load the face stored at `path` for use at `font_size` pixels.
    fn load_font(
        &mut self,
        face: FaceId,
        path: &Path,
        font_size: f32,
    ) -> Result<LoadedFont, BoxviewTextError>;

    fn rasterize(
        &mut self,
        config: &TextRasterizationConfig,
    ) -> Result<TextRasterizationBuffer, BoxviewTextError>;
}
