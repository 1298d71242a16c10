use crate::types::LoadedFont;

#[cfg(feature = "cosmic-text")]
pub mod cosmic;

/// Core trait for text measurement functionality
pub trait TextMeasurer {
    /// Measures the bounding dimensions for a text string with given configuration.
    ///
    /// Must be a pure function of the font and the text.
    fn measure_text_bounds(&mut self, config: &TextMeasurementConfig) -> TextBounds;
}

/// Configuration needed for text measurement
#[derive(Debug, Clone)]
pub struct TextMeasurementConfig<'a> {
    /// The text string to measure
    pub text: &'a str,
    /// Font to shape the text with
    pub font: &'a LoadedFont,
}

/// Results from text measurement, in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct TextBounds {
    /// Total width of the text
    pub width: f32,
    /// Total height from top to bottom
    pub height: f32,
    /// Distance from top to baseline
    pub ascent: f32,
    /// Distance from bottom to baseline
    pub descent: f32,
    /// Distance from top to where the top of the next line would be
    pub line_height: f32,
}

impl TextBounds {
    /// Bounds of an empty string in a font of the given size.
    pub fn empty(font_size: f32) -> Self {
        TextBounds {
            width: 0.0,
            height: font_size,
            ascent: font_size * 0.8,
            descent: font_size * 0.2,
            line_height: font_size * 1.2,
        }
    }

    /// Horizontal cursor advance in whole pixels.
    pub fn advance(&self) -> i32 {
        self.width.round() as i32
    }
}
