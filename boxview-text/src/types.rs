use boxview_common::types::FaceId;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// A face resolved to concrete font attributes at a fixed pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedFont {
    pub face: FaceId,
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
    /// Font size in pixels
    pub size: f32,
}
