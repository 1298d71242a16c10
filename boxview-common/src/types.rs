use serde::{Deserialize, Serialize};
use std::fmt;

/// A font face plus style variant, e.g. `(0, 1)` for the bold cut of face 0.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId {
    pub index: u32,
    pub variant: u32,
}

impl FaceId {
    pub fn new(index: u32, variant: u32) -> Self {
        Self { index, variant }
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.index, self.variant)
    }
}

/// Axis-aligned rectangle in pixels. Both corners are inclusive.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    /// Rectangle anchored at `origin` covering `width` x `height` pixels.
    ///
    /// Bounds saturate at the `i32` range.
    pub fn from_origin_size(origin: [i32; 2], width: i32, height: i32) -> Self {
        Self {
            x0: origin[0],
            y0: origin[1],
            x1: origin[0].saturating_add(width).saturating_sub(1),
            y1: origin[1].saturating_add(height).saturating_sub(1),
        }
    }

    pub fn overlaps(&self, other: &PixelRect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }
}

impl fmt::Display for PixelRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x0, self.y0, self.x1, self.y1)
    }
}
