/// Pixels per point used by every box canvas.
pub const POINT_SCALE: f32 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CanvasDimensions {
    /// Size in points
    pub size: [f32; 2],
    pub scale: f32,
}

impl CanvasDimensions {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            scale: POINT_SCALE,
        }
    }

    pub fn to_physical_width(&self) -> u32 {
        (self.size[0] * self.scale) as u32
    }

    pub fn to_physical_height(&self) -> u32 {
        (self.size[1] * self.scale) as u32
    }

    /// Convert a length in points to whole pixels, truncating toward zero.
    pub fn to_pixels(&self, points: f32) -> i32 {
        (points * self.scale) as i32
    }
}
