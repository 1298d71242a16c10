use boxview_common::types::PixelRect;

use crate::error::BoxviewRenderError;

pub type Rgb = [u8; 3];

/// Highlight colors handed out to rectangles, in allocation order.
pub const PALETTE: [Rgb; 8] = [
    [176, 254, 158],
    [254, 173, 207],
    [158, 252, 254],
    [254, 245, 187],
    [132, 217, 136],
    [236, 177, 246],
    [174, 232, 254],
    [254, 234, 158],
];

/// A rectangle that has been painted, with the color it received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnRect {
    pub rect: PixelRect,
    pub color: Rgb,
}

/// Picks colors so overlapping rectangles never share one.
///
/// The scan starts where the previous one stopped, which spreads colors
/// round-robin instead of always favoring the first palette entry.
#[derive(Debug, Clone, Default)]
pub struct ColorAllocator {
    index: usize,
}

impl ColorAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Palette position the next scan starts at.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn allocate(
        &mut self,
        candidate: &PixelRect,
        drawn: &[DrawnRect],
    ) -> Result<Rgb, BoxviewRenderError> {
        let forbidden = drawn
            .iter()
            .filter(|other| other.rect.overlaps(candidate))
            .map(|other| other.color)
            .collect::<Vec<_>>();

        for _ in 0..PALETTE.len() {
            let color = PALETTE[self.index];
            self.index = (self.index + 1) % PALETTE.len();
            if !forbidden.contains(&color) {
                return Ok(color);
            }
        }

        Err(BoxviewRenderError::PaletteExhausted { rect: *candidate })
    }
}
