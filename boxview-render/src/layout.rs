use image::{imageops, RgbaImage};

/// Number of boxes per grid row: `floor(sqrt(count))`, at least one.
pub fn grid_columns(count: usize) -> usize {
    ((count as f64).sqrt().floor() as usize).max(1)
}

/// Where each box image goes in the composite, and how big the composite is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeLayout {
    pub width: u32,
    pub height: u32,
    /// Top-left corner of each image, in input order
    pub positions: Vec<[u32; 2]>,
}

impl CompositeLayout {
    /// Pack images of the given pixel sizes into a near-square grid, left to
    /// right and top to bottom, with `margin` pixels around every image.
    pub fn pack(sizes: &[(u32, u32)], margin: u32) -> Self {
        if sizes.is_empty() {
            return Self::default();
        }

        let columns = grid_columns(sizes.len());
        let mut positions = Vec::with_capacity(sizes.len());
        let mut width = 0;
        let mut x = margin;
        let mut y = margin;
        let mut row_height = 0;

        for (i, &(w, h)) in sizes.iter().enumerate() {
            positions.push([x, y]);
            x += margin + w;
            row_height = row_height.max(h);

            if i % columns == columns - 1 {
                width = width.max(x);
                x = margin;
                y += margin + row_height;
                row_height = 0;
            }
        }

        // Unfinished last row
        if sizes.len() % columns != 0 {
            width = width.max(x);
            y += margin + row_height;
        }

        Self {
            width,
            height: y,
            positions,
        }
    }

    /// Paste `images` onto a transparent canvas at their packed positions.
    #[tracing::instrument(skip_all)]
    pub fn compose(&self, images: &[RgbaImage]) -> RgbaImage {
        let mut canvas = RgbaImage::new(self.width, self.height);
        for (image, [x, y]) in images.iter().zip(&self.positions) {
            imageops::replace(&mut canvas, image, *x as i64, *y as i64);
        }
        canvas
    }
}
