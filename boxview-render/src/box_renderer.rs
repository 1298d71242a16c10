use boxview_common::{canvas::CanvasDimensions, document::Command, types::PixelRect};
use boxview_text::{
    faces::FaceTable,
    rasterization::{cosmic::CosmicTextRasterizer, TextRasterizationConfig, TextRasterizer},
    types::LoadedFont,
};
use image::{Pixel, Rgba, RgbaImage};

use crate::{
    config::RenderConfig,
    error::BoxviewRenderError,
    palette::{ColorAllocator, DrawnRect},
};

const CHECKER_COLOR: [u8; 4] = [225, 225, 225, 255];

/// Executes the drawing commands of a single box against its own canvas.
pub struct BoxRenderer<'a, R: TextRasterizer = CosmicTextRasterizer> {
    faces: &'a FaceTable,
    rasterizer: R,
    text_color: [u8; 4],
    dimensions: CanvasDimensions,
    canvas: RgbaImage,
    cursor: [i32; 2],
    font: Option<LoadedFont>,
    rects: Vec<DrawnRect>,
    colors: ColorAllocator,
}

impl<'a> BoxRenderer<'a, CosmicTextRasterizer> {
    pub fn new(faces: &'a FaceTable, dimensions: CanvasDimensions, config: &RenderConfig) -> Self {
        Self::with_rasterizer(faces, dimensions, config, CosmicTextRasterizer::new())
    }
}

impl<'a, R: TextRasterizer> BoxRenderer<'a, R> {
    pub fn with_rasterizer(
        faces: &'a FaceTable,
        dimensions: CanvasDimensions,
        config: &RenderConfig,
        rasterizer: R,
    ) -> Self {
        Self {
            faces,
            rasterizer,
            text_color: config.text_color,
            dimensions,
            canvas: make_background(&dimensions, config),
            cursor: [0, 0],
            font: None,
            rects: Vec::new(),
            colors: ColorAllocator::new(),
        }
    }

    pub fn dimensions(&self) -> &CanvasDimensions {
        &self.dimensions
    }

    /// Current cursor position in pixels.
    pub fn cursor(&self) -> [i32; 2] {
        self.cursor
    }

    /// Rectangles drawn so far, in drawing order.
    pub fn history(&self) -> &[DrawnRect] {
        &self.rects
    }

    pub fn execute(&mut self, command: &Command) -> Result<(), BoxviewRenderError> {
        tracing::trace!("execute {command:?}");
        match command {
            Command::MoveCursor { x, y } => {
                self.cursor = [self.dimensions.to_pixels(*x), self.dimensions.to_pixels(*y)];
            }
            Command::SelectFont { face, size } => {
                let path = self
                    .faces
                    .resolve(*face)
                    .ok_or(BoxviewRenderError::UnknownFace(*face))?;
                let font_size = self.dimensions.to_pixels(*size) as f32;
                self.font = Some(self.rasterizer.load_font(*face, path, font_size)?);
            }
            Command::WriteText { text } => self.write_text(text)?,
            Command::DrawRect { width, height } => {
                let rect = PixelRect::from_origin_size(
                    self.cursor,
                    self.dimensions.to_pixels(*width),
                    self.dimensions.to_pixels(*height),
                );
                self.draw_rect(rect)?;
            }
        }
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), BoxviewRenderError> {
        let font = self.font.as_ref().ok_or(BoxviewRenderError::NoActiveFont)?;
        let config = TextRasterizationConfig {
            text,
            color: self.text_color,
            font,
        };

        let buffer = self.rasterizer.rasterize(&config)?;
        for glyph in &buffer.glyphs {
            blend_image(&mut self.canvas, &glyph.image, glyph.placement(self.cursor));
        }

        self.cursor[0] = self.cursor[0].saturating_add(buffer.text_bounds.advance());
        Ok(())
    }

    fn draw_rect(&mut self, rect: PixelRect) -> Result<(), BoxviewRenderError> {
        if self.rects.iter().any(|drawn| drawn.rect == rect) {
            tracing::trace!("skipping duplicate rectangle {rect}");
            return Ok(());
        }

        let color = self.colors.allocate(&rect, &self.rects)?;
        fill_rect(&mut self.canvas, &rect, Rgba([color[0], color[1], color[2], 255]));
        self.rects.push(DrawnRect { rect, color });
        Ok(())
    }

    /// Finish drawing and hand over the canvas.
    pub fn export(self) -> RgbaImage {
        self.canvas
    }
}

fn make_background(dimensions: &CanvasDimensions, config: &RenderConfig) -> RgbaImage {
    let width = dimensions.to_physical_width();
    let height = dimensions.to_physical_height();
    if !config.checkerboard {
        return RgbaImage::from_pixel(width, height, Rgba(config.background));
    }

    // Cells are 2x2 points
    let cell = ((dimensions.scale * 2.0) as u32).max(1);
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) % 2 == 0) == ((y / cell) % 2 == 0) {
            Rgba(CHECKER_COLOR)
        } else {
            Rgba(config.background)
        }
    })
}

/// Paint `rect` at full opacity, clipped to the canvas.
fn fill_rect(canvas: &mut RgbaImage, rect: &PixelRect, color: Rgba<u8>) {
    if rect.is_empty() {
        return;
    }
    let x0 = rect.x0.max(0);
    let y0 = rect.y0.max(0);
    let x1 = rect.x1.min(canvas.width() as i32 - 1);
    let y1 = rect.y1.min(canvas.height() as i32 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }
}

/// Alpha-blend `src` onto `canvas` with its top-left corner at `origin`.
fn blend_image(canvas: &mut RgbaImage, src: &RgbaImage, origin: [i32; 2]) {
    for (x, y, pixel) in src.enumerate_pixels() {
        let cx = origin[0].saturating_add(x as i32);
        let cy = origin[1].saturating_add(y as i32);
        if cx < 0 || cy < 0 || cx >= canvas.width() as i32 || cy >= canvas.height() as i32 {
            continue;
        }
        canvas.get_pixel_mut(cx as u32, cy as u32).blend(pixel);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use boxview_common::types::FaceId;
    use boxview_text::rasterization::block::BlockTextRasterizer;

    use super::*;
    use crate::palette::PALETTE;

    fn faces() -> FaceTable {
        let mut faces = FaceTable::new();
        faces.insert(FaceId::new(0, 0), PathBuf::from("fonts/Regular.ttf"));
        faces
    }

    fn renderer<'a>(faces: &'a FaceTable, config: &RenderConfig) -> BoxRenderer<'a, BlockTextRasterizer> {
        BoxRenderer::with_rasterizer(
            faces,
            CanvasDimensions::new(50.0, 20.0),
            config,
            BlockTextRasterizer::new(),
        )
    }

    fn draw_rect(width: f32, height: f32) -> Command {
        Command::DrawRect { width, height }
    }

    #[test]
    fn test_move_cursor_scales_to_pixels() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        renderer
            .execute(&Command::MoveCursor { x: 2.5, y: 1.1 })
            .unwrap();
        assert_eq!(renderer.cursor(), [10, 4]);
    }

    #[test]
    fn test_write_without_font_fails() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        let result = renderer.execute(&Command::WriteText {
            text: "Hi".to_string(),
        });
        assert!(matches!(result, Err(BoxviewRenderError::NoActiveFont)));
    }

    #[test]
    fn test_unknown_face() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        let result = renderer.execute(&Command::SelectFont {
            face: FaceId::new(0, 1),
            size: 12.0,
        });
        match result {
            Err(BoxviewRenderError::UnknownFace(face)) => assert_eq!(face, FaceId::new(0, 1)),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_write_text_advances_cursor() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        renderer
            .execute(&Command::SelectFont {
                face: FaceId::new(0, 0),
                size: 5.0,
            })
            .unwrap();
        renderer
            .execute(&Command::MoveCursor { x: 1.0, y: 2.0 })
            .unwrap();

        // 20px font, 10px per character
        let write = Command::WriteText {
            text: "abc".to_string(),
        };
        renderer.execute(&write).unwrap();
        assert_eq!(renderer.cursor(), [34, 8]);
        renderer.execute(&write).unwrap();
        assert_eq!(renderer.cursor(), [64, 8]);

        renderer
            .execute(&Command::WriteText {
                text: String::new(),
            })
            .unwrap();
        assert_eq!(renderer.cursor(), [64, 8]);

        // First glyph block spans y = 8 + 16 - 14 = 10 up to the baseline
        let canvas = renderer.export();
        assert_eq!(canvas.get_pixel(4, 10), &Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(4, 9), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_draw_rect_paints_and_records() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        renderer
            .execute(&Command::MoveCursor { x: 1.0, y: 1.0 })
            .unwrap();
        renderer.execute(&draw_rect(2.0, 1.0)).unwrap();

        // Drawing does not move the cursor
        assert_eq!(renderer.cursor(), [4, 4]);
        assert_eq!(
            renderer.history(),
            &[DrawnRect {
                rect: PixelRect {
                    x0: 4,
                    y0: 4,
                    x1: 11,
                    y1: 7
                },
                color: PALETTE[0],
            }]
        );

        let canvas = renderer.export();
        let [r, g, b] = PALETTE[0];
        assert_eq!(canvas.get_pixel(4, 4), &Rgba([r, g, b, 255]));
        assert_eq!(canvas.get_pixel(11, 7), &Rgba([r, g, b, 255]));
        assert_eq!(canvas.get_pixel(12, 7), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(11, 8), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_duplicate_rect_is_noop() {
        let faces = faces();
        let mut once = renderer(&faces, &RenderConfig::default());
        once.execute(&draw_rect(5.0, 5.0)).unwrap();

        let mut twice = renderer(&faces, &RenderConfig::default());
        twice.execute(&draw_rect(5.0, 5.0)).unwrap();
        twice.execute(&draw_rect(5.0, 5.0)).unwrap();

        assert_eq!(once.history(), twice.history());
        assert_eq!(once.export(), twice.export());
    }

    #[test]
    fn test_overlapping_rects_get_distinct_colors() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        for (x, y, w, h) in [(0.0, 0.0, 10.0, 10.0), (5.0, 5.0, 10.0, 10.0), (2.0, 2.0, 1.0, 1.0)] {
            renderer.execute(&Command::MoveCursor { x, y }).unwrap();
            renderer.execute(&draw_rect(w, h)).unwrap();
        }

        let history = renderer.history();
        assert_eq!(history.len(), 3);
        for (i, a) in history.iter().enumerate() {
            for b in &history[i + 1..] {
                if a.rect.overlaps(&b.rect) {
                    assert_ne!(a.color, b.color);
                }
            }
        }

        // The later rectangle covers the earlier one where they overlap
        let [r, g, b] = history[1].color;
        let canvas = renderer.export();
        assert_eq!(canvas.get_pixel(30, 30), &Rgba([r, g, b, 255]));
    }

    #[test]
    fn test_rect_is_clipped_to_canvas() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        renderer
            .execute(&Command::MoveCursor { x: 45.0, y: 15.0 })
            .unwrap();
        renderer.execute(&draw_rect(100.0, 100.0)).unwrap();
        assert_eq!(renderer.history()[0].rect.x1, 579);

        let canvas = renderer.export();
        let [r, g, b] = PALETTE[0];
        assert_eq!(canvas.get_pixel(199, 79), &Rgba([r, g, b, 255]));
    }

    #[test]
    fn test_far_away_drawing_is_clipped() {
        let faces = faces();
        let mut renderer = renderer(&faces, &RenderConfig::default());
        renderer
            .execute(&Command::SelectFont {
                face: FaceId::new(0, 0),
                size: 5.0,
            })
            .unwrap();
        renderer
            .execute(&Command::MoveCursor { x: 1e9, y: 0.0 })
            .unwrap();
        assert_eq!(renderer.cursor(), [i32::MAX, 0]);

        renderer.execute(&draw_rect(1e9, 1.0)).unwrap();
        renderer
            .execute(&Command::WriteText {
                text: "far".to_string(),
            })
            .unwrap();
        assert_eq!(renderer.cursor(), [i32::MAX, 0]);
        assert_eq!(renderer.history().len(), 1);

        let canvas = renderer.export();
        assert!(canvas.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_empty_box_is_background() {
        let faces = faces();
        let canvas = renderer(&faces, &RenderConfig::default()).export();
        assert_eq!(canvas.dimensions(), (200, 80));
        assert!(canvas.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_checkerboard_background() {
        let faces = faces();
        let config = RenderConfig {
            checkerboard: true,
            ..Default::default()
        };
        let canvas = renderer(&faces, &config).export();
        assert_eq!(canvas.get_pixel(0, 0), &Rgba(CHECKER_COLOR));
        assert_eq!(canvas.get_pixel(7, 7), &Rgba(CHECKER_COLOR));
        assert_eq!(canvas.get_pixel(8, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(canvas.get_pixel(8, 8), &Rgba(CHECKER_COLOR));
    }
}
