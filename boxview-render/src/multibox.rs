use std::path::Path;

use boxview_common::document::{LayoutDescriptor, SerializedDocument};
use boxview_text::{
    faces::FaceTable,
    rasterization::{cosmic::CosmicTextRasterizer, TextRasterizer},
};
use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    box_renderer::BoxRenderer, config::RenderConfig, error::BoxviewRenderError,
    layout::CompositeLayout,
};

/// Renders every box of a document and packs the results into one image.
pub struct MultiboxRenderer<F> {
    faces: FaceTable,
    layouts: Vec<LayoutDescriptor>,
    config: RenderConfig,
    make_rasterizer: F,
}

impl MultiboxRenderer<fn() -> CosmicTextRasterizer> {
    /// `font_dir` is the directory the document's face paths are relative to.
    pub fn new(document: SerializedDocument, font_dir: &Path, config: RenderConfig) -> Self {
        Self::with_rasterizer_factory(
            document,
            font_dir,
            config,
            CosmicTextRasterizer::new as fn() -> CosmicTextRasterizer,
        )
    }
}

impl<F, R> MultiboxRenderer<F>
where
    F: Fn() -> R + Sync,
    R: TextRasterizer,
{
    /// Like [`MultiboxRenderer::new`], building each box's text backend with `make_rasterizer`.
    pub fn with_rasterizer_factory(
        document: SerializedDocument,
        font_dir: &Path,
        config: RenderConfig,
        make_rasterizer: F,
    ) -> Self {
        Self {
            faces: FaceTable::from_entries(font_dir, &document.faces),
            layouts: document.layouts,
            config,
            make_rasterizer,
        }
    }

    pub fn faces(&self) -> &FaceTable {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Render each box on its own canvas. Results keep the input order.
    pub fn render_boxes(&self) -> Result<Vec<RgbaImage>, BoxviewRenderError> {
        let render = |(index, layout): (usize, &LayoutDescriptor)| {
            render_box(index, layout, &self.faces, &self.config, (self.make_rasterizer)())
        };

        if self.config.parallel {
            self.layouts.par_iter().enumerate().map(render).collect()
        } else {
            self.layouts.iter().enumerate().map(render).collect()
        }
    }

    /// Render all boxes and return the composite along with the placement of each box.
    pub fn render_layout(&self) -> Result<(RgbaImage, CompositeLayout), BoxviewRenderError> {
        let images = self.render_boxes()?;
        let sizes = images.iter().map(|img| img.dimensions()).collect::<Vec<_>>();
        let layout = CompositeLayout::pack(&sizes, self.config.margin);
        tracing::debug!(
            "packed {} boxes into {}x{}",
            images.len(),
            layout.width,
            layout.height
        );
        Ok((layout.compose(&images), layout))
    }

    pub fn render(&self) -> Result<RgbaImage, BoxviewRenderError> {
        Ok(self.render_layout()?.0)
    }
}

/// Decode and execute the commands of one box on a fresh renderer.
///
/// The first failing command aborts the box.
#[tracing::instrument(skip(layout, faces, config, rasterizer))]
pub fn render_box<R: TextRasterizer>(
    index: usize,
    layout: &LayoutDescriptor,
    faces: &FaceTable,
    config: &RenderConfig,
    rasterizer: R,
) -> Result<RgbaImage, BoxviewRenderError> {
    let dimensions = layout.canvas_dimensions(config.scale);
    let mut renderer = BoxRenderer::with_rasterizer(faces, dimensions, config, rasterizer);

    for (i, raw) in layout.commands.iter().enumerate() {
        let command = raw
            .decode()
            .map_err(|err| BoxviewRenderError::at(err, index, i))?;
        renderer.execute(&command).inspect_err(|err| {
            tracing::error!("box {index}, command {i} ({command:?}) failed: {err}");
        })?;
    }

    tracing::debug!(
        "rendered box {index}: {} commands, {} rectangles",
        layout.commands.len(),
        renderer.history().len()
    );
    Ok(renderer.export())
}
