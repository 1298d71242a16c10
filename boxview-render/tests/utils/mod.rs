pub mod image;

use std::path::PathBuf;

use boxview_common::document::{Command, FaceEntry, LayoutDescriptor, SerializedDocument};
use boxview_render::{config::RenderConfig, multibox::MultiboxRenderer};
use boxview_text::rasterization::block::BlockTextRasterizer;

pub use self::image::*;

pub type BlockMultiboxRenderer = MultiboxRenderer<fn() -> BlockTextRasterizer>;

/// Document with a single regular face `(0, 0)` and the given boxes.
pub fn make_document(boxes: &[(f32, f32, Vec<Command>)]) -> SerializedDocument {
    SerializedDocument {
        faces: vec![FaceEntry::from((0, 0, "Regular.ttf".to_string()))],
        layouts: boxes
            .iter()
            .map(|(w, h, commands)| LayoutDescriptor::new(*w, *h, commands))
            .collect(),
    }
}

/// Multibox renderer using font-independent block glyphs.
pub fn block_renderer(document: SerializedDocument, config: RenderConfig) -> BlockMultiboxRenderer {
    MultiboxRenderer::with_rasterizer_factory(
        document,
        &PathBuf::from("fonts"),
        config,
        BlockTextRasterizer::new as fn() -> BlockTextRasterizer,
    )
}
