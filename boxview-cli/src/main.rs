use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use boxview_common::document::SerializedDocument;
use boxview_render::{
    config::{RenderConfig, RenderPaths},
    multibox::MultiboxRenderer,
};
use clap::Parser;
use log::{info, warn};

/// Render the serialized boxes of a layout run into a PNG for inspection
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Name of the serialized layout under cache/serial/ (output goes to cache/render/<name>.png)
    name: String,
}

fn render_to_png(name: &str, paths: &RenderPaths) -> Result<()> {
    let input_path = paths.input_path(name);
    let content = fs::read_to_string(&input_path)
        .with_context(|| format!("Failed to read input file {}", input_path.display()))?;

    let document = SerializedDocument::from_json_str(&content)
        .with_context(|| format!("Failed to parse {}", input_path.display()))?;
    if document.layouts.is_empty() {
        warn!("{} contains no layouts, nothing to render", input_path.display());
        return Ok(());
    }

    let renderer = MultiboxRenderer::new(document, &paths.font_dir, RenderConfig::default());
    let image = renderer
        .render()
        .with_context(|| format!("Failed to render {name}"))?;

    // Only touch the output location once every box rendered
    let output_path = paths.output_path(name);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create output directory {}", parent.display())
        })?;
    }
    image
        .save(&output_path)
        .with_context(|| format!("Failed to save PNG to {}", output_path.display()))?;

    info!(
        "Saved {}x{} PNG to {}",
        image.width(),
        image.height(),
        output_path.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let paths = RenderPaths::from_base(Path::new("."));
    render_to_png(&cli.name, &paths)
}
