use std::path::{Path, PathBuf};

use boxview_common::canvas::POINT_SCALE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Pixels per point
    pub scale: f32,
    /// Gap in pixels around and between boxes in the composite
    pub margin: u32,
    pub background: [u8; 4],
    pub text_color: [u8; 4],
    /// Overlay a light 2-point checkerboard on each box background
    pub checkerboard: bool,
    /// Render boxes on the rayon thread pool
    pub parallel: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: POINT_SCALE,
            margin: 10,
            background: [255, 255, 255, 255],
            text_color: [0, 0, 0, 255],
            checkerboard: false,
            parallel: true,
        }
    }
}

/// Fixed locations of the serialized input, rendered output and font files.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPaths {
    pub serial_dir: PathBuf,
    pub render_dir: PathBuf,
    pub font_dir: PathBuf,
}

impl RenderPaths {
    pub fn from_base(base: &Path) -> Self {
        Self {
            serial_dir: base.join("cache").join("serial"),
            render_dir: base.join("cache").join("render"),
            font_dir: base.join("fonts"),
        }
    }

    pub fn input_path(&self, name: &str) -> PathBuf {
        self.serial_dir.join(name)
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.render_dir.join(format!("{name}.png"))
    }
}
