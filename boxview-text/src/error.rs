use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxviewTextError {
    #[error("Failed to load a font face from `{}`", .path.display())]
    FontLoad { path: PathBuf },

    #[error("Failed to allocate image: {0}")]
    ImageAllocationError(String),
}
