use boxview_common::{
    error::BoxviewDocumentError,
    types::{FaceId, PixelRect},
};
use boxview_text::error::BoxviewTextError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxviewRenderError {
    #[error("Face {0} has no font path")]
    UnknownFace(FaceId),

    #[error("Text written before any font was selected")]
    NoActiveFont,

    #[error("Invalid command `{tag}` (layout {layout}, command {command})")]
    InvalidCommand {
        tag: String,
        layout: usize,
        command: usize,
    },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Every palette color is taken by a rectangle overlapping {rect}")]
    PaletteExhausted { rect: PixelRect },

    #[error("text error: {0}")]
    TextError(#[from] BoxviewTextError),
}

impl BoxviewRenderError {
    /// Attach the position of the offending command to a decoding error.
    pub fn at(err: BoxviewDocumentError, layout: usize, command: usize) -> Self {
        match err {
            BoxviewDocumentError::InvalidCommand { tag } => Self::InvalidCommand {
                tag,
                layout,
                command,
            },
            other => Self::MalformedInput(format!("layout {layout}, command {command}: {other}")),
        }
    }
}
