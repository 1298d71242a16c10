use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoxviewDocumentError {
    #[error("Invalid command tag: `{tag}`")]
    InvalidCommand { tag: String },

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Failed to parse document")]
    Json(#[from] serde_json::Error),
}
