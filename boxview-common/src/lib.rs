pub mod canvas;
pub mod document;
pub mod error;
pub mod types;
