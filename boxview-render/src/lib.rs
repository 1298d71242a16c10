pub mod box_renderer;
pub mod config;
pub mod error;
pub mod layout;
pub mod multibox;
pub mod palette;
