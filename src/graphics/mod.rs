mod canvas;
pub mod filters;
mod image;
pub mod text;

pub use canvas::Canvas;
pub use image::SourceImage;
pub use text::{TextRenderer, TextStyle};
