//! Blog-post thumbnail compositor.
//!
//! Turns a background photo, a title, a handful of tag icons and an author
//! icon into a 1200×675 JPEG suitable for social-media cards.

pub mod assets;
pub mod composer;
pub mod config;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod layout;
pub mod pipeline;

pub use composer::Composer;
pub use config::{LayoutConfig, LayoutPreset, ThumbnailConfig};
pub use error::{Result, ThumbnailError};
pub use fonts::FontRegistry;
pub use graphics::{Canvas, SourceImage};
pub use pipeline::run;
