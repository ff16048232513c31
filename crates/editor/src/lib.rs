//! Stateful image editing on top of the `image` crate.
//!
//! This crate provides:
//! - [`ImageEditor`]: load an image, resize it, save it as PNG
//! - Aspect-preserving target size calculation
//! - TOML configuration for the resampling filter and logging

#![warn(missing_docs)]

mod config;
mod dimensions;
mod editor;
mod error;

pub use config::{EditorConfig, ResizeConfig, ResizeFilter};
pub use dimensions::target_dimensions;
pub use editor::ImageEditor;
pub use error::{EditorError, Result};
