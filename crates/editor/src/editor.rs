//! Stateful image editor.

use crate::{target_dimensions, EditorConfig, EditorError, Result};
use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageFormat};
use imgscale_telemetry::timed_span;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// The decoded source image and the working copy derived from it.
#[derive(Debug, Clone)]
struct Loaded {
    source: DynamicImage,
    working: DynamicImage,
}

/// Wraps one loaded image and one working copy, with their file paths.
///
/// Every resize starts again from the source image, so calls do not
/// compound. Saving always writes the working copy as PNG.
///
/// # Example
/// ```no_run
/// use imgscale_editor::ImageEditor;
///
/// let mut editor = ImageEditor::new();
/// editor.load_from("photo.jpg")?;
/// editor.resize_to_width(800)?;
/// editor.save_as("photo-800.png")?;
/// # Ok::<(), imgscale_editor::EditorError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImageEditor {
    source_file: Option<PathBuf>,
    target_file: Option<PathBuf>,
    images: Option<Loaded>,
    config: EditorConfig,
}

impl ImageEditor {
    /// Create an empty editor with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty editor with a custom configuration
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Path the image was last loaded from, or will be loaded from
    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }

    /// Set the path used by `load(None)`
    pub fn set_source_file(&mut self, path: impl Into<PathBuf>) {
        self.source_file = Some(path.into());
    }

    /// Path the working image is written to
    pub fn target_file(&self) -> Option<&Path> {
        self.target_file.as_deref()
    }

    /// Set the path used by `save(None)`
    pub fn set_target_file(&mut self, path: impl Into<PathBuf>) {
        self.target_file = Some(path.into());
    }

    /// Whether an image has been loaded
    pub fn is_loaded(&self) -> bool {
        self.images.is_some()
    }

    /// The image as originally decoded
    pub fn source_image(&self) -> Result<&DynamicImage> {
        self.loaded().map(|images| &images.source)
    }

    /// The image that `save` writes
    pub fn working_image(&self) -> Result<&DynamicImage> {
        self.loaded().map(|images| &images.working)
    }

    /// Current (width, height) of the working image
    pub fn working_dimensions(&self) -> Result<(u32, u32)> {
        let working = self.working_image()?;
        Ok((working.width(), working.height()))
    }

    /// Source image width divided by its height.
    ///
    /// Always taken from the source image, never the working copy, so
    /// resizing does not change it.
    pub fn aspect(&self) -> Result<f64> {
        let source = self.source_image()?;
        Ok(f64::from(source.width()) / f64::from(source.height()))
    }

    /// Load an image.
    ///
    /// With `Some(path)` the source file is set to `path` first. With `None`
    /// the previously set source file is decoded. On success the source and
    /// working images are two independent copies of the decoded pixels. On
    /// failure any previously loaded images are left untouched.
    pub fn load(&mut self, path: Option<&Path>) -> Result<()> {
        if let Some(path) = path {
            self.source_file = Some(path.to_path_buf());
        }
        let path = self.source_file.as_deref().ok_or(EditorError::NoSourceFile)?;

        timed_span!("load", path = %path.display());

        let decoded = decode_file(path).inspect_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Failed to load image");
        })?;

        tracing::debug!(
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            "Image loaded"
        );

        self.images = Some(Loaded {
            working: decoded.clone(),
            source: decoded,
        });
        Ok(())
    }

    /// Load an image from `path`, same as `load(Some(path))`
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load(Some(path.as_ref()))
    }

    /// Resize the working image.
    ///
    /// A negative `width` or `height` is derived from the other side and the
    /// source aspect ratio; see [`target_dimensions`] for the rounding rule.
    /// The working image is replaced by a resized copy of the source image,
    /// so `resize(100, 100)` followed by `resize(200, 200)` resamples the
    /// original once, not twice.
    pub fn resize(&mut self, width: i64, height: i64) -> Result<()> {
        let filter = self.config.resize.filter;
        let aspect = self.aspect()?;

        timed_span!("resize", width, height);

        let (new_width, new_height) = target_dimensions(width, height, aspect)
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected resize"))?;

        let images = self.images.as_mut().ok_or(EditorError::NotLoaded)?;
        images.working = images.source.resize_exact(new_width, new_height, filter.into());

        tracing::debug!(width = new_width, height = new_height, ?filter, "Image resized");
        Ok(())
    }

    /// Resize to `width`, deriving the height from the aspect ratio
    pub fn resize_to_width(&mut self, width: i64) -> Result<()> {
        self.resize(width, -1)
    }

    /// Resize to `height`, deriving the width from the aspect ratio
    pub fn resize_to_height(&mut self, height: i64) -> Result<()> {
        self.resize(-1, height)
    }

    /// Save the working image as PNG.
    ///
    /// With `Some(path)` the target file is set to `path` first. The output
    /// is PNG regardless of the target's extension.
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        if let Some(path) = path {
            self.target_file = Some(path.to_path_buf());
        }
        let working = &self.loaded()?.working;
        let path = self.target_file.as_deref().ok_or(EditorError::NoTargetFile)?;

        timed_span!("save", path = %path.display());

        working
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| match e {
                image::ImageError::IoError(e) => EditorError::IoError(e),
                other => EditorError::ProcessingError(other),
            })
            .inspect_err(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Failed to save image");
            })?;

        tracing::debug!(
            width = working.width(),
            height = working.height(),
            "Image saved"
        );
        Ok(())
    }

    /// Save the working image to `path`, same as `save(Some(path))`
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.save(Some(path.as_ref()))
    }

    fn loaded(&self) -> Result<&Loaded> {
        self.images.as_ref().ok_or(EditorError::NotLoaded)
    }
}

/// Decode the image at `path`.
///
/// The file handle lives only in this function and is closed on return,
/// whether decoding succeeded or not.
fn decode_file(path: &Path) -> Result<DynamicImage> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => EditorError::SourceNotFound(path.to_path_buf()),
        _ => EditorError::IoError(e),
    })?;

    let mut reader = ImageReader::new(BufReader::new(file));
    if let Ok(format) = ImageFormat::from_path(path) {
        reader.set_format(format);
    }

    Ok(reader.with_guessed_format()?.decode()?)
}
