//! Crate error type
//!
//! Setup and decode errors are fatal and surface in `main`; surface errors
//! are per-frame and handled by the frame loop's caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BounceError {
    /// Window creation failed
    #[error("failed to create window: {0}")]
    Window(String),

    /// No GPU adapter could drive the window surface
    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("failed to create GPU surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    /// The surface reports no usable texture format
    #[error("surface has no supported texture format")]
    SurfaceFormat,

    /// Image could not be opened or decoded
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Buffer sizes do not agree with the declared dimensions
    #[error("expected {expected} values for {width}x{height}, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Acquiring or presenting a frame failed
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

pub type Result<T> = std::result::Result<T, BounceError>;
