//! WebGPU presentation module
//!
//! All drawing happens on the CPU into a `PixelBuffer`; the GPU only
//! uploads and displays the finished frame.

pub mod present;

pub use present::{GpuPresenter, letterbox_scale};
