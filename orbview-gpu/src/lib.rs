//! orbview GPU frontend - winit window and wgpu brick-shaded sphere

pub mod app;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod resources;
pub mod uniforms;

pub use app::{run, GpuViewer};
pub use error::{RenderError, ShaderStage};
