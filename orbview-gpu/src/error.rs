//! Error types for GPU setup, shader loading and rendering

use std::fmt;
use std::path::PathBuf;

use orbview_core::MeshError;

/// Pipeline stage a shader source file feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("surface creation failed: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("device error: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("cannot read {stage} shader {}: {source}", .path.display())]
    ShaderRead {
        stage: ShaderStage,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{stage} shader failed to compile: {message}")]
    ShaderCompile { stage: ShaderStage, message: String },

    #[error("shader program failed to link: {0}")]
    ShaderLink(String),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}
