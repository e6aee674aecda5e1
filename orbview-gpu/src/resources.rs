//! Shader source lookup.
//!
//! Shaders live in a `res/` directory next to the executable. In-tree runs
//! (`target/debug/orbview`) have no such directory, so the crate's own `res/`
//! is used instead.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, ShaderStage};

pub const RESOURCE_DIR: &str = "res";
pub const VERTEX_SHADER: &str = "example.vx";
pub const FRAGMENT_SHADER: &str = "example.ft";

/// Directory the shader files are read from
pub fn resource_dir() -> PathBuf {
    let exe = std::env::current_exe().ok();
    let fallback = Path::new(env!("CARGO_MANIFEST_DIR")).join(RESOURCE_DIR);
    resolve_resource_dir(exe.as_deref(), &fallback)
}

/// `res/` beside `exe` when it exists, otherwise `fallback`
pub fn resolve_resource_dir(exe: Option<&Path>, fallback: &Path) -> PathBuf {
    exe.and_then(Path::parent)
        .map(|dir| dir.join(RESOURCE_DIR))
        .filter(|dir| dir.is_dir())
        .unwrap_or_else(|| fallback.to_path_buf())
}

/// Source text of both pipeline stages
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn load(dir: &Path) -> Result<Self, RenderError> {
        let sources = Self {
            vertex: read_stage(dir, VERTEX_SHADER, ShaderStage::Vertex)?,
            fragment: read_stage(dir, FRAGMENT_SHADER, ShaderStage::Fragment)?,
        };
        tracing::info!("Loaded shaders from {}", dir.display());
        Ok(sources)
    }
}

fn read_stage(dir: &Path, name: &str, stage: ShaderStage) -> Result<String, RenderError> {
    let path = dir.join(name);
    fs::read_to_string(&path).map_err(|source| RenderError::ShaderRead {
        stage,
        path,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crate_res() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(RESOURCE_DIR)
    }

    #[test]
    fn resolve_prefers_directory_beside_executable() {
        let exe = Path::new(env!("CARGO_MANIFEST_DIR")).join("orbview");
        let fallback = Path::new("/nonexistent/fallback");
        assert_eq!(resolve_resource_dir(Some(&exe), fallback), crate_res());
    }

    #[test]
    fn resolve_falls_back_when_missing() {
        let exe = Path::new("/nonexistent/bin/orbview");
        let fallback = Path::new("/somewhere/res");
        assert_eq!(
            resolve_resource_dir(Some(exe), fallback),
            PathBuf::from("/somewhere/res")
        );
        assert_eq!(resolve_resource_dir(None, fallback), PathBuf::from("/somewhere/res"));
    }

    #[test]
    fn load_bundled_shaders() {
        let sources = ShaderSources::load(&crate_res()).unwrap();
        assert!(sources.vertex.contains("fn vs_main"));
        assert!(sources.fragment.contains("fn fs_main"));
        for uniform in ["modelview_projection_matrix", "normal_matrix", "brick_size"] {
            assert!(sources.vertex.contains(uniform), "{uniform} missing");
        }
    }

    #[test]
    fn load_missing_directory_reports_vertex_stage() {
        let err = ShaderSources::load(Path::new("/nonexistent/res")).unwrap_err();
        match err {
            RenderError::ShaderRead { stage, path, .. } => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(path.ends_with("example.vx"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
