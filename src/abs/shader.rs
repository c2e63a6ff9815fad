//! OpenGL Shaders
//!
//! This module defines the [`Shader`] struct, a single compiled shader object.

use std::path::Path;
use std::sync::Arc;

use glow::HasContext;

use crate::error::ResourceError;

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    kind: u32,
}

impl Shader {
    /// Reads and compiles a shader source file.
    pub fn from_file(
        gl: &Arc<glow::Context>,
        path: impl AsRef<Path>,
        kind: u32,
    ) -> Result<Self, ResourceError> {
        let path = path.as_ref();
        let source = read_source(path)?;
        Self::compile(gl, path, &source, kind)
    }

    /// Compiles a shader from in-memory source. `name` only labels errors.
    pub fn from_source(
        gl: &Arc<glow::Context>,
        name: &str,
        source: &str,
        kind: u32,
    ) -> Result<Self, ResourceError> {
        Self::compile(gl, Path::new(name), source, kind)
    }

    fn compile(
        gl: &Arc<glow::Context>,
        path: &Path,
        source: &str,
        kind: u32,
    ) -> Result<Self, ResourceError> {
        unsafe {
            let shader = gl.create_shader(kind).map_err(ResourceError::Gl)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                log::error!("failed to compile shader: \"{}\"", path.display());
                log::error!("reason: {log}");
                return Err(ResourceError::Compile {
                    path: path.to_path_buf(),
                    log,
                });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                kind,
            })
        }
    }

    pub fn id(&self) -> glow::Shader {
        self.id
    }

    /// The shader stage, e.g. `glow::VERTEX_SHADER`.
    pub fn kind(&self) -> u32 {
        self.kind
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Reads shader source text, logging the failure.
pub fn read_source(path: &Path) -> Result<String, ResourceError> {
    std::fs::read_to_string(path).map_err(|source| {
        log::error!("failed to open file: \"{}\"", path.display());
        ResourceError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}
