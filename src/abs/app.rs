//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

use crate::config::WindowConfig;
use crate::error::AppError;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Fields drop in declaration order, so the GL context goes before the window
/// and the window before SDL itself.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub event_pump: sdl2::EventPump,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Creates the window and a current GL context as described by `config`.
    pub fn new(config: &WindowConfig) -> Result<Self, AppError> {
        log::info!("Initialize SDL");
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(config.gl_major, config.gl_minor);
        gl_attr.set_context_flags().forward_compatible().set();
        if config.samples > 0 {
            gl_attr.set_multisample_buffers(1);
            gl_attr.set_multisample_samples(config.samples);
        }

        log::info!("Create window");
        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| AppError::Sdl(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(AppError::Sdl)?;
        window.gl_make_current(&gl_context).map_err(AppError::Sdl)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        if version.is_empty() {
            return Err(AppError::Gl("failed to load OpenGL functions".to_string()));
        }
        log::info!("OpenGL context version: {version}");

        let event_pump = sdl.event_pump().map_err(AppError::Sdl)?;

        Ok(Self {
            gl: Arc::new(gl),
            gl_context,
            window,
            event_pump,
            video_subsystem,
            sdl,
        })
    }

    /// Size of the drawable area in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}
