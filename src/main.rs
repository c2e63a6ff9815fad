use std::process::ExitCode;

use glow::HasContext;
use sdl2::event::Event;

use glscaffold::abs::App;
use glscaffold::config::Config;
use glscaffold::context::Context;
use glscaffold::error::AppError;
use glscaffold::events;
use glscaffold::input::KeyboardState;
use glscaffold::logging;
use glscaffold::overlay::Overlay;

fn main() -> ExitCode {
    let (config, config_warning) = Config::load();
    if let Err(e) = logging::init(config.level_filter()) {
        eprintln!("failed to initialize logging: {e}");
    }
    if let Some(warning) = config_warning {
        log::warn!("{warning}");
    }

    log::info!("Start program");
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    let mut app = App::new(&config.window)?;
    let mut overlay = Overlay::new(&app.gl)?;
    let mut context = Context::new(&app.gl);
    let mut keyboard = KeyboardState::default();

    let (width, height) = app.drawable_size();
    events::framebuffer_size_changed(&mut context, width as i32, height as i32);

    log::info!("Start main loop");
    'running: loop {
        let pending: Vec<Event> = app.event_pump.poll_iter().collect();
        for event in &pending {
            overlay.handle_event(event);
            if !events::dispatch(event, &mut context, &mut keyboard, || app.drawable_size()) {
                break 'running;
            }
        }

        context.process_input(&keyboard);

        unsafe {
            app.gl.clear_color(0.1, 0.2, 0.3, 0.0);
            app.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        context.render();

        let camera = context.camera().clone();
        let viewport = context.viewport();
        overlay.run(app.drawable_size(), |ctx| {
            egui::Window::new("Camera").show(ctx, |ui| {
                ui.label(format!(
                    "position: ({:.2}, {:.2}, {:.2})",
                    camera.position.x, camera.position.y, camera.position.z
                ));
                ui.label(format!("yaw: {:.1}  pitch: {:.1}", camera.yaw, camera.pitch));
                ui.label(format!("viewport: {} x {}", viewport.width, viewport.height));
            });
        });

        app.window.gl_swap_window();
    }

    drop(context);
    overlay.destroy();
    Ok(())
}
