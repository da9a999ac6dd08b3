//! Window controller.
//!
//! Owns the winit event loop and window, builds the GPU context and
//! renderer once the window exists, and forwards resize and redraw events.

use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::WaveConfig;
use crate::gpu::{DrawOutcome, GpuContext, TextureRenderer, WindowSurface};

const SPEED_STEP: f32 = 0.25;
const INTENSITY_STEP: f32 = 50.0;

/// Open a window and run the wave effect until it is closed.
pub fn run(config: WaveConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = WaveApp::Pending { config };
    let mut error = None;
    let mut handler = Handler {
        app: &mut app,
        error: &mut error,
    };

    event_loop
        .run_app(&mut handler)
        .context("winit event loop terminated with error")?;

    match error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

enum WaveApp {
    Pending {
        config: WaveConfig,
    },
    Running {
        window: Arc<Window>,
        ctx: GpuContext,
        surface: WindowSurface,
        renderer: TextureRenderer,
    },
    Stopped,
}

struct Handler<'a> {
    app: &'a mut WaveApp,
    error: &'a mut Option<anyhow::Error>,
}

impl Handler<'_> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{:#}", err);
        *self.error = Some(err);
        *self.app = WaveApp::Stopped;
        event_loop.exit();
    }
}

fn start(event_loop: &ActiveEventLoop, config: &WaveConfig) -> Result<WaveApp> {
    let attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height));
    let window = Arc::new(
        event_loop
            .create_window(attrs)
            .context("failed to create window")?,
    );

    let (ctx, surface) = pollster::block_on(GpuContext::with_surface(
        window.clone(),
        config.present_mode.to_wgpu(),
    ))
    .context("GPU initialization failed")?;

    let renderer = pollster::block_on(TextureRenderer::new(
        &ctx,
        config,
        surface.format(),
        surface.size(),
    ))
    .context("renderer cannot be initialized")?;

    window.request_redraw();

    Ok(WaveApp::Running {
        window,
        ctx,
        surface,
        renderer,
    })
}

impl ApplicationHandler for Handler<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let WaveApp::Pending { config } = &*self.app else {
            return;
        };
        match start(event_loop, config) {
            Ok(running) => *self.app = running,
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let WaveApp::Running {
            window,
            ctx,
            surface,
            renderer,
        } = &mut *self.app
        else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if surface.resize(&ctx.device, size.width, size.height) {
                    renderer.drawable_size_will_change(size.width, size.height);
                }
                window.request_redraw();
            }
            WindowEvent::Occluded(hidden) => {
                if hidden {
                    log::debug!("Window occluded");
                } else {
                    renderer.reset_timer();
                    window.request_redraw();
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => handle_key(event_loop, renderer, code),
            WindowEvent::RedrawRequested => match renderer.draw(surface) {
                Ok(DrawOutcome::Presented) => {}
                Ok(DrawOutcome::Skipped) => log::debug!("Frame skipped"),
                Err(err) => {
                    self.fail(event_loop, anyhow::Error::new(err).context("draw failed"));
                    return;
                }
            },
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let WaveApp::Running { window, .. } = &*self.app {
            window.request_redraw();
        }
    }
}

fn handle_key(event_loop: &ActiveEventLoop, renderer: &mut TextureRenderer, code: KeyCode) {
    match code {
        KeyCode::Escape => event_loop.exit(),
        KeyCode::ArrowUp | KeyCode::ArrowDown => {
            let step = if code == KeyCode::ArrowUp {
                SPEED_STEP
            } else {
                -SPEED_STEP
            };
            renderer.set_speed(renderer.speed() + step);
            log::info!("speed = {:.2}", renderer.speed());
        }
        KeyCode::ArrowRight | KeyCode::ArrowLeft => {
            let step = if code == KeyCode::ArrowRight {
                INTENSITY_STEP
            } else {
                -INTENSITY_STEP
            };
            renderer.set_intensity(renderer.intensity() + step);
            log::info!("intensity = {:.0}", renderer.intensity());
        }
        _ => {}
    }
}
