//! Invitation FX viewer - previews a card's particle effect in a native window
//!
//! Keys: 0 idle, 1-6 confetti/hearts/balloons/sparkles/stars/fireworks,
//! B toggles the backdrop, R reloads the scene document, Esc quits.

mod cli;
mod window_host;

use std::num::NonZeroU32;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cli::Cli;
use femtovg::Canvas;
use femtovg::renderer::OpenGl;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use invite_fx::persistence::{self, WindowState};
use invite_fx::surface::Lifecycle;
use invite_fx::{AnimationSurface, EffectKind, Painter, SceneConfig, config};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{WindowAttributes, WindowId};
use window_host::WindowHost;

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let scene = cli.resolve_scene()?;
    log::info!(
        "scene: {} on {} / {}",
        scene.animation,
        scene.primary_color,
        scene.accent_color
    );

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut handler = AppHandler::new(cli, scene);
    event_loop.run_app(&mut handler).context("event loop failed")?;
    Ok(())
}

struct AppHandler {
    cli: Cli,
    scene: SceneConfig,
    state: Option<AppState>,
}

struct AppState {
    canvas: Canvas<OpenGl>,
    surface: AnimationSurface<WindowHost>,
}

impl AppHandler {
    fn new(cli: Cli, scene: SceneConfig) -> Self {
        Self {
            cli,
            scene,
            state: None,
        }
    }

    /// Command line size, then the last saved size, then the card default
    fn initial_size(&self) -> LogicalSize<f64> {
        let saved = persistence::load_window_state();
        let width = self
            .cli
            .width
            .or(saved.map(|s| s.width))
            .unwrap_or(config::surface::DEFAULT_WIDTH as f64);
        let height = self
            .cli
            .height
            .or(saved.map(|s| s.height))
            .unwrap_or(config::surface::DEFAULT_HEIGHT as f64);
        LogicalSize::new(width, height)
    }

    fn create_state(&self, event_loop: &ActiveEventLoop) -> Result<AppState> {
        let window_attrs = WindowAttributes::default()
            .with_title(format!("Invitation FX - {}", self.scene.animation))
            .with_inner_size(self.initial_size());

        // 4x MSAA keeps particle edges smooth
        let config_template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_multisampling(4);

        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

        let (window, gl_config) = display_builder
            .build(event_loop, config_template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("glutin always offers at least one config")
            })
            .map_err(|e| anyhow!("failed to create window: {e}"))?;

        let window = window.context("window not created")?;
        let gl_display = gl_config.display();
        let raw_handle = window
            .window_handle()
            .context("failed to get window handle")?
            .as_raw();

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(None))
            .build(Some(raw_handle));

        let gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attrs)
                .context("failed to create GL context")?
        };

        let size = window.inner_size();
        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_handle,
            NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
        );

        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &surface_attrs)
                .context("failed to create surface")?
        };

        let gl_context = gl_context
            .make_current(&gl_surface)
            .context("failed to make context current")?;

        // Frames are paced by the display
        if let Err(err) =
            gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
        {
            log::warn!("vsync unavailable, frames are unpaced: {err}");
        }

        let renderer = unsafe {
            OpenGl::new_from_function_cstr(|name| gl_display.get_proc_address(name) as *const _)
                .map_err(|e| anyhow!("failed to create renderer: {e:?}"))?
        };
        let canvas = Canvas::new(renderer).map_err(|e| anyhow!("failed to create canvas: {e:?}"))?;

        let host = WindowHost::new(window, gl_context, gl_surface);
        let mut surface = AnimationSurface::new(host, self.scene.clone());
        surface.set_backdrop(!self.cli.no_backdrop);
        surface.attach();
        surface.host().window().request_redraw();

        Ok(AppState { canvas, surface })
    }

    fn reload_scene(&mut self) {
        let scene = match self.cli.resolve_scene() {
            Ok(scene) => scene,
            Err(err) => {
                log::warn!("keeping current scene: {err:#}");
                return;
            }
        };
        log::info!("reloaded scene: {}", scene.animation);
        if let Some(state) = &mut self.state {
            state.surface.apply_scene(&scene);
            update_title(state);
            state.surface.host().window().request_redraw();
        }
        self.scene = scene;
    }
}

fn update_title(state: &AppState) {
    let title = format!("Invitation FX - {}", state.surface.effect());
    state.surface.host().window().set_title(&title);
}

fn effect_for_key(key: &str) -> Option<EffectKind> {
    match key {
        "0" => Some(EffectKind::None),
        "1" => Some(EffectKind::Confetti),
        "2" => Some(EffectKind::Hearts),
        "3" => Some(EffectKind::Balloons),
        "4" => Some(EffectKind::Sparkles),
        "5" => Some(EffectKind::Stars),
        "6" => Some(EffectKind::Fireworks),
        _ => None,
    }
}

fn save_window_size(state: &AppState) {
    let window = state.surface.host().window();
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    let window_state = WindowState {
        width: size.width,
        height: size.height,
    };
    if let Err(err) = persistence::save_window_state(window_state) {
        log::warn!("failed to save window state: {err}");
    }
}

/// Paint once outside the animation loop (idle effect, expose, backdrop toggle)
fn paint_idle(state: &mut AppState) {
    let AppState { canvas, surface } = state;
    if surface.lifecycle() == Lifecycle::Ready {
        canvas.begin_frame(surface.buffer_size());
        surface.render(canvas);
    } else {
        canvas.begin_frame(surface.host().physical_buffer());
    }
    canvas.end_frame();
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        match self.create_state(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(err) => {
                log::error!("{err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };
        let mut reload = false;

        match event {
            WindowEvent::CloseRequested => {
                save_window_size(state);
                state.surface.detach();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                state.surface.host().sync_drawable(size);
                if state.surface.host().has_resize_listener() {
                    state.surface.on_resize();
                } else {
                    state.surface.refresh_layout();
                }
                state.surface.host().window().request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                // Resized follows with the new physical size
                if state.surface.host().has_resize_listener() {
                    state.surface.on_resize();
                }
            }

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match &event.logical_key {
                    Key::Named(NamedKey::Escape) => {
                        save_window_size(state);
                        state.surface.detach();
                        event_loop.exit();
                    }
                    Key::Character(c) => {
                        let key = c.to_lowercase();
                        if let Some(kind) = effect_for_key(&key) {
                            state.surface.set_effect(kind);
                            update_title(state);
                            state.surface.host().window().request_redraw();
                        } else if key == "b" {
                            let enabled = !state.surface.has_backdrop();
                            state.surface.set_backdrop(enabled);
                            state.surface.host().window().request_redraw();
                        } else if key == "r" {
                            reload = true;
                        }
                    }
                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => {
                if state.surface.host_mut().take_pending_frame().is_some() {
                    let AppState { canvas, surface } = state;
                    surface.on_frame(Some(canvas));
                } else {
                    paint_idle(state);
                }
                state.surface.host().present();
            }

            _ => {}
        }

        if reload {
            self.reload_scene();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        if state.surface.host_mut().take_due_deferred(Instant::now()) {
            state.surface.on_deferred();
            state.surface.host().window().request_redraw();
        }

        // Animation frames come from redraw requests; only the deferred layout needs a timer
        match state.surface.host().deferred_until() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
