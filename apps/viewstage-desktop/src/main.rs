mod panel;

use anyhow::{Context, Result};
use clap::Parser;
use panel::DebugPanel;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use viewstage_input::{HostEvent, on_resize};
use viewstage_kernel::{FrameClock, FrameScheduler, Stage};
use viewstage_render::{EnvironmentSource, RendererConfig};
use viewstage_render_wgpu::{OrbitControls, WgpuRenderer};
use viewstage_tools::StageInspector;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Pixels of trackpad scroll treated as one wheel line.
const PIXELS_PER_LINE: f64 = 50.0;

#[derive(Parser)]
#[command(name = "viewstage-desktop", about = "Viewstage desktop viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in physical pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in physical pixels
    #[arg(long, default_value = "720")]
    height: u32,

    #[arg(long, default_value = "Viewstage")]
    title: String,

    /// Report the nearest object under the pointer every frame
    #[arg(long)]
    picking: bool,

    /// Equirectangular environment map
    #[arg(long)]
    environment: Option<PathBuf>,

    /// Start with the debug panel hidden
    #[arg(long)]
    no_panel: bool,
}

/// Schedules the next frame through the window's redraw request.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

struct ViewerApp {
    cli: Cli,
    window: Option<Arc<Window>>,
    stage: Option<Stage<WgpuRenderer>>,
    controls: Option<OrbitControls>,
    panel: Option<DebugPanel>,
    fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(cli: Cli) -> Self {
        Self {
            cli,
            window: None,
            stage: None,
            controls: None,
            panel: None,
            fatal: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.cli.title.clone())
            .with_inner_size(PhysicalSize::new(self.cli.width, self.cli.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("creating window")?,
        );

        let size = window.inner_size();
        let config = RendererConfig::default();
        let renderer = pollster::block_on(WgpuRenderer::new(
            window.clone(),
            size.width,
            size.height,
            config,
        ))
        .context("initializing renderer")?;

        match EnvironmentSource::from(self.cli.environment.clone()).load() {
            Ok(Some(map)) => {
                tracing::info!(width = map.width, height = map.height, "environment loaded");
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("environment skipped: {e}"),
        }

        let panel = DebugPanel::new(&window, &renderer, !self.cli.no_panel);
        let mut stage = Stage::new(
            renderer,
            &config,
            on_resize(size.width, size.height, window.scale_factor()),
            FrameClock::new(),
        );
        if self.cli.picking {
            stage.enable_picking(|hit| {
                tracing::debug!(node = %hit.node.short(), distance = hit.distance, "pick");
            });
        }
        let controls = OrbitControls::new(stage.camera());
        stage.start().context("starting render loop")?;

        window.request_redraw();
        self.window = Some(window);
        self.stage = Some(stage);
        self.controls = Some(controls);
        self.panel = Some(panel);
        Ok(())
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("startup failed: {e:#}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let (Some(window), Some(stage), Some(controls), Some(panel)) = (
            &self.window,
            &mut self.stage,
            &mut self.controls,
            &mut self.panel,
        ) else {
            return;
        };

        // Pointer tracking and button releases always reach the scene; the
        // panel only blocks input that would start an interaction.
        let captured = panel.on_window_event(window, &event);

        match event {
            WindowEvent::CloseRequested => {
                stage.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                stage.handle_event(HostEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                stage.handle_event(HostEvent::ScaleFactorChanged(scale_factor));
            }
            WindowEvent::CursorMoved { position, .. } => {
                stage.handle_event(HostEvent::PointerMoved {
                    x: position.x,
                    y: position.y,
                });
                if controls.cursor_moved(position.x, position.y, stage.viewport().height()) {
                    controls.apply(stage.camera_mut());
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                controls.button(state == ElementState::Pressed, captured);
            }
            WindowEvent::MouseWheel { delta, .. } if !captured => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
                };
                controls.zoom(lines);
                controls.apply(stage.camera_mut());
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !captured => match key {
                KeyCode::F1 => panel.toggle(),
                KeyCode::Escape => {
                    stage.stop();
                    event_loop.exit();
                }
                _ => {}
            },
            WindowEvent::RedrawRequested => {
                let Some(frame) = stage.frame(&mut RedrawScheduler(window)).flatten() else {
                    return;
                };
                let summary = StageInspector::summary(stage);
                panel.paint(window, stage.renderer(), &frame, &summary);
                frame.present();
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("viewstage-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp::new(cli);
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
