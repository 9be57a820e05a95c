use anyhow::Context;
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use viewstage_input::{HostEvent, PointerState, on_pointer_move, on_resize};
use viewstage_kernel::{FixedStepTime, FrameClock, FrameRequests, Stage};
use viewstage_render::{DebugTextRenderer, RendererConfig};
use viewstage_tools::StageInspector;

#[derive(Parser)]
#[command(name = "viewstage-cli", about = "Headless driver for the viewstage render loop")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and startup configuration
    Info,
    /// Map a raw pointer position into normalized device coordinates
    Pointer {
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
        /// Raw X in pixels; may be negative or past the width
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
        /// Raw Y in pixels; may be negative or past the height
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Compute the viewport state for a surface size
    Resize {
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[arg(long, default_value = "1.0")]
        pixel_ratio: f64,
    },
    /// Run the render loop headlessly against the debug text renderer
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "60")]
        frames: u64,
        #[arg(long, default_value = "800")]
        width: u32,
        #[arg(long, default_value = "600")]
        height: u32,
        /// Fixed clock step per frame, in milliseconds
        #[arg(long, default_value = "16")]
        step_ms: u64,
        /// Pointer position to feed before the first frame, as X,Y pixels
        #[arg(long, value_parser = parse_point)]
        pointer: Option<(f64, f64)>,
        /// Enable pointer picking
        #[arg(long)]
        picking: bool,
        /// Print a JSON summary instead of the last rendered frame
        #[arg(long)]
        json: bool,
    },
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y: {e}"))?;
    Ok((x, y))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    match cli.command {
        Commands::Info => {
            let cfg = RendererConfig::default();
            println!("viewstage-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "renderer: power={:?} antialias={} depth={} stencil={} clear=#{:06X} output={:?}",
                cfg.power_preference,
                cfg.antialias,
                cfg.depth,
                cfg.stencil,
                cfg.clear_color.to_hex(),
                cfg.output_color_space
            );
        }
        Commands::Pointer {
            width,
            height,
            x,
            y,
        } => {
            let viewport = on_resize(width, height, 1.0);
            // NaN marks "never updated"; a dropped move hands it back untouched.
            let unset = PointerState {
                ndc_x: f32::NAN,
                ndc_y: f32::NAN,
            };
            let pointer = on_pointer_move(unset, x, y, &viewport);
            if pointer.ndc_x.is_nan() {
                println!("({x}, {y}) is outside {width}x{height}: no update");
            } else {
                println!("ndc=({:.5}, {:.5})", pointer.ndc_x, pointer.ndc_y);
            }
        }
        Commands::Resize {
            width,
            height,
            pixel_ratio,
        } => {
            let v = on_resize(width, height, pixel_ratio);
            println!(
                "viewport={}x{} aspect={:.4} dpr={:.2}",
                v.width(),
                v.height(),
                v.aspect_ratio(),
                v.device_pixel_ratio()
            );
        }
        Commands::Simulate {
            frames,
            width,
            height,
            step_ms,
            pointer,
            picking,
            json,
        } => {
            let mut stage = Stage::new(
                DebugTextRenderer::new(),
                &RendererConfig::default(),
                on_resize(width, height, 1.0),
                FrameClock::with_source(FixedStepTime::new(Duration::from_millis(step_ms))),
            );
            if picking {
                stage.enable_picking(|hit| {
                    tracing::debug!(node = %hit.node.short(), distance = hit.distance, "pick");
                });
            }
            stage.start().context("starting render loop")?;
            if let Some((x, y)) = pointer {
                stage.handle_event(HostEvent::PointerMoved { x, y });
            }

            // Each frame requests the next; run until the budget is spent.
            let mut requests = FrameRequests(1);
            let mut last = None;
            while stage.frames() < frames && requests.0 > stage.frames() {
                last = stage.frame(&mut requests);
            }
            stage.stop();

            let summary = StageInspector::summary(&stage);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                if let Some(text) = last {
                    print!("{text}");
                }
                println!("{summary}");
            }
        }
    }

    Ok(())
}
