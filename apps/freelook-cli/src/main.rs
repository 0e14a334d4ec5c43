mod script;

use anyhow::Context;
use clap::{Parser, Subcommand};
use freelook_camera::Camera;
use freelook_common::SandboxConfig;
use freelook_render::{DebugTextRenderer, Renderer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "freelook-cli", about = "Headless driver for the free-look camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Print the default configuration as JSON, or write it to a file
    Config {
        /// Write to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replay a JSON input script against the camera and print the resulting view
    Replay {
        /// Script file: a JSON array of `{ "dt": seconds, "events": [...] }` frames
        #[arg(short, long)]
        script: PathBuf,
        /// Configuration file providing the camera settings
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Viewport aspect ratio used for the projection
        #[arg(short, long, default_value = "1.3333334")]
        aspect: f32,
        /// Print the view after every frame instead of only the last
        #[arg(long)]
        every_frame: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("freelook-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", freelook_render::crate_info());
            let cam = Camera::default();
            println!(
                "camera defaults: fov={} [{}, {}] move={} look={}",
                cam.fov(),
                cam.min_fov(),
                cam.max_fov(),
                cam.move_speed(),
                cam.look_speed()
            );
        }
        Commands::Config { output } => {
            let config = SandboxConfig::default();
            match output {
                Some(path) => {
                    config
                        .save(&path)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("wrote default config to {}", path.display());
                }
                None => println!("{}", config.to_json()?),
            }
        }
        Commands::Replay {
            script,
            config,
            aspect,
            every_frame,
        } => {
            let config = SandboxConfig::load_or_default(config.as_deref())
                .context("failed to load configuration")?;
            let frames = script::load(&script)?;
            tracing::info!("replaying {} frames from {}", frames.len(), script.display());

            let mut camera = Camera::from_settings(&config.camera);
            let views = script::replay(&mut camera, &frames, aspect);

            let renderer = DebugTextRenderer::new();
            if every_frame {
                for (i, view) in views.iter().enumerate() {
                    println!("--- frame {i} ---");
                    print!("{}", renderer.render(view));
                }
            } else if let Some(view) = views.last() {
                print!("{}", renderer.render(view));
            } else {
                println!("script contained no frames");
            }
        }
    }

    Ok(())
}
