use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use ray_tracer_core::config::SimulationConfig;

/// Fires a projectile through a constant gravity and wind field and plots
/// its path to a PPM image.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// JSON file with simulation settings
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels
    #[clap(long)]
    width: Option<usize>,

    /// Canvas height in pixels
    #[clap(long)]
    height: Option<usize>,

    /// Launch speed, in units per tick
    #[clap(short, long)]
    speed: Option<f64>,

    /// Where to write the PPM image
    #[clap(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    if let Some(width) = args.width {
        config.canvas_width = width;
    }
    if let Some(height) = args.height {
        config.canvas_height = height;
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    if let Some(output) = args.output {
        config.output = output;
    }

    info!("Simulating on a {}x{} canvas at speed {}",
        config.canvas_width, config.canvas_height, config.speed);

    let mut canvas = config.canvas()?;
    let report = config.simulation().run(&mut canvas, config.trail);
    info!("{} ticks, {} positions plotted, {} off canvas",
        report.ticks, report.plotted, report.skipped);

    canvas.save(&config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;

    Ok(())
}
