//! Logo Bounce entry point
//!
//! Loads settings, builds the disk system and renders the frame sequence.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use logo_bounce::renderer::{ConvertRasterizer, NoopRasterizer, Rasterizer};
use logo_bounce::sim::{BoundaryPolicy, DiskSystem};
use logo_bounce::{FrameSequencer, Settings};

fn parse_boundary(s: &str) -> Result<BoundaryPolicy, String> {
    BoundaryPolicy::from_str(s).ok_or_else(|| format!("unknown boundary policy `{s}` (reflect, clamp)"))
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render bouncing logo disks as SVG/raster frames", long_about = None)]
struct Args {
    /// JSON settings file (missing fields use the built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the initial velocities
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// File name prefix for frame artifacts
    #[arg(long)]
    prefix: Option<String>,
    #[arg(long)]
    motion_frames: Option<u32>,
    #[arg(long)]
    dt: Option<f64>,
    /// Wall policy: `reflect` or `clamp`
    #[arg(long, value_parser = parse_boundary)]
    boundary: Option<BoundaryPolicy>,
    /// External converter program
    #[arg(long)]
    converter: Option<String>,
    /// Write SVG frames only
    #[arg(long)]
    no_raster: bool,
    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(dir) = &self.out_dir {
            settings.output.dir = dir.clone();
        }
        if let Some(prefix) = &self.prefix {
            settings.output.prefix = prefix.clone();
        }
        if let Some(frames) = self.motion_frames {
            settings.frames.motion_frames = frames;
        }
        if let Some(dt) = self.dt {
            settings.dt = dt;
        }
        if let Some(boundary) = self.boundary {
            settings.boundary_policy = boundary;
        }
        if let Some(program) = &self.converter {
            settings.raster.program = program.clone();
        }
    }
}

fn run<R: Rasterizer>(settings: &Settings, system: DiskSystem, rasterizer: R) -> Result<()> {
    let mut sequencer = FrameSequencer::new(
        system,
        settings.frames,
        settings.output.clone(),
        settings.style.clone(),
        rasterizer,
    )
    .context("invalid frame plan")?;
    sequencer.run().context("frame sequence aborted")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    args.apply(&mut settings);

    if args.print_config {
        println!("{}", settings.to_json().context("serialize settings")?);
        return Ok(());
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!(
        "Logo Bounce starting: seed {}, boundary {}",
        seed,
        settings.boundary_policy.as_str()
    );
    let system = DiskSystem::seeded(&settings, seed).context("invalid configuration")?;

    if args.no_raster {
        run(&settings, system, NoopRasterizer)
    } else {
        run(&settings, system, ConvertRasterizer::new(settings.raster.clone()))
    }
}
