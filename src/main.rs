//! Command line front end: renders one of the built-in scenes and logs a
//! summary of the frame.

use std::error::Error;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info, LevelFilter};

use whitted::render::render_frame;
use whitted::tracer::{RayTracer, TracerConfig};

use crate::cli::Args;

mod cli;

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    }

    let demo = args.scene.build()?;
    let config = TracerConfig { max_level: args.max_level, ..TracerConfig::default() };
    let tracer = RayTracer::with_config(&demo.scene, config);

    info!(target: "app", "Rendering {:?} at {}x{}", demo.scene.name, args.width, args.height);
    let start = Instant::now();
    let picture = render_frame(&demo.camera, &tracer, args.width, args.height, args.samples.pattern());
    info!(target: "app", "Done in {:?}, average color {:?}", start.elapsed(), picture.average());
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(LevelFilter::from(args.debug_level.clone()))
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(target: "app", "{}", err);
            ExitCode::FAILURE
        }
    }
}
