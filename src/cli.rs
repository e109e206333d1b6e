use clap::{Parser, ValueEnum};
use log::LevelFilter;

use whitted::demo::{self, Demo};
use whitted::error::GeometryError;
use whitted::render::{
    SamplePattern, MULTISAMPLE_2X_PATTERN, MULTISAMPLE_4X_PATTERN, MULTISAMPLE_8X_PATTERN,
    SINGLE_SAMPLE_PATTERN,
};

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DemoScene {
    TwoSpheres,
    Mirrors,
    Table,
    SoftShadows,
}

impl DemoScene {
    pub fn build(self) -> Result<Demo, GeometryError> {
        match self {
            DemoScene::TwoSpheres => demo::two_spheres(),
            DemoScene::Mirrors => demo::mirrors(),
            DemoScene::Table => demo::dining_room(),
            DemoScene::SoftShadows => demo::soft_shadows(),
        }
    }
}

/// Rays per pixel.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Antialiasing {
    #[value(name = "1")]
    X1,
    #[value(name = "2")]
    X2,
    #[value(name = "4")]
    X4,
    #[value(name = "8")]
    X8,
}

impl Antialiasing {
    pub fn pattern(self) -> &'static dyn SamplePattern {
        match self {
            Antialiasing::X1 => &SINGLE_SAMPLE_PATTERN,
            Antialiasing::X2 => &MULTISAMPLE_2X_PATTERN,
            Antialiasing::X4 => &MULTISAMPLE_4X_PATTERN,
            Antialiasing::X8 => &MULTISAMPLE_8X_PATTERN,
        }
    }
}

#[derive(Parser)]
#[command(name = "whitted")]
#[command(about = "Renders a built-in scene with a recursive Whitted ray tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "two-spheres")]
    pub scene: DemoScene,

    /// Image width in pixels
    #[arg(long, default_value = "500")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "500")]
    pub height: u32,

    /// Anti-aliasing samples per pixel
    #[arg(long, short = 's', value_enum, default_value = "1")]
    pub samples: Antialiasing,

    /// Recursion depth for reflected and refracted rays
    #[arg(long, default_value = "10")]
    pub max_level: u32,

    /// Worker threads; defaults to one per core
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub debug_level: LogLevel,
}
