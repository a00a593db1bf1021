use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumo_renderer::{Integrator, RenderConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// What ends up in the image
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IntegratorArg {
    /// Ambient occlusion
    Ao,
    /// Emission and direct lighting
    Direct,
    /// Ambient occlusion plus direct lighting
    Combined,
}

impl From<IntegratorArg> for Integrator {
    fn from(arg: IntegratorArg) -> Self {
        match arg {
            IntegratorArg::Ao => Integrator::AmbientOcclusion,
            IntegratorArg::Direct => Integrator::Direct,
            IntegratorArg::Combined => Integrator::Combined,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "lumo")]
#[command(about = "Render ambient occlusion and direct lighting of an OBJ scene")]
pub struct Args {
    /// OBJ mesh, with its MTL materials
    #[arg(default_value = "data/cornell.obj")]
    pub mesh: PathBuf,

    /// Orbiter camera file
    #[arg(default_value = "data/cornell_orbiter.txt")]
    pub orbiter: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Samples per pixel
    #[arg(long, short = 's', default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    pub samples: u32,

    /// Vertical field of view in degrees, overrides the camera file [default: 45]
    #[arg(long)]
    pub fov: Option<f32>,

    #[arg(long, value_enum, default_value = "ao")]
    pub integrator: IntegratorArg,

    /// Maximum length of ambient occlusion rays [default: unbounded]
    #[arg(long)]
    pub occlusion_distance: Option<f32>,

    /// Seed for a reproducible render
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads, all cores when unset
    #[arg(long, short = 'j')]
    pub threads: Option<usize>,

    /// Frame the mesh bounds instead of reading the camera file
    #[arg(long)]
    pub auto_camera: bool,

    /// Output file stem, writes <stem>.png and <stem>.hdr
    #[arg(short, long, default_value = "render")]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples,
            integrator: self.integrator.into(),
            occlusion_distance: self.occlusion_distance.unwrap_or(f32::INFINITY),
            seed: self.seed,
        }
    }
}
