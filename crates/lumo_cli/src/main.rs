use anyhow::{Context, Result};
use clap::Parser;
use lumo_core::{load_obj, Orbiter};
use lumo_renderer::{render, write_hdr, write_png, RasterCamera, Scene};

mod cli;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let mesh = load_obj(&args.mesh)
        .with_context(|| format!("Failed to load mesh {}", args.mesh.display()))?;

    let mut orbiter = if args.auto_camera {
        Orbiter::look_at(&mesh.bounds)
    } else {
        Orbiter::read(&args.orbiter)
            .with_context(|| format!("Failed to read camera {}", args.orbiter.display()))?
    };
    if let Some(fov) = args.fov {
        orbiter.fov = fov;
    }

    let scene = Scene::new(mesh)
        .with_context(|| format!("Can't render {}", args.mesh.display()))?;
    let camera = RasterCamera::from_orbiter(&orbiter, args.width, args.height);

    let image = render(&camera, &scene, &args.render_config());

    let png = args.output.with_extension("png");
    let hdr = args.output.with_extension("hdr");
    write_png(&image, &png).with_context(|| format!("Failed to write {}", png.display()))?;
    write_hdr(&image, &hdr).with_context(|| format!("Failed to write {}", hdr.display()))?;

    Ok(())
}
