use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use lux_renderer::{render_with_progress, Camera, ImageBuffer, PpmWriter, SceneDescription};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

mod cli;
mod logger;

use cli::{Args, OutputTarget};
use logger::init_logger;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let target = args.output_target()?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().next_u64());
    info!("Random seed: {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut scene = match &args.scene {
        Some(path) => SceneDescription::load(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            info!("No scene given, building the book cover scene");
            SceneDescription::book_cover(&mut rng)
        }
    };
    apply_overrides(&args, &mut scene);

    let world = scene.build_world();
    let mut camera = Camera::new(scene.camera);
    info!(
        "Rendering {} objects at width {} with {} spp, max depth {}",
        world.len(),
        camera.config.image_width,
        camera.config.samples_per_pixel,
        camera.config.max_depth
    );

    let start = Instant::now();
    match target {
        OutputTarget::Stdout => {
            let mut sink = PpmWriter::new(BufWriter::new(io::stdout().lock()));
            render_with_progress(&mut camera, &world, &mut rng, &mut sink, &mut report_progress)?;
        }
        OutputTarget::Ppm(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut sink = PpmWriter::new(BufWriter::new(file));
            render_with_progress(&mut camera, &world, &mut rng, &mut sink, &mut report_progress)?;
            info!("Saved PPM to {}", path.display());
        }
        OutputTarget::Png(path) => {
            let mut image = ImageBuffer::default();
            render_with_progress(&mut camera, &world, &mut rng, &mut image, &mut report_progress)?;
            image
                .save_png(&path)
                .with_context(|| format!("Failed to save {}", path.display()))?;
        }
    }

    info!(
        "Rendered {}x{} in {:.2?}",
        camera.image_width(),
        camera.image_height(),
        start.elapsed()
    );
    Ok(())
}

fn report_progress(remaining: u32) {
    info!("Scanlines remaining: {remaining}");
}

fn apply_overrides(args: &Args, scene: &mut SceneDescription) {
    let camera = &mut scene.camera;
    if let Some(width) = args.width {
        camera.image_width = width;
    }
    if let Some(aspect_ratio) = args.aspect_ratio {
        camera.aspect_ratio = aspect_ratio;
    }
    if let Some(samples) = args.samples_per_pixel {
        camera.samples_per_pixel = samples;
    }
    if let Some(max_depth) = args.max_depth {
        camera.max_depth = max_depth;
    }
}
