//! Simple ray tracer example.
//!
//! Renders the three-sphere scene from a seeded generator and saves it as PPM.

use lux_renderer::{
    render_with_progress, Camera, Color, Dielectric, HittableList, Lambertian, Metal, PpmWriter,
    Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let world = build_scene();
    log::info!("Created {} objects", world.len());

    let mut camera = Camera::default()
        .with_image(400, 16.0 / 9.0)
        .with_quality(50, 10)
        .with_position(
            Vec3::new(-2.0, 2.0, 1.0),  // lookfrom
            Vec3::new(0.0, 0.0, -1.0),  // lookat
            Vec3::new(0.0, 1.0, 0.0),   // vup
        )
        .with_lens(20.0, 10.0, 3.4);

    let filename = "output.ppm";
    let mut sink = PpmWriter::new(BufWriter::new(File::create(filename)?));
    let mut rng = StdRng::seed_from_u64(2024);

    let start = std::time::Instant::now();
    render_with_progress(&mut camera, &world, &mut rng, &mut sink, &mut |remaining| {
        if remaining % 25 == 0 {
            log::info!("Scanlines remaining: {remaining}");
        }
    })?;

    log::info!(
        "Rendered {}x{} in {:?}, saved to {}",
        camera.image_width(),
        camera.image_height(),
        start.elapsed(),
        filename
    );
    Ok(())
}

fn build_scene() -> HittableList {
    let mut world = HittableList::new();

    // Ground
    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -100.5, -1.0),
        100.0,
        Lambertian::new(Color::new(0.8, 0.8, 0.0)),
    )));

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.2),
        0.5,
        Lambertian::new(Color::new(0.1, 0.2, 0.5)),
    )));

    // Hollow glass: outer shell plus an inner air bubble
    world.add(Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, Dielectric::new(1.5))));
    world.add(Box::new(Sphere::new(
        Vec3::new(-1.0, 0.0, -1.0),
        0.4,
        Dielectric::new(1.0 / 1.5),
    )));

    world.add(Box::new(Sphere::new(
        Vec3::new(1.0, 0.0, -1.0),
        0.5,
        Metal::new(Color::new(0.8, 0.6, 0.2), 1.0),
    )));

    world
}
