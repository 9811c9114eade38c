use madeleine::core::integrator::Integrator;
use madeleine::core::rng::LcgRng;
use madeleine::core::scene_loader::load_scene_with_settings;
use madeleine::core::sensor::Sensor;
use madeleine::integrators::path::{PathIntegrator, PathIntegratorConfig};
use madeleine::math::constants::{Float, Vector2f, Vector3f};
use madeleine::math::spectrum::clamp_sample;
use madeleine::renderers::renderer::RendererConfig;
use madeleine::scenes::box_scene;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <scene.xml|box> <x> <y> [--spp N] [--seed N] [--size N]", args[0]);
        std::process::exit(1);
    }

    let scene_path = &args[1];
    let x: usize = args[2].parse().unwrap_or(0);
    let y: usize = args[3].parse().unwrap_or(0);

    let mut spp: Option<u32> = None;
    let mut seed: Option<u64> = None;
    let mut size: usize = 256;

    let mut i = 4;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                spp = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok());
            }
            "--size" => {
                i += 1;
                size = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(size);
            }
            _ => {}
        }
        i += 1;
    }

    let (scene, camera, mut integrator_config, mut renderer_config) = if scene_path == "box" {
        (box_scene::build_box_scene(Vec::new()),
         box_scene::box_camera(size, size),
         PathIntegratorConfig::default(),
         RendererConfig::default())
    } else {
        let load_result = match load_scene_with_settings(scene_path) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Failed to load scene: {}", e);
                std::process::exit(2);
            }
        };
        let camera = load_result.camera.unwrap_or_else(|| box_scene::box_camera(size, size));
        (load_result.scene, camera, load_result.integrator, load_result.renderer)
    };
    if let Some(spp) = spp {
        integrator_config.samples_per_pixel = spp;
    }
    if let Some(seed) = seed {
        renderer_config.seed = seed;
    }

    if x >= camera.width() || y >= camera.height() {
        eprintln!("Pixel out of bounds: ({}, {}) for size {}x{}", x, y, camera.width(), camera.height());
        std::process::exit(2);
    }

    let integrator = PathIntegrator::new(integrator_config);
    let spp = integrator.samples_per_pixel().max(1);

    // Replay the row stream up to the pixel so the value matches a full render.
    let mut rng = LcgRng::for_stream(renderer_config.seed, y as u64);
    let mut avg = Vector3f::zeros();
    for px in 0..=x {
        let pixel = Vector2f::new(px as Float, y as Float);
        let mut accum = Vector3f::zeros();
        for _ in 0..spp {
            let rgb = integrator.trace_ray_forward(&scene, &camera, pixel, &mut rng);
            accum += clamp_sample(&rgb, renderer_config.max_sample_value);
        }
        avg = accum / (spp as Float);
    }

    println!(
        "pixel ({}, {}) spp={} seed={} -> R {:.6}, G {:.6}, B {:.6}",
        x, y, spp, renderer_config.seed, avg.x, avg.y, avg.z
    );
}
