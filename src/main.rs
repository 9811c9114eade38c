// Copyright 2020 TwoCookingMice

use madeleine::core::scene::Scene;
use madeleine::core::scene_loader::load_scene_with_settings;
use madeleine::core::sensor::Sensor;
use madeleine::integrators::path::{ PathIntegrator, PathIntegratorConfig };
use madeleine::io::obj_utils::{ self, MeshTransform };
use madeleine::io;
use madeleine::renderers::simple::{ Renderer, RendererConfig, SimpleRenderer };
use madeleine::scenes::box_scene;
use madeleine::sensors::perspective::PerspectiveCamera;

use std::env;
use std::process;

const DEFAULT_RESOLUTION: usize = 256;

struct Options {
    spp: Option<u32>,
    seed: Option<u64>,
    width: Option<usize>,
    height: Option<usize>,
    threads: Option<usize>,
    mesh: Option<String>,
    mesh_material: usize,
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        spp: None,
        seed: None,
        width: None,
        height: None,
        threads: None,
        mesh: None,
        mesh_material: box_scene::GLASS_MATERIAL,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--spp" => {
                i += 1;
                options.spp = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--seed" => {
                i += 1;
                options.seed = args.get(i).and_then(|v| v.parse::<u64>().ok());
            }
            "--width" => {
                i += 1;
                options.width = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--height" => {
                i += 1;
                options.height = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--threads" => {
                i += 1;
                options.threads = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--mesh" => {
                i += 1;
                options.mesh = args.get(i).cloned();
            }
            "--mesh-material" => {
                i += 1;
                options.mesh_material = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(options.mesh_material);
            }
            other => log::warn!("Ignoring unknown argument: {}.", other),
        }
        i += 1;
    }
    options
}

/// The built-in enclosure, optionally holding a mesh.
fn load_box(options: &Options) -> Result<(Scene, PerspectiveCamera), String> {
    let extra = match options.mesh.as_ref() {
        Some(path) => obj_utils::load_triangles_from_file(path, options.mesh_material, &MeshTransform::default())
            .map_err(|e| format!("failed to load mesh {}: {}", path, e))?,
        None => Vec::new(),
    };
    let width = options.width.unwrap_or(DEFAULT_RESOLUTION);
    let height = options.height.unwrap_or(width);
    Ok((box_scene::build_box_scene(extra), box_scene::box_camera(width, height)))
}

fn run(input_path: &str, output_path: &str, options: &Options) -> Result<(), String> {
    let mut integrator_config = PathIntegratorConfig::default();
    let mut renderer_config = RendererConfig::default();

    let (scene, camera) = if input_path == "box" {
        load_box(options)?
    } else {
        let load_result = load_scene_with_settings(input_path)
            .map_err(|e| format!("failed to load scene {}: {}", input_path, e))?;
        integrator_config = load_result.integrator;
        renderer_config = load_result.renderer;
        let camera = match load_result.camera {
            Some(camera) => match (options.width, options.height) {
                (None, None) => camera,
                (width, height) => {
                    let width = width.unwrap_or_else(|| camera.width());
                    let height = height.unwrap_or_else(|| camera.height());
                    log::info!("Overriding film size: {}x{}.", width, height);
                    camera.with_resolution(width, height)
                }
            },
            None => {
                let width = options.width.unwrap_or(DEFAULT_RESOLUTION);
                box_scene::box_camera(width, options.height.unwrap_or(width))
            }
        };
        (load_result.scene, camera)
    };

    if let Some(spp) = options.spp {
        integrator_config.samples_per_pixel = spp;
    }
    if let Some(seed) = options.seed {
        renderer_config.seed = seed;
    }
    if options.threads.is_some() {
        renderer_config.threads = options.threads;
    }

    let renderer = SimpleRenderer::new(Box::new(PathIntegrator::new(integrator_config)), renderer_config);
    let image = renderer.render(&scene, &camera);

    io::write_image(&image, output_path).map_err(|e| format!("failed to write {}: {}", output_path, e))?;
    log::info!("Wrote {}.", output_path);
    Ok(())
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <scene.xml|box> <output.exr|output.png> [--spp N] [--seed N] [--width N] [--height N] [--threads N] [--mesh path.obj] [--mesh-material N]", args[0]);
        process::exit(1);
    }

    let options = parse_options(&args[3..]);
    if let Err(msg) = run(&args[1], &args[2], &options) {
        log::error!("{}", msg);
        process::exit(1);
    }
}
