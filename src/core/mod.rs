// Copyright @yucwang 2021

pub mod bsdf;
pub mod integrator;
pub mod interaction;
pub mod octree;
pub mod rng;
pub mod sensor;
pub mod scene;
pub mod scene_loader;
