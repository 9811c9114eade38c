// Copyright @yucwang 2021

use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::Float;
use std::thread;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub seed: u64,
    /// Per-channel upper bound applied to every radiance sample.
    pub max_sample_value: Float,
    /// Worker count; `None` uses the available parallelism.
    pub threads: Option<usize>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            seed: 190,
            max_sample_value: 50.0,
            threads: None,
        }
    }
}

impl RendererConfig {
    pub fn thread_count(&self) -> usize {
        match self.threads {
            Some(n) if n > 0 => n,
            _ => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        }
    }
}

pub trait Renderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor) -> Bitmap;
}
