// Copyright @yucwang 2021

use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::clamp_sample;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub use super::renderer::{Renderer, RendererConfig};

const ROW_LOG_INTERVAL: usize = 25;

/// Row-parallel renderer. Workers pull rows from a shared counter, each row
/// drawing from its own random stream, and send finished rows back to the
/// calling thread which writes them into the image.
pub struct SimpleRenderer {
    integrator: Box<dyn Integrator>,
    config: RendererConfig,
    cancel: Option<Arc<AtomicBool>>,
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor) -> Bitmap {
        let width = sensor.width();
        let height = sensor.height();
        if width == 0 || height == 0 {
            return Bitmap::new(0, 0);
        }
        let spp = match self.integrator.samples_per_pixel() {
            0 => 1,
            v => v,
        };
        let inv_spp = 1.0 / (spp as Float);
        let max_value = self.config.max_sample_value;
        let seed = self.config.seed;

        let integrator_ref: &dyn Integrator = self.integrator.as_ref();
        let cancel = self.cancel.clone();

        log::info!("Rendering started: {}x{}, {} spp, {} threads.", width, height, spp, self.config.thread_count());

        let progress = ProgressBar::new(height as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rows")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_row = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel::<(usize, Vec<Vector3f>)>();
        let mut bitmap = Bitmap::new(width, height);
        let mut finished_rows = 0usize;

        thread::scope(|scope| {
            for _ in 0..self.config.thread_count() {
                let next_row = Arc::clone(&next_row);
                let tx = tx.clone();
                let cancel = cancel.clone();
                scope.spawn(move || {
                    loop {
                        if let Some(flag) = cancel.as_ref() {
                            if flag.load(Ordering::Relaxed) {
                                break;
                            }
                        }

                        let y = next_row.fetch_add(1, Ordering::Relaxed);
                        if y >= height {
                            break;
                        }

                        let mut rng = LcgRng::for_stream(seed, y as u64);
                        let mut row = vec![Vector3f::zeros(); width];
                        for (x, pixel_value) in row.iter_mut().enumerate() {
                            let pixel = Vector2f::new(x as Float, y as Float);
                            let mut color = Vector3f::zeros();
                            for _sample in 0..spp {
                                let rgb = integrator_ref.trace_ray_forward(scene, sensor, pixel, &mut rng);
                                color += clamp_sample(&rgb, max_value);
                            }
                            *pixel_value = color * inv_spp;
                        }

                        if tx.send((y, row)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for (y, row) in rx.iter() {
                bitmap.row_mut(y).copy_from_slice(&row);
                finished_rows += 1;
                if y % ROW_LOG_INTERVAL == 0 {
                    log::info!("Finished row {}.", y);
                }
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        if finished_rows < height {
            log::warn!("Rendering cancelled: {} of {} rows finished.", finished_rows, height);
        } else {
            log::info!("Rendering finished.");
        }
        bitmap
    }
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, config: RendererConfig) -> Self {
        Self {
            integrator,
            config,
            cancel: None,
        }
    }

    /// Rows not yet started when `flag` becomes true are skipped and stay black.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}
