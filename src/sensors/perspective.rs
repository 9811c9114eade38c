// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Pinhole camera with an explicit basis. The image plane sits at
/// `focal_distance` along `view`; `right` and `up` span it.
pub struct PerspectiveCamera {
    position: Vector3f,
    view: Vector3f,
    up: Vector3f,
    right: Vector3f,
    focal_distance: Float,
    half_width: Float,
    half_height: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    pub fn new(fov_y_degrees: Float,
               focal_distance: Float,
               position: Vector3f,
               view: Vector3f,
               up: Vector3f,
               right: Vector3f,
               width: usize,
               height: usize) -> Self {
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };
        let half_height = focal_distance * (0.5 * fov_y_degrees.to_radians()).tan();

        Self {
            position,
            view: view.normalize(),
            up: up.normalize(),
            right: right.normalize(),
            focal_distance,
            half_width: aspect * half_height,
            half_height,
            width,
            height,
        }
    }

    /// Same camera and vertical field of view on a film of a new size.
    pub fn with_resolution(mut self, width: usize, height: usize) -> Self {
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };
        self.half_width = aspect * self.half_height;
        self.width = width;
        self.height = height;
        self
    }

    pub fn position(&self) -> Vector3f {
        self.position
    }

    pub fn aspect(&self) -> Float {
        self.half_width / self.half_height
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let sx = 2.0 * u.x - 1.0;
        let sy = 1.0 - 2.0 * u.y;

        let on_plane = self.view * self.focal_distance
            + self.right * (sx * self.half_width)
            + self.up * (sy * self.half_height);
        Ray3f::new(self.position, on_plane, None, None)
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera\n  position: {:?}\n  view: {:?}\n  film: {}x{}",
                self.position, self.view, self.width, self.height)
    }
}
