// Copyright @yucwang 2023

use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::{ self, RGBSpectrum };

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub v0: Vector3f,
    pub v1: Vector3f,
    pub v2: Vector3f,
    pub face_normal: Vector3f,
    pub emission: RGBSpectrum,
    pub material_id: usize,
}

impl Triangle {
    /// Face normal follows the counter-clockwise winding `v0, v1, v2`.
    pub fn new(v0: Vector3f, v1: Vector3f, v2: Vector3f, material_id: usize) -> Self {
        let face_normal = (v1 - v0).cross(&(v2 - v0)).normalize();
        Triangle {
            v0,
            v1,
            v2,
            face_normal,
            emission: RGBSpectrum::zeros(),
            material_id,
        }
    }

    pub fn with_normal(mut self, face_normal: Vector3f) -> Self {
        self.face_normal = face_normal.normalize();
        self
    }

    pub fn with_emission(mut self, emission: RGBSpectrum) -> Self {
        self.emission = emission;
        self
    }

    pub fn is_emitter(&self) -> bool {
        !spectrum::is_black(&self.emission)
    }

    pub fn bounding_box(&self) -> AABB {
        let mut bound = AABB::new(self.v0, self.v1);
        bound.expand_by_point(&self.v2);

        bound
    }

    pub fn surface_area(&self) -> Float {
        0.5 * (self.v1 - self.v0).cross(&(self.v2 - self.v0)).norm()
    }

    /// Möller–Trumbore test; returns the hit distance inside the ray segment.
    /// Both faces are hit.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<Float> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        let h = ray.dir().cross(&edge2);
        let det = edge1.dot(&h);
        if det.abs() < 1e-12 {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = inv_det * s.dot(&h);
        if u < 0.0 || u > 1.0 {
            return None;
        }

        let q = s.cross(&edge1);
        let v = inv_det * ray.dir().dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(&q);
        if ray.test_segment(t) {
            Some(t)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Triangle {
        Triangle::new(Vector3f::new(1.0, 1.0, 0.0),
                      Vector3f::new(2.0, 1.0, 0.0),
                      Vector3f::new(2.0, 2.0, 0.0),
                      3)
    }

    #[test]
    fn test_bounding_box1() {
        let triangle = Triangle::new(Vector3f::new(1.0, 1.0, 1.0),
                                     Vector3f::new(1.5, 4.0, -1.0),
                                     Vector3f::new(-1.0, 2.0, 2.5),
                                     0);
        let bounding_box = triangle.bounding_box();

        assert_eq!(bounding_box.p_min, Vector3f::new(-1.0, 1.0, -1.0));
        assert_eq!(bounding_box.p_max, Vector3f::new(1.5, 4.0, 2.5));
    }

    #[test]
    fn test_winding_normal_and_area() {
        let triangle = unit_triangle();
        assert_eq!(triangle.face_normal, Vector3f::new(0.0, 0.0, 1.0));
        assert!((triangle.surface_area() - 0.5).abs() < 1e-6);
        assert!(!triangle.is_emitter());
        assert!(triangle.clone().with_emission(Vector3f::new(1.0, 0.0, 0.0)).is_emitter());
    }

    #[test]
    fn test_ray_intersection() {
        let triangle = unit_triangle();

        let ray1 = Ray3f::new(Vector3f::new(1.7, 1.1, 3.0),
            Vector3f::new(0.0, 0.0, -1.0),
            None,
            None);
        let ray2 = Ray3f::new(Vector3f::new(1.7, 1.1, 3.0),
            Vector3f::new(0.0, 0.0, 1.0),
            None,
            None);
        let ray3 = Ray3f::new(Vector3f::new(1.2, 1.9, 3.0),
            Vector3f::new(0.0, 0.0, -1.0),
            None,
            None);
        let from_below = Ray3f::new(Vector3f::new(1.7, 1.1, -2.0),
            Vector3f::new(0.0, 0.0, 1.0),
            None,
            None);

        let t1 = triangle.ray_intersection(&ray1).expect("expected a hit");
        assert!((t1 - 3.0).abs() < 1e-5);
        assert!(triangle.ray_intersection(&ray2).is_none());
        assert!(triangle.ray_intersection(&ray3).is_none());
        let t4 = triangle.ray_intersection(&from_below).expect("back faces are hit");
        assert!((t4 - 2.0).abs() < 1e-5);
    }
}
