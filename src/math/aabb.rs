// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f, FLOAT_MIN, FLOAT_MAX };
use super::ray::{ Ray3f };

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f
}

impl Default for AABB {
    fn default() -> Self {
        Self { p_min: Vector3f::new(FLOAT_MAX, FLOAT_MAX, FLOAT_MAX),
               p_max: Vector3f::new(FLOAT_MIN, FLOAT_MIN, FLOAT_MIN) }
    }
}

impl AABB {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        Self { p_min: p_min.inf(&p_max), p_max: p_max.sup(&p_min) }
    }

    pub fn center(&self) -> Vector3f {
        0.5 * self.p_min + 0.5 * self.p_max
    }

    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        self.p_min = self.p_min.inf(p);
        self.p_max = self.p_max.sup(p);
    }

    pub fn expand_by_aabb(&mut self, other: &AABB) {
        self.p_min = self.p_min.inf(&other.p_min);
        self.p_max = self.p_max.sup(&other.p_max);
    }

    /// Grows the box by `delta` on every side.
    pub fn padded(&self, delta: Float) -> AABB {
        let pad = Vector3f::new(delta, delta, delta);
        AABB { p_min: self.p_min - pad, p_max: self.p_max + pad }
    }

    pub fn overlaps(&self, other: &AABB) -> bool {
        (0..3).all(|idx| self.p_min[idx] <= other.p_max[idx] && self.p_max[idx] >= other.p_min[idx])
    }

    /// Child box `octant` (bit 0: x, bit 1: y, bit 2: z) of an even
    /// eight-way split around the center.
    pub fn octant(&self, octant: usize) -> AABB {
        let c = self.center();
        let mut p_min = self.p_min;
        let mut p_max = c;
        for idx in 0..3 {
            if octant & (1 << idx) != 0 {
                p_min[idx] = c[idx];
                p_max[idx] = self.p_max[idx];
            }
        }
        AABB { p_min, p_max }
    }

    /// Parametric entry and exit distances of `ray`, clipped to its segment.
    pub fn ray_intersect_range(&self, ray: &Ray3f) -> Option<(Float, Float)> {
        if !self.is_valid() {
            return None;
        }

        let o = ray.origin();
        let d = ray.dir();
        let mut t_min = ray.min_t;
        let mut t_max = ray.max_t;

        for idx in 0..3 {
            let dir = d[idx];
            if dir.abs() < 1e-8 {
                if o[idx] < self.p_min[idx] || o[idx] > self.p_max[idx] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (self.p_min[idx] - o[idx]) * inv;
            let mut t1 = (self.p_max[idx] - o[idx]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        Some((t_min, t_max))
    }

    pub fn is_valid(&self) -> bool {
        (0..3).all(|idx| self.p_min[idx] <= self.p_max[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::AABB;
    use super::Ray3f;
    use super::Vector3f;

    #[test]
    fn test_aabb_geometry() {
        let min = Vector3f::new(1.0, 7.0, 3.0);
        let max = Vector3f::new(4.0, 4.0, 4.0);
        let mut bbox: AABB = AABB::new(min, max);
        assert_eq!(bbox.p_min, Vector3f::new(1.0, 4.0, 3.0));
        assert_eq!(bbox.p_max, Vector3f::new(4.0, 7.0, 4.0));
        assert_eq!(bbox.center(), Vector3f::new(2.5, 5.5, 3.5));

        bbox.expand_by_point(&Vector3f::new(-1.0, 5.0, 6.0));
        assert_eq!(bbox.p_min[0], -1.0);
        assert_eq!(bbox.p_max[2], 6.0);

        let mut bbox1: AABB = AABB::default();
        assert!(!bbox1.is_valid());
        bbox1.expand_by_aabb(&bbox);
        assert_eq!(bbox1, bbox);
    }

    #[test]
    fn test_aabb_octants_cover_parent() {
        let bbox = AABB::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(2.0, 4.0, 6.0));
        let mut union = AABB::default();
        for octant in 0..8 {
            let child = bbox.octant(octant);
            assert_eq!(child.diagonal(), Vector3f::new(1.0, 2.0, 3.0));
            union.expand_by_aabb(&child);
        }
        assert_eq!(union, bbox);
        assert_eq!(bbox.octant(7).p_min, Vector3f::new(1.0, 2.0, 3.0));
        assert!(bbox.octant(0).overlaps(&bbox.octant(7)));
        assert!(!bbox.octant(0).overlaps(&AABB::new(Vector3f::new(1.5, 2.5, 3.5),
                                                    Vector3f::new(2.0, 3.0, 4.0))));
    }

    #[test]
    fn test_aabb_intersect() {
        let o1 = Vector3f::new(0.0, 0.0, 0.0);
        let d1 = Vector3f::new(1.0, 1.0, 1.0);

        let bbox = AABB::new(Vector3f::new(-1.0, -1.0, -1.0),
                             Vector3f::new(1.0, 1.0, 1.0));

        let r1 = Ray3f::new(o1, d1, Some(0.0), Some(1.0));
        let r2 = Ray3f::new(o1, d1, Some(0.0), Some(10.0));
        assert!(bbox.ray_intersect_range(&r1).is_some());
        let (_, t_exit) = bbox.ray_intersect_range(&r2).unwrap();
        assert!((t_exit - 3.0f32.sqrt()).abs() < 1e-5);

        let o2 = Vector3f::new(-1.1, 0.0, 0.0);
        let d2 = Vector3f::new(-0.1, 10.0, 10.0);
        let r3 = Ray3f::new(o2, d2, None, None);
        assert!(bbox.ray_intersect_range(&r3).is_none());
    }
}
