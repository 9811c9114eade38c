// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

#[derive(Debug, Clone, Copy)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(std::f32::MAX)}
    }

    /// Starts a ray just off a surface, on the side `d` leaves towards.
    pub fn spawn(p: Vector3f, n: Vector3f, d: Vector3f, offset: Float) -> Self {
        let side = if n.dot(&d) < 0.0 { -1.0 } else { 1.0 };
        Self::new(p + n * (offset * side), d, None, None)
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn update(&mut self, t: Float) -> bool {
        if t < self.min_t || t > self.max_t {
            false
        } else {
            self.max_t = t;
            true
        }
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t > self.min_t && t <= self.max_t
    }
}

#[cfg(test)]
mod tests {
    use super::Vector3f;
    use super::{Ray3f};

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 1.0);
        let mut ray = Ray3f::new(o, d, None, None);
        assert_eq!(o, ray.origin());

        let v1 = ray.at(2.0);
        assert!((v1[0] - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert!((v1[1] - 0.0).abs() < 1e-6);
        assert!((v1[2] - std::f32::consts::SQRT_2).abs() < 1e-6);

        let status1 = ray.update(100.0);
        let status2 = ray.update(105.0);
        assert_eq!(status1, true);
        assert_eq!(status2, false);
    }

    #[test]
    fn test_spawn_offsets_towards_direction() {
        let p = Vector3f::new(0.0, 0.0, 0.0);
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let up = Ray3f::spawn(p, n, Vector3f::new(0.0, 1.0, 1.0), 1e-3);
        let down = Ray3f::spawn(p, n, Vector3f::new(0.0, 1.0, -1.0), 1e-3);
        assert!((up.origin().z - 1e-3).abs() < 1e-7);
        assert!((down.origin().z + 1e-3).abs() < 1e-7);
    }
}
