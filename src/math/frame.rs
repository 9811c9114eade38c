// Copyright @yucwang 2023

use super::constants::{ Float, Vector3f };

/// Orthonormal shading frame whose z axis is the surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub t: Vector3f,
    pub b: Vector3f,
    pub n: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            t: Vector3f::new(1.0, 0.0, 0.0),
            b: Vector3f::new(0.0, 1.0, 0.0),
            n: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    pub fn from_normal(n: &Vector3f) -> Frame {
        let (t, b) = coordinate_system(n);
        Frame { t, b, n: *n }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.t), v.dot(&self.b), v.dot(&self.n))
    }

    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        v.x * self.t + v.y * self.b + v.z * self.n
    }
}

/// Builds `(t, b)` so that `(t, b, n)` is a right-handed orthonormal basis.
/// Branchless in the sign of `n.z`, so poles do not divide by a tiny number.
pub fn coordinate_system(n: &Vector3f) -> (Vector3f, Vector3f) {
    let sign: Float = (1.0 as Float).copysign(n.z);
    let a = -1.0 / (sign + n.z);
    let b = n.x * n.y * a;
    (Vector3f::new(1.0 + sign * n.x * n.x * a, sign * b, -sign * n.x),
     Vector3f::new(b, sign + n.y * n.y * a, -n.y))
}

pub fn to_local(v: &Vector3f, n: &Vector3f) -> Vector3f {
    Frame::from_normal(n).to_local(v)
}

pub fn from_local(v: &Vector3f, n: &Vector3f) -> Vector3f {
    Frame::from_normal(n).from_local(v)
}

/// `incident` points towards the surface.
pub fn mirror_reflect(incident: &Vector3f, normal: &Vector3f) -> Vector3f {
    incident - 2.0 * incident.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normals() -> Vec<Vector3f> {
        vec![
            Vector3f::new(0.0, 0.0, 1.0),
            Vector3f::new(0.0, 0.0, -1.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            Vector3f::new(1e-4, -2e-4, -1.0).normalize(),
            Vector3f::new(0.3, -0.7, 0.2).normalize(),
            Vector3f::new(-0.5, 0.5, 0.7).normalize(),
        ]
    }

    #[test]
    fn test_coordinate_system_orthonormal() {
        for n in normals() {
            let (t, b) = coordinate_system(&n);
            assert!((t.norm() - 1.0).abs() < 1e-5);
            assert!((b.norm() - 1.0).abs() < 1e-5);
            assert!(t.dot(&b).abs() < 1e-5);
            assert!(t.dot(&n).abs() < 1e-5);
            assert!(b.dot(&n).abs() < 1e-5);
            assert!((t.cross(&b) - n).norm() < 1e-4);
        }
    }

    #[test]
    fn test_frame_round_trip() {
        let v = Vector3f::new(0.25, -1.5, 3.0);
        for n in normals() {
            let back = to_local(&from_local(&v, &n), &n);
            assert!((back - v).norm() < 1e-5 * v.norm().max(1.0));
        }
    }

    #[test]
    fn test_local_z_is_normal() {
        let n = Vector3f::new(0.3, -0.7, 0.2).normalize();
        let z = from_local(&Vector3f::new(0.0, 0.0, 1.0), &n);
        assert!((z - n).norm() < 1e-6);
        assert!((to_local(&n, &n).z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mirror_reflect() {
        let n = Vector3f::new(0.0, 0.0, 1.0);
        let d = Vector3f::new(1.0, 0.0, -1.0).normalize();
        let r = mirror_reflect(&d, &n);
        assert!((r - Vector3f::new(1.0, 0.0, 1.0).normalize()).norm() < 1e-6);
    }
}
