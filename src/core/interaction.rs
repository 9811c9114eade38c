// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector3f };
use crate::shapes::triangle::Triangle;

/// Nearest intersection along a ray. Only produced for actual hits, so the
/// distance and triangle are always meaningful.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    pub t: Float,
    pub position: Vector3f,
    pub triangle: &'a Triangle,
    pub triangle_index: usize,
}

impl<'a> Hit<'a> {
    pub fn is_emitter(&self) -> bool {
        self.triangle.is_emitter()
    }

    pub fn normal(&self) -> Vector3f {
        self.triangle.face_normal
    }
}

/// A path vertex: where the path is, which way it leaves, and what it sits on.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint<'a> {
    pub position: Vector3f,
    pub wo: Vector3f,
    pub triangle: &'a Triangle,
}

impl<'a> SurfacePoint<'a> {
    pub fn new(position: Vector3f, wo: Vector3f, triangle: &'a Triangle) -> Self {
        Self { position, wo, triangle }
    }

    /// Vertex at `hit`, seen from the direction the ray came in along.
    pub fn from_hit(hit: &Hit<'a>, ray_dir: &Vector3f) -> Self {
        Self::new(hit.position, -ray_dir, hit.triangle)
    }

    pub fn normal(&self) -> Vector3f {
        self.triangle.face_normal
    }
}
