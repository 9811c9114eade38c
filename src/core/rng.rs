// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f};

/// Source of independent uniform samples in `[0, 1)`.
pub trait Sampler {
    fn next1d(&mut self) -> Float;

    fn next2d(&mut self) -> Vector2f {
        let x = self.next1d();
        let y = self.next1d();
        Vector2f::new(x, y)
    }

    fn next3d(&mut self) -> Vector3f {
        let x = self.next1d();
        let y = self.next1d();
        let z = self.next1d();
        Vector3f::new(x, y, z)
    }
}

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: seed };
        // Scramble low-entropy seeds such as row indices.
        rng.state = rng.state.wrapping_add(0x9E3779B97F4A7C15);
        rng.next_u32();
        rng
    }

    /// Independent stream for one unit of work (an image row, a pixel).
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        Self::new(seed.rotate_left(32) ^ stream.wrapping_mul(0xD1B54A32D192ED03))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        // Top 24 bits keep the result strictly below one.
        ((self.next_u32() >> 8) as Float) * (1.0 / 16777216.0)
    }
}

impl Sampler for LcgRng {
    fn next1d(&mut self) -> Float {
        self.next_f32()
    }
}
