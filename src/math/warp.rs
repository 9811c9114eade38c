// Copyright @yucwang 2023

use super::constants::{ INV_TWO_PI, PI, Float, Vector2f, Vector3f };

/// Uniform direction on the +z hemisphere; `u.x` is the cosine.
pub fn sample_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1. - z * z).max(0.0).sqrt();
    let phi: Float = 2. * PI * u.y;

    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

pub fn sample_uniform_hemisphere_pdf() -> Float {
    INV_TWO_PI
}
