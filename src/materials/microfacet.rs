// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f, Vector3f, INV_PI, PI};

/// Unpolarised Fresnel reflectance of a dielectric boundary with relative
/// index `eta`. A positive `cos_i` means the ray arrives from outside
/// (entering the denser medium); a negative one means it is leaving.
pub fn fresnel_dielectric(cos_i: Float, eta: Float) -> Float {
    let cos_i = cos_i.max(-1.0).min(1.0);
    let entering = cos_i > 0.0;
    let (eta_i, eta_t) = if entering { (1.0, eta) } else { (eta, 1.0) };
    let cos_i = cos_i.abs();

    let sin_t = eta_i / eta_t * (1.0 - cos_i * cos_i).max(0.0).sqrt();
    if sin_t >= 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin_t * sin_t).max(0.0).sqrt();

    let r_s = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    let r_p = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    let f = 0.5 * (r_s * r_s + r_p * r_p);
    if f.is_finite() { f.max(0.0).min(1.0) } else { 1.0 }
}

/// GGX normal distribution for a microfacet normal `h` in the local frame.
pub fn ggx_d(h: &Vector3f, alpha: Float) -> Float {
    if h.z <= 0.0 {
        return 0.0;
    }
    let cos2 = h.z * h.z;
    let tan2 = (1.0 - cos2).max(0.0) / cos2;
    let a2 = alpha * alpha;
    let root = a2 + tan2;
    a2 * INV_PI / (cos2 * cos2 * root * root)
}

/// Smith masking for one direction; zero when `w` sees the back of `h`.
pub fn ggx_g1(w: &Vector3f, h: &Vector3f, alpha: Float) -> Float {
    if w.dot(h) * w.z <= 0.0 {
        return 0.0;
    }
    let cos2 = w.z * w.z;
    let tan2 = (1.0 - cos2).max(0.0) / cos2;
    if tan2 <= 0.0 {
        return 1.0;
    }
    let root = alpha * tan2.sqrt();
    2.0 / (1.0 + (1.0 + root * root).sqrt())
}

pub fn ggx_g(wo: &Vector3f, wi: &Vector3f, h: &Vector3f, alpha: Float) -> Float {
    ggx_g1(wo, h, alpha) * ggx_g1(wi, h, alpha)
}

/// Draws a microfacet normal proportionally to `D(h) * h.z`.
pub fn sample_ggx(u: &Vector2f, alpha: Float) -> Vector3f {
    let theta = (alpha * u.x.max(0.0).sqrt()).atan2((1.0 - u.x).max(0.0).sqrt());
    let phi = 2.0 * PI * u.y;
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta).normalize()
}

pub fn pdf_ggx(h: &Vector3f, alpha: Float) -> Float {
    ggx_d(h, alpha) * h.z
}
