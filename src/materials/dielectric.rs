// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFSampleRecord, SampledLobe };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::frame::{ from_local, mirror_reflect, to_local };
use crate::materials::microfacet::{ fresnel_dielectric, ggx_d, ggx_g, ggx_g1, pdf_ggx, sample_ggx };

/// Rough dielectric boundary (GGX microfacets). `eta` is the index of the
/// side the normal points away from, relative to the side it points into.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    pub eta: Float,
    pub roughness: Float,
}

impl Dielectric {
    pub fn new(eta: Float, roughness: Float) -> Self {
        Self { eta, roughness }
    }

    pub fn fresnel(&self, cos_theta_i: Float) -> Float {
        fresnel_dielectric(cos_theta_i, self.eta)
    }

    pub fn d(&self, h: &Vector3f) -> Float {
        ggx_d(h, self.roughness)
    }

    pub fn g1(&self, w: &Vector3f, h: &Vector3f) -> Float {
        ggx_g1(w, h, self.roughness)
    }

    pub fn g(&self, wo: &Vector3f, wi: &Vector3f, h: &Vector3f) -> Float {
        ggx_g(wo, wi, h, self.roughness)
    }

    /// Indices of refraction on the sides of `w` (local frame).
    fn side_index(&self, w: &Vector3f) -> Float {
        if w.z < 0.0 { self.eta } else { 1.0 }
    }

    /// Half vector of a local pair, oriented into the upper hemisphere.
    fn half_vector(&self, wo: &Vector3f, wi: &Vector3f) -> Option<Vector3f> {
        let h = if wi.z * wo.z > 0.0 {
            wi + wo
        } else {
            wi * self.side_index(wi) + wo * self.side_index(wo)
        };
        let len = h.norm();
        if len <= 0.0 || !len.is_finite() {
            return None;
        }
        let h = h / len;
        Some(if h.z < 0.0 { -h } else { h })
    }

    /// BSDF value for the pair. In the transmission form `eta_t` is the
    /// index on `wo`'s side and `eta_i` the one on `wi`'s side.
    pub fn eval(&self, wo_world: &Vector3f, wi_world: &Vector3f, n: &Vector3f) -> Float {
        let wo = to_local(wo_world, n).normalize();
        let wi = to_local(wi_world, n).normalize();
        if wo.z == 0.0 || wi.z == 0.0 {
            return 0.0;
        }

        let h = match self.half_vector(&wo, &wi) {
            Some(h) => h,
            None => return 0.0,
        };

        let d = self.d(&h);
        let g = self.g(&wo, &wi, &h);
        let f = self.fresnel(wo.dot(&h));

        let value = if wi.z * wo.z > 0.0 {
            f * d * g / (4.0 * (wi.z * wo.z).abs())
        } else {
            let eta_i = self.side_index(&wi);
            let eta_t = self.side_index(&wo);
            let eta_rel = eta_t / eta_i;
            let i_dot_h = wi.dot(&h);
            let o_dot_h = wo.dot(&h);
            // (eta_i (wi.h) + eta_t (wo.h)) / eta_i
            let denom = i_dot_h + eta_rel * o_dot_h;
            ((1.0 - f) * d * g * eta_rel * eta_rel * i_dot_h * o_dot_h
                / (wi.z * wo.z * denom * denom)).abs()
        };

        if value.is_finite() { value.max(0.0) } else { 0.0 }
    }

    /// Microfacet normal drawn from `D(h) * h.z`, with that density.
    pub fn sample_normal(&self, u: &Vector2f) -> (Vector3f, Float) {
        let h = sample_ggx(u, self.roughness);
        (h, pdf_ggx(&h, self.roughness))
    }

    /// Chooses reflection with probability `F` (selector `u.x`) and
    /// refraction otherwise. The record's `pdf` is that selection
    /// probability; degenerate draws come back absorbed.
    pub fn sample(&self, wo_world: &Vector3f, n: &Vector3f, u: &Vector3f) -> BSDFSampleRecord {
        let wo = to_local(wo_world, n).normalize();
        if wo.z == 0.0 || !wo.z.is_finite() {
            return BSDFSampleRecord::absorbed();
        }

        let (m, _pdf_m) = self.sample_normal(&Vector2f::new(u.y, u.z));
        let cos_o = wo.dot(&m);
        if cos_o * wo.z <= 0.0 {
            return BSDFSampleRecord::absorbed();
        }

        let f = self.fresnel(cos_o);
        if u.x < f {
            let wi = mirror_reflect(&(-wo), &m);
            if wi.z * wo.z <= 0.0 {
                return BSDFSampleRecord::absorbed();
            }
            return BSDFSampleRecord::new(from_local(&wi.normalize(), n), f, SampledLobe::Reflection);
        }

        let entering = cos_o > 0.0;
        let (eta_i, eta_t) = if entering { (1.0, self.eta) } else { (self.eta, 1.0) };
        let eta_eff = eta_i / eta_t;
        let m = if entering { m } else { -m };
        let cos_o = cos_o.abs();

        let sin2_t = eta_eff * eta_eff * (1.0 - cos_o * cos_o).max(0.0);
        if sin2_t >= 1.0 {
            return BSDFSampleRecord::absorbed();
        }
        let cos_t = (1.0 - sin2_t).sqrt();

        let wt = -eta_eff * wo + (eta_eff * cos_o - cos_t) * m;
        if wt.z * wo.z >= 0.0 {
            return BSDFSampleRecord::absorbed();
        }

        BSDFSampleRecord::new(from_local(&wt.normalize(), n), 1.0 - f, SampledLobe::Transmission)
    }

    /// Selection probability of the lobe `wi` belongs to, i.e. the weight
    /// `sample` reports for it.
    pub fn pdf(&self, wo_world: &Vector3f, wi_world: &Vector3f, n: &Vector3f) -> Float {
        let wo = to_local(wo_world, n).normalize();
        let wi = to_local(wi_world, n).normalize();
        if wo.z == 0.0 || wi.z == 0.0 {
            return 0.0;
        }
        let h = match self.half_vector(&wo, &wi) {
            Some(h) => h,
            None => return 0.0,
        };
        let f = self.fresnel(wo.dot(&h));
        if wi.z * wo.z > 0.0 { f } else { 1.0 - f }
    }
}
