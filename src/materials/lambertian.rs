// Copyright @yucwang 2023

use crate::core::bsdf::{ BSDFSampleRecord, SampledLobe };
use crate::math::constants::{ Float, INV_PI, Vector2f, Vector3f };
use crate::math::frame::from_local;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ sample_uniform_hemisphere, sample_uniform_hemisphere_pdf };

/// Ideal diffuse reflector.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    pub albedo: RGBSpectrum,
}

impl Lambertian {
    pub fn new(albedo: RGBSpectrum) -> Self {
        Self { albedo }
    }

    /// Direction independent, `albedo / π`.
    pub fn eval(&self) -> RGBSpectrum {
        self.albedo * INV_PI
    }

    /// Uniform hemisphere sample around `normal`. The returned pdf is the
    /// constant `1 / 2π`, not a cosine density.
    pub fn sample(&self, normal: &Vector3f, u: &Vector2f) -> BSDFSampleRecord {
        let local = sample_uniform_hemisphere(u).normalize();
        let wi = from_local(&local, normal);

        BSDFSampleRecord::new(wi, sample_uniform_hemisphere_pdf(), SampledLobe::Diffuse)
    }

    /// Standalone density query, kept separate from `sample`: zero when
    /// `wo` is below the surface, `1 / 4π` otherwise. The integrator never
    /// reweights sampled directions with it.
    pub fn pdf(&self, wo: &Vector3f, _wi: &Vector3f, normal: &Vector3f) -> Float {
        if wo.dot(normal) < 0.0 {
            return 0.0;
        }
        INV_PI / 4.0
    }
}
