// Copyright @yucwang 2023

use crate::core::rng::Sampler;
use crate::materials::dielectric::Dielectric;
use crate::materials::lambertian::Lambertian;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Which branch of a BSDF produced a sampled direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampledLobe {
    Diffuse,
    Reflection,
    Transmission,
    /// Degenerate sample (total internal reflection, back-facing
    /// microfacet, grazing angle); contributes nothing.
    Absorbed,
}

// Definitions of types used in BSDF sampling and eval
// processes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BSDFSampleRecord {
    /// Sampled incident direction in world space.
    pub wi: Vector3f,
    /// The value the estimator divides by. A solid-angle density for
    /// diffuse samples, the lobe selection probability for dielectric ones.
    pub pdf: Float,
    pub lobe: SampledLobe,
}

impl Default for BSDFSampleRecord {
    fn default() -> Self {
        Self::absorbed()
    }
}

impl BSDFSampleRecord {
    pub fn new(wi: Vector3f, pdf: Float, lobe: SampledLobe) -> Self {
        Self { wi, pdf, lobe }
    }

    pub fn absorbed() -> Self {
        Self { wi: Vector3f::zeros(), pdf: 0.0, lobe: SampledLobe::Absorbed }
    }

    pub fn is_valid(&self) -> bool {
        self.lobe != SampledLobe::Absorbed && self.pdf > 0.0 && self.pdf.is_finite()
    }
}

/// Closed set of surface models a triangle can reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Dielectric(Dielectric),
}

impl Material {
    pub fn name(&self) -> &'static str {
        match self {
            Material::Lambertian(_) => "diffuse",
            Material::Dielectric(_) => "roughdielectric",
        }
    }

    /// BSDF value for the world-space pair `(wo, wi)` at normal `n`.
    pub fn eval(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> RGBSpectrum {
        match self {
            Material::Lambertian(lambertian) => lambertian.eval(),
            Material::Dielectric(dielectric) => {
                let f = dielectric.eval(wo, wi, n);
                RGBSpectrum::new(f, f, f)
            }
        }
    }

    /// Draws an incident direction, consuming two uniforms for diffuse
    /// surfaces and three for dielectrics.
    pub fn sample(&self, wo: &Vector3f, n: &Vector3f, sampler: &mut dyn Sampler) -> BSDFSampleRecord {
        match self {
            Material::Lambertian(lambertian) => lambertian.sample(n, &sampler.next2d()),
            Material::Dielectric(dielectric) => dielectric.sample(wo, n, &sampler.next3d()),
        }
    }

    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f, n: &Vector3f) -> Float {
        match self {
            Material::Lambertian(lambertian) => lambertian.pdf(wo, wi, n),
            Material::Dielectric(dielectric) => dielectric.pdf(wo, wi, n),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(lambertian: Lambertian) -> Self {
        Material::Lambertian(lambertian)
    }
}

impl From<Dielectric> for Material {
    fn from(dielectric: Dielectric) -> Self {
        Material::Dielectric(dielectric)
    }
}
