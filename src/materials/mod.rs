// Copyright @yucwang 2026

pub mod dielectric;
pub mod lambertian;
pub mod microfacet;
