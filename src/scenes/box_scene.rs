// Copyright @yucwang 2026

use crate::core::bsdf::Material;
use crate::core::scene::Scene;
use crate::emitters::area::AreaLight;
use crate::materials::dielectric::Dielectric;
use crate::materials::lambertian::Lambertian;
use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::triangle::Triangle;

pub const LIGHT_X: Float = 0.195;
pub const LIGHT_Y: Float = -0.355;
pub const LIGHT_Z: Float = 0.545;
pub const LIGHT_LEN_X: Float = 0.16;
pub const LIGHT_LEN_Y: Float = 0.16;
pub const LIGHT_RADIANCE: Float = 50.0;

pub const BACK_MATERIAL: usize = 0;
pub const BOTTOM_MATERIAL: usize = 1;
pub const LEFT_MATERIAL: usize = 2;
pub const RIGHT_MATERIAL: usize = 3;
pub const TOP_MATERIAL: usize = 4;
pub const GLASS_MATERIAL: usize = 5;

const X0: Float = 0.000000133;
const X1: Float = 0.555999935;
const Y0: Float = -0.559199989;
const Y1: Float = -0.000000119;
const Z0: Float = 0.000000040;
const Z1: Float = 0.548799932;

pub fn box_materials() -> Vec<Material> {
    vec![
        Lambertian::new(RGBSpectrum::new(0.0, 1.0, 0.0)).into(),
        Lambertian::new(RGBSpectrum::new(1.0, 0.0, 0.0)).into(),
        Lambertian::new(RGBSpectrum::new(0.0, 0.2117, 0.3765)).into(),
        Lambertian::new(RGBSpectrum::new(0.996, 0.7373, 0.0667)).into(),
        Lambertian::new(RGBSpectrum::new(0.874000013, 0.874000013, 0.875)).into(),
        Dielectric::new(1.5, 0.25).into(),
    ]
}

/// Ceiling light facing down into the box.
pub fn box_light() -> AreaLight {
    AreaLight::new(Vector3f::new(LIGHT_X, LIGHT_Y, LIGHT_Z),
                   Vector3f::new(LIGHT_LEN_X, 0.0, 0.0),
                   Vector3f::new(0.0, LIGHT_LEN_Y, 0.0),
                   Vector3f::new(0.0, 0.0, -1.0),
                   RGBSpectrum::new(LIGHT_RADIANCE, LIGHT_RADIANCE, LIGHT_RADIANCE))
}

fn wall(v0: Vector3f, v1: Vector3f, v2: Vector3f, normal: Vector3f, material_id: usize) -> Triangle {
    Triangle::new(v0, v1, v2, material_id).with_normal(normal)
}

/// Back, floor, both sides and ceiling; the box is open towards +y.
pub fn box_walls() -> Vec<Triangle> {
    let back = Vector3f::new(0.0, 1.0, 0.0);
    let up = Vector3f::new(0.0, 0.0, 1.0);
    let down = Vector3f::new(0.0, 0.0, -1.0);
    let left = Vector3f::new(-1.0, 0.0, 0.0);
    let right = Vector3f::new(1.0, 0.0, 0.0);

    vec![
        wall(Vector3f::new(X0, Y0, Z1), Vector3f::new(X1, Y0, Z0), Vector3f::new(X0, Y0, Z0), back, BACK_MATERIAL),
        wall(Vector3f::new(X0, Y0, Z1), Vector3f::new(X1, Y0, Z1), Vector3f::new(X1, Y0, Z0), back, BACK_MATERIAL),
        wall(Vector3f::new(X0, Y0, Z0), Vector3f::new(X1, Y0, Z0), Vector3f::new(X1, Y1, Z0), up, BOTTOM_MATERIAL),
        wall(Vector3f::new(X0, Y0, Z0), Vector3f::new(X1, Y1, Z0), Vector3f::new(X0, Y1, Z0), up, BOTTOM_MATERIAL),
        wall(Vector3f::new(X1, Y1, Z1), Vector3f::new(X1, Y1, Z0), Vector3f::new(X1, Y0, Z0), left, LEFT_MATERIAL),
        wall(Vector3f::new(X1, Y1, Z1), Vector3f::new(X1, Y0, Z0), Vector3f::new(X1, Y0, Z1), left, LEFT_MATERIAL),
        wall(Vector3f::new(X0, Y0, Z0), Vector3f::new(X0, Y1, Z0), Vector3f::new(X0, Y1, Z1), right, RIGHT_MATERIAL),
        wall(Vector3f::new(X0, Y0, Z0), Vector3f::new(X0, Y1, Z1), Vector3f::new(X0, Y0, Z1), right, RIGHT_MATERIAL),
        wall(Vector3f::new(X0, Y1, Z1), Vector3f::new(X1, Y0, Z1), Vector3f::new(X0, Y0, Z1), down, TOP_MATERIAL),
        wall(Vector3f::new(X0, Y1, Z1), Vector3f::new(X1, Y1, Z1), Vector3f::new(X1, Y0, Z1), down, TOP_MATERIAL),
    ]
}

pub fn box_camera(width: usize, height: usize) -> PerspectiveCamera {
    PerspectiveCamera::new(38.6,
                           0.8,
                           Vector3f::new(0.278, 0.8, 0.2744),
                           Vector3f::new(0.0, -1.0, 0.0),
                           Vector3f::new(0.0, 0.0, 1.0),
                           Vector3f::new(-1.0, 0.0, 0.0),
                           width,
                           height)
}

/// The enclosure with its light, plus any extra geometry such as a mesh
/// tagged with `GLASS_MATERIAL`.
pub fn build_box_scene(extra: Vec<Triangle>) -> Scene {
    let mut triangles = box_walls();
    triangles.extend(extra);
    Scene::with_light_geometry(triangles, box_materials(), box_light())
}
