// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use crate::shapes::triangle::Triangle;

/// A point drawn on the light, with its density over area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLightSample {
    pub position: Vector3f,
    pub normal: Vector3f,
    pub pdf: Float,
}

/// One-sided rectangular emitter spanned by `edge_x` and `edge_y` from
/// `position`, radiating `radiance` into the half space of `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaLight {
    position: Vector3f,
    edge_x: Vector3f,
    edge_y: Vector3f,
    normal: Vector3f,
    radiance: RGBSpectrum,
    inv_area: Float,
}

impl AreaLight {
    pub fn new(position: Vector3f,
               edge_x: Vector3f,
               edge_y: Vector3f,
               normal: Vector3f,
               radiance: RGBSpectrum) -> Self {
        let area = edge_x.cross(&edge_y).norm();
        let inv_area = if area > 0.0 { 1.0 / area } else { 0.0 };

        Self {
            position,
            edge_x,
            edge_y,
            normal: normal.normalize(),
            radiance,
            inv_area,
        }
    }

    pub fn position(&self) -> Vector3f {
        self.position
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn radiance(&self) -> RGBSpectrum {
        self.radiance
    }

    pub fn area(&self) -> Float {
        self.edge_x.cross(&self.edge_y).norm()
    }

    pub fn inv_area(&self) -> Float {
        self.inv_area
    }

    /// Uniform point on the rectangle. The density is per unit area; the
    /// caller converts it to solid angle.
    pub fn sample(&self, u: &Vector2f) -> AreaLightSample {
        AreaLightSample {
            position: self.position + self.edge_x * u.x + self.edge_y * u.y,
            normal: self.normal,
            pdf: self.inv_area,
        }
    }

    /// Radiance leaving the light along `dir`; zero from the back face.
    pub fn eval(&self, dir: &Vector3f) -> RGBSpectrum {
        if dir.dot(&self.normal) > 0.0 {
            self.radiance
        } else {
            RGBSpectrum::zeros()
        }
    }

    /// The two emissive triangles that make the light visible to rays.
    pub fn triangles(&self) -> [Triangle; 2] {
        let p00 = self.position;
        let p10 = self.position + self.edge_x;
        let p01 = self.position + self.edge_y;
        let p11 = self.position + self.edge_x + self.edge_y;

        [
            Triangle::new(p01, p10, p00, 0)
                .with_normal(self.normal)
                .with_emission(self.radiance),
            Triangle::new(p01, p11, p10, 0)
                .with_normal(self.normal)
                .with_emission(self.radiance),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{ LcgRng, Sampler };
    use crate::math::ray::Ray3f;

    fn ceiling_light() -> AreaLight {
        AreaLight::new(Vector3f::new(0.195, -0.355, 0.545),
                       Vector3f::new(0.16, 0.0, 0.0),
                       Vector3f::new(0.0, 0.16, 0.0),
                       Vector3f::new(0.0, 0.0, -1.0),
                       RGBSpectrum::new(50.0, 50.0, 50.0))
    }

    #[test]
    fn test_area_light_sample_in_rectangle() {
        let light = ceiling_light();
        assert!((light.inv_area() - 1.0 / (0.16 * 0.16)).abs() < 1e-2);

        let mut rng = LcgRng::new(7);
        for _ in 0..1000 {
            let s = light.sample(&rng.next2d());
            assert!(s.position.x >= 0.195 && s.position.x <= 0.355 + 1e-6);
            assert!(s.position.y >= -0.355 && s.position.y <= -0.195 + 1e-6);
            assert!((s.position.z - 0.545).abs() < 1e-6);
            assert_eq!(s.normal, Vector3f::new(0.0, 0.0, -1.0));
            assert_eq!(s.pdf, light.inv_area());
        }
    }

    #[test]
    fn test_area_light_is_one_sided() {
        let light = ceiling_light();
        assert_eq!(light.eval(&Vector3f::new(0.0, 0.3, -1.0).normalize()), RGBSpectrum::new(50.0, 50.0, 50.0));
        assert_eq!(light.eval(&Vector3f::new(0.0, 0.0, 1.0)), RGBSpectrum::zeros());
        assert_eq!(light.eval(&Vector3f::new(1.0, 0.0, 0.0)), RGBSpectrum::zeros());
    }

    #[test]
    fn test_area_light_triangles_cover_rectangle() {
        let light = ceiling_light();
        let tris = light.triangles();
        let total: Float = tris.iter().map(|t| t.surface_area()).sum();
        assert!((total - light.area()).abs() < 1e-6);

        let mut rng = LcgRng::new(13);
        for _ in 0..200 {
            let target = light.sample(&rng.next2d()).position;
            let ray = Ray3f::new(target + Vector3f::new(0.0, 0.0, -1.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
            let hits = tris.iter().filter(|t| t.ray_intersection(&ray).is_some()).count();
            assert!(hits >= 1);
        }
        for tri in tris.iter() {
            assert!(tri.is_emitter());
            assert_eq!(tri.face_normal, light.normal());
        }
    }
}
