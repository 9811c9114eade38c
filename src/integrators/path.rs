// Copyright @yucwang 2026

use crate::core::bsdf::{ Material, SampledLobe };
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfacePoint;
use crate::core::rng::Sampler;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::{ Float, Vector2f, RAY_OFFSET_EPSILON };
use crate::math::ray::Ray3f;
use crate::math::spectrum::{ self, RGBSpectrum };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathIntegratorConfig {
    pub samples_per_pixel: u32,
    /// Probability that a path survives each Russian roulette test.
    pub rr_probability: Float,
    /// Distance continuation and shadow rays start off the surface.
    pub ray_offset: Float,
}

impl Default for PathIntegratorConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 64,
            rr_probability: 0.8,
            ray_offset: RAY_OFFSET_EPSILON,
        }
    }
}

/// Path tracer with next-event estimation on diffuse vertices, BSDF
/// sampling for the indirect bounce and Russian roulette termination.
/// There is no depth cap; paths end on a miss, an emitter hit, a failed
/// roulette test or a degenerate sample.
pub struct PathIntegrator {
    config: PathIntegratorConfig,
}

impl PathIntegrator {
    pub fn new(config: PathIntegratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PathIntegratorConfig {
        &self.config
    }

    /// Radiance arriving along `ray`. Emitters seen directly return their
    /// emission towards the viewer.
    pub fn radiance(&self, scene: &Scene, ray: &Ray3f, sampler: &mut dyn Sampler) -> RGBSpectrum {
        let hit = match scene.ray_intersection(ray) {
            Some(hit) => hit,
            None => return RGBSpectrum::zeros(),
        };

        if hit.is_emitter() {
            return scene.light().eval(&(-ray.dir()));
        }

        self.shade(scene, SurfacePoint::from_hit(&hit, &ray.dir()), sampler)
    }

    /// Radiance leaving `point` towards `point.wo`.
    pub fn shade(&self, scene: &Scene, point: SurfacePoint<'_>, sampler: &mut dyn Sampler) -> RGBSpectrum {
        let p_rr = self.config.rr_probability;
        let mut radiance = RGBSpectrum::zeros();
        let mut throughput = RGBSpectrum::new(1.0, 1.0, 1.0);
        let mut point = point;

        loop {
            let direct = throughput.component_mul(&self.direct_lighting(scene, &point, sampler));
            if spectrum::is_valid(&direct) {
                radiance += direct;
            }

            if sampler.next1d() > p_rr {
                break;
            }

            let material = match scene.material(point.triangle.material_id) {
                Some(material) => material,
                None => break,
            };

            let n = point.normal();
            let record = material.sample(&point.wo, &n, sampler);
            if !record.is_valid() {
                break;
            }

            let ray = Ray3f::spawn(point.position, n, record.wi, self.config.ray_offset);
            let hit = match scene.ray_intersection(&ray) {
                Some(hit) if !hit.is_emitter() => hit,
                _ => break,
            };

            let fr = material.eval(&point.wo, &record.wi, &n);
            let cos_theta = match record.lobe {
                SampledLobe::Diffuse => n.dot(&record.wi).max(0.0),
                _ => n.dot(&record.wi).abs(),
            };

            throughput = throughput.component_mul(&fr) * (cos_theta / (p_rr * record.pdf));
            if !spectrum::is_valid(&throughput) || spectrum::is_black(&throughput) {
                break;
            }

            point = SurfacePoint::from_hit(&hit, &ray.dir());
        }

        radiance
    }

    /// Light-sampled direct term at `point`. The light sample is always
    /// drawn; only diffuse surfaces turn it into a contribution. The nearest
    /// hit towards the sample has to be the light itself.
    pub fn direct_lighting(&self, scene: &Scene, point: &SurfacePoint<'_>, sampler: &mut dyn Sampler) -> RGBSpectrum {
        let light = scene.light();
        let light_sample = light.sample(&sampler.next2d());

        let lambertian = match scene.material(point.triangle.material_id) {
            Some(Material::Lambertian(lambertian)) => lambertian,
            _ => return RGBSpectrum::zeros(),
        };

        let n = point.normal();
        let to_light = light_sample.position - point.position;
        let dist_squared = to_light.norm_squared();
        if dist_squared <= 0.0 || light_sample.pdf <= 0.0 {
            return RGBSpectrum::zeros();
        }
        let wi = to_light / dist_squared.sqrt();

        let shadow_ray = Ray3f::spawn(point.position, n, wi, self.config.ray_offset);
        match scene.ray_intersection(&shadow_ray) {
            Some(hit) if hit.is_emitter() => {}
            _ => return RGBSpectrum::zeros(),
        }

        let cos_theta = n.dot(&wi).max(0.0);
        let cos_light = (-wi).dot(&light_sample.normal).max(0.0);
        if cos_light <= 0.0 {
            return RGBSpectrum::zeros();
        }

        let li = light.eval(&(-wi));
        li.component_mul(&lambertian.eval()) * (cos_theta * cos_light / (light_sample.pdf * dist_squared))
    }
}

impl Integrator for PathIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, sensor: &dyn Sensor, pixel: Vector2f, sampler: &mut dyn Sampler) -> RGBSpectrum {
        let width = sensor.width().max(1) as Float;
        let height = sensor.height().max(1) as Float;
        let u = (pixel.x + sampler.next1d()) / width;
        let v = (pixel.y + sampler.next1d()) / height;

        let ray = sensor.sample_ray(&Vector2f::new(u, v));
        self.radiance(scene, &ray, sampler)
    }

    fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;
    use crate::emitters::area::AreaLight;
    use crate::materials::dielectric::Dielectric;
    use crate::materials::lambertian::Lambertian;
    use crate::math::constants::{ Vector3f, INV_PI };
    use crate::shapes::triangle::Triangle;

    fn quad(z: Float, half: Float, material_id: usize, normal: Vector3f) -> Vec<Triangle> {
        let p0 = Vector3f::new(-half, -half, z);
        let p1 = Vector3f::new(half, -half, z);
        let p2 = Vector3f::new(half, half, z);
        let p3 = Vector3f::new(-half, half, z);
        vec![
            Triangle::new(p0, p1, p2, material_id).with_normal(normal),
            Triangle::new(p0, p2, p3, material_id).with_normal(normal),
        ]
    }

    fn down_light(size: Float, height: Float, radiance: Float) -> AreaLight {
        AreaLight::new(Vector3f::new(-0.5 * size, -0.5 * size, height),
                       Vector3f::new(size, 0.0, 0.0),
                       Vector3f::new(0.0, size, 0.0),
                       Vector3f::new(0.0, 0.0, -1.0),
                       RGBSpectrum::new(radiance, radiance, radiance))
    }

    fn gray(albedo: Float) -> Material {
        Lambertian::new(RGBSpectrum::new(albedo, albedo, albedo)).into()
    }

    fn integrator(rr_probability: Float) -> PathIntegrator {
        PathIntegrator::new(PathIntegratorConfig { rr_probability, ..PathIntegratorConfig::default() })
    }

    fn floor_point<'a>(scene: &'a Scene) -> SurfacePoint<'a> {
        let dir = Vector3f::new(0.0, 0.0, -1.0);
        let hit = scene.closest_hit(&Vector3f::new(0.0, 0.0, 0.1), &dir).expect("floor hit");
        SurfacePoint::from_hit(&hit, &dir)
    }

    #[test]
    fn test_direct_lighting_blocked_by_occluder() {
        let integrator = integrator(0.8);
        let floor = quad(0.0, 2.0, 0, Vector3f::new(0.0, 0.0, 1.0));
        let open = Scene::with_light_geometry(floor.clone(), vec![gray(0.5)], down_light(1.0, 1.0, 1.0));

        let mut rng = LcgRng::new(1);
        let point = floor_point(&open);
        for _ in 0..64 {
            let direct = integrator.direct_lighting(&open, &point, &mut rng);
            assert!(direct.x > 0.0);
        }

        let mut blocked_tris = floor;
        blocked_tris.extend(quad(0.5, 1.5, 0, Vector3f::new(0.0, 0.0, -1.0)));
        let blocked = Scene::with_light_geometry(blocked_tris, vec![gray(0.5)], down_light(1.0, 1.0, 1.0));
        let point = floor_point(&blocked);
        for _ in 0..64 {
            let direct = integrator.direct_lighting(&blocked, &point, &mut rng);
            assert_eq!(direct, RGBSpectrum::zeros());
        }
    }

    #[test]
    fn test_direct_lighting_small_light_analytic() {
        // Small light straight above: E[L] ~ rho / pi * Le * A / d^2.
        let integrator = integrator(0.8);
        let floor = quad(0.0, 2.0, 0, Vector3f::new(0.0, 0.0, 1.0));
        let scene = Scene::with_light_geometry(floor, vec![gray(0.5)], down_light(0.1, 1.0, 1.0));
        let point = floor_point(&scene);

        let mut rng = LcgRng::new(2);
        let count = 4000;
        let mut sum = 0.0;
        for _ in 0..count {
            sum += integrator.direct_lighting(&scene, &point, &mut rng).x;
        }
        let mean = sum / count as Float;
        let expected = 0.5 * INV_PI * 0.01;
        assert!((mean - expected).abs() < 0.02 * expected, "mean {} expected {}", mean, expected);
    }

    /// Unit cube with inward-facing walls, all using material 0.
    fn closed_cube() -> Vec<Triangle> {
        let mut walls = Vec::new();
        for axis in 0..3 {
            let (b, c) = ((axis + 1) % 3, (axis + 2) % 3);
            for &side in [0.0, 1.0].iter() {
                let corner = |u: Float, v: Float| {
                    let mut p = Vector3f::zeros();
                    p[axis] = side;
                    p[b] = u;
                    p[c] = v;
                    p
                };
                let mut normal = Vector3f::zeros();
                normal[axis] = if side == 0.0 { 1.0 } else { -1.0 };

                let (p00, p10, p11, p01) = (corner(0.0, 0.0), corner(1.0, 0.0), corner(1.0, 1.0), corner(0.0, 1.0));
                walls.push(Triangle::new(p00, p10, p11, 0).with_normal(normal));
                walls.push(Triangle::new(p00, p11, p01, 0).with_normal(normal));
            }
        }
        walls
    }

    #[test]
    fn test_russian_roulette_is_unbiased() {
        // Closed gray box around a small down-facing light. Every bounce
        // returns the fraction rho of the light's flux pi * Le * A, so the
        // radiance summed over the walls is rho * Le * A / (1 - rho).
        let albedo: Float = 0.5;
        let radiance: Float = 10.0;
        let light = AreaLight::new(Vector3f::new(0.45, 0.45, 0.9),
                                   Vector3f::new(0.1, 0.0, 0.0),
                                   Vector3f::new(0.0, 0.1, 0.0),
                                   Vector3f::new(0.0, 0.0, -1.0),
                                   RGBSpectrum::new(radiance, radiance, radiance));
        let light_area = light.area();
        let scene = Scene::with_light_geometry(closed_cube(), vec![gray(albedo)], light);
        let wall_area: Float = 6.0;
        let expected = (albedo * radiance * light_area / ((1.0 - albedo) * wall_area)) as f64;

        let estimate = |p_rr: Float, seed: u64| {
            let integrator = integrator(p_rr);
            let mut rng = LcgRng::new(seed);
            let count = 20000;
            let mut sum = 0.0f64;
            for _ in 0..count {
                // Uniform point on the walls.
                let face = ((rng.next1d() * 6.0) as usize).min(5);
                let axis = face / 2;
                let side = (face % 2) as Float;
                let mut p = Vector3f::zeros();
                p[axis] = side;
                p[(axis + 1) % 3] = rng.next1d();
                p[(axis + 2) % 3] = rng.next1d();
                let mut inward = Vector3f::zeros();
                inward[axis] = 1.0 - 2.0 * side;

                let dir = -inward;
                let hit = scene.closest_hit(&(p + inward * 0.01), &dir).expect("wall hit");
                let point = SurfacePoint::from_hit(&hit, &dir);
                sum += integrator.shade(&scene, point, &mut rng).x as f64;
            }
            sum / count as f64
        };

        for &(p_rr, seed) in [(0.8, 10), (0.5, 20)].iter() {
            let mean = estimate(p_rr, seed);
            assert!((mean - expected).abs() < 0.05 * expected,
                    "p_rr {}: mean {} expected {}", p_rr, mean, expected);
        }
    }

    #[test]
    fn test_terminal_cases() {
        let integrator = integrator(0.8);
        let floor = quad(0.0, 2.0, 0, Vector3f::new(0.0, 0.0, 1.0));
        let scene = Scene::with_light_geometry(floor, vec![gray(0.5)], down_light(1.0, 1.0, 7.0));
        let mut rng = LcgRng::new(4);

        let miss = Ray3f::new(Vector3f::new(0.0, 0.0, 0.5), Vector3f::new(1.0, 0.0, 0.0), None, None);
        assert_eq!(integrator.radiance(&scene, &miss, &mut rng), RGBSpectrum::zeros());

        let front = Ray3f::new(Vector3f::new(0.1, 0.1, 0.5), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert_eq!(integrator.radiance(&scene, &front, &mut rng), RGBSpectrum::new(7.0, 7.0, 7.0));

        let behind = Ray3f::new(Vector3f::new(0.1, 0.1, 2.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert_eq!(integrator.radiance(&scene, &behind, &mut rng), RGBSpectrum::zeros());
    }

    #[test]
    fn test_glass_surface_gets_no_direct_term() {
        let integrator = integrator(0.8);
        let floor = quad(0.0, 2.0, 1, Vector3f::new(0.0, 0.0, 1.0));
        let materials = vec![gray(0.5), Dielectric::new(1.5, 0.25).into()];
        let scene = Scene::with_light_geometry(floor, materials, down_light(1.0, 1.0, 1.0));
        let point = floor_point(&scene);

        let mut rng = LcgRng::new(5);
        let mut reference = LcgRng::new(5);
        assert_eq!(integrator.direct_lighting(&scene, &point, &mut rng), RGBSpectrum::zeros());
        // The light sample is still drawn.
        reference.next2d();
        assert_eq!(rng.next1d(), reference.next1d());

        for _ in 0..2000 {
            let value = integrator.shade(&scene, point, &mut rng);
            assert!(spectrum::is_valid(&value));
        }
    }
}
