// Copyright @yucwang 2026

use crate::core::bsdf::Material;
use crate::core::interaction::Hit;
use crate::core::octree::Octree;
use crate::emitters::area::AreaLight;
use crate::math::aabb::AABB;
use crate::math::constants::Vector3f;
use crate::math::ray::Ray3f;
use crate::shapes::triangle::Triangle;

/// Immutable render input: triangles, the materials they index, the area
/// light and the octree over the triangles. Shared by reference between
/// render workers.
pub struct Scene {
    triangles: Vec<Triangle>,
    materials: Vec<Material>,
    light: AreaLight,
    octree: Octree,
    scene_bounds: AABB,
}

impl Scene {
    /// Builds the acceleration structure over `triangles` as given. The
    /// light is only sampled; it is visible to rays only if its triangles
    /// are part of `triangles`.
    pub fn new(triangles: Vec<Triangle>, materials: Vec<Material>, light: AreaLight) -> Self {
        let prim_bounds: Vec<AABB> = triangles.iter().map(|t| t.bounding_box()).collect();
        let mut scene_bounds = AABB::default();
        for b in &prim_bounds {
            scene_bounds.expand_by_aabb(b);
        }

        let octree = Octree::new(prim_bounds);
        log::info!("Scene built: {} triangles, {} materials, {} octree nodes.",
                   triangles.len(), materials.len(), octree.node_count());

        Self { triangles, materials, light, octree, scene_bounds }
    }

    /// Same as `new`, with the light's two emissive triangles put in front.
    pub fn with_light_geometry(triangles: Vec<Triangle>, materials: Vec<Material>, light: AreaLight) -> Self {
        let mut all = Vec::with_capacity(triangles.len() + 2);
        all.extend(light.triangles().iter().cloned());
        all.extend(triangles);
        Self::new(all, materials, light)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn material(&self, material_id: usize) -> Option<&Material> {
        self.materials.get(material_id)
    }

    pub fn light(&self) -> &AreaLight {
        &self.light
    }

    pub fn scene_bounds(&self) -> &AABB {
        &self.scene_bounds
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Nearest intersection with `t > 0` along `direction` from `origin`.
    pub fn closest_hit(&self, origin: &Vector3f, direction: &Vector3f) -> Option<Hit<'_>> {
        let ray = Ray3f::new(*origin, *direction, None, None);
        self.ray_intersection(&ray)
    }

    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<Hit<'_>> {
        let triangles = &self.triangles;
        let (triangle_index, t) = self.octree.ray_intersection(ray, |prim_idx, ray| {
            triangles[prim_idx].ray_intersection(ray).map(|t| (t, t))
        })?;

        Some(Hit {
            t,
            position: ray.at(t),
            triangle: &self.triangles[triangle_index],
            triangle_index,
        })
    }
}
