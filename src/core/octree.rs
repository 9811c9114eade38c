// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;

const DEFAULT_MAX_LEAF_SIZE: usize = 8;
const DEFAULT_MAX_DEPTH: usize = 10;
const BOUNDS_PADDING: Float = 1e-4;

#[derive(Clone)]
struct OctreeNode {
    bounds: AABB,
    children: Vec<usize>,
    primitives: Vec<usize>,
}

impl OctreeNode {
    fn leaf(bounds: AABB, primitives: Vec<usize>) -> Self {
        Self { bounds, children: Vec::new(), primitives }
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Eight-way spatial subdivision over primitive bounds. A primitive is
/// referenced by every leaf its bounds overlap; intersection itself is
/// delegated to a callback.
pub struct Octree {
    nodes: Vec<OctreeNode>,
    prim_bounds: Vec<AABB>,
    max_leaf_size: usize,
    max_depth: usize,
}

impl Octree {
    pub fn new(prim_bounds: Vec<AABB>) -> Self {
        Self::with_limits(prim_bounds, DEFAULT_MAX_LEAF_SIZE, DEFAULT_MAX_DEPTH)
    }

    pub fn with_limits(prim_bounds: Vec<AABB>, max_leaf_size: usize, max_depth: usize) -> Self {
        let mut octree = Self {
            nodes: Vec::new(),
            prim_bounds,
            max_leaf_size: max_leaf_size.max(1),
            max_depth,
        };

        if !octree.prim_bounds.is_empty() {
            let mut bounds = AABB::default();
            for b in &octree.prim_bounds {
                bounds.expand_by_aabb(b);
            }
            let primitives: Vec<usize> = (0..octree.prim_bounds.len()).collect();
            octree.build(bounds.padded(BOUNDS_PADDING), primitives, 0);
        }

        log::debug!("Octree built: {} primitives, {} nodes.", octree.prim_bounds.len(), octree.nodes.len());
        octree
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn build(&mut self, bounds: AABB, primitives: Vec<usize>, depth: usize) -> usize {
        let node_idx = self.nodes.len();
        if primitives.len() <= self.max_leaf_size || depth >= self.max_depth {
            self.nodes.push(OctreeNode::leaf(bounds, primitives));
            return node_idx;
        }

        let mut child_sets: Vec<(AABB, Vec<usize>)> = Vec::with_capacity(8);
        for octant in 0..8 {
            let child_bounds = bounds.octant(octant);
            let inside: Vec<usize> = primitives
                .iter()
                .copied()
                .filter(|idx| self.prim_bounds[*idx].overlaps(&child_bounds))
                .collect();
            if !inside.is_empty() {
                child_sets.push((child_bounds, inside));
            }
        }

        // Splitting that leaves every primitive in every child gains nothing.
        if child_sets.iter().all(|(_, inside)| inside.len() == primitives.len()) {
            self.nodes.push(OctreeNode::leaf(bounds, primitives));
            return node_idx;
        }

        self.nodes.push(OctreeNode::leaf(bounds, Vec::new()));
        let mut children = Vec::with_capacity(child_sets.len());
        for (child_bounds, inside) in child_sets {
            children.push(self.build(child_bounds, inside, depth + 1));
        }
        self.nodes[node_idx].children = children;
        node_idx
    }

    /// Closest hit reported by `hit_fn`, which returns a payload and its
    /// distance along the ray.
    pub fn ray_intersection<F, T>(&self, ray: &Ray3f, mut hit_fn: F) -> Option<(usize, T)>
    where
        F: FnMut(usize, &Ray3f) -> Option<(T, Float)>,
    {
        let root = self.nodes.first()?;
        let (root_t, _) = root.bounds.ray_intersect_range(ray)?;

        let mut closest: Option<(usize, T)> = None;
        let mut closest_t = std::f32::MAX;
        let mut stack = vec![(0usize, root_t)];

        while let Some((node_idx, t_enter)) = stack.pop() {
            if t_enter > closest_t {
                continue;
            }

            let node = &self.nodes[node_idx];
            if node.is_leaf() {
                for &prim_idx in &node.primitives {
                    if let Some((hit, t)) = hit_fn(prim_idx, ray) {
                        if t < closest_t {
                            closest_t = t;
                            closest = Some((prim_idx, hit));
                        }
                    }
                }
            } else {
                for &child in &node.children {
                    if let Some((t0, _)) = self.nodes[child].bounds.ray_intersect_range(ray) {
                        if t0 <= closest_t {
                            stack.push((child, t0));
                        }
                    }
                }
            }
        }

        closest
    }
}
