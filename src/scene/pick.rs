//! Ray picking against scene graph primitives.

use crate::math::Ray;

use super::graph::SceneGraph;
use super::node::{NodeContent, SceneNodeId};

/// Result of a successful pick: the nearest primitive along the ray.
#[derive(Clone, Copy, Debug)]
pub struct PickHit {
    pub node: SceneNodeId,
    /// World-space distance from the ray origin to the hit point.
    pub distance: f32,
}

impl SceneGraph {
    /// Find the nearest visible primitive intersected by a world-space ray.
    ///
    /// Transforms the ray into each primitive's local frame and runs the
    /// analytic intersection for its geometry. Group nodes are transparent
    /// to picking. Returns `None` when the ray hits nothing.
    pub fn pick(&mut self, ray: Ray) -> Option<PickHit> {
        self.propagate_transforms(self.root(), glam::Mat4::IDENTITY);

        let mut best: Option<PickHit> = None;
        self.pick_walk(self.root(), ray, &mut best);
        best
    }

    fn pick_walk(&self, node_id: SceneNodeId, ray: Ray, best: &mut Option<PickHit>) {
        let node = match self.get(node_id) {
            Some(n) => n,
            None => return,
        };

        if !node.visible {
            return;
        }

        let local_hit = match node.content {
            NodeContent::Group => None,
            NodeContent::Cylinder { radius, length, .. } => {
                let local_ray = ray.transform(&node.world_transform.inverse());
                local_ray
                    .intersects_cylinder(radius, length)
                    .map(|t| local_ray.at(t))
            }
            NodeContent::Plane { half_extent, .. } => {
                let local_ray = ray.transform(&node.world_transform.inverse());
                local_ray.intersects_quad(half_extent).map(|t| local_ray.at(t))
            }
        };

        if let Some(local_point) = local_hit {
            let world_point = node.world_transform.transform_point3(local_point);
            let distance = (world_point - ray.origin).length();
            if best.map_or(true, |b| distance < b.distance) {
                *best = Some(PickHit {
                    node: node_id,
                    distance,
                });
            }
        }

        for &child in &node.children {
            self.pick_walk(child, ray, best);
        }
    }
}
