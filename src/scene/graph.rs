//! Scene graph — CPU-side hierarchy of nodes.
//!
//! The scene graph organizes primitives with parent/child relationships and
//! parent-relative transforms. Each frame, `flatten()` walks the tree and
//! produces a flat draw list for the renderer. The graph knows nothing about
//! what the primitives mean to its callers; it only composes transforms.

use std::collections::HashMap;

use crate::core::types::{Mat4, Quat, Vec3};

use super::flatten::DrawEntry;
use super::node::{LocalTransform, NodeContent, SceneNode, SceneNodeId};

/// CPU-side scene graph of renderable primitives.
pub struct SceneGraph {
    nodes: HashMap<SceneNodeId, SceneNode>,
    root: SceneNodeId,
    next_id: u64,
    dirty: bool,
}

impl SceneGraph {
    /// Create a new scene graph with a root Group node.
    pub fn new() -> Self {
        let root_id = SceneNodeId(0);
        let root_node = SceneNode::new(root_id, "root", NodeContent::Group);

        let mut nodes = HashMap::new();
        nodes.insert(root_id, root_node);

        Self {
            nodes,
            root: root_id,
            next_id: 1,
            dirty: true,
        }
    }

    /// Get the root node ID.
    pub fn root(&self) -> SceneNodeId {
        self.root
    }

    /// Allocate a fresh node ID.
    fn alloc_id(&mut self) -> SceneNodeId {
        let id = SceneNodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a child node under `parent`. Returns the new node's ID.
    pub fn add_child(
        &mut self,
        parent: SceneNodeId,
        name: impl Into<String>,
        content: NodeContent,
    ) -> SceneNodeId {
        let id = self.alloc_id();
        let mut node = SceneNode::new(id, name, content);
        node.parent = Some(parent);

        self.nodes.insert(id, node);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }

        self.dirty = true;
        id
    }

    /// Add a node directly under the world root.
    pub fn add_root_object(&mut self, name: impl Into<String>, content: NodeContent) -> SceneNodeId {
        self.add_child(self.root, name, content)
    }

    /// Remove a node and its entire subtree. Cannot remove the root.
    pub fn remove(&mut self, id: SceneNodeId) {
        if id == self.root {
            return;
        }

        // Collect subtree IDs (BFS)
        let mut to_remove = vec![id];
        let mut i = 0;
        while i < to_remove.len() {
            let current = to_remove[i];
            if let Some(node) = self.nodes.get(&current) {
                to_remove.extend_from_slice(&node.children);
            }
            i += 1;
        }

        // Detach from parent
        if let Some(node) = self.nodes.get(&id) {
            if let Some(parent_id) = node.parent {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.children.retain(|c| *c != id);
                }
            }
        }

        for nid in to_remove {
            self.nodes.remove(&nid);
        }

        self.dirty = true;
    }

    /// Set the local transform of a node.
    pub fn set_transform(&mut self, id: SceneNodeId, transform: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform = transform;
            self.dirty = true;
        }
    }

    /// Rotate a node about one of its own local axes by `degrees`.
    ///
    /// The rotation composes after the node's current rotation, so repeated
    /// calls spin the node about the axis as the node itself sees it.
    pub fn rotate_local(&mut self, id: SceneNodeId, axis: Vec3, degrees: f32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            let q = Quat::from_axis_angle(axis, degrees.to_radians());
            node.local_transform.rotation = node.local_transform.rotation * q;
            self.dirty = true;
        }
    }

    /// Translate a node within its parent's frame.
    pub fn translate(&mut self, id: SceneNodeId, offset: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local_transform.position += offset;
            self.dirty = true;
        }
    }

    /// Get the local rotation of a node.
    pub fn local_rotation(&self, id: SceneNodeId) -> Option<Quat> {
        self.nodes.get(&id).map(|n| n.local_transform.rotation)
    }

    /// Set the visibility of a node.
    pub fn set_visible(&mut self, id: SceneNodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.visible = visible;
            self.dirty = true;
        }
    }

    /// Get an immutable reference to a node.
    pub fn get(&self, id: SceneNodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: SceneNodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: SceneNodeId) -> impl Iterator<Item = SceneNodeId> + '_ {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    /// Total number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walk the tree, propagate transforms, and collect all visible primitives.
    pub fn flatten(&mut self) -> Vec<DrawEntry> {
        self.propagate_transforms(self.root, Mat4::IDENTITY);

        let mut out = Vec::new();
        self.collect_visible(self.root, &mut out);
        self.dirty = false;
        out
    }

    /// Recompute cached world transforms from root downward.
    pub(crate) fn propagate_transforms(&mut self, node_id: SceneNodeId, parent_world: Mat4) {
        let (local_mat, children) = {
            let node = match self.nodes.get(&node_id) {
                Some(n) => n,
                None => return,
            };
            (node.local_transform.to_mat4(), node.children.clone())
        };

        let world = parent_world * local_mat;

        if let Some(node) = self.nodes.get_mut(&node_id) {
            node.world_transform = world;
        }

        for child_id in children {
            self.propagate_transforms(child_id, world);
        }
    }

    /// Recursively collect visible draw entries.
    fn collect_visible(&self, node_id: SceneNodeId, out: &mut Vec<DrawEntry>) {
        let node = match self.nodes.get(&node_id) {
            Some(n) => n,
            None => return,
        };

        if !node.visible {
            return;
        }

        if let Some(entry) = DrawEntry::from_node(node) {
            out.push(entry);
        }

        for &child_id in &node.children {
            self.collect_visible(child_id, out);
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cylinder(radius: f32, length: f32) -> NodeContent {
        NodeContent::Cylinder {
            radius,
            length,
            segments: 6,
            color: [0.5, 0.3, 0.1],
            cast_shadow: true,
        }
    }

    #[test]
    fn test_new_scene_graph() {
        let graph = SceneGraph::new();
        assert_eq!(graph.node_count(), 1); // root only
        assert!(graph.get(graph.root()).is_some());
        assert_eq!(graph.get(graph.root()).unwrap().name, "root");
    }

    #[test]
    fn test_add_child() {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let child = graph.add_child(root, "trunk", cylinder(0.2, 10.0));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.get(child).unwrap().parent, Some(root));
        assert!(graph.children(root).any(|c| c == child));
    }

    #[test]
    fn test_add_root_object() {
        let mut graph = SceneGraph::new();
        let id = graph.add_root_object("ground", NodeContent::Plane {
            half_extent: 10.0,
            color: [0.1, 0.6, 0.2],
        });
        assert_eq!(graph.get(id).unwrap().parent, Some(graph.root()));
    }

    #[test]
    fn test_remove_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let parent = graph.add_child(root, "parent", cylinder(1.0, 4.0));
        let child1 = graph.add_child(parent, "c1", cylinder(0.5, 2.0));
        let child2 = graph.add_child(parent, "c2", cylinder(0.5, 2.0));
        let _grandchild = graph.add_child(child1, "gc", cylinder(0.25, 1.0));

        assert_eq!(graph.node_count(), 5);

        graph.remove(parent);

        assert_eq!(graph.node_count(), 1); // only root
        assert!(graph.get(parent).is_none());
        assert!(graph.get(child1).is_none());
        assert!(graph.get(child2).is_none());
        assert_eq!(graph.children(root).count(), 0);
    }

    #[test]
    fn test_cannot_remove_root() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        graph.remove(root);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_rotate_local_composes_after_current_rotation() {
        let mut graph = SceneGraph::new();
        let id = graph.add_root_object("spin", cylinder(1.0, 2.0));

        graph.rotate_local(id, Vec3::Y, 90.0);
        graph.rotate_local(id, Vec3::X, 60.0);

        let expected = Quat::from_rotation_y(90.0_f32.to_radians())
            * Quat::from_rotation_x(60.0_f32.to_radians());
        let got = graph.local_rotation(id).unwrap();
        // angle_between carries acos noise near zero, around 1e-3 in f32
        assert!(got.angle_between(expected) < 5e-3);
    }

    #[test]
    fn test_translate_accumulates_in_parent_frame() {
        let mut graph = SceneGraph::new();
        let id = graph.add_root_object("t", cylinder(1.0, 2.0));

        // A rotated node still translates along its parent's axes
        graph.rotate_local(id, Vec3::Y, 45.0);
        graph.translate(id, Vec3::new(1.0, 0.0, 0.0));
        graph.translate(id, Vec3::new(0.0, 2.0, 0.0));

        let node = graph.get(id).unwrap();
        assert!((node.local_transform.position - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_flatten_empty_graph() {
        let mut graph = SceneGraph::new();
        let entries = graph.flatten();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_flatten_transform_propagation() {
        let mut graph = SceneGraph::new();
        let root = graph.root();

        let parent = graph.add_child(root, "parent", cylinder(1.0, 4.0));
        graph.set_transform(parent, LocalTransform::from_position(Vec3::new(10.0, 0.0, 0.0)));

        let child = graph.add_child(parent, "child", cylinder(0.5, 2.0));
        graph.set_transform(child, LocalTransform::from_position(Vec3::new(5.0, 0.0, 0.0)));

        let entries = graph.flatten();
        assert_eq!(entries.len(), 2);

        let child_world = graph.get(child).unwrap().world_transform;
        let world_pos = child_world.transform_point3(Vec3::ZERO);
        assert!((world_pos - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_flatten_hidden_node_excluded() {
        let mut graph = SceneGraph::new();
        let id = graph.add_root_object("hidden", cylinder(1.0, 2.0));
        graph.set_visible(id, false);

        let entries = graph.flatten();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_child_inherits_parent_rotation() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_root_object("parent", cylinder(1.0, 4.0));
        graph.rotate_local(parent, Vec3::Z, 90.0);

        let child = graph.add_child(parent, "child", cylinder(0.5, 2.0));
        graph.translate(child, Vec3::new(0.0, 1.0, 0.0));

        graph.flatten();

        // Parent's +Y now points along world -X, so the child lands at (-1, 0, 0)
        let world = graph.get(child).unwrap().world_transform;
        let pos = world.transform_point3(Vec3::ZERO);
        assert!((pos - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-4);
    }
}
