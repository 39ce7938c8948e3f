//! Branch entity — one cylindrical tree segment.

use crate::scene::{NodeContent, SceneGraph, SceneNodeId};

use super::config::{BRANCH_COLOR, TreeConfig};

/// One cylindrical segment of the tree (trunk or limb).
///
/// A branch owns one cylinder primitive in the scene graph, created at
/// construction and sized to the branch. Radius and length never change for
/// the branch's lifetime; only the primitive's transform is mutated, and only
/// by the tree hierarchy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    radius: f32,
    length: f32,
    node: SceneNodeId,
}

impl Branch {
    /// Create a branch and its cylinder primitive under `parent` in the scene.
    pub fn new(
        scene: &mut SceneGraph,
        parent: SceneNodeId,
        radius: f32,
        length: f32,
        config: &TreeConfig,
    ) -> Self {
        debug_assert!(radius > 0.0 && length > 0.0);

        let node = scene.add_child(
            parent,
            "branch",
            NodeContent::Cylinder {
                radius,
                length,
                segments: config.radial_segments,
                color: BRANCH_COLOR,
                cast_shadow: true,
            },
        );

        Self {
            radius,
            length,
            node,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Handle of the branch's cylinder primitive.
    pub fn node(&self) -> SceneNodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_creates_cylinder_primitive() {
        let mut scene = SceneGraph::new();
        let config = TreeConfig::default();
        let root = scene.root();

        let branch = Branch::new(&mut scene, root, 0.2, 10.0, &config);

        assert_eq!(branch.radius(), 0.2);
        assert_eq!(branch.length(), 10.0);

        let node = scene.get(branch.node()).unwrap();
        match node.content {
            NodeContent::Cylinder {
                radius,
                length,
                segments,
                cast_shadow,
                ..
            } => {
                assert_eq!(radius, 0.2);
                assert_eq!(length, 10.0);
                assert_eq!(segments, config.radial_segments);
                assert!(cast_shadow);
            }
            _ => panic!("expected cylinder content"),
        }
        assert_eq!(node.parent, Some(root));
    }

    #[test]
    fn test_branch_primitive_nests_under_parent_branch() {
        let mut scene = SceneGraph::new();
        let config = TreeConfig::default();

        let root = scene.root();
        let trunk = Branch::new(&mut scene, root, 0.2, 10.0, &config);
        let child = Branch::new(&mut scene, trunk.node(), 0.1, 5.0, &config);

        assert_eq!(scene.get(child.node()).unwrap().parent, Some(trunk.node()));
    }
}
