//! Flat draw list produced from the scene graph each frame.

use crate::core::types::Mat4;

use super::node::{NodeContent, SceneNode};

/// Geometry variant of a draw entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawPrimitive {
    Cylinder {
        radius: f32,
        length: f32,
        segments: u32,
    },
    Plane {
        half_extent: f32,
    },
}

/// One renderable primitive with its composed world transform.
#[derive(Clone, Debug)]
pub struct DrawEntry {
    pub primitive: DrawPrimitive,
    pub model: Mat4,
    pub color: [f32; 3],
}

impl DrawEntry {
    /// Build a draw entry from a node, if it carries geometry.
    ///
    /// Assumes the node's cached world transform is current.
    pub fn from_node(node: &SceneNode) -> Option<Self> {
        match node.content {
            NodeContent::Group => None,
            NodeContent::Cylinder {
                radius,
                length,
                segments,
                color,
                ..
            } => Some(Self {
                primitive: DrawPrimitive::Cylinder {
                    radius,
                    length,
                    segments,
                },
                model: node.world_transform,
                color,
            }),
            NodeContent::Plane { half_extent, color } => Some(Self {
                primitive: DrawPrimitive::Plane { half_extent },
                model: node.world_transform,
                color,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::node::SceneNodeId;

    #[test]
    fn test_group_produces_no_entry() {
        let node = SceneNode::new(SceneNodeId(1), "g", NodeContent::Group);
        assert!(DrawEntry::from_node(&node).is_none());
    }

    #[test]
    fn test_cylinder_entry_carries_geometry() {
        let node = SceneNode::new(
            SceneNodeId(1),
            "c",
            NodeContent::Cylinder {
                radius: 0.2,
                length: 10.0,
                segments: 6,
                color: [1.0, 0.0, 0.0],
                cast_shadow: true,
            },
        );
        let entry = DrawEntry::from_node(&node).unwrap();
        assert_eq!(
            entry.primitive,
            DrawPrimitive::Cylinder {
                radius: 0.2,
                length: 10.0,
                segments: 6
            }
        );
        assert_eq!(entry.color, [1.0, 0.0, 0.0]);
    }
}
