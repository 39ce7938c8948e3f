//! Scene graph and picking

pub mod flatten;
pub mod graph;
pub mod node;
pub mod pick;

pub use flatten::{DrawEntry, DrawPrimitive};
pub use graph::SceneGraph;
pub use node::{LocalTransform, NodeContent, SceneNode, SceneNodeId};
pub use pick::PickHit;
