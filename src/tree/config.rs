//! Tree generation constants and limits.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;

/// Bark color of every branch (0xaf7517).
pub const BRANCH_COLOR: [f32; 3] = [0.686, 0.459, 0.090];

/// Configuration for tree generation.
///
/// The defaults match the classic demo tree: a thin 10-unit trunk, children
/// half the size of their parent, tilted 60 degrees off the parent axis.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Trunk radius in world units.
    pub trunk_radius: f32,
    /// Trunk length in world units.
    pub trunk_length: f32,
    /// Child:parent size ratio applied to both radius and length.
    pub child_ratio: f32,
    /// Fixed tilt of a child off its parent's axis, in degrees.
    pub tilt_degrees: f32,
    /// Rotation applied to every branch per animation step, in degrees.
    pub spin_step_degrees: f32,
    /// Radial segment count of branch cylinders.
    pub radial_segments: u32,
    /// Upper bound on recursion depth accepted by a rebuild.
    pub max_depth: u32,
    /// Upper bound on per-branch fan-out accepted by a rebuild.
    pub max_branch_count: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            trunk_radius: 0.2,
            trunk_length: 10.0,
            child_ratio: 0.5,
            tilt_degrees: 60.0,
            spin_step_degrees: 1.0,
            radial_segments: 6,
            // 6 levels of 6 branches is ~56k cylinders, about as much as the
            // single-threaded rebuild can take without stalling a frame
            max_depth: 6,
            max_branch_count: 6,
        }
    }
}

impl TreeConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the constants can produce a well-formed tree.
    pub fn validate(&self) -> Result<()> {
        if !(self.trunk_radius > 0.0) || !(self.trunk_length > 0.0) {
            return Err(Error::Config(
                "trunk_radius and trunk_length must be positive".into(),
            ));
        }
        if !(self.child_ratio > 0.0 && self.child_ratio <= 1.0) {
            return Err(Error::Config("child_ratio must be in (0, 1]".into()));
        }
        if self.radial_segments < 3 {
            return Err(Error::Config("radial_segments must be at least 3".into()));
        }
        Ok(())
    }

    /// Clamp a requested recursion depth to the configured maximum.
    pub fn clamp_depth(&self, depth: u32) -> u32 {
        depth.min(self.max_depth)
    }

    /// Clamp a requested per-branch fan-out to the configured maximum.
    pub fn clamp_branch_count(&self, count: u32) -> u32 {
        count.min(self.max_branch_count)
    }
}
