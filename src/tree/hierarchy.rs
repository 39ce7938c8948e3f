//! Tree hierarchy manager.
//!
//! Owns the trunk and a recursion-level-indexed collection of branches, and
//! runs the placement algorithm that grows children onto parents. The scene
//! graph is driven purely as a transform/ownership mechanism; this module's
//! generation index is the single source of truth for logical structure.

use rand::Rng;

use crate::core::camera::Camera;
use crate::core::types::{Quat, Vec3};
use crate::scene::{SceneGraph, SceneNodeId};

use super::branch::Branch;
use super::config::TreeConfig;

/// The procedural tree: trunk plus per-recursion-level generations.
///
/// `generations[0]` holds the trunk's children, `generations[i]` the children
/// of `generations[i - 1]`, flattened. Every branch except the trunk appears
/// in exactly one generation slot and keeps its parent for life.
pub struct TreeHierarchy {
    config: TreeConfig,
    trunk: Branch,
    generations: Vec<Vec<Branch>>,
}

impl TreeHierarchy {
    /// Create a hierarchy holding only a freshly built trunk.
    pub fn new(scene: &mut SceneGraph, config: TreeConfig) -> Self {
        let trunk = Self::build_trunk(scene, &config);
        Self {
            config,
            trunk,
            generations: Vec::new(),
        }
    }

    /// Build a trunk from the configured constants, base resting on the ground.
    fn build_trunk(scene: &mut SceneGraph, config: &TreeConfig) -> Branch {
        let trunk = Branch::new(
            scene,
            scene.root(),
            config.trunk_radius,
            config.trunk_length,
            config,
        );
        // Cylinder geometry is centered on its axis; lift by half the length
        // so the base sits at y = 0
        scene.translate(trunk.node(), Vec3::new(0.0, config.trunk_length / 2.0, 0.0));
        trunk
    }

    /// The current trunk.
    pub fn trunk(&self) -> &Branch {
        &self.trunk
    }

    /// Branches grouped by recursion level.
    pub fn generations(&self) -> &[Vec<Branch>] {
        &self.generations
    }

    /// Number of branches excluding the trunk.
    pub fn branch_count(&self) -> usize {
        self.generations.iter().map(Vec::len).sum()
    }

    /// Discard the whole tree and regrow it from scratch.
    ///
    /// Removing the trunk primitive takes every descendant primitive with it.
    /// `depth` and `branch_count` are clamped to the configured maxima.
    pub fn rebuild(
        &mut self,
        scene: &mut SceneGraph,
        rng: &mut impl Rng,
        depth: u32,
        branch_count: u32,
    ) {
        let depth = self.config.clamp_depth(depth);
        let branch_count = self.config.clamp_branch_count(branch_count);

        scene.remove(self.trunk.node());
        self.generations.clear();
        self.trunk = Self::build_trunk(scene, &self.config);

        for level in 0..depth as usize {
            let parents: Vec<Branch> = if level == 0 {
                vec![self.trunk]
            } else {
                self.generations[level - 1].clone()
            };
            let generation = self.grow_generation(scene, rng, &parents, branch_count);
            self.generations.push(generation);
        }

        log::info!(
            "rebuilt tree: depth={} branch_count={} branches={}",
            depth,
            branch_count,
            self.branch_count()
        );
    }

    /// Sprout `branch_count` children on every parent. Returns the flattened
    /// new generation.
    fn grow_generation(
        &self,
        scene: &mut SceneGraph,
        rng: &mut impl Rng,
        parents: &[Branch],
        branch_count: u32,
    ) -> Vec<Branch> {
        let mut generation = Vec::with_capacity(parents.len() * branch_count as usize);
        for parent in parents {
            for _ in 0..branch_count {
                generation.push(self.attach_child(scene, rng, parent));
            }
        }
        generation
    }

    /// The placement algorithm: grow one child on `parent`.
    ///
    /// The child is half the parent's size and attaches at a random height
    /// along the parent, spun by a random angle about the parent's axis and
    /// tilted outward by the fixed tilt. The spin is applied before the tilt
    /// so the tilt direction is distributed uniformly around the parent.
    pub fn attach_child(
        &self,
        scene: &mut SceneGraph,
        rng: &mut impl Rng,
        parent: &Branch,
    ) -> Branch {
        let child = Branch::new(
            scene,
            parent.node(),
            parent.radius() * self.config.child_ratio,
            parent.length() * self.config.child_ratio,
            &self.config,
        );

        let attach_height: f32 = rng.random_range(0.0..parent.length());
        let spin: f32 = rng.random_range(0.0..360.0);

        scene.rotate_local(child.node(), Vec3::Y, spin);
        scene.rotate_local(child.node(), Vec3::X, self.config.tilt_degrees);

        // The rotations moved the child off its parent's axis frame, so the
        // branch direction must be recovered from the rotated orientation
        let axial = scene
            .local_rotation(child.node())
            .unwrap_or(Quat::IDENTITY)
            * Vec3::Y;

        // Root the child's base (not its center) at the attachment point,
        // working in the parent's local frame: slide the centered cylinder
        // half a length along its own axis, drop to the parent's root end,
        // then climb to the chosen height
        scene.translate(child.node(), axial * (child.length() / 2.0));
        scene.translate(child.node(), Vec3::new(0.0, -parent.length() / 2.0, 0.0));
        scene.translate(child.node(), Vec3::new(0.0, attach_height, 0.0));

        child
    }

    /// Map a picked primitive back to its branch and recursion level.
    ///
    /// The trunk is level 0; branches in `generations[i]` are level `i + 1`.
    /// Returns `None` for non-branch primitives (e.g. the ground) and stale
    /// handles.
    pub fn resolve_hit(&self, node: SceneNodeId) -> Option<(Branch, usize)> {
        if self.trunk.node() == node {
            return Some((self.trunk, 0));
        }
        for (i, generation) in self.generations.iter().enumerate() {
            for branch in generation {
                if branch.node() == node {
                    return Some((*branch, i + 1));
                }
            }
        }
        None
    }

    /// Grow a child on whatever branch sits under the given window pixel.
    ///
    /// A miss, or a hit on a non-branch primitive, is a silent no-op.
    pub fn grow_at(
        &mut self,
        scene: &mut SceneGraph,
        camera: &Camera,
        rng: &mut impl Rng,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Option<Branch> {
        let ray = camera.screen_ray(x, y, width, height);
        let hit = scene.pick(ray)?;
        self.grow_on(scene, rng, hit.node)
    }

    /// Grow a child on the branch owning `node`, recording it at the parent's
    /// recursion level. Growing below the deepest generation opens a new one.
    pub fn grow_on(
        &mut self,
        scene: &mut SceneGraph,
        rng: &mut impl Rng,
        node: SceneNodeId,
    ) -> Option<Branch> {
        let (parent, level) = self.resolve_hit(node)?;
        let child = self.attach_child(scene, rng, &parent);

        if level >= self.generations.len() {
            self.generations.push(Vec::new());
        }
        self.generations[level].push(child);

        log::debug!("grew branch at level {}", level);
        Some(child)
    }

    /// Rotate every branch one spin step about its own axis. The trunk never
    /// spins.
    pub fn animate_step(&self, scene: &mut SceneGraph) {
        for generation in &self.generations {
            for branch in generation {
                scene.rotate_local(branch.node(), Vec3::Y, self.config.spin_step_degrees);
            }
        }
    }
}
