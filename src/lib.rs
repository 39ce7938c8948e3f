//! Ramify - An interactive procedural 3D tree visualizer

pub mod core;
pub mod math;
pub mod render;
pub mod scene;
pub mod tree;
