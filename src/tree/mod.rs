//! Procedural tree generation and interactive growth

pub mod branch;
pub mod config;
pub mod hierarchy;

pub use branch::Branch;
pub use config::TreeConfig;
pub use hierarchy::TreeHierarchy;
