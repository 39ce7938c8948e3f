//! GPU rendering: context, forward pipeline, mesh generation

pub mod context;
pub mod mesh;
pub mod pipeline;

pub use context::GpuContext;
pub use pipeline::Renderer;
