//! WebGPU rendering module
//!
//! Draws the arena as instanced, flat-shaded boxes.

pub mod pipeline;
pub mod scene;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{BoxInstance, Scene};
