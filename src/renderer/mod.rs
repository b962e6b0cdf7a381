//! WebGPU rendering module
//!
//! Flat-colored quad tessellation of the world, drawn back-to-front.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
