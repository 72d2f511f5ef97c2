//! WebGPU rendering module
//!
//! Everything is a flat-colored rectangle: the simulation's pixel rects are
//! turned into triangles and mapped to NDC at upload time.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use scene::scene_vertices;
pub use vertex::Vertex;
