//! WebGPU rendering module
//!
//! The frame is rebuilt from the game's draw list as plain colored
//! triangles in screen pixels, then mapped to NDC on upload.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, pixel_to_ndc};
pub use shapes::build_frame;
pub use vertex::Vertex;
