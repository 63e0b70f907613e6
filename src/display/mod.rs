pub mod framer;
pub mod render;

pub use framer::*;
pub use render::*;
