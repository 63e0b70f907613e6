pub mod coordinate;
pub mod sentence;
pub mod stream;
pub mod timestamp;

pub use coordinate::*;
pub use sentence::*;
pub use stream::*;
pub use timestamp::*;
