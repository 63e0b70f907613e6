pub mod fix;
pub mod frame;

pub use fix::*;
pub use frame::*;
