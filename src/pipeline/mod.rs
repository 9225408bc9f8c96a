pub mod optimize;
pub mod plan;

pub use optimize::*;
pub use plan::*;
