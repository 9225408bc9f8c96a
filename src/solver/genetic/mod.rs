pub mod operators;
pub mod search;

pub use operators::*;
pub use search::*;
