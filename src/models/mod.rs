pub mod week;

pub use week::*;
