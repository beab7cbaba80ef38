//! Runtime configuration.

mod env;

pub use env::*;
