//! HTTP handlers for the books and reader resources.

pub mod books;
pub mod readers;
pub use books::*;
pub use readers::*;
