//! LibraryService: books, readers and their association on top of a `Store`.

mod library;
pub use library::LibraryService;
