//! Bookshelf: books and readers REST backend with a many-to-many association.

pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, Backend, DbConfig};
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use model::{Association, Book, Entity, NewBook, NewReader, Reader};
pub use routes::{app, common_routes, library_routes};
pub use service::LibraryService;
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, Session, Store};
