//! Core library surface for Shelf Track, a command-line inventory manager
//! for a small bookstore catalog stored in SQLite.
//!
//! The binary only wires these pieces together; tests drive the same API
//! against temporary databases.
pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod shell;

/// Persistence operations, re-exported for `main.rs` and the integration
/// tests.
pub use db::{
    add_book, add_book_with_rng, delete_book, initialize, search_books, update_book, view_books,
    Database,
};

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use models::{
    Author, AuthorCredit, AuthorPatch, Book, BookListing, BookUpdate, NewBook, ViewMode,
};
pub use shell::Shell;
