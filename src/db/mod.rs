//! Persistence module split across logical submodules. Each public operation
//! opens its own connection, runs inside one transaction and releases the
//! connection before returning; an early return or `?` drops the transaction,
//! which rolls it back.

mod authors;
mod books;
mod connection;
mod seed;

pub use authors::{author_exists, fetch_authors};
pub use books::{
    add_book, add_book_with_rng, delete_book, fetch_books, fetch_books_with_authors,
    search_books, update_book, view_books, BOOK_ID_BASE,
};
pub use connection::{initialize, Database};
pub use seed::{SEED_AUTHORS, SEED_BOOKS};
