//! In-memory mirror of the two tables.
//!
//! The shell owns a single [`Catalog`] and lends it to each persistence call.
//! Mutating operations reload the lists they touched after committing, so the
//! catalog always reflects the latest commit rather than what the user typed.

use log::debug;
use rusqlite::Connection;

use crate::db::{fetch_authors, fetch_books};
use crate::error::CatalogResult;
use crate::models::{Author, Book};

#[derive(Debug, Default, Clone)]
pub struct Catalog {
    books: Vec<Book>,
    authors: Vec<Author>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn book(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    pub fn author(&self, id: i64) -> Option<&Author> {
        self.authors.iter().find(|author| author.id == id)
    }

    /// Replace both lists from the database.
    pub fn reload(&mut self, conn: &Connection) -> CatalogResult<()> {
        self.reload_authors(conn)?;
        self.reload_books(conn)
    }

    /// Replace the book list. The old list survives if the query fails.
    pub fn reload_books(&mut self, conn: &Connection) -> CatalogResult<()> {
        self.books = fetch_books(conn)?;
        debug!("reloaded {} books", self.books.len());
        Ok(())
    }

    pub fn reload_authors(&mut self, conn: &Connection) -> CatalogResult<()> {
        self.authors = fetch_authors(conn)?;
        debug!("reloaded {} authors", self.authors.len());
        Ok(())
    }
}
