//! Domain models that mirror the SQLite schema and get passed between the
//! persistence layer and the shell. They stay plain data holders so the other
//! layers can focus on queries and presentation.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the `book` table.
pub struct Book {
    /// Application-assigned primary key (seeds start at 3001).
    pub id: i64,
    /// Title as entered. The column is nullable but the shell always writes a
    /// value, so a missing title is read back as an empty string.
    pub title: String,
    /// Foreign key into `author`. May dangle for rows written outside the app.
    pub author_id: i64,
    /// Copies on the shelf.
    pub qty: i64,
}

impl fmt::Display for Book {
    /// Render the detail card used by the search results.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<15} {}", "Book ID:", self.id)?;
        writeln!(f, "{:<15} {}", "Title:", self.title)?;
        writeln!(f, "{:<15} {}", "Author ID:", self.author_id)?;
        writeln!(f, "{:<15} {}", "Quantity:", self.qty)?;
        write!(f, "----------------------------------")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the `author` table.
pub struct Author {
    pub id: i64,
    pub name: String,
    /// Optional in the schema; `None` when the column is NULL.
    pub country: Option<String>,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<15} {}", "Author ID:", self.id)?;
        writeln!(f, "{:<15} {}", "Author name:", self.name)?;
        writeln!(
            f,
            "{:<15} {}",
            "Author Country:",
            self.country.as_deref().unwrap_or("")
        )?;
        write!(f, "----------------------------------")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A book joined with its author, as shown by the "with authors" listing.
pub struct AuthorCredit {
    pub title: String,
    pub author_name: String,
    pub author_country: Option<String>,
}

/// Values collected by the add-book flow before ids are assigned.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub qty: i64,
    pub author_name: String,
    pub author_country: String,
}

/// Partial update for a book row. `qty` is always written; the optional
/// fields keep the current column value when `None`.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
    pub book_id: i64,
    pub qty: i64,
    pub title: Option<String>,
    pub author_id: Option<i64>,
}

impl BookUpdate {
    /// Start an update that only changes the quantity.
    pub fn quantity(book_id: i64, qty: i64) -> Self {
        Self {
            book_id,
            qty,
            ..Self::default()
        }
    }
}

/// Partial update for the author linked to a book.
#[derive(Debug, Clone, Default)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl AuthorPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.country.is_none()
    }
}

/// Which listing `view_books` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Books,
    WithAuthors,
}

/// Result of `view_books`, one variant per [`ViewMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookListing {
    Books(Vec<Book>),
    WithAuthors(Vec<AuthorCredit>),
}

impl BookListing {
    pub fn is_empty(&self) -> bool {
        match self {
            BookListing::Books(rows) => rows.is_empty(),
            BookListing::WithAuthors(rows) => rows.is_empty(),
        }
    }
}
