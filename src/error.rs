use thiserror::Error;

/// Failures surfaced by the persistence layer. "Not found" is not an error:
/// update and delete report it through their boolean result instead.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An update tried to link a book to an author row that does not exist.
    #[error("Author with ID {0} does not exist")]
    UnknownAuthor(i64),

    /// The randomly generated author id clashed with an existing author.
    #[error("Generated author ID {0} is already taken, please try again")]
    AuthorIdTaken(i64),

    /// The book id derived from the current book count is already in use,
    /// which happens after a book has been deleted.
    #[error("Book ID {0} is already taken")]
    BookIdTaken(i64),

    #[error("could not prepare data directory: {0}")]
    DataDir(String),

    #[error("SQLite error: {0}")]
    Storage(#[from] rusqlite::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
