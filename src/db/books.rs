use log::info;
use rand::Rng;
use rusqlite::{ffi, params, Connection, Error as SqlError, Row};

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Author, AuthorCredit, AuthorPatch, Book, BookListing, BookUpdate, NewBook, ViewMode,
};

use super::authors::{author_exists, insert_author, patch_author};
use super::connection::{write_transaction, Database};

/// New book ids continue from this offset: `BOOK_ID_BASE + count + 1`.
pub const BOOK_ID_BASE: i64 = 3000;

const SELECT_BOOKS: &str = "SELECT id, title, authorID, qty FROM book";

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        author_id: row.get(2)?,
        qty: row.get(3)?,
    })
}

/// Every book in primary key order.
pub fn fetch_books(conn: &Connection) -> CatalogResult<Vec<Book>> {
    let mut stmt = conn.prepare(&format!("{SELECT_BOOKS} ORDER BY id"))?;
    let books = stmt
        .query_map([], book_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(books)
}

/// Books joined with their author. The inner join drops books whose author
/// row is missing.
pub fn fetch_books_with_authors(conn: &Connection) -> CatalogResult<Vec<AuthorCredit>> {
    let mut stmt = conn.prepare(
        "SELECT book.title, author.name, author.country
         FROM book
         INNER JOIN author ON book.authorID = author.id
         ORDER BY book.id",
    )?;

    let credits = stmt
        .query_map([], |row| {
            Ok(AuthorCredit {
                title: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                author_name: row.get(1)?,
                author_country: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(credits)
}

/// Read the listing for either view mode straight from the database.
pub fn view_books(db: &Database, mode: ViewMode) -> CatalogResult<BookListing> {
    let conn = db.connect()?;
    let listing = match mode {
        ViewMode::Books => BookListing::Books(fetch_books(&conn)?),
        ViewMode::WithAuthors => BookListing::WithAuthors(fetch_books_with_authors(&conn)?),
    };
    Ok(listing)
}

/// Insert a book together with a freshly generated author.
pub fn add_book(db: &Database, catalog: &mut Catalog, new_book: &NewBook) -> CatalogResult<Book> {
    add_book_with_rng(db, catalog, new_book, &mut rand::thread_rng())
}

/// Same as [`add_book`] with an explicit source for the author id.
///
/// The random author id is not checked against existing rows. A clash aborts
/// the insert with [`CatalogError::AuthorIdTaken`]; likewise a derived book id
/// that is still in use (after a delete) yields [`CatalogError::BookIdTaken`].
pub fn add_book_with_rng<R: Rng>(
    db: &Database,
    catalog: &mut Catalog,
    new_book: &NewBook,
    rng: &mut R,
) -> CatalogResult<Book> {
    let book = Book {
        id: BOOK_ID_BASE + catalog.books().len() as i64 + 1,
        title: new_book.title.clone(),
        author_id: rng.gen_range(1000..=9999),
        qty: new_book.qty,
    };
    let author = Author {
        id: book.author_id,
        name: new_book.author_name.clone(),
        country: Some(new_book.author_country.clone()),
    };

    let mut conn = db.connect()?;
    write_transaction(&mut conn, "add book", |tx| {
        insert_author(tx, &author)
            .map_err(|err| map_id_clash(err, CatalogError::AuthorIdTaken(author.id)))?;
        tx.execute(
            "INSERT INTO book (id, title, authorID, qty) VALUES (?1, ?2, ?3, ?4)",
            params![book.id, book.title, book.author_id, book.qty],
        )
        .map_err(|err| map_id_clash(err, CatalogError::BookIdTaken(book.id)))?;
        Ok(())
    })?;

    catalog.reload(&conn)?;
    info!(
        "added book {} ({:?}) with author {}",
        book.id, book.title, author.id
    );
    Ok(book)
}

/// Apply `update` to one book and, when `patch` carries fields, to the author
/// the book links to afterwards.
///
/// Returns `Ok(false)` when no book has that id. Linking to an author that does
/// not exist fails with [`CatalogError::UnknownAuthor`] before anything is
/// written. Both statements share one transaction.
pub fn update_book(
    db: &Database,
    catalog: &mut Catalog,
    update: &BookUpdate,
    patch: &AuthorPatch,
) -> CatalogResult<bool> {
    let mut conn = db.connect()?;
    let outcome = write_transaction(&mut conn, "update book", |tx| {
        if let Some(author_id) = update.author_id {
            if !author_exists(tx, author_id)? {
                return Err(CatalogError::UnknownAuthor(author_id));
            }
        }

        let updated = tx.execute(
            "UPDATE book
             SET qty = ?1,
                 title = COALESCE(?2, title),
                 authorID = COALESCE(?3, authorID)
             WHERE id = ?4",
            params![update.qty, update.title, update.author_id, update.book_id],
        )?;
        if updated == 0 {
            return Ok(None);
        }
        if patch.is_empty() {
            return Ok(Some(None));
        }

        let author_id: Option<i64> = tx.query_row(
            "SELECT authorID FROM book WHERE id = ?1",
            params![update.book_id],
            |row| row.get(0),
        )?;
        if let Some(author_id) = author_id {
            patch_author(tx, author_id, patch)?;
        }
        Ok(Some(author_id))
    })?;

    // `None`: no such book. `Some(author)`: the author row that was patched.
    let Some(patched_author) = outcome else {
        return Ok(false);
    };

    catalog.reload_books(&conn)?;
    if let Some(author_id) = patched_author {
        catalog.reload_authors(&conn)?;
        info!("updated book {} and author {author_id}", update.book_id);
    } else {
        info!("updated book {}", update.book_id);
    }
    Ok(true)
}

/// Remove one book. Its author stays; the cascade only runs author to book.
pub fn delete_book(db: &Database, catalog: &mut Catalog, book_id: i64) -> CatalogResult<bool> {
    let mut conn = db.connect()?;
    let deleted = write_transaction(&mut conn, "delete book", |tx| {
        Ok(tx.execute("DELETE FROM book WHERE id = ?1", params![book_id])?)
    })?;
    if deleted == 0 {
        return Ok(false);
    }

    catalog.reload_books(&conn)?;
    info!("deleted book {book_id}");
    Ok(true)
}

/// Books whose title contains `title`. SQLite's `LIKE` ignores ASCII case.
pub fn search_books(db: &Database, title: &str) -> CatalogResult<Vec<Book>> {
    let conn = db.connect()?;
    let mut stmt = conn.prepare(&format!(
        "{SELECT_BOOKS} WHERE title LIKE '%' || ?1 || '%' ORDER BY id"
    ))?;
    let books = stmt
        .query_map(params![title], book_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(books)
}

/// Turn a primary key clash into `clash`; pass every other error through.
fn map_id_clash(err: SqlError, clash: CatalogError) -> CatalogError {
    let is_clash = matches!(
        &err,
        SqlError::SqliteFailure(code, _) if code.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    );
    if is_clash {
        clash
    } else {
        err.into()
    }
}
