use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::{debug, info, warn};
use rusqlite::{params, Connection, Transaction};

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};

use super::seed::{SEED_AUTHORS, SEED_BOOKS};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".shelf-track";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "ebookstore.db";

/// Handle to the on-disk database. It only remembers where the file lives;
/// every operation borrows a fresh connection through [`Database::connect`]
/// and drops it before returning, so nothing stays open across prompts.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Database stored under `~/.shelf-track/`.
    pub fn at_default_location() -> CatalogResult<Self> {
        let base_dirs = BaseDirs::new()
            .ok_or_else(|| CatalogError::DataDir("could not locate home directory".into()))?;
        Ok(Self::new(
            base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection with foreign keys enforced. The parent directory is
    /// created on demand so a fresh install needs no setup.
    pub fn connect(&self) -> CatalogResult<Connection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| CatalogError::DataDir(format!("{}: {err}", parent.display())))?;
            }
        }

        let conn = Connection::open(&self.path)?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(conn)
    }
}

/// Create both tables if needed, seed whichever of them is empty, and reload
/// the catalog from the committed state.
///
/// The catalog is only replaced once the transaction has committed, so a
/// failure anywhere leaves the caller's lists as they were.
pub fn initialize(db: &Database, catalog: &mut Catalog) -> CatalogResult<()> {
    let mut conn = db.connect()?;

    write_transaction(&mut conn, "initialize", |tx| {
        tx.execute(
            "CREATE TABLE IF NOT EXISTS author (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                country TEXT
            )",
            [],
        )?;

        tx.execute(
            "CREATE TABLE IF NOT EXISTS book (
                id INTEGER PRIMARY KEY,
                title TEXT,
                authorID INTEGER,
                qty INTEGER,
                FOREIGN KEY(authorID) REFERENCES author(id)
                    ON DELETE CASCADE
                    ON UPDATE CASCADE
            )",
            [],
        )?;

        seed_if_empty(tx)
    })?;

    catalog.reload(&conn)?;
    debug!(
        "catalog loaded from {}: {} books, {} authors",
        db.path().display(),
        catalog.books().len(),
        catalog.authors().len()
    );
    Ok(())
}

/// Run `body` inside one transaction. `Ok` commits; an error drops the
/// transaction, which rolls it back, and is logged under `operation`.
pub(crate) fn write_transaction<T>(
    conn: &mut Connection,
    operation: &str,
    body: impl FnOnce(&Transaction<'_>) -> CatalogResult<T>,
) -> CatalogResult<T> {
    let tx = conn.transaction()?;
    let result = body(&tx).and_then(|value| {
        tx.commit()?;
        Ok(value)
    });
    if let Err(err) = &result {
        warn!("{operation} rolled back: {err}");
    }
    result
}

/// Authors go first so the seeded books never dangle.
fn seed_if_empty(tx: &Transaction<'_>) -> CatalogResult<()> {
    let authors: i64 = tx.query_row("SELECT COUNT(*) FROM author", [], |row| row.get(0))?;
    if authors == 0 {
        let mut stmt = tx.prepare("INSERT INTO author (id, name, country) VALUES (?1, ?2, ?3)")?;
        for (id, name, country) in SEED_AUTHORS {
            stmt.execute(params![id, name, country])?;
        }
        info!("seeded {} default authors", SEED_AUTHORS.len());
    }

    let books: i64 = tx.query_row("SELECT COUNT(*) FROM book", [], |row| row.get(0))?;
    if books == 0 {
        let mut stmt =
            tx.prepare("INSERT INTO book (id, title, authorID, qty) VALUES (?1, ?2, ?3, ?4)")?;
        for (id, title, author_id, qty) in SEED_BOOKS {
            stmt.execute(params![id, title, author_id, qty])?;
        }
        info!("seeded {} default books", SEED_BOOKS.len());
    }

    Ok(())
}
