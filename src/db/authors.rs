use rusqlite::{params, Connection, OptionalExtension};

use crate::error::CatalogResult;
use crate::models::{Author, AuthorPatch};

/// Every author in primary key order, the order the catalog mirrors.
pub fn fetch_authors(conn: &Connection) -> CatalogResult<Vec<Author>> {
    let mut stmt = conn.prepare("SELECT id, name, country FROM author ORDER BY id")?;

    let authors = stmt
        .query_map([], |row| {
            Ok(Author {
                id: row.get(0)?,
                name: row.get(1)?,
                country: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(authors)
}

pub fn author_exists(conn: &Connection, id: i64) -> CatalogResult<bool> {
    let found = conn
        .query_row("SELECT 1 FROM author WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn insert_author(conn: &Connection, author: &Author) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO author (id, name, country) VALUES (?1, ?2, ?3)",
        params![author.id, author.name, author.country],
    )?;
    Ok(())
}

/// Apply the supplied fields of `patch` to one author row. Unset fields keep
/// their stored value. Returns the number of rows touched.
pub(crate) fn patch_author(conn: &Connection, id: i64, patch: &AuthorPatch) -> CatalogResult<usize> {
    let updated = conn.execute(
        "UPDATE author
         SET name = COALESCE(?1, name),
             country = COALESCE(?2, country)
         WHERE id = ?3",
        params![patch.name, patch.country, id],
    )?;
    Ok(updated)
}
