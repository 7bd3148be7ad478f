//! Single-statement persistence for the `book` table.
//!
//! Every function takes a borrowed connection so it runs inside whatever
//! transaction the caller's session opened.

use bookshelf_db::TableDef;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{Book, ListParams, NewBook};

pub const BOOK_TABLE: TableDef = TableDef {
    name: "book",
    ddl: "CREATE TABLE IF NOT EXISTS book (
        id     INTEGER PRIMARY KEY AUTOINCREMENT,
        title  VARCHAR(50) NOT NULL CHECK (length(title) BETWEEN 1 AND 50),
        author VARCHAR(50) NOT NULL CHECK (length(author) BETWEEN 1 AND 50),
        year   INTEGER NOT NULL,
        genre  VARCHAR(50) CHECK (genre IS NULL OR length(genre) <= 50)
    );",
};

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        year: row.get("year")?,
        genre: row.get("genre")?,
    })
}

/// Inserts a book and returns the stored row with its new id.
pub fn insert(conn: &Connection, book: &NewBook) -> rusqlite::Result<Book> {
    conn.execute(
        "INSERT INTO book (title, author, year, genre) VALUES (?1, ?2, ?3, ?4)",
        params![book.title, book.author, book.year, book.genre],
    )?;

    let id = conn.last_insert_rowid();
    find(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

/// Books in insertion order, skipping `offset` and returning at most `limit`.
pub fn list(conn: &Connection, page: ListParams) -> rusqlite::Result<Vec<Book>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, author, year, genre FROM book ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;
    let books = stmt
        .query_map(params![page.limit, page.offset], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(books)
}

pub fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Book>> {
    conn.query_row(
        "SELECT id, title, author, year, genre FROM book WHERE id = ?1",
        [id],
        book_from_row,
    )
    .optional()
}

/// Deletes the book if it exists. Returns `false` when there was nothing to delete.
///
/// The existence check is the statement's change count, so no read snapshot
/// is taken before the write lock.
pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let changes = conn.execute("DELETE FROM book WHERE id = ?1", [id])?;
    Ok(changes > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        bookshelf_db::ensure_schema(&conn, &[BOOK_TABLE]).expect("schema should apply");
        conn
    }

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Anonymous".to_string(),
            year: 2000,
            genre: None,
        }
    }

    #[test]
    fn insert_assigns_sequential_ids() {
        let conn = conn();
        let first = insert(&conn, &new_book("One")).unwrap();
        let second = insert(&conn, &new_book("Two")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(find(&conn, 2).unwrap(), Some(second));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let conn = conn();
        let first = insert(&conn, &new_book("One")).unwrap();
        assert!(delete(&conn, first.id).unwrap());

        let second = insert(&conn, &new_book("Two")).unwrap();
        assert_ne!(second.id, first.id);
    }

    #[test]
    fn duplicates_are_allowed() {
        let conn = conn();
        let a = insert(&conn, &new_book("Same")).unwrap();
        let b = insert(&conn, &new_book("Same")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn list_pages_in_insertion_order() {
        let conn = conn();
        for title in ["A", "B", "C", "D"] {
            insert(&conn, &new_book(title)).unwrap();
        }

        let titles = |page| {
            list(&conn, page)
                .unwrap()
                .into_iter()
                .map(|b| b.title)
                .collect::<Vec<_>>()
        };

        assert_eq!(titles(ListParams::default()), vec!["A", "B", "C", "D"]);
        assert_eq!(titles(ListParams { offset: 1, limit: 2 }), vec!["B", "C"]);
        assert!(titles(ListParams { offset: 10, limit: 2 }).is_empty());
        assert!(titles(ListParams { offset: 0, limit: 0 }).is_empty());
    }

    #[test]
    fn delete_missing_row_reports_false() {
        let conn = conn();
        insert(&conn, &new_book("Kept")).unwrap();

        assert!(!delete(&conn, 42).unwrap());
        assert_eq!(list(&conn, ListParams::default()).unwrap().len(), 1);
    }

    #[test]
    fn delete_succeeds_after_another_connection_commits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.db");
        let pool = bookshelf_db::create_pool(
            path.to_str().unwrap(),
            bookshelf_db::DbRuntimeSettings::default(),
        )
        .unwrap();
        bookshelf_db::ensure_schema(&pool.get().unwrap(), &[BOOK_TABLE]).unwrap();

        let writer = pool.get().unwrap();
        let target = insert(&writer, &new_book("Target")).unwrap();

        let mut session = pool.get().unwrap();
        let tx = session.transaction().unwrap();
        insert(&writer, &new_book("Concurrent")).unwrap();

        assert!(delete(&tx, target.id).unwrap());
        assert!(!delete(&tx, 999).unwrap());
        tx.commit().unwrap();

        assert_eq!(find(&writer, target.id).unwrap(), None);
        assert_eq!(list(&writer, ListParams::default()).unwrap().len(), 1);
    }

    #[test]
    fn table_rejects_empty_title() {
        let conn = conn();
        let err = insert(&conn, &new_book("")).unwrap_err();
        assert!(matches!(
            err,
            rusqlite::Error::SqliteFailure(ref e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
        ));
    }
}
