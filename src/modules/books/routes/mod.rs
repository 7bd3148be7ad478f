use axum::{routing::get, Json, Router};
use bookshelf_db::{DbPool, Session};
use bookshelf_http::{AppError, ValidatedJson, ValidatedPath, ValidatedQuery};
use serde_json::{json, Value};

use super::models::{Book, ListParams, NewBook};
use super::repository;

pub const BOOK_NOT_FOUND: &str = "Book not found";

/// Book routes, bound to the shared pool.
pub fn router(db: DbPool) -> Router {
    Router::new()
        .route("/books/", get(list_books).post(create_book))
        .route("/books", get(list_books).post(create_book))
        .route("/books/{book_id}", get(read_book).delete(delete_book))
        .with_state(db)
}

async fn create_book(
    session: Session,
    ValidatedJson(new_book): ValidatedJson<NewBook>,
) -> Result<Json<Book>, AppError> {
    let book = session
        .run(move |tx| repository::insert(tx, &new_book))
        .await?;

    tracing::info!(book_id = book.id, "book created");
    Ok(Json(book))
}

async fn list_books(
    session: Session,
    ValidatedQuery(page): ValidatedQuery<ListParams>,
) -> Result<Json<Vec<Book>>, AppError> {
    let books = session.run(move |tx| repository::list(tx, page)).await?;
    Ok(Json(books))
}

async fn read_book(
    session: Session,
    ValidatedPath(book_id): ValidatedPath<i64>,
) -> Result<Json<Book>, AppError> {
    session
        .run(move |tx| repository::find(tx, book_id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))
}

async fn delete_book(
    session: Session,
    ValidatedPath(book_id): ValidatedPath<i64>,
) -> Result<Json<Value>, AppError> {
    let deleted = session
        .run(move |tx| repository::delete(tx, book_id))
        .await?;

    if !deleted {
        return Err(AppError::not_found(BOOK_NOT_FOUND));
    }

    tracing::info!(book_id, "book deleted");
    Ok(Json(json!({ "ok": true })))
}
