//! Book (catalog) endpoints

use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookFormContext, BookListQuery, BookSummary, CreateBook, UpdateBook},
    services::catalog::BOOKS_PER_PAGE,
};

/// Illustrative extra context value carried by the book list
const SOME_DATA: &str = "This is some data";

/// Paginated book list
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<BookSummary>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub some_data: String,
}

/// List books with pagination
#[utoipa::path(
    get,
    path = "/books/",
    tag = "books",
    params(BookListQuery),
    responses(
        (status = 200, description = "Paginated list of books", body = BookListResponse)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<BookListResponse>> {
    // Clamp here so the echoed page matches the page actually served
    let page = query.page.unwrap_or(1).max(1);
    let (books, total) = state.services.catalog.list_books(page).await?;

    Ok(Json(BookListResponse {
        books,
        total,
        page,
        per_page: BOOKS_PER_PAGE,
        some_data: SOME_DATA.to_string(),
    }))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book with author, language, genres and copies", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Create-book form context: selectable choices and initial values
#[utoipa::path(
    get,
    path = "/book/create/",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Form choices with English pre-selected", body = BookFormContext),
        (status = 500, description = "No language named English exists")
    )
)]
pub async fn create_book_form(
    State(state): State<crate::AppState>,
) -> AppResult<Json<BookFormContext>> {
    let context = state.services.catalog.book_form_context().await?;
    Ok(Json(context))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/book/create/",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 303, description = "Created; redirects to the book's detail address"),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "A book with this ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateBook>,
) -> AppResult<Redirect> {
    let book = state.services.catalog.create_book(payload).await?;
    Ok(Redirect::to(&book.absolute_url()))
}

/// Current values for the update form
#[utoipa::path(
    get,
    path = "/book/{id}/update",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book to edit", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Update an existing book
#[utoipa::path(
    post,
    path = "/book/{id}/update",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 303, description = "Updated; redirects to the book's detail address"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBook>,
) -> AppResult<Redirect> {
    let book = state.services.catalog.update_book(id, payload).await?;
    Ok(Redirect::to(&book.absolute_url()))
}

/// Delete confirmation page: the book about to be deleted
#[utoipa::path(
    get,
    path = "/book/{id}/delete",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book pending deletion", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(book))
}

/// Delete a book. A restrict-on-delete failure is not surfaced: the caller
/// is sent back to the confirmation page and the reason only goes to the log.
#[utoipa::path(
    post,
    path = "/book/{id}/delete",
    tag = "books",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Deleted (redirects to the book list) or blocked (redirects back to the confirmation page)"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    match state.services.catalog.delete_book(id).await {
        Ok(()) => Ok(Redirect::to("/books/")),
        Err(AppError::DeleteRestricted(reason)) => {
            tracing::warn!("Book {} delete blocked: {}", id, reason);
            Ok(Redirect::to(&format!("/book/{}/delete", id)))
        }
        Err(e) => Err(e),
    }
}
