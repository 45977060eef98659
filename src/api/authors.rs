//! Author endpoints

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorDetails, AuthorFormContext, CreateAuthor, UpdateAuthor},
};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors/",
    tag = "authors",
    responses(
        (status = 200, description = "All authors, by last name", body = Vec<Author>)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Author>>> {
    let authors = state.services.authors.list_authors().await?;
    Ok(Json(authors))
}

/// Get author details by ID, with the books referencing them
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn get_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetails>> {
    let author = state.services.authors.get_author(id).await?;
    Ok(Json(author))
}

/// Create-author form context: country choices and the date-of-death placeholder
#[utoipa::path(
    get,
    path = "/author/create/",
    tag = "authors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Form choices and initial values", body = AuthorFormContext)
    )
)]
pub async fn create_author_form(
    State(state): State<crate::AppState>,
) -> AppResult<Json<AuthorFormContext>> {
    let context = state.services.authors.author_form_context().await?;
    Ok(Json(context))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/author/create/",
    tag = "authors",
    security(("bearer_auth" = [])),
    request_body = CreateAuthor,
    responses(
        (status = 303, description = "Created; redirects to the author's detail address"),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    Json(payload): Json<CreateAuthor>,
) -> AppResult<Redirect> {
    let author = state.services.authors.create_author(payload).await?;
    Ok(Redirect::to(&author.absolute_url()))
}

/// Current values for the update form
#[utoipa::path(
    get,
    path = "/author/{id}/update/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author to edit", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetails>> {
    let author = state.services.authors.get_author(id).await?;
    Ok(Json(author))
}

/// Update an existing author
#[utoipa::path(
    post,
    path = "/author/{id}/update/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 303, description = "Updated; redirects to the author's detail address"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn update_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAuthor>,
) -> AppResult<Redirect> {
    let author = state.services.authors.update_author(id, payload).await?;
    Ok(Redirect::to(&author.absolute_url()))
}

/// Delete confirmation page: the author about to be deleted
#[utoipa::path(
    get,
    path = "/author/{id}/delete/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author pending deletion", body = AuthorDetails),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author_form(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetails>> {
    let author = state.services.authors.get_author(id).await?;
    Ok(Json(author))
}

/// Delete an author. A restrict-on-delete failure is not surfaced: the caller
/// is sent back to the confirmation page and the reason only goes to the log.
#[utoipa::path(
    post,
    path = "/author/{id}/delete/",
    tag = "authors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Deleted (redirects to the author list) or blocked (redirects back to the confirmation page)"),
        (status = 404, description = "Author not found")
    )
)]
pub async fn delete_author(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    match state.services.authors.delete_author(id).await {
        Ok(()) => Ok(Redirect::to("/authors/")),
        Err(AppError::DeleteRestricted(reason)) => {
            tracing::warn!("Author {} delete blocked: {}", id, reason);
            Ok(Redirect::to(&format!("/author/{}/delete/", id)))
        }
        Err(e) => Err(e),
    }
}
