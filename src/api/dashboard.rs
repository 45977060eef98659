//! Dashboard (home page) endpoint

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{error::AppResult, services::dashboard::TITLE_FILTER_WORD};

/// Cookie identifying the caller's session
pub const SESSION_COOKIE: &str = "biblio_session";

/// Dashboard payload: catalog counts plus the session visit counter
#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub num_books: i64,
    pub num_instances: i64,
    /// Copies with status "Available"
    pub num_instances_available: i64,
    pub num_authors: i64,
    pub num_genres: i64,
    /// Word the filtered count looks for in titles
    pub filter_word: String,
    /// Books whose title contains `filter_word`, case-insensitively
    pub num_books_filtered: i64,
    /// Number of dashboard visits in this caller's session
    pub num_visits: i64,
}

/// Dashboard with catalog counts and a per-session visit counter
#[utoipa::path(
    get,
    path = "/",
    tag = "dashboard",
    responses(
        (status = 200, description = "Catalog counts and visit counter", body = DashboardResponse)
    )
)]
pub async fn index(
    State(state): State<crate::AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<DashboardResponse>)> {
    let counts = state.services.dashboard.counts().await?;

    // Session is created on first visit; every visit refreshes the cookie.
    let session_id = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value().to_string(),
        None => Uuid::new_v4().to_string(),
    };
    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, session_id.clone()))
            .path("/")
            .http_only(true)
            .build(),
    );

    let num_visits = state.services.sessions.increment_visits(&session_id).await?;

    Ok((
        jar,
        Json(DashboardResponse {
            num_books: counts.num_books,
            num_instances: counts.num_instances,
            num_instances_available: counts.num_instances_available,
            num_authors: counts.num_authors,
            num_genres: counts.num_genres,
            filter_word: TITLE_FILTER_WORD.to_string(),
            num_books_filtered: counts.num_books_filtered,
            num_visits,
        }),
    ))
}
