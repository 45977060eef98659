//! Biblio Server - Library Catalog
//!
//! REST API server for a library catalog: books, authors, physical copies
//! and loan tracking.

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    routing::get,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biblio_server::{
    api,
    config::AppConfig,
    policy::{self, Operation},
    repository::Repository,
    services::{sessions::SessionStore, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblio_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Biblio Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Session store backs the per-visitor dashboard counter
    let sessions = SessionStore::new(&config.redis.url, config.redis.session_ttl_seconds)
        .await
        .expect("Failed to connect to Redis");

    tracing::info!("Connected to Redis");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, sessions);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Guard a route group with the policy table entry for one operation
    let guard = |operation: Operation| {
        middleware::from_fn_with_state(
            state.clone(),
            move |state: State<AppState>, req: Request, next: Next| {
                policy::enforce(operation, state, req, next)
            },
        )
    };

    // Public browsing routes
    let public = Router::new()
        .route("/", get(api::dashboard::index))
        .route("/books/", get(api::books::list_books))
        .route("/books/:id", get(api::books::get_book))
        .route("/authors/", get(api::authors::list_authors))
        .route("/authors/:id", get(api::authors::get_author))
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check));

    // Loan routes
    let my_loans = Router::new()
        .route("/mybooks/", get(api::loans::my_loans))
        .route_layer(guard(Operation::MyLoans));

    let all_loans = Router::new()
        .route("/borrowed/", get(api::loans::all_borrowed))
        .route_layer(guard(Operation::AllLoansOnIssue));

    let renewal = Router::new()
        .route(
            "/book/:instance_id/renew/",
            get(api::loans::renew_book_form).post(api::loans::renew_book),
        )
        .route_layer(guard(Operation::RenewLoan));

    // Author maintenance routes
    let author_create = Router::new()
        .route(
            "/author/create/",
            get(api::authors::create_author_form).post(api::authors::create_author),
        )
        .route_layer(guard(Operation::CreateAuthor));

    let author_update = Router::new()
        .route(
            "/author/:id/update/",
            get(api::authors::update_author_form).post(api::authors::update_author),
        )
        .route_layer(guard(Operation::UpdateAuthor));

    let author_delete = Router::new()
        .route(
            "/author/:id/delete/",
            get(api::authors::delete_author_form).post(api::authors::delete_author),
        )
        .route_layer(guard(Operation::DeleteAuthor));

    // Book maintenance routes
    let book_create = Router::new()
        .route(
            "/book/create/",
            get(api::books::create_book_form).post(api::books::create_book),
        )
        .route_layer(guard(Operation::CreateBook));

    let book_update = Router::new()
        .route(
            "/book/:id/update",
            get(api::books::update_book_form).post(api::books::update_book),
        )
        .route_layer(guard(Operation::UpdateBook));

    let book_delete = Router::new()
        .route(
            "/book/:id/delete",
            get(api::books::delete_book_form).post(api::books::delete_book),
        )
        .route_layer(guard(Operation::DeleteBook));

    let routes = public
        .merge(my_loans)
        .merge(all_loans)
        .merge(renewal)
        .merge(author_create)
        .merge(author_update)
        .merge(author_delete)
        .merge(book_create)
        .merge(book_update)
        .merge(book_delete)
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .merge(routes)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
