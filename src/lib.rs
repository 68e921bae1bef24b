use axum::{Router, http::HeaderName};
use std::sync::Arc;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tower_sessions::{
    Expiry, MemoryStore, SessionManagerLayer,
    cookie::{Key, time::Duration},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod chat;
pub mod config;
pub mod data;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod views;

// Module for routing segregation (public, dashboards, admin, librarian, teacher).
pub mod routes;
use routes::{admin, dashboards, librarian, public, teacher};

// --- Public Re-exports ---

// Makes core state types easily accessible to the application entry point
// (main.rs) and the integration tests.
pub use chat::{ChatCompletionClient, ChatState, MockChatService};
pub use config::{AppConfig, Env};
pub use repository::{InMemoryRepository, RepositoryState};

/// LibraryState
///
/// The shared handle to the read-only library fixture.
pub type LibraryState = Arc<models::LibraryData>;

/// AppState
///
/// The single, thread-safe container holding all application services and
/// configuration, shared across all incoming requests. The repository is
/// the only mutable component, and its mutation is internal to the trait
/// implementation.
#[derive(Clone)]
pub struct AppState {
    /// Data store: the user collection behind the `UserRepository` trait.
    pub repo: RepositoryState,
    /// Chat proxy: the external completion service behind `ChatService`.
    pub chat: ChatState,
    /// Library fixture: issued-book ledger and resource catalogue, read-only.
    pub library: LibraryState,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations let extractors and handlers pull single components
// out of the shared AppState. The session-identity extractor depends on
// `RepositoryState: FromRef<AppState>`.

impl axum::extract::FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl axum::extract::FromRef<AppState> for ChatState {
    fn from_ref(app_state: &AppState) -> ChatState {
        app_state.chat.clone()
    }
}

impl axum::extract::FromRef<AppState> for LibraryState {
    fn from_ref(app_state: &AppState) -> LibraryState {
        app_state.library.clone()
    }
}

impl axum::extract::FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies the
/// session layer and the observability layers, and registers the
/// application state.
pub fn create_router(state: AppState) -> Router {
    // 1. Session Layer
    // Server-side state lives in the in-process store; the cookie carries
    // only the signed session key. One hour of inactivity ends the session;
    // the Secure attribute is set only in production so local HTTP works.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(state.config.env == Env::Production)
        .with_expiry(Expiry::OnInactivity(Duration::hours(1)))
        .with_signed(Key::derive_from(state.config.session_secret.as_bytes()));

    // 2. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 3. Base Router Assembly
    let base_router = Router::new()
        // Public routes: no session required.
        .merge(public::public_routes())
        // Mixed-audience dashboards: each declares its own role set.
        .merge(dashboards::dashboard_routes())
        // Single-role trees, nested under their prefixes.
        .nest("/admin", admin::admin_routes())
        .nest("/librarian", librarian::librarian_routes())
        .nest("/teacher", teacher::teacher_routes())
        // Unmatched routes: 404 via the generic view, naming the path.
        .fallback(handlers::not_found)
        // Apply the unified state to all routes.
        .with_state(state)
        // The session layer wraps every route so public handlers (login,
        // signup, logout) can write the session too.
        .layer(session_layer);

    // 4. Observability and Correlation Layers (applied outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 4a. Request ID generation: a unique UUID per request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 4b. Request tracing: wraps the request/response lifecycle
                // in a span correlated by that ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 4c. Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 5. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Helper used by `TraceLayer` to customize span creation: includes the
/// `x-request-id` header (if present) alongside the HTTP method and URI so
/// every log line for a single request is correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
