use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Librarian Router Module
///
/// Routes exclusively accessible to the 'librarian' role, nested under
/// /librarian. The search handler resolves issued books only for the
/// single ledger roll; see `handlers::librarian_search`.
pub fn librarian_routes() -> Router<AppState> {
    Router::new()
        // GET /librarian/control
        // The control view with an empty student search.
        .route("/control", get(handlers::librarian_control))
        // POST /librarian/search-student
        // Student lookup plus the issue-record view for the match.
        .route("/search-student", post(handlers::librarian_search))
}
