use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Admin Router Module
///
/// Routes exclusively accessible to the 'admin' role, nested under /admin.
/// Every handler here enforces `ADMIN_ONLY` through the session guard
/// before touching the data store.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard
        // Per-role user counters plus the (empty) student search form.
        .route("/dashboard", get(handlers::admin_dashboard))
        // POST /admin/search
        // Exact-roll student lookup; echoes the sanitized query back with
        // the optional result.
        .route("/search", post(handlers::admin_search))
}
