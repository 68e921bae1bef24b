use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Dashboard Router Module
///
/// The mixed-audience protected views. Unlike the /admin, /librarian, and
/// /teacher trees, these routes each admit a different role set, declared
/// per handler:
///
/// - /student   -> {student}
/// - /library   -> {student, librarian, admin}
/// - /guidance  -> {student, teacher, admin}
///
/// All three are read-only projections over the data store and the library
/// fixture.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/student", get(handlers::student_dashboard))
        .route("/library", get(handlers::library))
        .route("/guidance", get(handlers::guidance))
}
