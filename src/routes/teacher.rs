use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Teacher Router Module
///
/// Routes exclusively accessible to the 'teacher' role, nested under
/// /teacher.
pub fn teacher_routes() -> Router<AppState> {
    Router::new()
        // GET /teacher/class
        // The semester-pinned class roster plus the teacher's own class label.
        .route("/class", get(handlers::class_view))
}
