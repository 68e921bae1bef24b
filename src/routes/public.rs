use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints reachable without a session. The login and signup POST
/// handlers are the only writers to the session store; the chat proxy is
/// public by contract and never touches the session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /
        // The landing page.
        .route("/", get(handlers::landing))
        // GET /login + POST /login
        // The login form and the credential check. Failed logins re-render
        // the form with one generic message.
        .route("/login", get(handlers::login_page).post(handlers::login))
        // POST /logout
        // Flushes the session and redirects to the landing page.
        .route("/logout", post(handlers::logout))
        // GET /signup + POST /signup
        // Role-selection view and the registration submit.
        .route(
            "/signup",
            get(handlers::signup_menu).post(handlers::signup),
        )
        // GET /signup/{role}
        // Role-specific signup form; 404 (plain text) outside
        // {student, teacher, librarian}.
        .route("/signup/{role}", get(handlers::signup_role))
        // POST /chat
        // Relay to the external completion service; JSON in, JSON out.
        .route("/chat", post(handlers::chat))
        // GET /health
        // Unauthenticated liveness check for monitoring.
        .route("/health", get(|| async { "ok" }))
}
