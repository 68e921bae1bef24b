use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    models::{Role, User},
    repository::RepositoryState,
    views::View,
};

/// Key under which the authenticated user's roll number is stored in the
/// session record. The session never holds the full user; the extractor
/// re-resolves the record through the repository on every request.
pub const SESSION_USER_KEY: &str = "user_roll";

// --- Per-Route Role Sets ---
//
// Each protected route family declares its own set; there is no hierarchy
// (teacher does not imply student, admin does not imply librarian).

pub const STUDENT_ONLY: &[Role] = &[Role::Student];
pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub const LIBRARIAN_ONLY: &[Role] = &[Role::Librarian];
pub const TEACHER_ONLY: &[Role] = &[Role::Teacher];
pub const LIBRARY_ROLES: &[Role] = &[Role::Student, Role::Librarian, Role::Admin];
pub const GUIDANCE_ROLES: &[Role] = &[Role::Student, Role::Teacher, Role::Admin];

/// SessionIdentity
///
/// The resolved identity of an authenticated request: the full user record
/// attached to the browser session. Handlers take this as an extractor
/// argument and call [`SessionIdentity::require`] with their route's role
/// set before touching any data.
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    pub user: User,
}

/// SessionIdentity Extractor Implementation
///
/// The process:
/// 1. Dependency resolution: the repository is pulled from the app state.
/// 2. Session lookup: the tower-sessions record attached by the session
///    middleware is read for the stored roll number.
/// 3. Store lookup: the roll is resolved back to a live user record, so a
///    session referring to a record that no longer exists carries no access.
///
/// Rejection: a redirect to the login entry point (no body), covering the
/// missing-session, empty-session, and stale-roll cases alike.
impl<S> FromRequestParts<S> for SessionIdentity
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);

        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        let roll: String = session
            .get(SESSION_USER_KEY)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| Redirect::to("/login"))?;

        let user = repo
            .find_by_roll(&roll)
            .await
            .ok_or_else(|| Redirect::to("/login"))?;

        Ok(SessionIdentity { user })
    }
}

impl SessionIdentity {
    /// require
    ///
    /// The access-control guard: allows the request iff this session's role
    /// is inside the route's declared role set. The rejection renders the
    /// generic access-denied view naming the roles the route accepts.
    pub fn require(&self, allowed: &[Role]) -> Result<(), AccessDenied> {
        if allowed.contains(&self.user.role) {
            Ok(())
        } else {
            Err(AccessDenied {
                required: allowed.to_vec(),
            })
        }
    }
}

/// AccessDenied
///
/// Authorization failure: a session exists but its role is outside the
/// route's role set. Distinct from the extractor's redirect, which covers
/// the unauthenticated case.
#[derive(Debug, Clone)]
pub struct AccessDenied {
    pub required: Vec<Role>,
}

impl IntoResponse for AccessDenied {
    fn into_response(self) -> Response {
        let roles = self
            .required
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        View::new(
            "access-denied",
            serde_json::json!({
                "message": format!("Access denied. This page requires one of the following roles: {roles}."),
                "required_roles": self.required,
            }),
        )
        .with_status(StatusCode::FORBIDDEN)
        .into_response()
    }
}
