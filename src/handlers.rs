use crate::{
    AppState,
    auth::{
        self, AccessDenied, SESSION_USER_KEY, SessionIdentity,
    },
    data::LEDGER_ROLL,
    models::{
        ChatReply, ChatRequest, LoginForm, Role, RollQuery, SignupForm, StudentRecord,
        TeacherProfile, User,
    },
    views::{self, View},
};
use axum::{
    Form, Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Redirect,
};
use serde_json::json;
use tower_sessions::Session;

/// Semester whose students make up the class roster view. The roster is
/// pinned to this value; it is not derived from the requesting teacher's
/// `class_assigned` label.
const CLASS_SEMESTER: u8 = 6;

/// Default class label assigned to teachers who sign up without one.
const DEFAULT_CLASS_LABEL: &str = "Unassigned";

/// Client-facing reply when the chat upstream fails for any reason.
const CHAT_APOLOGY: &str =
    "Sorry, I am unable to answer right now. Please try again in a little while.";

/// sanitize
///
/// Trims a submitted value and escapes markup-significant characters, so
/// nothing a user types can carry script or markup into a stored record,
/// a view context, or the chat relay.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

// --- Public Pages ---

/// landing
///
/// [Public Route] GET / — the landing page.
pub async fn landing() -> View {
    View::new("index", json!({}))
}

/// login_page
///
/// [Public Route] GET /login — the login form view.
pub async fn login_page() -> View {
    View::new("login", json!({}))
}

/// login
///
/// [Public Route] POST /login — credential check and session attachment.
///
/// Both fields are sanitized, then matched exactly against the data store
/// (plaintext comparison, preserved from the upstream data model). Success
/// stores the roll in the session and redirects to the role's dashboard.
/// Failure re-renders the login view with one generic message that never
/// reveals whether the roll exists. No lockout, no attempt counting.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, View> {
    let roll = sanitize(&form.roll);
    let password = sanitize(&form.password);

    match state.repo.authenticate(&roll, &password).await {
        Some(user) => {
            attach_identity(&session, &user).await?;
            Ok(Redirect::to(user.role.dashboard_path()))
        }
        None => Err(View::new(
            "login",
            json!({ "error": "Invalid roll number or password." }),
        )),
    }
}

/// logout
///
/// [Public Route] POST /logout — destroys the session and returns home.
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = session.flush().await {
        tracing::error!("session flush failed on logout: {:?}", e);
    }
    Redirect::to("/")
}

/// signup_menu
///
/// [Public Route] GET /signup — the role-selection view. Admin accounts
/// are fixture-only and have no signup form.
pub async fn signup_menu() -> View {
    View::new(
        "signup-menu",
        json!({ "roles": ["student", "teacher", "librarian"] }),
    )
}

/// signup_role
///
/// [Public Route] GET /signup/{role} — the role-specific signup form.
/// Any value outside {student, teacher, librarian} is a 404 with a
/// plain-text error.
pub async fn signup_role(Path(role): Path<String>) -> Result<View, (StatusCode, String)> {
    match Role::parse(&role) {
        Some(parsed) if parsed != Role::Admin => {
            Ok(View::new("signup", json!({ "role": parsed })))
        }
        _ => Err((
            StatusCode::NOT_FOUND,
            format!("No signup form for role '{role}'"),
        )),
    }
}

/// signup
///
/// [Public Route] POST /signup — registration.
///
/// All fields are sanitized; the submitted role is validated against the
/// allowed set and anything absent or unknown (including "admin") falls
/// back to student. Role-conditional defaults: a student starts in
/// semester 1 with empty performance and report-card containers; a teacher
/// without a class label gets `DEFAULT_CLASS_LABEL`. Uniqueness is enforced
/// by the repository's atomic insert-if-absent; a duplicate roll re-renders
/// the signup form with a specific message and leaves the store untouched.
/// Success authenticates the new identity immediately and redirects to the
/// role's dashboard, exactly as login does.
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Redirect, View> {
    let name = sanitize(&form.name);
    let roll = sanitize(&form.roll);
    let password = sanitize(&form.password);

    let role = form
        .role
        .as_deref()
        .and_then(Role::parse)
        .filter(|role| *role != Role::Admin)
        .unwrap_or(Role::Student);

    let user = match role {
        Role::Teacher => {
            let class_assigned = form
                .class_assigned
                .as_deref()
                .map(sanitize)
                .filter(|label| !label.is_empty())
                .unwrap_or_else(|| DEFAULT_CLASS_LABEL.to_string());
            User::new_teacher(&name, &roll, &password, &class_assigned)
        }
        Role::Librarian => User::new_librarian(&name, &roll, &password),
        _ => {
            let university_roll = form.university_roll.as_deref().map(sanitize).unwrap_or_default();
            let college = form.college.as_deref().map(sanitize).unwrap_or_default();
            User::new_student(&name, &roll, &password, &university_roll, &college)
        }
    };

    match state.repo.insert_if_absent(user).await {
        Ok(user) => {
            attach_identity(&session, &user).await?;
            Ok(Redirect::to(user.role.dashboard_path()))
        }
        Err(e) => {
            tracing::debug!("signup rejected: {}", e);
            Err(View::new(
                "signup",
                json!({
                    "role": role,
                    "error": "This roll number is already registered.",
                }),
            ))
        }
    }
}

/// attach_identity
///
/// Stores the user's roll in the session record. A session-store failure
/// here surfaces as a 500 error view rather than a silent unauthenticated
/// redirect loop.
async fn attach_identity(session: &Session, user: &User) -> Result<(), View> {
    session
        .insert(SESSION_USER_KEY, user.roll.clone())
        .await
        .map_err(|e| {
            tracing::error!("failed to attach identity to session: {:?}", e);
            views::error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Could not establish a session. Please try again.",
            )
        })
}

// --- Role-Gated Dashboards ---

/// student_dashboard
///
/// [Protected Route: student] GET /student — the student's own record.
pub async fn student_dashboard(identity: SessionIdentity) -> Result<View, AccessDenied> {
    identity.require(auth::STUDENT_ONLY)?;

    let Some(record) = StudentRecord::from_user(&identity.user) else {
        return Ok(views::error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Student profile data is missing for this account.",
        ));
    };

    Ok(View::new("student", json!({ "student": record })))
}

/// library
///
/// [Protected Route: student, librarian, admin] GET /library — the issued
/// book ledger and the resource catalogue. Read-only.
pub async fn library(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<View, AccessDenied> {
    identity.require(auth::LIBRARY_ROLES)?;

    Ok(View::new(
        "library",
        json!({
            "issued_books": state.library.issued_books,
            "resources": state.library.resources,
        }),
    ))
}

/// guidance
///
/// [Protected Route: student, teacher, admin] GET /guidance — the study
/// resource catalogue plus the chat entry point.
pub async fn guidance(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<View, AccessDenied> {
    identity.require(auth::GUIDANCE_ROLES)?;

    Ok(View::new(
        "guidance",
        json!({
            "name": identity.user.name,
            "resources": state.library.resources,
        }),
    ))
}

// --- Admin ---

/// admin_dashboard
///
/// [Admin Route] GET /admin/dashboard — per-role user counters and an
/// empty search form.
pub async fn admin_dashboard(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<View, AccessDenied> {
    identity.require(auth::ADMIN_ONLY)?;

    let stats = state.repo.stats().await;
    Ok(View::new(
        "admin-dashboard",
        json!({ "stats": stats, "query": "", "student": null }),
    ))
}

/// admin_search
///
/// [Admin Route] POST /admin/search — exact-roll lookup of a student-role
/// user. The sanitized query is echoed back alongside the optional result.
pub async fn admin_search(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Form(form): Form<RollQuery>,
) -> Result<View, AccessDenied> {
    identity.require(auth::ADMIN_ONLY)?;

    let roll = sanitize(&form.roll);
    let student = state
        .repo
        .find_student(&roll)
        .await
        .as_ref()
        .and_then(StudentRecord::from_user);

    let stats = state.repo.stats().await;
    Ok(View::new(
        "admin-dashboard",
        json!({ "stats": stats, "query": roll, "student": student }),
    ))
}

// --- Librarian ---

/// librarian_control
///
/// [Librarian Route] GET /librarian/control — the control view with an
/// empty student search.
pub async fn librarian_control(identity: SessionIdentity) -> Result<View, AccessDenied> {
    identity.require(auth::LIBRARIAN_ONLY)?;

    Ok(View::new(
        "librarian-control",
        json!({ "query": "", "record": null }),
    ))
}

/// librarian_search
///
/// [Librarian Route] POST /librarian/search-student — locates a student
/// and builds their issue record.
///
/// The issue ledger currently resolves books for the single roll
/// `LEDGER_ROLL`; every other student gets an empty book list. That is the
/// literal behavior of the upstream design, kept as-is.
pub async fn librarian_search(
    identity: SessionIdentity,
    State(state): State<AppState>,
    Form(form): Form<RollQuery>,
) -> Result<View, AccessDenied> {
    identity.require(auth::LIBRARIAN_ONLY)?;

    let roll = sanitize(&form.roll);
    match state.repo.find_student(&roll).await {
        Some(student) => {
            let books = if student.roll == LEDGER_ROLL {
                state.library.issued_books.clone()
            } else {
                Vec::new()
            };
            Ok(View::new(
                "librarian-control",
                json!({
                    "query": roll,
                    "record": {
                        "roll": student.roll,
                        "name": student.name,
                        "books": books,
                    },
                }),
            ))
        }
        None => Ok(View::new(
            "librarian-control",
            json!({
                "query": roll,
                "record": null,
                "error": "No student found with that roll number.",
            }),
        )),
    }
}

// --- Teacher ---

/// class_view
///
/// [Teacher Route] GET /teacher/class — the roster of students in
/// `CLASS_SEMESTER`, plus the requesting teacher's own class label for
/// display.
pub async fn class_view(
    identity: SessionIdentity,
    State(state): State<AppState>,
) -> Result<View, AccessDenied> {
    identity.require(auth::TEACHER_ONLY)?;

    let class_assigned = match &identity.user.profile {
        crate::models::Profile::Teacher(TeacherProfile { class_assigned }) => {
            class_assigned.clone()
        }
        _ => String::new(),
    };

    let roster: Vec<StudentRecord> = state
        .repo
        .students_in_semester(CLASS_SEMESTER)
        .await
        .iter()
        .filter_map(StudentRecord::from_user)
        .collect();

    Ok(View::new(
        "teacher-class",
        json!({
            "class_assigned": class_assigned,
            "semester": CLASS_SEMESTER,
            "students": roster,
        }),
    ))
}

// --- Chat Proxy ---

/// chat
///
/// [Public Route] POST /chat — relays one sanitized user message to the
/// external completion service.
///
/// Success returns the completion text as `{reply}`. Any upstream failure
/// (network, quota, malformed response) is logged server-side and surfaced
/// to the client as one generic apology with a server-error status.
pub async fn chat(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> (StatusCode, Json<ChatReply>) {
    let message = sanitize(&payload.message);

    match state.chat.complete(&message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatReply { reply })),
        Err(e) => {
            tracing::error!("chat completion failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatReply {
                    reply: CHAT_APOLOGY.to_string(),
                }),
            )
        }
    }
}

// --- Fallback ---

/// not_found
///
/// Catch-all for unmatched routes: the generic error view, carrying the
/// requested path in its message.
pub async fn not_found(uri: Uri) -> View {
    views::error_page(
        StatusCode::NOT_FOUND,
        &format!("No page found at {}", uri.path()),
    )
}
