//! Router module index.
//!
//! Organizes the application's routing into access-segregated modules. Each
//! protected module's handlers run the role-set guard before reading any
//! data, so a route can never be exposed to a role outside its declared set.

/// Routes accessible without a session: landing, auth entry points, signup,
/// the chat proxy, and the health check.
pub mod public;

/// Mixed-audience dashboards, each with its own role set
/// (student / library / guidance).
pub mod dashboards;

/// Routes restricted to the 'admin' role, nested under /admin.
pub mod admin;

/// Routes restricted to the 'librarian' role, nested under /librarian.
pub mod librarian;

/// Routes restricted to the 'teacher' role, nested under /teacher.
pub mod teacher;
