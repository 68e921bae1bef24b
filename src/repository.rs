use crate::models::{PortalStats, Profile, Role, User};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// RepositoryError
///
/// The error domain of the data-access layer. Lookups that simply find
/// nothing return `Option`; only operations that can be refused carry an
/// error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("roll number {0} is already registered")]
    DuplicateRoll(String),
}

/// UserRepository Trait
///
/// Abstract contract for the user data store. Handlers interact with this
/// trait only, which keeps them testable against a mock and keeps the
/// storage choice (in-memory today) swappable.
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn UserRepository>`) safely shareable across Axum's asynchronous
/// task boundaries.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup by roll number, any role.
    async fn find_by_roll(&self, roll: &str) -> Option<User>;

    /// Credential check: exact roll AND exact plaintext password match.
    /// Returns the matched record; `None` never distinguishes an unknown
    /// roll from a wrong password.
    async fn authenticate(&self, roll: &str, password: &str) -> Option<User>;

    /// Inserts the record iff no record with the same roll exists. The
    /// check and the append are one atomic operation; two concurrent
    /// signups racing on one roll cannot both succeed.
    async fn insert_if_absent(&self, user: User) -> Result<User, RepositoryError>;

    /// Exact-match lookup restricted to student-role records.
    async fn find_student(&self, roll: &str) -> Option<User>;

    /// All student-role records whose semester equals the given value.
    async fn students_in_semester(&self, semester: u8) -> Vec<User>;

    /// Per-role user counters for the admin dashboard.
    async fn stats(&self) -> PortalStats;
}

/// RepositoryState
///
/// The concrete type used to share the data store across the application state.
pub type RepositoryState = Arc<dyn UserRepository>;

/// InMemoryRepository
///
/// The process-lifetime user store: a `Vec<User>` behind an async `RwLock`.
/// Reads take the shared lock; `insert_if_absent` takes the exclusive lock
/// for both the existence check and the append, which is what enforces the
/// roll-uniqueness invariant under concurrent signups. Nothing is persisted;
/// every restart begins again from the seed fixtures.
pub struct InMemoryRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryRepository {
    /// Creates a store pre-populated with the given seed records.
    pub fn new(seed: Vec<User>) -> Self {
        Self {
            users: RwLock::new(seed),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn find_by_roll(&self, roll: &str) -> Option<User> {
        let users = self.users.read().await;
        users.iter().find(|user| user.roll == roll).cloned()
    }

    async fn authenticate(&self, roll: &str, password: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|user| user.roll == roll && user.password == password)
            .cloned()
    }

    async fn insert_if_absent(&self, user: User) -> Result<User, RepositoryError> {
        // Existence check and append share one write guard.
        let mut users = self.users.write().await;
        if users.iter().any(|existing| existing.roll == user.roll) {
            return Err(RepositoryError::DuplicateRoll(user.roll));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_student(&self, roll: &str) -> Option<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|user| user.role == Role::Student && user.roll == roll)
            .cloned()
    }

    async fn students_in_semester(&self, semester: u8) -> Vec<User> {
        let users = self.users.read().await;
        users
            .iter()
            .filter(|user| match &user.profile {
                Profile::Student(profile) => profile.semester == semester,
                _ => false,
            })
            .cloned()
            .collect()
    }

    async fn stats(&self) -> PortalStats {
        let users = self.users.read().await;
        let count_role = |role: Role| users.iter().filter(|user| user.role == role).count();
        PortalStats {
            total_users: users.len(),
            students: count_role(Role::Student),
            teachers: count_role(Role::Teacher),
            librarians: count_role(Role::Librarian),
            admins: count_role(Role::Admin),
        }
    }
}
