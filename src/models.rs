use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// --- Core Domain Schemas ---

/// Role
///
/// The access-control tag carried by every user record. A session may only
/// reach a protected route when its user's role is inside that route's
/// declared role set; there is no hierarchy between roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
    Librarian,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
            Role::Librarian => "librarian",
            Role::Teacher => "teacher",
        }
    }

    /// parse
    ///
    /// Maps a submitted role string onto the allowed set. Callers decide the
    /// fallback for unknown values (signup defaults to `Student`).
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Role::Student),
            "admin" => Some(Role::Admin),
            "librarian" => Some(Role::Librarian),
            "teacher" => Some(Role::Teacher),
            _ => None,
        }
    }

    /// dashboard_path
    ///
    /// The post-login landing page for each role. Both the login and signup
    /// handlers redirect here after attaching the session identity.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Librarian => "/librarian/control",
            Role::Teacher => "/teacher/class",
            Role::Student => "/student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User
///
/// The canonical identity record held by the in-memory data store. The
/// common header carries everything every role shares; the role-specific
/// payload lives in the tagged `Profile` variant, so a record can never hold
/// another role's fields.
///
/// `password` is stored and compared as plaintext — a known weakness of the
/// upstream data model, preserved here and kept out of every serialized view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier across the user collection.
    pub roll: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub name: String,
    pub role: Role,
    pub profile_pic: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

/// Profile
///
/// Role-conditional payload, selected by the user's role tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Student(StudentProfile),
    Teacher(TeacherProfile),
    Admin,
    Librarian,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StudentProfile {
    pub university_roll: String,
    /// 1-based semester index; new signups always start at 1.
    pub semester: u8,
    pub college: String,
    /// Ordered GPA history, one entry per completed semester.
    pub performance: Vec<SemesterGpa>,
    /// semester -> report-card document path.
    pub report_cards: BTreeMap<u8, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SemesterGpa {
    pub semester: u8,
    pub gpa: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TeacherProfile {
    /// Free-text class label, e.g. "B.Tech CSE - Semester 6".
    pub class_assigned: String,
}

impl User {
    /// new_student
    ///
    /// A freshly signed-up student: semester 1, empty performance history,
    /// no report cards on file yet.
    pub fn new_student(
        name: &str,
        roll: &str,
        password: &str,
        university_roll: &str,
        college: &str,
    ) -> User {
        User {
            roll: roll.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role: Role::Student,
            profile_pic: DEFAULT_PROFILE_PIC.to_string(),
            profile: Profile::Student(StudentProfile {
                university_roll: university_roll.to_string(),
                semester: 1,
                college: college.to_string(),
                performance: Vec::new(),
                report_cards: BTreeMap::new(),
            }),
            created_at: Utc::now(),
        }
    }

    pub fn new_teacher(name: &str, roll: &str, password: &str, class_assigned: &str) -> User {
        User {
            roll: roll.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role: Role::Teacher,
            profile_pic: DEFAULT_PROFILE_PIC.to_string(),
            profile: Profile::Teacher(TeacherProfile {
                class_assigned: class_assigned.to_string(),
            }),
            created_at: Utc::now(),
        }
    }

    pub fn new_librarian(name: &str, roll: &str, password: &str) -> User {
        User {
            roll: roll.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role: Role::Librarian,
            profile_pic: DEFAULT_PROFILE_PIC.to_string(),
            profile: Profile::Librarian,
            created_at: Utc::now(),
        }
    }

    pub fn new_admin(name: &str, roll: &str, password: &str) -> User {
        User {
            roll: roll.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role: Role::Admin,
            profile_pic: DEFAULT_PROFILE_PIC.to_string(),
            profile: Profile::Admin,
            created_at: Utc::now(),
        }
    }
}

/// Placeholder avatar path served by the external static-asset layer.
pub const DEFAULT_PROFILE_PIC: &str = "/images/default-avatar.png";

// --- Library Fixture Schemas ---

/// LibraryData
///
/// Process-wide read-only fixture. No handler mutates it; its lifetime is
/// the process lifetime.
#[derive(Debug, Clone, Serialize, Default)]
pub struct LibraryData {
    pub issued_books: Vec<IssuedBook>,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct IssuedBook {
    pub title: String,
    pub issue_date: String,
    pub return_date: String,
}

/// Resource
///
/// A downloadable study resource (notes, previous-year papers, ...).
/// The wire name of the category field is `type`, which is a reserved
/// keyword in Rust, so we rename it for internal use.
#[derive(Debug, Clone, Serialize, Default)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub subject: String,
    pub topic: String,
    pub download_url: String,
}

// --- Request Payloads (Input Schemas) ---

/// LoginForm
///
/// Body of `POST /login`. Both fields are sanitized before the lookup.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginForm {
    pub roll: String,
    pub password: String,
}

/// SignupForm
///
/// Body of `POST /signup`. The role-specific fields are optional; the
/// handler picks the ones matching the validated role and ignores the rest.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SignupForm {
    pub name: String,
    pub roll: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub university_roll: Option<String>,
    #[serde(default)]
    pub college: Option<String>,
    #[serde(default)]
    pub class_assigned: Option<String>,
}

/// RollQuery
///
/// Body of the admin and librarian student-search forms.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RollQuery {
    pub roll: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatReply {
    pub reply: String,
}

// --- View Projections (Output Schemas) ---

/// StudentRecord
///
/// The student-shaped projection rendered by the student dashboard, the
/// admin search result, and the class roster. Never carries the password.
#[derive(Debug, Clone, Serialize, Default)]
pub struct StudentRecord {
    pub roll: String,
    pub name: String,
    pub profile_pic: String,
    pub university_roll: String,
    pub semester: u8,
    pub college: String,
    pub performance: Vec<SemesterGpa>,
    pub report_cards: BTreeMap<u8, String>,
}

impl StudentRecord {
    /// from_user
    ///
    /// Projects a student-role user into the view shape. Returns `None` for
    /// any non-student record.
    pub fn from_user(user: &User) -> Option<StudentRecord> {
        match &user.profile {
            Profile::Student(profile) => Some(StudentRecord {
                roll: user.roll.clone(),
                name: user.name.clone(),
                profile_pic: user.profile_pic.clone(),
                university_roll: profile.university_roll.clone(),
                semester: profile.semester,
                college: profile.college.clone(),
                performance: profile.performance.clone(),
                report_cards: profile.report_cards.clone(),
            }),
            _ => None,
        }
    }
}

/// PortalStats
///
/// Per-role user counters shown on the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PortalStats {
    pub total_users: usize,
    pub students: usize,
    pub teachers: usize,
    pub librarians: usize,
    pub admins: usize,
}
