//! Seed fixtures present at process start. These are data, not logic: every
//! restart rebuilds exactly this collection, and all mutation after startup
//! goes through the repository's signup path.

use crate::models::{
    IssuedBook, LibraryData, Profile, Resource, Role, SemesterGpa, StudentProfile, User,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// The one roll number the librarian issue ledger currently resolves;
/// see `handlers::librarian_search`.
pub const LEDGER_ROLL: &str = "22111234";

/// seed_users
///
/// The user records available on a fresh process: two sixth-semester
/// students, one fourth-semester student, and one account per staff role.
pub fn seed_users() -> Vec<User> {
    let mut report_cards = BTreeMap::new();
    for semester in 1..=5u8 {
        report_cards.insert(semester, format!("/reports/22111234-sem{semester}.pdf"));
    }

    vec![
        User {
            roll: LEDGER_ROLL.to_string(),
            password: "pass123".to_string(),
            name: "Aarav Sharma".to_string(),
            role: Role::Student,
            profile_pic: "/images/students/22111234.png".to_string(),
            profile: Profile::Student(StudentProfile {
                university_roll: "2021CSE1234".to_string(),
                semester: 6,
                college: "Institute of Engineering and Technology".to_string(),
                performance: vec![
                    SemesterGpa { semester: 1, gpa: 8.1 },
                    SemesterGpa { semester: 2, gpa: 8.4 },
                    SemesterGpa { semester: 3, gpa: 7.9 },
                    SemesterGpa { semester: 4, gpa: 8.6 },
                    SemesterGpa { semester: 5, gpa: 8.8 },
                ],
                report_cards,
            }),
            created_at: Utc::now(),
        },
        User {
            roll: "22111567".to_string(),
            password: "pass456".to_string(),
            name: "Priya Verma".to_string(),
            role: Role::Student,
            profile_pic: "/images/students/22111567.png".to_string(),
            profile: Profile::Student(StudentProfile {
                university_roll: "2022CSE1567".to_string(),
                semester: 4,
                college: "Institute of Engineering and Technology".to_string(),
                performance: vec![
                    SemesterGpa { semester: 1, gpa: 9.0 },
                    SemesterGpa { semester: 2, gpa: 8.7 },
                    SemesterGpa { semester: 3, gpa: 9.1 },
                ],
                report_cards: BTreeMap::new(),
            }),
            created_at: Utc::now(),
        },
        User {
            roll: "22111890".to_string(),
            password: "pass789".to_string(),
            name: "Rohan Gupta".to_string(),
            role: Role::Student,
            profile_pic: "/images/students/22111890.png".to_string(),
            profile: Profile::Student(StudentProfile {
                university_roll: "2021CSE1890".to_string(),
                semester: 6,
                college: "Institute of Engineering and Technology".to_string(),
                performance: vec![
                    SemesterGpa { semester: 1, gpa: 7.2 },
                    SemesterGpa { semester: 2, gpa: 7.5 },
                    SemesterGpa { semester: 3, gpa: 7.8 },
                    SemesterGpa { semester: 4, gpa: 8.0 },
                    SemesterGpa { semester: 5, gpa: 8.2 },
                ],
                report_cards: BTreeMap::new(),
            }),
            created_at: Utc::now(),
        },
        User::new_admin("Meera Iyer", "admin001", "adminpass"),
        User::new_librarian("Kabir Das", "lib001", "libpass"),
        User::new_teacher(
            "Dr. Anand Joshi",
            "teach001",
            "teachpass",
            "B.Tech CSE - Semester 6",
        ),
    ]
}

/// library_data
///
/// The read-only library fixture: the issue ledger entries (all attributed
/// to `LEDGER_ROLL`) and the downloadable resource catalogue.
pub fn library_data() -> LibraryData {
    LibraryData {
        issued_books: vec![
            IssuedBook {
                title: "Introduction to Algorithms".to_string(),
                issue_date: "2025-01-10".to_string(),
                return_date: "2025-02-10".to_string(),
            },
            IssuedBook {
                title: "Operating System Concepts".to_string(),
                issue_date: "2025-01-18".to_string(),
                return_date: "2025-02-18".to_string(),
            },
        ],
        resources: vec![
            Resource {
                resource_type: "notes".to_string(),
                subject: "Data Structures".to_string(),
                topic: "Balanced Trees".to_string(),
                download_url: "/resources/ds-balanced-trees.pdf".to_string(),
            },
            Resource {
                resource_type: "notes".to_string(),
                subject: "Computer Networks".to_string(),
                topic: "Transport Layer".to_string(),
                download_url: "/resources/cn-transport-layer.pdf".to_string(),
            },
            Resource {
                resource_type: "pyq".to_string(),
                subject: "Operating Systems".to_string(),
                topic: "End Semester 2024".to_string(),
                download_url: "/resources/os-endsem-2024.pdf".to_string(),
            },
            Resource {
                resource_type: "pyq".to_string(),
                subject: "Database Systems".to_string(),
                topic: "Mid Semester 2024".to_string(),
                download_url: "/resources/dbms-midsem-2024.pdf".to_string(),
            },
        ],
    }
}
