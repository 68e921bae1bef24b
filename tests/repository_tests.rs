use campus_portal::{
    data,
    models::{Profile, Role, User},
    repository::{InMemoryRepository, RepositoryError, UserRepository},
};
use std::sync::Arc;

fn seeded_repo() -> InMemoryRepository {
    InMemoryRepository::new(data::seed_users())
}

#[tokio::test]
async fn test_authenticate_exact_match_succeeds() {
    let repo = seeded_repo();

    let user = repo.authenticate("22111234", "pass123").await.unwrap();
    assert_eq!(user.name, "Aarav Sharma");
    assert_eq!(user.role, Role::Student);
}

#[tokio::test]
async fn test_authenticate_wrong_password_or_unknown_roll_fails() {
    let repo = seeded_repo();

    assert!(repo.authenticate("22111234", "wrong").await.is_none());
    assert!(repo.authenticate("00000000", "pass123").await.is_none());
}

#[tokio::test]
async fn test_insert_duplicate_roll_is_rejected_and_store_unchanged() {
    let repo = seeded_repo();
    let before = repo.stats().await;

    let duplicate = User::new_student("Imposter", "22111234", "other", "", "");
    let result = repo.insert_if_absent(duplicate).await;

    assert_eq!(
        result.unwrap_err(),
        RepositoryError::DuplicateRoll("22111234".to_string())
    );
    assert_eq!(repo.stats().await, before);
}

#[tokio::test]
async fn test_insert_fresh_student_has_signup_defaults() {
    let repo = seeded_repo();
    let before = repo.stats().await;

    let fresh = User::new_student("Nisha Rao", "23110001", "secret", "2023CSE0001", "IET");
    repo.insert_if_absent(fresh).await.unwrap();

    let after = repo.stats().await;
    assert_eq!(after.total_users, before.total_users + 1);
    assert_eq!(after.students, before.students + 1);

    let stored = repo.find_by_roll("23110001").await.unwrap();
    match &stored.profile {
        Profile::Student(profile) => {
            assert_eq!(profile.semester, 1);
            assert!(profile.performance.is_empty());
            assert!(profile.report_cards.is_empty());
        }
        other => panic!("expected a student profile, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_inserts_racing_on_one_roll_yield_one_winner() {
    let repo = Arc::new(seeded_repo());
    let before = repo.stats().await;

    let user = User::new_librarian("Race A", "77770001", "pw");
    let rival = User::new_librarian("Race B", "77770001", "pw");

    let (left, right) = tokio::join!(
        {
            let repo = repo.clone();
            async move { repo.insert_if_absent(user).await }
        },
        {
            let repo = repo.clone();
            async move { repo.insert_if_absent(rival).await }
        },
    );

    // Exactly one side wins; the existence check and the append are atomic.
    assert_eq!(
        [left.is_ok(), right.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    assert_eq!(repo.stats().await.total_users, before.total_users + 1);
}

#[tokio::test]
async fn test_find_student_excludes_staff_rolls() {
    let repo = seeded_repo();

    assert!(repo.find_student("22111234").await.is_some());
    // lib001 exists but is not a student-role record.
    assert!(repo.find_student("lib001").await.is_none());
}

#[tokio::test]
async fn test_students_in_semester_filters_exactly() {
    let repo = seeded_repo();

    let sixth = repo.students_in_semester(6).await;
    let rolls: Vec<&str> = sixth.iter().map(|user| user.roll.as_str()).collect();
    assert_eq!(rolls.len(), 2);
    assert!(rolls.contains(&"22111234"));
    assert!(rolls.contains(&"22111890"));

    // The fourth-semester student is never in the sixth-semester roster.
    assert!(!rolls.contains(&"22111567"));
    assert_eq!(repo.students_in_semester(12).await.len(), 0);
}

#[tokio::test]
async fn test_stats_counts_every_role() {
    let repo = seeded_repo();

    let stats = repo.stats().await;
    assert_eq!(stats.total_users, 6);
    assert_eq!(stats.students, 3);
    assert_eq!(stats.teachers, 1);
    assert_eq!(stats.librarians, 1);
    assert_eq!(stats.admins, 1);
}
