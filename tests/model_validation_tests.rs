use campus_portal::models::{
    ChatReply, Profile, Resource, Role, User,
};

#[test]
fn test_role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Role::Student).unwrap(), r#""student""#);
    assert_eq!(serde_json::to_string(&Role::Librarian).unwrap(), r#""librarian""#);

    let parsed: Role = serde_json::from_str(r#""teacher""#).unwrap();
    assert_eq!(parsed, Role::Teacher);
}

#[test]
fn test_role_parse_is_case_insensitive_and_strict() {
    assert_eq!(Role::parse(" Admin "), Some(Role::Admin));
    assert_eq!(Role::parse("STUDENT"), Some(Role::Student));
    assert_eq!(Role::parse("superuser"), None);
    assert_eq!(Role::parse(""), None);
}

#[test]
fn test_dashboard_paths_per_role() {
    assert_eq!(Role::Admin.dashboard_path(), "/admin/dashboard");
    assert_eq!(Role::Librarian.dashboard_path(), "/librarian/control");
    assert_eq!(Role::Teacher.dashboard_path(), "/teacher/class");
    assert_eq!(Role::Student.dashboard_path(), "/student");
}

#[test]
fn test_profile_serializes_with_kind_tag() {
    let user = User::new_student("A", "1", "pw", "u1", "IET");
    let json_output = serde_json::to_string(&user.profile).unwrap();

    // The role payload is a tagged variant, keyed by "kind".
    assert!(json_output.contains(r#""kind":"student""#));
    assert!(json_output.contains(r#""semester":1"#));

    let teacher = User::new_teacher("B", "2", "pw", "Sem 6");
    let json_output = serde_json::to_string(&teacher.profile).unwrap();
    assert!(json_output.contains(r#""kind":"teacher""#));
    assert!(json_output.contains(r#""class_assigned":"Sem 6""#));
}

#[test]
fn test_user_serialization_never_carries_password() {
    let user = User::new_librarian("Kabir Das", "lib001", "libpass");
    let json_output = serde_json::to_string(&user).unwrap();

    // CRITICAL: the plaintext credential must stay server-side.
    assert!(!json_output.contains("libpass"));
    assert!(!json_output.contains("password"));
    assert!(json_output.contains(r#""roll":"lib001""#));
}

#[test]
fn test_resource_category_uses_type_wire_name() {
    // 'type' is a reserved keyword in Rust, renamed internally; the JSON
    // key must stay "type".
    let resource = Resource {
        resource_type: "notes".to_string(),
        subject: "DS".to_string(),
        topic: "Heaps".to_string(),
        download_url: "/resources/ds-heaps.pdf".to_string(),
    };
    let json_output = serde_json::to_string(&resource).unwrap();
    assert!(json_output.contains(r#""type":"notes""#));
    assert!(!json_output.contains("resource_type"));
}

#[test]
fn test_chat_reply_wire_shape() {
    let reply = ChatReply {
        reply: "All the best!".to_string(),
    };
    assert_eq!(
        serde_json::to_string(&reply).unwrap(),
        r#"{"reply":"All the best!"}"#
    );
}

#[test]
fn test_new_teacher_profile_matches_role_tag() {
    let teacher = User::new_teacher("Dr. J", "t1", "pw", "Sem 6");
    assert_eq!(teacher.role, Role::Teacher);
    assert!(matches!(teacher.profile, Profile::Teacher(_)));

    let admin = User::new_admin("M", "a1", "pw");
    assert_eq!(admin.role, Role::Admin);
    assert!(matches!(admin.profile, Profile::Admin));
}
