use rollbook_core::{Student, StudentDraft, StudentStatus, StudentValidationError};

#[test]
fn draft_new_carries_fields_through() {
    let draft = StudentDraft::new("Alice", Some(20), Some("Math".to_string()));

    assert_eq!(draft.name, "Alice");
    assert_eq!(draft.age, Some(20));
    assert_eq!(draft.course.as_deref(), Some("Math"));
    assert!(draft.validate().is_ok());
}

#[test]
fn draft_validate_rejects_empty_and_whitespace_names() {
    let empty = StudentDraft::new("", None, None);
    assert_eq!(empty.validate(), Err(StudentValidationError::EmptyName));

    let blank = StudentDraft::new("   ", None, None);
    assert_eq!(blank.validate(), Err(StudentValidationError::EmptyName));
}

#[test]
fn is_active_follows_status() {
    let mut student = Student {
        id: 1,
        name: "Alice".to_string(),
        age: None,
        course: None,
        status: StudentStatus::Active,
    };
    assert!(student.is_active());

    student.status = StudentStatus::Inactive;
    assert!(!student.is_active());
}

#[test]
fn student_serialization_uses_expected_wire_fields() {
    let student = Student {
        id: 7,
        name: "Alice".to_string(),
        age: Some(20),
        course: None,
        status: StudentStatus::Inactive,
    };

    let json = serde_json::to_value(&student).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Alice");
    assert_eq!(json["age"], 20);
    assert_eq!(json["course"], serde_json::Value::Null);
    assert_eq!(json["status"], "inactive");

    let decoded: Student = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, student);
}
