//! Fixed-width rendering of student records.

use rollbook_core::{Student, StudentStatus};

/// Formats students as a fixed-width table, one row per record.
///
/// Returns an explicit notice instead of an empty table when there is
/// nothing to show.
pub fn format_student_table(students: &[Student]) -> String {
    if students.is_empty() {
        return "No student records found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<5} {:<20} {:<5} {:<15} {:<10}\n",
        "ID", "Name", "Age", "Course", "Status"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');
    for student in students {
        output.push_str(&format!(
            "{:<5} {:<20} {:<5} {:<15} {:<10}\n",
            student.id,
            student.name,
            student.age.map_or_else(String::new, |age| age.to_string()),
            student.course.as_deref().unwrap_or(""),
            status_label(student.status),
        ));
    }
    output
}

/// Formats one student as a single-line detail for search results.
pub fn format_student(student: &Student) -> String {
    format!(
        "ID: {}, Name: {}, Age: {}, Course: {}, Status: {}\n",
        student.id,
        student.name,
        student
            .age
            .map_or_else(|| "unknown".to_string(), |age| age.to_string()),
        student.course.as_deref().unwrap_or("none"),
        status_label(student.status),
    )
}

pub fn status_label(status: StudentStatus) -> &'static str {
    match status {
        StudentStatus::Active => "Active",
        StudentStatus::Inactive => "Inactive",
    }
}
