//! Menu-driven interaction loop.
//!
//! # Responsibility
//! - Own the terminal cycle: menu, read choice, dispatch, render.
//! - Keep all user-facing messages out of the core crates.
//!
//! # Invariants
//! - Malformed input never reaches storage.
//! - Validation and not-found outcomes keep the loop running; storage
//!   failures end it.

use std::io::{BufRead, Write};

use log::info;
use rollbook_core::{RepoError, StudentDraft, StudentRepository, StudentService, StudentStatus};

use crate::error::CliError;
use crate::input::{optional_text, parse_age, parse_id, prompt_line, InputError};
use crate::render::{format_student, format_student_table, status_label};

const MENU: &str = "\n--- Student Records ---\n\
1. Add student\n\
2. View active students\n\
3. View inactive students\n\
4. Search student by id\n\
5. Update student\n\
6. Deactivate student\n\
7. Reactivate student\n\
8. Exit\n";

enum Flow {
    Continue,
    Quit,
}

/// Runs the interaction cycle until Exit or end of input.
pub fn run<S, R, W>(
    service: &StudentService<S>,
    input: &mut R,
    output: &mut W,
) -> Result<(), CliError>
where
    S: StudentRepository,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{MENU}")?;
        let Some(choice) = prompt_line(input, output, "Enter choice: ")? else {
            break;
        };

        let flow = match choice.as_str() {
            "1" => add_student(service, input, output)?,
            "2" => view_students(service, output, StudentStatus::Active)?,
            "3" => view_students(service, output, StudentStatus::Inactive)?,
            "4" => search_student(service, input, output)?,
            "5" => update_student(service, input, output)?,
            "6" => change_status(service, input, output, StudentStatus::Inactive)?,
            "7" => change_status(service, input, output, StudentStatus::Active)?,
            "8" => quit(service, output)?,
            other => {
                writeln!(output, "Invalid choice `{other}`, try again.")?;
                Flow::Continue
            }
        };

        if let Flow::Quit = flow {
            break;
        }
    }

    Ok(())
}

fn add_student<S: StudentRepository>(
    service: &StudentService<S>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Flow, CliError> {
    let Some(name) = prompt_line(input, output, "Enter name: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(age_text) = prompt_line(input, output, "Enter age (blank if unknown): ")? else {
        return Ok(Flow::Quit);
    };
    let age = match parse_age(&age_text) {
        Ok(age) => age,
        Err(err) => return reject(output, &err),
    };
    let Some(course_text) = prompt_line(input, output, "Enter course (blank if none): ")? else {
        return Ok(Flow::Quit);
    };

    let draft = StudentDraft::new(name, age, optional_text(&course_text));
    match service.add_student(&draft) {
        Ok(id) => {
            info!("event=student_added module=cli status=ok id={id}");
            writeln!(output, "Student added with id {id}.")?;
        }
        Err(RepoError::Validation(err)) => writeln!(output, "Invalid input: {err}")?,
        Err(err) => return Err(err.into()),
    }

    Ok(Flow::Continue)
}

fn view_students<S: StudentRepository>(
    service: &StudentService<S>,
    output: &mut impl Write,
    status: StudentStatus,
) -> Result<Flow, CliError> {
    let students = service.list_students(status)?;

    writeln!(output, "\n--- {} students ---", status_label(status))?;
    write!(output, "{}", format_student_table(&students))?;

    Ok(Flow::Continue)
}

fn search_student<S: StudentRepository>(
    service: &StudentService<S>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Flow, CliError> {
    let Some(id_text) = prompt_line(input, output, "Enter student id: ")? else {
        return Ok(Flow::Quit);
    };
    let id = match parse_id(&id_text) {
        Ok(id) => id,
        Err(err) => return reject(output, &err),
    };

    match service.find_student(id)? {
        Some(student) => {
            writeln!(output, "\n--- Student found ---")?;
            write!(output, "{}", format_student(&student))?;
        }
        None => writeln!(output, "Student {id} not found.")?,
    }

    Ok(Flow::Continue)
}

fn update_student<S: StudentRepository>(
    service: &StudentService<S>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Flow, CliError> {
    let Some(id_text) = prompt_line(input, output, "Enter student id to update: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(name) = prompt_line(input, output, "Enter new name: ")? else {
        return Ok(Flow::Quit);
    };
    let Some(age_text) = prompt_line(input, output, "Enter new age (blank if unknown): ")? else {
        return Ok(Flow::Quit);
    };
    let Some(course_text) = prompt_line(input, output, "Enter new course (blank if none): ")?
    else {
        return Ok(Flow::Quit);
    };

    // Every field parses before the first storage call.
    let (id, age) = match (parse_id(&id_text), parse_age(&age_text)) {
        (Ok(id), Ok(age)) => (id, age),
        (Err(err), _) | (_, Err(err)) => return reject(output, &err),
    };

    let draft = StudentDraft::new(name, age, optional_text(&course_text));
    match service.update_student(id, &draft) {
        Ok(()) => {
            info!("event=student_updated module=cli status=ok id={id}");
            writeln!(output, "Student {id} updated.")?;
        }
        Err(RepoError::NotFound(_)) => writeln!(output, "Student {id} not found.")?,
        Err(RepoError::Validation(err)) => writeln!(output, "Invalid input: {err}")?,
        Err(err) => return Err(err.into()),
    }

    Ok(Flow::Continue)
}

fn change_status<S: StudentRepository>(
    service: &StudentService<S>,
    input: &mut impl BufRead,
    output: &mut impl Write,
    target: StudentStatus,
) -> Result<Flow, CliError> {
    let prompt = match target {
        StudentStatus::Active => "Enter student id to reactivate: ",
        StudentStatus::Inactive => "Enter student id to deactivate: ",
    };
    let Some(id_text) = prompt_line(input, output, prompt)? else {
        return Ok(Flow::Quit);
    };
    let id = match parse_id(&id_text) {
        Ok(id) => id,
        Err(err) => return reject(output, &err),
    };

    let result = match target {
        StudentStatus::Active => service.activate_student(id),
        StudentStatus::Inactive => service.deactivate_student(id),
    };
    match result {
        Ok(()) => {
            info!(
                "event=status_changed module=cli status=ok id={id} target={}",
                status_label(target)
            );
            writeln!(output, "Student {id} marked {}.", status_label(target))?;
        }
        Err(RepoError::NotFound(_)) => writeln!(output, "Student {id} not found.")?,
        Err(err) => return Err(err.into()),
    }

    Ok(Flow::Continue)
}

fn quit<S: StudentRepository>(
    service: &StudentService<S>,
    output: &mut impl Write,
) -> Result<Flow, CliError> {
    let total = service.student_count()?;
    writeln!(output, "Goodbye. {total} student record(s) on file.")?;
    Ok(Flow::Quit)
}

fn reject(output: &mut impl Write, err: &InputError) -> Result<Flow, CliError> {
    writeln!(output, "Invalid input: {err}")?;
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::run;
    use rollbook_core::db::open_db_in_memory;
    use rollbook_core::{
        SqliteStudentRepository, StudentRepository, StudentService, StudentStatus,
    };
    use rusqlite::Connection;
    use std::io::Cursor;

    fn drive(conn: &Connection, script: &str) -> String {
        let repo = SqliteStudentRepository::try_new(conn).unwrap();
        let service = StudentService::new(repo);

        let mut input = Cursor::new(script.to_string());
        let mut output = Vec::new();
        run(&service, &mut input, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn add_then_view_shows_the_new_record() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "1\nAlice\n20\nMath\n2\n8\n");

        assert!(output.contains("Student added with id 1."));
        assert!(output.contains("--- Active students ---"));
        assert!(output.contains("Alice"));
        assert!(output.contains("Math"));
        assert!(output.contains("Goodbye. 1 student record(s) on file."));
    }

    #[test]
    fn malformed_age_reports_error_and_keeps_storage_untouched() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "1\nBob\ntwenty\n8\n");

        assert!(output.contains("Invalid input: age must be a whole number, got `twenty`"));
        // The loop came back to the menu after the rejection.
        assert_eq!(output.matches("Enter choice: ").count(), 2);

        let repo = SqliteStudentRepository::try_new(&conn).unwrap();
        assert_eq!(repo.count_students().unwrap(), 0);
    }

    #[test]
    fn blank_age_and_course_are_accepted_as_unknown() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "1\nCara\n\n\n4\n1\n8\n");

        assert!(output.contains("Student added with id 1."));
        assert!(output.contains("ID: 1, Name: Cara, Age: unknown, Course: none, Status: Active"));
    }

    #[test]
    fn view_renders_notice_when_no_records_match() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "2\n3\n8\n");

        assert_eq!(output.matches("No student records found.").count(), 2);
    }

    #[test]
    fn search_miss_reports_not_found() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "4\n99\n8\n");

        assert!(output.contains("Student 99 not found."));
    }

    #[test]
    fn update_miss_reports_not_found_without_side_effects() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "5\n99\nX\n10\nY\n8\n");

        assert!(output.contains("Student 99 not found."));
        let repo = SqliteStudentRepository::try_new(&conn).unwrap();
        assert_eq!(repo.count_students().unwrap(), 0);
    }

    #[test]
    fn malformed_update_id_aborts_before_any_prompt_reaches_storage() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "1\nAlice\n20\nMath\n5\nabc\nNewName\n21\nNewCourse\n8\n");

        assert!(output.contains("Invalid input: id must be a whole number, got `abc`"));
        let repo = SqliteStudentRepository::try_new(&conn).unwrap();
        let student = repo.get_student(1).unwrap().unwrap();
        assert_eq!(student.name, "Alice");
    }

    #[test]
    fn deactivate_and_reactivate_move_the_record_between_views() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "1\nAlice\n20\nMath\n6\n1\n2\n3\n7\n1\n2\n8\n");

        assert!(output.contains("Student 1 marked Inactive."));
        assert!(output.contains("Student 1 marked Active."));

        let repo = SqliteStudentRepository::try_new(&conn).unwrap();
        let active = repo.list_students(StudentStatus::Active).unwrap();
        assert_eq!(active.len(), 1);
        assert!(repo
            .list_students(StudentStatus::Inactive)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn deactivating_missing_id_reports_not_found() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "6\n42\n8\n");

        assert!(output.contains("Student 42 not found."));
    }

    #[test]
    fn invalid_menu_choice_redisplays_menu_without_side_effects() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "9\n8\n");

        assert!(output.contains("Invalid choice `9`, try again."));
        assert_eq!(output.matches("--- Student Records ---").count(), 2);

        let repo = SqliteStudentRepository::try_new(&conn).unwrap();
        assert_eq!(repo.count_students().unwrap(), 0);
    }

    #[test]
    fn end_of_input_ends_the_loop_cleanly() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "");

        assert!(output.contains("--- Student Records ---"));
        assert!(!output.contains("Goodbye."));
    }

    #[test]
    fn updating_with_empty_name_is_rejected_by_validation() {
        let conn = open_db_in_memory().unwrap();

        let output = drive(&conn, "1\nAlice\n20\nMath\n5\n1\n\n21\nPhysics\n8\n");

        assert!(output.contains("Invalid input: name must not be empty"));
        let repo = SqliteStudentRepository::try_new(&conn).unwrap();
        let student = repo.get_student(1).unwrap().unwrap();
        assert_eq!(student.name, "Alice");
        assert_eq!(student.age, Some(20));
    }
}
