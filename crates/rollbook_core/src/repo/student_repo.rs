//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `students` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `StudentDraft::validate()` before SQL mutations.
//! - `update_details` never writes the `status` or `id` columns.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::student::{
    Student, StudentDraft, StudentId, StudentStatus, StudentValidationError,
};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT id, name, age, course, status FROM students";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "age", "course", "status"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for student persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(StudentValidationError),
    Db(DbError),
    NotFound(StudentId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns whether the caller can retry after correcting its input.
    ///
    /// Everything else means the storage layer itself is unhealthy.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "student not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted student data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migration-ready: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for RepoError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for student record operations.
pub trait StudentRepository {
    /// Inserts a new Active record and returns the storage-assigned id.
    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<StudentId>;
    /// Exact lookup by id. A miss is `Ok(None)`, not an error.
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    /// All records in the given status, ordered by ascending id.
    fn list_students(&self, status: StudentStatus) -> RepoResult<Vec<Student>>;
    /// Overwrites name, age and course for an existing id.
    fn update_details(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()>;
    /// Transitions status. Setting the already-current status succeeds.
    fn set_status(&self, id: StudentId, status: StudentStatus) -> RepoResult<()>;
    /// Total number of records regardless of status.
    fn count_students(&self) -> RepoResult<u64>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a migrated, ready connection.
    ///
    /// Refuses connections whose schema version or table shape does not
    /// match what this binary was built against.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn insert_student(&self, draft: &StudentDraft) -> RepoResult<StudentId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO students (name, age, course, status) VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.name.as_str(),
                draft.age,
                draft.course.as_deref(),
                status_to_db(StudentStatus::Active),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_student_row(row)?));
        }

        Ok(None)
    }

    fn list_students(&self, status: StudentStatus) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STUDENT_SELECT_SQL} WHERE status = ?1 ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params![status_to_db(status)])?;
        let mut students = Vec::new();

        while let Some(row) = rows.next()? {
            students.push(parse_student_row(row)?);
        }

        Ok(students)
    }

    fn update_details(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()> {
        draft.validate()?;

        // Status has its own transition operation; this statement must not
        // mention the column.
        let changed = self.conn.execute(
            "UPDATE students SET name = ?1, age = ?2, course = ?3 WHERE id = ?4;",
            params![draft.name.as_str(), draft.age, draft.course.as_deref(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn set_status(&self, id: StudentId, status: StudentStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE students SET status = ?1 WHERE id = ?2;",
            params![status_to_db(status), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_students(&self) -> RepoResult<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'students'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("students"));
    }

    let mut stmt = conn.prepare("PRAGMA table_info(students);")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>("name")?);
    }
    for &column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "students",
                column,
            });
        }
    }

    Ok(())
}

fn parse_student_row(row: &Row<'_>) -> RepoResult<Student> {
    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status value `{status_text}` in students.status"
        ))
    })?;

    Ok(Student {
        id: row.get("id")?,
        name: row.get("name")?,
        age: row.get("age")?,
        course: row.get("course")?,
        status,
    })
}

/// Status text as persisted. Matches databases written before this crate
/// existed, so migrated rows stay readable.
fn status_to_db(status: StudentStatus) -> &'static str {
    match status {
        StudentStatus::Active => "Active",
        StudentStatus::Inactive => "Inactive",
    }
}

fn parse_status(value: &str) -> Option<StudentStatus> {
    match value {
        "Active" => Some(StudentStatus::Active),
        "Inactive" => Some(StudentStatus::Inactive),
        _ => None,
    }
}
