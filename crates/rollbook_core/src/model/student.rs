//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical student record persisted by the storage layer.
//! - Provide the draft shape and validation used by write operations.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another student.
//! - `status` is the source of truth for record visibility.
//! - `name` is non-empty after trimming for every persisted record.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier for a student record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type StudentId = i64;

/// Visibility state of a student record.
///
/// Records are never removed from storage; an inactive record is a soft
/// deleted one and stays queryable through inactive listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    Inactive,
}

/// Canonical student record as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Storage-assigned primary key, immutable once created.
    pub id: StudentId,
    pub name: String,
    /// `None` when the age is unknown.
    pub age: Option<i64>,
    /// `None` when no course is recorded.
    pub course: Option<String>,
    pub status: StudentStatus,
}

impl Student {
    /// Returns whether this record is visible in active listings.
    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }
}

/// Caller-supplied fields for add and update operations.
///
/// `id` and `status` are deliberately absent: identity is storage-assigned
/// and status only changes through explicit activate/deactivate transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub age: Option<i64>,
    pub course: Option<String>,
}

impl StudentDraft {
    pub fn new(name: impl Into<String>, age: Option<i64>, course: Option<String>) -> Self {
        Self {
            name: name.into(),
            age,
            course,
        }
    }

    /// Checks caller-supplied fields before they reach storage.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Validation failure for caller-supplied student fields.
///
/// Always recoverable: callers report it and may retry with corrected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl Error for StudentValidationError {}
