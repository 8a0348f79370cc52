//! Student use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for interaction-layer callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Status changes go through the explicit transition operations only;
//!   `update_student` cannot touch status.

use crate::model::student::{Student, StudentDraft, StudentId, StudentStatus};
use crate::repo::student_repo::{RepoResult, StudentRepository};

/// Use-case service wrapper for student record operations.
pub struct StudentService<R: StudentRepository> {
    repo: R,
}

impl<R: StudentRepository> StudentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new student and returns the storage-assigned id.
    ///
    /// # Contract
    /// - New students always start out Active.
    pub fn add_student(&self, draft: &StudentDraft) -> RepoResult<StudentId> {
        self.repo.insert_student(draft)
    }

    /// Overwrites name, age and course of an existing student.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_student(&self, id: StudentId, draft: &StudentDraft) -> RepoResult<()> {
        self.repo.update_details(id, draft)
    }

    /// Looks up one student by id.
    pub fn find_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.get_student(id)
    }

    /// Lists all students in the given status, ordered by ascending id.
    pub fn list_students(&self, status: StudentStatus) -> RepoResult<Vec<Student>> {
        self.repo.list_students(status)
    }

    /// Soft-deletes a student by marking the record Inactive.
    pub fn deactivate_student(&self, id: StudentId) -> RepoResult<()> {
        self.repo.set_status(id, StudentStatus::Inactive)
    }

    /// Restores a previously deactivated student.
    pub fn activate_student(&self, id: StudentId) -> RepoResult<()> {
        self.repo.set_status(id, StudentStatus::Active)
    }

    /// Total number of records ever created, regardless of status.
    pub fn student_count(&self) -> RepoResult<u64> {
        self.repo.count_students()
    }
}
