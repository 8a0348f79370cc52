//! Domain model for student records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every record is identified by a storage-assigned `StudentId`.
//! - Deletion is represented by the Inactive status, not row removal.

pub mod student;
