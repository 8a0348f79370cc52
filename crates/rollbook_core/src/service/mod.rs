//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep interaction layers decoupled from storage details.

pub mod student_service;
