//! # AppError
//!
//! Centralized error handling for the Rusty-Forum ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all rf-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Thread reference was numeric but no thread carries that id.
    #[error("can't find thread by id {0}")]
    ThreadNotFoundById(i64),

    /// Thread reference was a slug but no thread carries that slug.
    #[error("can't find thread by slug {0}")]
    ThreadNotFoundBySlug(String),

    /// A draft names an author nickname that does not exist.
    /// Aborts the whole creation batch.
    #[error("can't find post author by nickname {0}")]
    NoAuthorPost(String),

    /// A draft's parent post lives in a different thread (or nowhere at all).
    #[error("parent post was created in another thread")]
    OtherThread,

    /// A draft carries its own thread id and it mismatches the resolved thread.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A referential constraint failed at persistence time despite earlier
    /// validation (lost race). Never retried automatically.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Generic point-lookup miss (e.g. Post, User, Forum).
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Resource already exists (e.g. duplicate nickname or slug).
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Infrastructure failure (e.g. DB down).
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for Rusty-Forum logic.
pub type Result<T> = std::result::Result<T, AppError>;
