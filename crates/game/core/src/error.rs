//! Common error infrastructure for level-actions.
//!
//! This module provides shared types and traits used across all error types in
//! the crate. Domain-specific errors (e.g., `ActionError`, `LevelError`) are
//! defined in their respective modules alongside the operations they guard.
//!
//! Delayed-action application itself is total: once a kind has been decoded
//! nothing in the replay path can fail. Errors only exist at the edges, where
//! raw indices are decoded or levels are assembled.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: Corrupted data or a broken invariant; the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: monster table full, position out of bounds
    Validation,

    /// Fatal error - session state corrupted, cannot continue.
    ///
    /// Examples: a persisted action log holding an unknown action kind
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the session must be abandoned.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Common trait for all level-actions errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
