//! Error taxonomy for registry operations.
//!
//! Every variant is recoverable: callers surface the message and carry on.
//! Persistence failures degrade to "the operation did not take effect"
//! rather than corrupting the stored collection.

use chrono::{DateTime, Utc};

/// A single validation problem, tied to one field of one batch entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Zero-based index of the offending submission within the batch.
    /// Batch-level problems (e.g. too many entries) use index 0 with the
    /// field name `"batch"`.
    pub entry: usize,
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(entry: usize, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            entry,
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry {}: {}: {}", self.entry + 1, self.field, self.message)
    }
}

/// Errors produced by [`crate::application::registry::Registry`] operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    /// One or more submissions failed field validation. Nothing was persisted.
    #[error("validation failed: {}", format_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Two or more entries in the same batch asked for the same preferred
    /// shortcode.
    #[error("duplicate shortcodes in batch: {}", .codes.join(", "))]
    DuplicateInBatch { codes: Vec<String> },

    /// A preferred shortcode collides with an existing or batch-pending code.
    /// The whole batch is aborted.
    #[error("shortcode '{code}' is already in use")]
    ShortcodeTaken { code: String },

    /// No record matches the given shortcode.
    #[error("no link found for shortcode '{shortcode}'")]
    NotFound { shortcode: String },

    /// The link exists but its validity window has passed.
    #[error("link '{shortcode}' expired at {expiry_at}")]
    Expired {
        shortcode: String,
        expiry_at: DateTime<Utc>,
    },

    /// The persistence adapter refused the write. State on disk is unchanged.
    #[error("storage rejected the write; nothing was saved")]
    StorageRejected,

    /// Code generation gave up after the bounded retry/widening schedule.
    #[error("could not allocate a free shortcode after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },
}

impl RegistryError {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    pub fn not_found(shortcode: impl Into<String>) -> Self {
        Self::NotFound {
            shortcode: shortcode.into(),
        }
    }

    pub fn shortcode_taken(code: impl Into<String>) -> Self {
        Self::ShortcodeTaken { code: code.into() }
    }

    /// Stable machine-readable tag for logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::DuplicateInBatch { .. } => "duplicate_in_batch",
            Self::ShortcodeTaken { .. } => "shortcode_taken",
            Self::NotFound { .. } => "not_found",
            Self::Expired { .. } => "expired",
            Self::StorageRejected => "storage_rejected",
            Self::CodeSpaceExhausted { .. } => "code_space_exhausted",
        }
    }
}

fn format_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
