//! Error types for form rendering
//!
//! Every error is a schema or instance defect: rendering is deterministic,
//! so nothing here is retried. Each variant carries the render path of the
//! offending field.

use thiserror::Error;

/// Errors that abort a render pass
#[derive(Debug, Error)]
pub enum RenderError {
    /// No widget rule exists for the declared type
    #[error("Unsupported type '{type_name}' at {path}")]
    UnsupportedType { type_name: String, path: String },

    /// Group annotations that cannot be laid out unambiguously
    #[error("Ambiguous grouping at {path}: {reason}")]
    AmbiguousGrouping { path: String, reason: String },

    /// Two fields of one record share a name
    #[error("Duplicate field name at {path}")]
    DuplicateField { path: String },

    /// A tab panel id was emitted twice in one render pass
    #[error("Tab id '{id}' rendered more than once (again at {path})")]
    DuplicateTabId { id: String, path: String },

    /// The instance value does not match the declared type
    #[error("Instance mismatch at {path}: expected {expected}, found {found}")]
    InstanceMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// A built-in script template failed to render
    #[error("Script generation failed at {path}: {source}")]
    Script {
        path: String,
        #[source]
        source: tera::Error,
    },
}

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;
