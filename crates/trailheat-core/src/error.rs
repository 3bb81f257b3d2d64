//! Error types and exit codes for trailheat
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, invalid configuration values)
//! - 3: Data error (unknown node, malformed graph file, broken contraction record)

mod macros;

use thiserror::Error;

use crate::graph::NodeId;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - unknown nodes, malformed input (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during trailheat operations
#[derive(Error, Debug)]
pub enum TrailheatError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Data errors (exit code 3)
    #[error("unknown node: {node}")]
    UnknownNode { node: NodeId },

    #[error("malformed contraction record: {reason}")]
    MalformedContraction { reason: String },

    #[error("parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("node {node} has no position")]
    MissingPosition { node: NodeId },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl TrailheatError {
    /// Create an error for a node index that is not marked present
    pub fn unknown_node(node: NodeId) -> Self {
        TrailheatError::UnknownNode { node }
    }

    /// Create an error for a contraction record that does not match the graph
    pub fn malformed_contraction(reason: impl std::fmt::Display) -> Self {
        TrailheatError::MalformedContraction {
            reason: reason.to_string(),
        }
    }

    /// Create an error for a malformed input line (1-based)
    pub fn parse(line: usize, reason: impl std::fmt::Display) -> Self {
        TrailheatError::Parse {
            line,
            reason: reason.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        TrailheatError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        TrailheatError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            TrailheatError::UnknownFormat(_)
            | TrailheatError::UsageError(_)
            | TrailheatError::InvalidValue { .. } => ExitCode::Usage,

            TrailheatError::UnknownNode { .. }
            | TrailheatError::MalformedContraction { .. }
            | TrailheatError::Parse { .. }
            | TrailheatError::MissingPosition { .. }
            | TrailheatError::NotFound { .. } => ExitCode::Data,

            TrailheatError::Io(_)
            | TrailheatError::Json(_)
            | TrailheatError::Toml(_)
            | TrailheatError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            TrailheatError::UnknownFormat(_) => "unknown_format",
            TrailheatError::UsageError(_) => "usage_error",
            TrailheatError::InvalidValue { .. } => "invalid_value",
            TrailheatError::UnknownNode { .. } => "unknown_node",
            TrailheatError::MalformedContraction { .. } => "malformed_contraction",
            TrailheatError::Parse { .. } => "parse_error",
            TrailheatError::MissingPosition { .. } => "missing_position",
            TrailheatError::NotFound { .. } => "not_found",
            TrailheatError::Io(_) => "io_error",
            TrailheatError::Json(_) => "json_error",
            TrailheatError::Toml(_) => "toml_error",
            TrailheatError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for trailheat operations
pub type Result<T> = std::result::Result<T, TrailheatError>;
