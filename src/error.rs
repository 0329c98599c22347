//! Error types for gridpath
//!
//! All graph and heap operations either complete fully or leave state
//! untouched; errors never expose a partially mutated structure.

use thiserror::Error;

/// Errors that can occur during graph or heap operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("unknown vertex: {label}")]
    UnknownVertex { label: String },

    #[error("duplicate vertex: {label}")]
    DuplicateVertex { label: String },

    #[error("decrease_key called with a key greater than the current key")]
    KeyIncrease,

    #[error("heap handle is stale or belongs to another heap")]
    StaleHandle,
}

impl GraphError {
    /// Create an error for a lookup of a vertex the graph does not contain
    pub fn unknown_vertex(label: impl std::fmt::Debug) -> Self {
        GraphError::UnknownVertex {
            label: format!("{label:?}"),
        }
    }

    /// Create an error for an attempt to add a vertex label twice
    pub fn duplicate_vertex(label: impl std::fmt::Debug) -> Self {
        GraphError::DuplicateVertex {
            label: format!("{label:?}"),
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GraphError::UnknownVertex { .. } => "unknown_vertex",
            GraphError::DuplicateVertex { .. } => "duplicate_vertex",
            GraphError::KeyIncrease => "key_increase",
            GraphError::StaleHandle => "stale_handle",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for gridpath operations
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_vertex_message() {
        let err = GraphError::unknown_vertex("Q");
        assert_eq!(err.to_string(), "unknown vertex: \"Q\"");
        assert_eq!(err.error_type(), "unknown_vertex");
    }

    #[test]
    fn test_to_json_shape() {
        let err = GraphError::KeyIncrease;
        let json = err.to_json();
        assert_eq!(json["error"]["type"], "key_increase");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("decrease_key"));
    }
}
