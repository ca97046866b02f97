//! Errors surfaced to the host as a failed node evaluation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    /// No node is installed at this index.
    #[error("no node installed at index {index}")]
    UnknownNode { index: usize },

    /// The routed input was built for a different node type.
    #[error("{node}: input does not belong to this node")]
    InputMismatch { node: &'static str },

    /// The node produced an output of an unexpected type.
    #[error("{node}: unexpected output type")]
    OutputMismatch { node: &'static str },

    /// The node ran and failed.
    #[error("{node}: {message}")]
    Execution { node: &'static str, message: String },
}

impl NodeError {
    /// Wrap any displayable failure as an execution error of `node`
    pub fn execution(node: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Execution {
            node,
            message: error.to_string(),
        }
    }
}
