use thiserror::Error;

/// Malformed or missing command-line input
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvocationError {
    #[error("Missing argument")]
    MissingArgument,

    #[error("Missing task name")]
    MissingTaskName,

    #[error("Invalid argument")]
    InvalidArgument,
}

/// The main error type for Chore operations
#[derive(Debug, Error)]
pub enum ChoreError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    /// The task initializer itself failed; nothing was run.
    #[error("{0}")]
    Initialization(anyhow::Error),

    /// A task action failed. Displays the action's message unmodified.
    #[error("{error}")]
    Execution { task: String, error: anyhow::Error },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(anyhow::Error),
}

impl ChoreError {
    /// Name of the task whose action failed, if this is an execution failure
    pub fn failed_task(&self) -> Option<&str> {
        match self {
            ChoreError::Execution { task, .. } => Some(task),
            _ => None,
        }
    }
}

/// Result type alias for Chore operations
pub type ChoreResult<T> = Result<T, ChoreError>;
