use thiserror::Error;

pub type Result<T> = std::result::Result<T, LrudError>;

#[derive(Debug, Error)]
pub enum LrudError {
    #[error("node '{0}' is not registered")]
    UnknownNode(String),

    #[error("cannot register '{id}': parent '{parent}' is not registered")]
    UnknownParent { id: String, parent: String },

    #[error("node '{0}' is already registered")]
    DuplicateNode(String),

    #[error("trying to assign focus to a non focusable node: '{0}'")]
    NotFocusable(String),

    #[error("no focusable node reachable below '{0}'")]
    NoFocusableDescendant(String),

    #[error("invalid direction: '{0}'")]
    InvalidDirection(String),

    #[error("invalid orientation: '{0}'")]
    InvalidOrientation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error: {0}")]
    Generic(String),
}

impl From<String> for LrudError {
    fn from(error: String) -> Self {
        LrudError::Generic(error)
    }
}

impl From<&str> for LrudError {
    fn from(error: &str) -> Self {
        LrudError::Generic(error.to_string())
    }
}
