use thiserror::Error;

#[derive(Error, Debug)]
pub enum MajorGroupsError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Failed to read {file}: {reason}. {hint}")]
    InputUnavailable {
        file: String,
        reason: String,
        hint: String,
    },

    #[error("npm command failed: {0}")]
    NpmExecution(String),

    #[error("Failed to write result: {0}")]
    OutputWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MajorGroupsError {
    pub fn input_unavailable(
        file: impl Into<String>,
        reason: impl std::fmt::Display,
        hint: impl Into<String>,
    ) -> Self {
        MajorGroupsError::InputUnavailable {
            file: file.into(),
            reason: reason.to_string(),
            hint: hint.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MajorGroupsError>;
