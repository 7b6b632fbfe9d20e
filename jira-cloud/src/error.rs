use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("More than one user returned from query: \"{0}\"")]
    AmbiguousUser(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Issue type \"{issue_type}\" not found in project {project_key}")]
    IssueTypeNotFound {
        project_key: String,
        issue_type: String,
    },

    #[error("Pagination stalled: {0}")]
    PaginationStalled(String),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ApiError { status, .. } => Some(*status),
            Error::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ProjectNotFound(_) | Error::IssueTypeNotFound { .. }
        ) || self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
