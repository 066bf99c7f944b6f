use thiserror::Error;

/// Error kinds surfaced to the API boundary.
///
/// `Display` prints the bare message: rule strings are part of the observable
/// contract and callers compare them verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A referenced competition, season, club or player does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A business rule or integrity check failed.
    #[error("{0}")]
    RuleViolation(String),

    /// The requested update would not change anything.
    #[error("{0}")]
    Conflict(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    RuleViolation,
    Conflict,
    InvalidConfig,
}

impl StatsError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        StatsError::NotFound(msg.into())
    }

    pub fn rule(msg: impl Into<String>) -> Self {
        StatsError::RuleViolation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        StatsError::Conflict(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::NotFound(_) => ErrorKind::NotFound,
            StatsError::RuleViolation(_) => ErrorKind::RuleViolation,
            StatsError::Conflict(_) => ErrorKind::Conflict,
            StatsError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            StatsError::NotFound(msg)
            | StatsError::RuleViolation(msg)
            | StatsError::Conflict(msg)
            | StatsError::InvalidConfig(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::InvalidConfig(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
