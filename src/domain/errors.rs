use thiserror::Error;

/// Errors that can occur in the team progress service
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Team not found: {0}")]
    NotFound(i32),

    #[error("Store unavailable: {0}")]
    Store(#[from] sqlx::Error),
}

pub type TeamResult<T> = Result<T, TeamError>;
