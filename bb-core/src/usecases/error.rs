use crate::{repositories, util::validate::ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    /// The requested change is not allowed in the current
    /// lifecycle state.
    #[error("{0}")]
    State(String),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl Error {
    /// HTTP-style status class to be forwarded by the transport layer.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::State(_) => 400,
            Self::NotFound(_) | Self::Repo(repositories::Error::NotFound) => 404,
            Self::Conflict(_) | Self::Repo(repositories::Error::AlreadyExists) => 409,
            Self::Repo(_) => 500,
        }
    }

    pub(crate) fn not_found(what: &str) -> Self {
        Self::NotFound(format!("The {what} could not be found"))
    }
}
