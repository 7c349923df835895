use bb_core::{repositories::Error as RepoError, usecases::Error as ParameterError};
use std::io;
use thiserror::Error;

pub use bb_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Business(err) => err.status_code(),
            Self::Other(_) | Self::Io(_) => 500,
        }
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl BError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Parameter(err) => err.status_code(),
            Self::Repo(RepoError::NotFound) => 404,
            Self::Repo(RepoError::AlreadyExists) => 409,
            Self::Repo(RepoError::Other(_)) => 500,
        }
    }
}
