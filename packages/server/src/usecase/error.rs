//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{RepositoryError, StrokeError};

/// 参加者接続のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 同じ ID の参加者が既に接続している
    #[error("participant '{0}' is already connected")]
    DuplicateParticipant(String),
}

/// 参加要求のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("participant '{0}' is not connected")]
    ParticipantNotFound(String),
}

/// 参加者切断のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("participant '{0}' is not connected")]
    ParticipantNotFound(String),
}

/// ストローク確定のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommitStrokeError {
    #[error("participant '{0}' is not connected")]
    ParticipantNotFound(String),

    #[error("invalid stroke: {0}")]
    InvalidStroke(#[from] StrokeError),
}

impl From<RepositoryError> for ConnectError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateParticipant(id) | RepositoryError::ParticipantNotFound(id) => {
                ConnectError::DuplicateParticipant(id)
            }
        }
    }
}

impl From<RepositoryError> for JoinError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ParticipantNotFound(id) | RepositoryError::DuplicateParticipant(id) => {
                JoinError::ParticipantNotFound(id)
            }
        }
    }
}

impl From<RepositoryError> for DisconnectError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ParticipantNotFound(id) | RepositoryError::DuplicateParticipant(id) => {
                DisconnectError::ParticipantNotFound(id)
            }
        }
    }
}
