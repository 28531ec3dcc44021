//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// StrokeId validation error
    #[error("StrokeId cannot be empty")]
    StrokeIdEmpty,

    /// StrokeId too long error
    #[error("StrokeId cannot exceed {max} characters (got {actual})")]
    StrokeIdTooLong { max: usize, actual: usize },

    /// Color is not in `#RRGGBB` form
    #[error("color must be in #RRGGBB form (got: {0})")]
    InvalidHexColor(String),

    /// Tool name is neither `brush` nor `eraser`
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Errors raised when a completed stroke cannot enter the history
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StrokeError {
    #[error(transparent)]
    InvalidValue(#[from] ValueObjectError),

    /// A stroke needs at least one point
    #[error("stroke has no points")]
    NoPoints,

    /// NaN or infinite coordinates
    #[error("stroke contains a non-finite point at index {index}")]
    NonFinitePoint { index: usize },

    /// Negative, zero or non-finite width/size
    #[error("stroke {field} must be a positive finite number")]
    InvalidDimension { field: &'static str },
}

/// Errors related to the session repository
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Participant is not registered
    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    /// Identity is already registered
    #[error("participant already registered: {0}")]
    DuplicateParticipant(String),
}
