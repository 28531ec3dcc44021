//! Domain layer for the shared canvas.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod history;
pub mod palette;
pub mod registry;
pub mod repository;
pub mod session;
pub mod value_object;

pub use entity::{ConnectionState, DEFAULT_ERASER_SIZE, Participant, Stroke};
pub use error::{RepositoryError, StrokeError, ValueObjectError};
pub use factory::UserIdFactory;
pub use history::StrokeHistory;
pub use palette::ColorPalette;
pub use registry::ParticipantRegistry;
pub use repository::{SessionRepository, SessionSnapshot};
pub use session::Session;
pub use value_object::{
    ANONYMOUS_NAME, DisplayName, HexColor, MAX_DISPLAY_NAME_CHARS, Point, StrokeId, Timestamp,
    Tool, UserId,
};

#[cfg(test)]
pub use repository::MockSessionRepository;
