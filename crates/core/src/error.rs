//! Failure kinds reported by front-desk operations.

use thiserror::Error;

/// Convenience alias for results returned by core operations.
pub type Result<T> = std::result::Result<T, DeskError>;

/// Recoverable failures surfaced to the interactive layer.
///
/// None of these abort the process; the caller reports them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeskError {
    /// Room creation requested with a comfort tier other than Standard/Luxury.
    #[error("invalid room type '{0}' (expected S or L)")]
    InvalidRoomType(String),

    /// Room creation requested with an AC code other than AC/Non-AC.
    #[error("invalid AC type '{0}' (expected A or N)")]
    InvalidAcType(String),

    /// No room carries the requested number.
    #[error("room {0} not found")]
    RoomNotFound(u32),

    /// Check-in attempted on a room that already holds a guest.
    #[error("room {0} is already occupied")]
    RoomAlreadyOccupied(u32),

    /// Check-out attempted on a vacant room.
    #[error("room {0} is already vacant")]
    RoomNotOccupied(u32),

    /// Phone number is not exactly ten characters long.
    #[error("invalid phone number '{0}': expected exactly 10 characters")]
    InvalidPhone(String),

    /// A line of the persisted room file could not be parsed.
    #[error("malformed room record on line {line}: {reason}")]
    MalformedPersistedRecord {
        /// One-based line number in the room file.
        line: usize,
        /// Human readable parse failure.
        reason: String,
    },
}
