use thiserror::Error;

/// Why a drag operation was rejected.
///
/// None of these are fatal: a rejected `begin` or `hover` leaves the controller
/// exactly as it was, and a rejected commit always returns it to idle.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DragError {
    /// A hover, commit or cancel arrived with no drag in progress.
    #[error("no drag in progress")]
    NotDragging,

    /// `begin` was called while another drag is still active.
    #[error("a drag of {active:?} is already in progress")]
    AlreadyDragging { active: String },

    /// The key does not identify any record in the current list.
    #[error("no record with key {0:?}")]
    UnknownKey(String),

    /// The hovered record has no usable on-screen measurement.
    #[error("record {0:?} has no measurable bounds")]
    Unmeasured(String),

    /// The drag ended before any drop target was resolved.
    #[error("no drop target resolved")]
    NoTarget,

    /// The drag-end event belongs to a different record than the active drag,
    /// or the active record disappeared from the list mid-drag.
    #[error("drag of {0:?} is no longer current")]
    StaleSession(String),
}
