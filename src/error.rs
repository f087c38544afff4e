//! Engine Error Types
//!
//! Unified error type for the engine's fallible surface. The only operations
//! that can fail from valid external input are body-handle resolutions;
//! geometric queries report absence of overlap as `None`, never as an error,
//! and programmer-precondition violations are guarded with debug assertions.

use core::fmt;

/// Unified error type for simulation operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhysicsError {
    /// A body handle does not resolve to a live body. Either the slot index
    /// is out of range or the body it referred to has been removed and the
    /// slot's generation has moved on.
    InvalidBodyHandle {
        /// Slot index carried by the stale handle
        index: u32,
        /// Generation carried by the stale handle
        generation: u32,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBodyHandle { index, generation } => {
                write!(
                    f,
                    "body handle (index={index}, generation={generation}) does not resolve to a live body"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PhysicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_handle() {
        let err = PhysicsError::InvalidBodyHandle {
            index: 3,
            generation: 7,
        };
        let msg = format!("{err}");
        assert!(msg.contains("index=3"), "message was: {msg}");
        assert!(msg.contains("generation=7"), "message was: {msg}");
    }
}
