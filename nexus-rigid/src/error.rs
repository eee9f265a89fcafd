//! Error types for capacity-bounded operations.
//!
//! Running out of free nodes is an expected outcome, not a fault, so it is
//! reported through these values and never through a panic.

use core::fmt;

/// Error returned when a single-element insert finds the free pool empty.
///
/// Carries the rejected value back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list is at full capacity")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

/// Error returned when an operation needs more free nodes than are available.
///
/// Produced by bulk insertion and by splicing from another list. The
/// operation is rejected as a whole; nothing was moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    /// Number of free nodes the operation needed.
    pub requested: usize,
    /// Number of free nodes the list had.
    pub available: usize,
}

impl Shortfall {
    /// Returns how many more free nodes would have been needed.
    #[inline]
    pub const fn missing(&self) -> usize {
        self.requested - self.available
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "needed {} free nodes but only {} available",
            self.requested, self.available
        )
    }
}

impl std::error::Error for Shortfall {}
