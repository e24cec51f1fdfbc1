//! Result of evaluating a node.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Condition held, or the action took effect.
    Success,
    /// Condition did not hold, or the action declined to run.
    Failure,
}

impl Status {
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Maps a predicate result onto a status.
    #[inline]
    pub fn from_bool(value: bool) -> Self {
        if value {
            Status::Success
        } else {
            Status::Failure
        }
    }
}
