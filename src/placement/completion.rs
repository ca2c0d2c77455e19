use super::SpotRegistry;

/// True when every spot is prefilled or holds the tag it expects.
/// An empty registry counts as complete.
pub fn is_level_complete(registry: &SpotRegistry) -> bool {
    registry
        .all_spots()
        .iter()
        .all(|s| s.is_prefilled() || s.is_correctly_placed())
}

/// Turns the completion predicate into a one-shot edge per completion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionLatch {
    fired: bool,
}

impl CompletionLatch {
    /// Returns true exactly on an incomplete -> complete transition; an
    /// incomplete observation re-arms the latch.
    pub fn observe(&mut self, complete: bool) -> bool {
        if !complete {
            self.fired = false;
            return false;
        }
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn reset(&mut self) {
        self.fired = false;
    }
}
