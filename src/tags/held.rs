use super::TagId;

/// The single "currently held" slot. At most one tag is carried at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldSlot {
    holder: Option<TagId>,
}

impl HeldSlot {
    pub fn holder(&self) -> Option<TagId> {
        self.holder
    }

    pub fn is_empty(&self) -> bool {
        self.holder.is_none()
    }

    /// Claim the slot; fails when any tag (including `tag`) already holds it
    pub fn try_acquire(&mut self, tag: TagId) -> bool {
        if self.holder.is_some() {
            return false;
        }
        self.holder = Some(tag);
        true
    }

    /// Release the slot if `tag` holds it
    pub fn release(&mut self, tag: TagId) -> bool {
        if self.holder == Some(tag) {
            self.holder = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) -> Option<TagId> {
        self.holder.take()
    }
}
