//! Vector → handler registrations used by the interrupt dispatcher.
//!
//! Init only clears this table. Handlers are registered later by whoever
//! owns the device or exception.

use super::IDT_ENTRIES;

/// Opaque handle of a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandlerSlot {
    #[default]
    Empty,
    Bound(HandlerId),
}

/// One slot per vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerTable {
    slots: [HandlerSlot; IDT_ENTRIES],
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlerTable {
    pub const fn new() -> Self {
        Self {
            slots: [HandlerSlot::Empty; IDT_ENTRIES],
        }
    }

    /// Bind `vector` to `handler`, returning the handler it replaces.
    pub fn register(&mut self, vector: u8, handler: HandlerId) -> Option<HandlerId> {
        let slot = &mut self.slots[usize::from(vector)];
        match core::mem::replace(slot, HandlerSlot::Bound(handler)) {
            HandlerSlot::Empty => None,
            HandlerSlot::Bound(old) => Some(old),
        }
    }

    pub fn unregister(&mut self, vector: u8) -> Option<HandlerId> {
        match core::mem::take(&mut self.slots[usize::from(vector)]) {
            HandlerSlot::Empty => None,
            HandlerSlot::Bound(old) => Some(old),
        }
    }

    pub fn get(&self, vector: u8) -> HandlerSlot {
        self.slots[usize::from(vector)]
    }

    /// Handler to run for `vector`, if any.
    pub fn dispatch(&self, vector: u8) -> Option<HandlerId> {
        match self.get(vector) {
            HandlerSlot::Bound(handler) => Some(handler),
            HandlerSlot::Empty => {
                log::trace!("no handler for vector {vector}");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.fill(HandlerSlot::Empty);
    }

    pub fn is_clear(&self) -> bool {
        self.slots.iter().all(|slot| *slot == HandlerSlot::Empty)
    }

    /// Vectors with a handler bound, in ascending order.
    pub fn bound(&self) -> impl Iterator<Item = (u8, HandlerId)> + '_ {
        (0..=u8::MAX).zip(self.slots.iter()).filter_map(|(vector, slot)| match slot {
            HandlerSlot::Bound(handler) => Some((vector, *handler)),
            HandlerSlot::Empty => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_table_is_clear() {
        let table = HandlerTable::new();
        assert!(table.is_clear());
        assert_eq!(table.dispatch(0), None);
        assert_eq!(table.dispatch(255), None);
    }

    #[test]
    fn register_replaces_and_reports_previous() {
        let mut table = HandlerTable::new();
        assert_eq!(table.register(33, HandlerId(1)), None);
        assert_eq!(table.register(33, HandlerId(2)), Some(HandlerId(1)));
        assert_eq!(table.get(33), HandlerSlot::Bound(HandlerId(2)));
        assert_eq!(table.dispatch(33), Some(HandlerId(2)));
    }

    #[test]
    fn unregister_empties_the_slot() {
        let mut table = HandlerTable::new();
        table.register(255, HandlerId(7));
        assert_eq!(table.unregister(255), Some(HandlerId(7)));
        assert_eq!(table.unregister(255), None);
        assert_eq!(table.get(255), HandlerSlot::Empty);
    }

    #[test]
    fn clear_drops_every_binding() {
        let mut table = HandlerTable::new();
        table.register(0, HandlerId(10));
        table.register(14, HandlerId(11));
        table.register(200, HandlerId(12));
        assert_eq!(
            table.bound().collect::<Vec<_>>(),
            vec![(0, HandlerId(10)), (14, HandlerId(11)), (200, HandlerId(12))]
        );

        table.clear();
        assert!(table.is_clear());
        assert_eq!(table.bound().count(), 0);
    }
}
