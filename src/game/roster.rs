//! The roster being drafted: one prize per slot, each written once.

use serde::{Deserialize, Serialize};

use crate::core::{Prize, Slot, SlotMap};

/// Five slots, each empty until its play-through finishes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    slots: SlotMap<Option<Prize>>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill a slot.
    ///
    /// Returns false, leaving the roster untouched, if the slot is already
    /// filled.
    pub fn fill(&mut self, slot: Slot, prize: Prize) -> bool {
        let entry = &mut self.slots[slot];
        if entry.is_some() {
            return false;
        }
        *entry = Some(prize);
        true
    }

    /// The prize in a slot.
    #[must_use]
    pub fn get(&self, slot: Slot) -> Option<&Prize> {
        self.slots[slot].as_ref()
    }

    /// Is the slot filled?
    #[must_use]
    pub fn is_filled(&self, slot: Slot) -> bool {
        self.slots[slot].is_some()
    }

    /// Slots still open for play, in lineup order.
    pub fn open_slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.slots
            .iter()
            .filter(|(_, prize)| prize.is_none())
            .map(|(slot, _)| slot)
    }

    /// Number of filled slots.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.slots.values().filter(|p| p.is_some()).count()
    }

    /// Are all slots filled?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.values().all(Option::is_some)
    }

    /// Iterate (slot, prize) in lineup order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, Option<&Prize>)> {
        self.slots.iter().map(|(slot, prize)| (slot, prize.as_ref()))
    }
}
