//! Roster slots and per-slot data storage.
//!
//! ## Slot
//!
//! The five fixed roster positions a draft fills: `PG`, `SG`, `SF`, `PF`, `C`.
//!
//! ## SlotMap
//!
//! Per-slot data storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Slot`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

/// Number of roster slots.
pub const SLOT_COUNT: usize = 5;

/// A roster slot.
///
/// Slots are ordered the way a lineup is read: guards first, center last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    PG,
    SG,
    SF,
    PF,
    C,
}

impl Slot {
    /// All slots in lineup order.
    pub const ALL: [Slot; SLOT_COUNT] = [Slot::PG, Slot::SG, Slot::SF, Slot::PF, Slot::C];

    /// Get the 0-based lineup index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Iterate over all slots in lineup order.
    ///
    /// ```
    /// use deal_draft::core::Slot;
    ///
    /// let slots: Vec<_> = Slot::all().collect();
    /// assert_eq!(slots.len(), 5);
    /// assert_eq!(slots[0], Slot::PG);
    /// assert_eq!(slots[4], Slot::C);
    /// ```
    pub fn all() -> impl Iterator<Item = Slot> {
        Self::ALL.into_iter()
    }

    /// Short code used on the wire (`"PG"`, `"C"`, ...).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Slot::PG => "PG",
            Slot::SG => "SG",
            Slot::SF => "SF",
            Slot::PF => "PF",
            Slot::C => "C",
        }
    }

    /// Map an official roster position listing onto a slot.
    ///
    /// Roster positions are coarse (`G`, `G-F`, `F`, `F-C`, `C`). Anything
    /// unrecognised lands on the wing.
    ///
    /// ```
    /// use deal_draft::core::Slot;
    ///
    /// assert_eq!(Slot::from_roster_position("g-f"), Slot::SG);
    /// assert_eq!(Slot::from_roster_position(" C "), Slot::C);
    /// assert_eq!(Slot::from_roster_position("??"), Slot::SF);
    /// ```
    #[must_use]
    pub fn from_roster_position(position: &str) -> Self {
        match position.trim().to_ascii_uppercase().as_str() {
            "C" => Slot::C,
            "F-C" => Slot::PF,
            "G-F" => Slot::SG,
            "F" => Slot::SF,
            "G" => Slot::PG,
            _ => Slot::SF,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Error parsing a slot code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("slot must be one of PG, SG, SF, PF, C (got {0:?})")]
pub struct ParseSlotError(pub String);

impl FromStr for Slot {
    type Err = ParseSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PG" => Ok(Slot::PG),
            "SG" => Ok(Slot::SG),
            "SF" => Ok(Slot::SF),
            "PF" => Ok(Slot::PF),
            "C" => Ok(Slot::C),
            _ => Err(ParseSlotError(s.to_string())),
        }
    }
}

/// Per-slot data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use deal_draft::core::{Slot, SlotMap};
///
/// let mut picks: SlotMap<u32> = SlotMap::new(|_| 0);
/// picks[Slot::C] = 7;
/// assert_eq!(picks[Slot::C], 7);
/// assert_eq!(picks[Slot::PG], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotMap<T> {
    data: [T; SLOT_COUNT],
}

impl<T> SlotMap<T> {
    /// Create a new SlotMap with values from a factory function.
    pub fn new(factory: impl Fn(Slot) -> T) -> Self {
        Self {
            data: Slot::ALL.map(factory),
        }
    }

    /// Create a new SlotMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to a slot's data.
    #[must_use]
    pub fn get(&self, slot: Slot) -> &T {
        &self.data[slot.index()]
    }

    /// Get a mutable reference to a slot's data.
    pub fn get_mut(&mut self, slot: Slot) -> &mut T {
        &mut self.data[slot.index()]
    }

    /// Iterate over (Slot, &T) pairs in lineup order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &T)> {
        Slot::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over values in lineup order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T: Default> Default for SlotMap<T> {
    fn default() -> Self {
        Self::with_default()
    }
}

impl<T> Index<Slot> for SlotMap<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &Self::Output {
        self.get(slot)
    }
}

impl<T> IndexMut<Slot> for SlotMap<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut Self::Output {
        self.get_mut(slot)
    }
}
