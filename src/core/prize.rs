//! Prizes - the items hidden inside cases.
//!
//! A prize is issued by the pool generator (or the banker) and never
//! changes afterwards. The game only compares prizes by `PrizeId`.

use serde::{Deserialize, Serialize};

/// Unique identifier for a prize.
///
/// Prize identities are stable across pools: the banker uses them to avoid
/// offering something the player can already see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrizeId(pub u64);

impl PrizeId {
    /// Create a new prize ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PrizeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Prize({})", self.0)
    }
}

/// A prize: identity, display name and grouping label (the team).
///
/// ```
/// use deal_draft::core::{Prize, PrizeId};
///
/// let prize = Prize::new(PrizeId::new(2544), "LeBron James", "LAL");
/// assert_eq!(prize.id.raw(), 2544);
/// assert_eq!(prize.group, "LAL");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prize {
    pub id: PrizeId,
    pub name: String,
    pub group: String,
}

impl Prize {
    /// Create a new prize.
    pub fn new(id: PrizeId, name: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            group: group.into(),
        }
    }
}

impl std::fmt::Display for Prize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_id() {
        let id = PrizeId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Prize(5)");
    }

    #[test]
    fn test_prize_display() {
        let prize = Prize::new(PrizeId::new(1), "Jalen Brunson", "NYK");
        assert_eq!(prize.to_string(), "Jalen Brunson (NYK)");
    }

    #[test]
    fn test_prize_id_is_transparent() {
        let json = serde_json::to_string(&PrizeId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
