//! The four-state cell classification

use serde::{Deserialize, Serialize};

/// How unlocked a cell is.
///
/// Variants are ordered from least to most unlocked; the derived `Ord` is the
/// priority used when several cells share a vertex (more unlocked wins).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CellClass {
    /// No unlocked corners and no partially unlocked neighbour
    #[default]
    FullLocked = 0,
    /// No unlocked corners, but borders a partially unlocked cell
    AdjacentUnlocked = 1,
    /// Some but not all corners unlocked
    PartialUnlocked = 2,
    /// All four corners unlocked; rendered as a hole
    FullUnlocked = 3,
}

impl CellClass {
    /// Base classification from an unlocked corner count
    pub fn from_unlocked_count(count: u8) -> Self {
        match count {
            0 => CellClass::FullLocked,
            4.. => CellClass::FullUnlocked,
            _ => CellClass::PartialUnlocked,
        }
    }

    /// Ordinal value, 0 (FullLocked) to 3 (FullUnlocked)
    pub fn order(self) -> u8 {
        self as u8
    }

    pub fn is_hole(self) -> bool {
        self == CellClass::FullUnlocked
    }
}

/// Which refinement passes run after the corner-count classification
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifyPolicy {
    /// Corner count only: FullLocked, PartialUnlocked or FullUnlocked
    Base,
    /// Corner count plus neighbour promotion, which also marks the locked ring
    /// around unlocked ground as AdjacentUnlocked
    #[default]
    Ringed,
}
