//! Orientation changes between recursion levels.
//!
//! Entering the first or last quadrant of the traversal flips the sub-square
//! across one of its diagonals so the inner curve starts next to where the
//! previous quadrant ended and finishes next to where the following one
//! begins. The middle quadrants keep their parent's orientation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::table::QuadrantTable;
use crate::error::Error;

/// First label visited in a square.
pub const FIRST_LABEL: u8 = 0;

/// Last label visited in a square.
pub const LAST_LABEL: u8 = 3;

/// How the quadrant table evolves from one level to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveMode {
    /// Rotation-aware Hilbert order (default).
    #[default]
    Hilbert,
    /// Rotation-free quadtree order: every level reuses the root table.
    /// Nested squares are still correct, but consecutive indices are not
    /// always adjacent.
    FixedTable,
}

impl CurveMode {
    /// Get display name for the mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hilbert => "hilbert",
            Self::FixedTable => "fixed",
        }
    }

    /// Table to use one level below a square subdivided with `table`, after
    /// `label` has been selected.
    #[inline]
    pub fn next_table(self, table: &QuadrantTable, label: u8) -> QuadrantTable {
        match self {
            Self::Hilbert => transform(table, label),
            Self::FixedTable => QuadrantTable::ROOT,
        }
    }
}

impl fmt::Display for CurveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CurveMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hilbert" => Ok(Self::Hilbert),
            "fixed" | "fixed_table" | "fixed-table" | "quadtree" => Ok(Self::FixedTable),
            other => Err(Error::Config(format!(
                "unknown curve mode '{other}' (expected 'hilbert' or 'fixed')"
            ))),
        }
    }
}

/// Table for the sub-square selected by `label`.
///
/// - labels 1 and 2: unchanged
/// - label 0: reflect across the diagonal through labels 0 and 2
/// - label 3: reflect across the diagonal through labels 1 and 3
///
/// Reflections are expressed through labels rather than fixed grid cells, so
/// they compose correctly with whatever orientation `table` already has.
#[must_use]
pub fn transform(table: &QuadrantTable, label: u8) -> QuadrantTable {
    match label & 0b11 {
        FIRST_LABEL => table.swap_labels(1, 3),
        LAST_LABEL => table.swap_labels(0, 2),
        _ => *table,
    }
}
