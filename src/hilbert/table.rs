//! Quadrant index tables.
//!
//! A table assigns the four traversal labels `0..4` to the four quadrants of a
//! square. The label says *when* the curve visits a quadrant; the table says
//! *where* that quadrant sits at the current level of recursion.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// One of the four equal sub-squares of a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// All quadrants in row-major order (top row first).
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Build a quadrant from a grid position (row 0 is the top row).
    pub fn from_grid(row: usize, col: usize) -> Self {
        match (row & 1, col & 1) {
            (0, 0) => Self::TopLeft,
            (0, _) => Self::TopRight,
            (_, 0) => Self::BottomLeft,
            _ => Self::BottomRight,
        }
    }

    /// Grid row (0 = top).
    #[inline]
    pub fn row(self) -> usize {
        match self {
            Self::TopLeft | Self::TopRight => 0,
            Self::BottomLeft | Self::BottomRight => 1,
        }
    }

    /// Grid column (0 = left).
    #[inline]
    pub fn col(self) -> usize {
        match self {
            Self::TopLeft | Self::BottomLeft => 0,
            Self::TopRight | Self::BottomRight => 1,
        }
    }

    /// Offset of this quadrant as `(x, y)` with y growing upward.
    #[inline]
    pub fn xy(self) -> (u64, u64) {
        (self.col() as u64, 1 - self.row() as u64)
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 2×2 arrangement of the labels `0..4`, each present exactly once.
///
/// The forward grid and its inverse are kept side by side so lookups in
/// either direction are O(1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuadrantTable {
    /// `grid[row][col]` is the label of that quadrant.
    grid: [[u8; 2]; 2],
    /// `positions[label]` is the quadrant carrying that label.
    positions: [Quadrant; 4],
}

impl QuadrantTable {
    /// Canonical root orientation: 0 bottom-left, 1 top-left, 2 top-right,
    /// 3 bottom-right.
    pub const ROOT: Self = Self {
        grid: [[1, 2], [0, 3]],
        positions: [
            Quadrant::BottomLeft,
            Quadrant::TopLeft,
            Quadrant::TopRight,
            Quadrant::BottomRight,
        ],
    };

    /// Build a table from a row-major grid, rejecting anything that is not a
    /// permutation of `0..4`.
    pub fn new(grid: [[u8; 2]; 2]) -> Result<Self> {
        let mut positions: [Option<Quadrant>; 4] = [None; 4];

        for quadrant in Quadrant::ALL {
            let label = grid[quadrant.row()][quadrant.col()];
            let slot = positions.get_mut(usize::from(label)).ok_or_else(|| {
                Error::InvalidTable(format!("label {label} is outside 0..4"))
            })?;
            if slot.is_some() {
                return Err(Error::InvalidTable(format!(
                    "label {label} appears more than once in {grid:?}"
                )));
            }
            *slot = Some(quadrant);
        }

        // Four distinct in-range labels over four cells fill every slot.
        let mut resolved = [Quadrant::TopLeft; 4];
        for (label, slot) in positions.iter().enumerate() {
            resolved[label] = slot.ok_or_else(|| {
                Error::InvalidTable(format!("label {label} is missing from {grid:?}"))
            })?;
        }

        Ok(Self {
            grid,
            positions: resolved,
        })
    }

    /// Label stored at a quadrant.
    #[inline]
    pub fn label_at(&self, quadrant: Quadrant) -> u8 {
        self.grid[quadrant.row()][quadrant.col()]
    }

    /// Quadrant carrying `label`. Only the low two bits of `label` are used.
    #[inline]
    pub fn position_of(&self, label: u8) -> Quadrant {
        self.positions[usize::from(label & 0b11)]
    }

    /// Row-major copy of the grid.
    #[inline]
    pub fn rows(&self) -> [[u8; 2]; 2] {
        self.grid
    }

    /// Exchange the quadrants occupied by two labels.
    ///
    /// The result is still a permutation of `0..4`.
    #[must_use]
    pub fn swap_labels(&self, a: u8, b: u8) -> Self {
        let (a, b) = (a & 0b11, b & 0b11);
        let pa = self.position_of(a);
        let pb = self.position_of(b);

        let mut grid = self.grid;
        grid[pa.row()][pa.col()] = b;
        grid[pb.row()][pb.col()] = a;

        let mut positions = self.positions;
        positions.swap(usize::from(a), usize::from(b));

        Self { grid, positions }
    }

    /// True when every label `0..4` appears exactly once and the inverse
    /// index agrees with the grid.
    pub fn is_complete(&self) -> bool {
        let mut seen = [false; 4];
        for quadrant in Quadrant::ALL {
            let label = self.label_at(quadrant);
            match seen.get_mut(usize::from(label)) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
            if self.position_of(label) != quadrant {
                return false;
            }
        }
        seen.iter().all(|&s| s)
    }
}

impl Default for QuadrantTable {
    fn default() -> Self {
        Self::ROOT
    }
}

impl fmt::Display for QuadrantTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [[a, b], [c, d]] = self.grid;
        write!(f, "[[{a},{b}],[{c},{d}]]")
    }
}

impl Serialize for QuadrantTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.grid.serialize(serializer)
    }
}
