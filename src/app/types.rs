//! Render-facing types derived from a resolved path.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::hilbert::{CurveMode, Quadrant, QuadrantTable, SelectionPath};

// =============================================================================
// Highlight
// =============================================================================

/// The single highlighted level, owned by the caller's UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Highlight(Option<usize>);

impl Highlight {
    /// No level highlighted.
    pub const NONE: Self = Self(None);

    /// Highlight `level`, which must lie in `1..=depth`.
    pub fn at(level: usize, depth: usize) -> Result<Self> {
        if level == 0 || level > depth {
            return Err(Error::InvalidHighlight { level, depth });
        }
        Ok(Self(Some(level)))
    }

    #[inline]
    pub fn level(self) -> Option<usize> {
        self.0
    }

    /// Whether `level` is the highlighted one.
    #[inline]
    pub fn is_highlighted(self, level: usize) -> bool {
        self.0 == Some(level)
    }

    /// Whether `level` is the immediate parent of the highlighted one.
    #[inline]
    pub fn is_highlighted_ancestor(self, level: usize) -> bool {
        self.0.is_some_and(|h| h == level + 1)
    }
}

// =============================================================================
// Square
// =============================================================================

/// A square of the recursion tree, positioned inside the unit square.
///
/// Coordinates have their origin at the bottom-left corner with y growing
/// upward.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Square {
    /// Depth in the recursion tree (root = 0).
    pub level: usize,
    /// Label this square carries in its parent; `None` for the root.
    pub label: Option<u8>,
    /// Where this square sits in its parent; `None` for the root.
    pub quadrant: Option<Quadrant>,
    /// Whether the target point lies inside this square.
    pub is_on_path: bool,
    /// Table used to subdivide this square.
    pub quadrant_table: QuadrantTable,
    /// Bottom-left corner.
    pub origin: (f64, f64),
    /// Side length.
    pub size: f64,
    pub is_highlighted: bool,
    pub is_highlighted_ancestor: bool,
}

impl Square {
    /// The unit square at level 0.
    pub fn root(highlight: Highlight) -> Self {
        Self {
            level: 0,
            label: None,
            quadrant: None,
            is_on_path: true,
            quadrant_table: QuadrantTable::ROOT,
            origin: (0.0, 0.0),
            size: 1.0,
            is_highlighted: highlight.is_highlighted(0),
            is_highlighted_ancestor: highlight.is_highlighted_ancestor(0),
        }
    }

    /// The child carrying `label`, one level down.
    pub fn child(&self, label: u8, mode: CurveMode, is_on_path: bool, highlight: Highlight) -> Self {
        let quadrant = self.quadrant_table.position_of(label);
        let half = self.size / 2.0;
        let (dx, dy) = quadrant.xy();
        let level = self.level + 1;

        Self {
            level,
            label: Some(label & 0b11),
            quadrant: Some(quadrant),
            is_on_path,
            quadrant_table: mode.next_table(&self.quadrant_table, label),
            origin: (
                self.origin.0 + dx as f64 * half,
                self.origin.1 + dy as f64 * half,
            ),
            size: half,
            is_highlighted: highlight.is_highlighted(level),
            is_highlighted_ancestor: highlight.is_highlighted_ancestor(level),
        }
    }

    /// The four children in label order.
    pub fn children(&self, on_path_label: Option<u8>, mode: CurveMode, highlight: Highlight) -> [Self; 4] {
        [0u8, 1, 2, 3].map(|label| self.child(label, mode, on_path_label == Some(label), highlight))
    }

    /// Center point, useful for drawing the curve through a level.
    pub fn center(&self) -> (f64, f64) {
        let half = self.size / 2.0;
        (self.origin.0 + half, self.origin.1 + half)
    }

    /// Whether `point` lies inside this square (half-open on the top/right).
    pub fn contains(&self, point: (f64, f64)) -> bool {
        point.0 >= self.origin.0
            && point.0 < self.origin.0 + self.size
            && point.1 >= self.origin.1
            && point.1 < self.origin.1 + self.size
    }
}

/// Root square followed by one on-path square per resolved level.
pub fn path_squares(path: &SelectionPath, highlight: Highlight) -> Vec<Square> {
    let mut squares = Vec::with_capacity(path.len() + 1);
    let mut current = Square::root(highlight);
    squares.push(current);

    for selection in path {
        current = current.child(selection.label, path.mode(), true, highlight);
        squares.push(current);
    }

    squares
}

/// The four quadrants subdividing the on-path square at `level`, in label
/// order, with the selected one marked on-path.
///
/// Returns `None` when `level` is not below a resolved level.
pub fn level_grid(path: &SelectionPath, level: usize, highlight: Highlight) -> Option<[Square; 4]> {
    let selection = path.get(level)?;
    let parent = path_squares(path, highlight).get(level).copied()?;
    Some(parent.children(Some(selection.label), path.mode(), highlight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilbert::resolve;

    fn bits_of(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_highlight_range() {
        assert!(Highlight::at(0, 3).is_err());
        assert!(Highlight::at(4, 3).is_err());
        assert_eq!(Highlight::at(3, 3).unwrap().level(), Some(3));
        assert_eq!(Highlight::NONE.level(), None);
    }

    #[test]
    fn test_highlight_flags() {
        let highlight = Highlight::at(2, 3).unwrap();
        assert!(highlight.is_highlighted(2));
        assert!(!highlight.is_highlighted(1));
        assert!(highlight.is_highlighted_ancestor(1));
        assert!(!highlight.is_highlighted_ancestor(2));
        assert!(!Highlight::NONE.is_highlighted_ancestor(0));
    }

    #[test]
    fn test_path_squares_geometry() {
        let path = resolve(&bits_of("0011"), 2);
        let squares = path_squares(&path, Highlight::NONE);
        assert_eq!(squares.len(), 3);

        assert_eq!(squares[0].size, 1.0);
        assert_eq!(squares[1].quadrant, Some(Quadrant::BottomLeft));
        assert_eq!(squares[1].origin, (0.0, 0.0));
        assert_eq!(squares[1].size, 0.5);
        assert_eq!(squares[2].quadrant, Some(Quadrant::TopLeft));
        assert_eq!(squares[2].origin, (0.0, 0.25));
        assert_eq!(squares[2].size, 0.25);
        assert!(squares.iter().all(|s| s.is_on_path));
    }

    #[test]
    fn test_square_tables_follow_path() {
        let path = resolve(&bits_of("001110"), 3);
        let squares = path_squares(&path, Highlight::NONE);
        for (square, table) in squares.iter().zip(path.tables()) {
            assert_eq!(square.quadrant_table, *table);
        }
    }

    #[test]
    fn test_deepest_square_matches_cell() {
        let path = resolve(&bits_of("100111"), 3);
        let squares = path_squares(&path, Highlight::NONE);
        let deepest = squares.last().unwrap();
        let (x, y) = path.cell();
        assert_eq!(deepest.origin, (x as f64 / 8.0, y as f64 / 8.0));
    }

    #[test]
    fn test_nested_squares_contain_each_other() {
        let path = resolve(&bits_of("110100100111"), 6);
        let squares = path_squares(&path, Highlight::NONE);
        for pair in squares.windows(2) {
            assert!(pair[0].contains(pair[1].center()));
        }
    }

    #[test]
    fn test_highlight_marks_squares() {
        let path = resolve(&bits_of("0011"), 2);
        let squares = path_squares(&path, Highlight::at(2, 2).unwrap());
        assert!(squares[2].is_highlighted);
        assert!(squares[1].is_highlighted_ancestor);
        assert!(!squares[0].is_highlighted && !squares[0].is_highlighted_ancestor);
    }

    #[test]
    fn test_level_grid() {
        let path = resolve(&bits_of("0011"), 2);
        let grid = level_grid(&path, 1, Highlight::NONE).unwrap();
        let on_path: Vec<_> = grid.iter().filter(|s| s.is_on_path).collect();
        assert_eq!(on_path.len(), 1);
        assert_eq!(on_path[0].label, Some(3));
        assert_eq!(on_path[0].quadrant, Some(Quadrant::TopLeft));
        assert!(level_grid(&path, 2, Highlight::NONE).is_none());
    }
}
