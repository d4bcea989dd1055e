//! Recursive quadrant resolution.
//!
//! A fraction's bits are read two at a time, most significant first. Each pair
//! names the label of the quadrant the point falls into at that level; the
//! current [`QuadrantTable`] says where that quadrant sits, and the table is
//! re-oriented before descending into it.

use serde::Serialize;
use tracing::{debug, trace};

use super::rotation::CurveMode;
use super::table::{Quadrant, QuadrantTable};

/// One level of a resolved path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Selection {
    /// Depth of the subdivided square (root = 0).
    pub level: usize,
    /// Traversal label read from the bit pair at this level.
    pub label: u8,
    /// Where the labelled quadrant sits under this level's table.
    pub quadrant: Quadrant,
}

/// Ordered per-level selections for one fraction at one depth.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SelectionPath {
    mode: CurveMode,
    selections: Vec<Selection>,
    /// `tables[level]` is the table that was used to subdivide that level.
    tables: Vec<QuadrantTable>,
}

impl SelectionPath {
    /// Number of levels resolved.
    #[inline]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Curve mode the path was resolved with.
    #[inline]
    pub fn mode(&self) -> CurveMode {
        self.mode
    }

    #[inline]
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.selections.iter()
    }

    /// Selection at `level`, if resolved that deep.
    pub fn get(&self, level: usize) -> Option<&Selection> {
        self.selections.get(level)
    }

    /// Labels in level order.
    pub fn labels(&self) -> Vec<u8> {
        self.selections.iter().map(|s| s.label).collect()
    }

    /// Quadrants in level order.
    pub fn quadrants(&self) -> Vec<Quadrant> {
        self.selections.iter().map(|s| s.quadrant).collect()
    }

    /// Tables in effect at each level.
    #[inline]
    pub fn tables(&self) -> &[QuadrantTable] {
        &self.tables
    }

    /// Integer coordinates of the deepest selected square on a
    /// `2^len × 2^len` grid, with y growing upward from the bottom edge.
    ///
    /// Only the low 64 bits survive for paths deeper than 64 levels.
    pub fn cell(&self) -> (u64, u64) {
        self.selections.iter().fold((0u64, 0u64), |(x, y), s| {
            let (dx, dy) = s.quadrant.xy();
            ((x << 1) | dx, (y << 1) | dy)
        })
    }

    /// Position of the deepest selected square along the curve, i.e. the
    /// labels read as a base-4 number.
    pub fn index(&self) -> u64 {
        self.selections
            .iter()
            .fold(0u64, |d, s| (d << 2) | u64::from(s.label))
    }
}

impl<'a> IntoIterator for &'a SelectionPath {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

/// Read the 2-bit label for `level`. Missing bits read as zero.
#[inline]
pub fn bit_pair(bits: &[bool], level: usize) -> u8 {
    let bit = |i: usize| u8::from(bits.get(i).copied().unwrap_or(false));
    (bit(2 * level) << 1) | bit(2 * level + 1)
}

/// Resolve `bits` to `max_depth` levels in Hilbert order.
pub fn resolve(bits: &[bool], max_depth: usize) -> SelectionPath {
    resolve_with(bits, max_depth, CurveMode::Hilbert)
}

/// Resolve `bits` to `max_depth` levels using the given curve mode.
///
/// Bits beyond the end of `bits` are treated as zero, so a short expansion
/// behaves like a fraction with a trailing run of zeros. Depth 0 yields an
/// empty path.
pub fn resolve_with(bits: &[bool], max_depth: usize, mode: CurveMode) -> SelectionPath {
    let mut selections = Vec::with_capacity(max_depth);
    let mut tables = Vec::with_capacity(max_depth);
    let mut table = QuadrantTable::ROOT;

    for level in 0..max_depth {
        let label = bit_pair(bits, level);
        let quadrant = table.position_of(label);
        trace!(level, label, %quadrant, %table, "selected quadrant");

        selections.push(Selection {
            level,
            label,
            quadrant,
        });
        tables.push(table);
        table = mode.next_table(&table, label);
    }

    debug!(
        depth = max_depth,
        available_bits = bits.len(),
        %mode,
        labels = ?selections.iter().map(|s| s.label).collect::<Vec<_>>(),
        "resolved selection path"
    );

    SelectionPath {
        mode,
        selections,
        tables,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilbert::rotation::transform;
    use proptest::prelude::*;

    fn bits_of(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_depth_zero_is_empty() {
        assert!(resolve(&bits_of("110110"), 0).is_empty());
        assert!(resolve(&[], 0).is_empty());
    }

    #[test]
    fn test_scenario_zero_then_three() {
        let path = resolve(&bits_of("0011"), 2);
        assert_eq!(path.labels(), vec![0, 3]);
        assert_eq!(path.get(0).map(|s| s.level), Some(0));
        assert_eq!(path.get(1).map(|s| s.level), Some(1));

        // Level 0 uses the root table; label 0 is bottom-left.
        assert_eq!(path.tables()[0], QuadrantTable::ROOT);
        assert_eq!(path.quadrants()[0], Quadrant::BottomLeft);

        // Level 1 uses the reflected table, where label 3 sits top-left.
        let expected = transform(&QuadrantTable::ROOT, 0);
        assert_eq!(path.tables()[1], expected);
        assert_eq!(path.tables()[1].rows(), [[3, 2], [0, 1]]);
        assert_eq!(path.quadrants()[1], Quadrant::TopLeft);
    }

    #[test]
    fn test_fixed_mode_scenario() {
        let path = resolve_with(&bits_of("0011"), 2, CurveMode::FixedTable);
        assert_eq!(path.labels(), vec![0, 3]);
        assert_eq!(
            path.quadrants(),
            vec![Quadrant::BottomLeft, Quadrant::BottomRight]
        );
        assert!(path.tables().iter().all(|t| *t == QuadrantTable::ROOT));
        assert_eq!(path.mode(), CurveMode::FixedTable);
    }

    #[test]
    fn test_padding() {
        assert_eq!(resolve(&[], 2), resolve(&[false; 4], 2));
        // A dangling odd bit is the high bit of its pair.
        assert_eq!(resolve(&bits_of("1"), 1).labels(), vec![2]);
    }

    #[test]
    fn test_bits_beyond_depth_are_ignored() {
        assert_eq!(resolve(&bits_of("10"), 1), resolve(&bits_of("101111"), 1));
    }

    #[test]
    fn test_cell_and_index() {
        // 0.0011 -> bottom-left quadrant, then its top-left sub-quadrant.
        let path = resolve(&bits_of("0011"), 2);
        assert_eq!(path.cell(), (0, 1));
        assert_eq!(path.index(), 3);

        let path = resolve(&bits_of("1111"), 2);
        assert_eq!(path.index(), 15);
        assert_eq!(path.cell(), (3, 0));
    }

    #[test]
    fn test_iteration() {
        let path = resolve(&bits_of("011011"), 3);
        let levels: Vec<usize> = (&path).into_iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![0, 1, 2]);
        assert_eq!(path.iter().count(), path.len());
    }

    proptest! {
        #[test]
        fn prop_length_matches_depth(bits in prop::collection::vec(any::<bool>(), 0..40), depth in 0usize..24) {
            prop_assert_eq!(resolve(&bits, depth).len(), depth);
        }

        #[test]
        fn prop_deterministic(bits in prop::collection::vec(any::<bool>(), 0..40), depth in 0usize..24) {
            prop_assert_eq!(resolve(&bits, depth), resolve(&bits, depth));
        }

        #[test]
        fn prop_prefix_stable(bits in prop::collection::vec(any::<bool>(), 0..40), depth in 0usize..20) {
            let shorter = resolve(&bits, depth);
            let longer = resolve(&bits, depth + 1);
            prop_assert_eq!(longer.len(), shorter.len() + 1);
            prop_assert_eq!(&longer.selections()[..depth], shorter.selections());
            prop_assert_eq!(&longer.tables()[..depth], shorter.tables());
        }

        #[test]
        fn prop_labels_are_bit_pairs(bits in prop::collection::vec(any::<bool>(), 0..40), depth in 0usize..24) {
            let path = resolve(&bits, depth);
            for s in path.iter() {
                prop_assert_eq!(s.label, bit_pair(&bits, s.level));
                prop_assert_eq!(path.tables()[s.level].position_of(s.label), s.quadrant);
            }
        }

        #[test]
        fn prop_tables_complete(bits in prop::collection::vec(any::<bool>(), 0..40), depth in 0usize..24) {
            let path = resolve(&bits, depth);
            for table in path.tables() {
                prop_assert!(table.is_complete());
            }
        }

        #[test]
        fn prop_padding_equivalent(bits in prop::collection::vec(any::<bool>(), 0..12), depth in 0usize..12) {
            let mut padded = bits.clone();
            padded.resize(2 * depth.max(bits.len()), false);
            prop_assert_eq!(resolve(&bits, depth), resolve(&padded, depth));
        }
    }
}
