//! Rendering adapter state.

use tracing::debug;

use super::types::{level_grid, path_squares, Highlight, Square};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::fraction::Fraction;
use crate::hilbert::{resolve_with, CurveMode, SelectionPath};

/// Inputs and output of the most recent resolution.
#[derive(Clone, Debug)]
struct CachedResolution {
    fraction: Fraction,
    depth: usize,
    mode: CurveMode,
    path: SelectionPath,
}

impl CachedResolution {
    fn matches(&self, fraction: &Fraction, depth: usize, mode: CurveMode) -> bool {
        self.depth == depth && self.mode == mode && self.fraction == *fraction
    }
}

/// Bridge between a front-end and the resolver.
///
/// Holds the settings, the caller's highlight and a one-entry memo of the
/// last resolution. Every request is recomputed from scratch unless its inputs
/// equal the memoized ones.
#[derive(Clone, Debug, Default)]
pub struct Visualizer {
    settings: Settings,
    highlight: Highlight,
    cache: Option<CachedResolution>,
}

impl Visualizer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            highlight: Highlight::NONE,
            cache: None,
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Switch curve mode for subsequent requests.
    pub fn set_mode(&mut self, mode: CurveMode) {
        self.settings.mode = mode;
    }

    /// Resolve a floating-point fraction to `depth` levels.
    pub fn request_resolution(&mut self, fraction: f64, depth: i64) -> Result<SelectionPath> {
        let fraction = Fraction::from_f64(fraction, self.settings.precision_bits)?;
        self.request_fraction(&fraction, depth)
    }

    /// Resolve an already-expanded fraction to `depth` levels.
    pub fn request_fraction(&mut self, fraction: &Fraction, depth: i64) -> Result<SelectionPath> {
        let depth = self.check_depth(depth)?;
        let mode = self.settings.mode;

        if let Some(cached) = &self.cache {
            if cached.matches(fraction, depth, mode) {
                debug!(depth, %mode, "resolution cache hit");
                return Ok(cached.path.clone());
            }
        }

        debug!(depth, %mode, bits = fraction.len(), "resolution cache miss");
        let path = resolve_with(fraction.bits(), depth, mode);

        // A highlight deeper than the new path no longer points at anything.
        if self.highlight.level().is_some_and(|level| level > depth) {
            debug!(highlight = ?self.highlight, depth, "clearing stale highlight");
            self.highlight = Highlight::NONE;
        }

        self.cache = Some(CachedResolution {
            fraction: fraction.clone(),
            depth,
            mode,
            path: path.clone(),
        });
        Ok(path)
    }

    /// Most recently resolved path, if any.
    pub fn current_path(&self) -> Option<&SelectionPath> {
        self.cache.as_ref().map(|c| &c.path)
    }

    /// Fraction behind the current path, if any.
    pub fn current_fraction(&self) -> Option<&Fraction> {
        self.cache.as_ref().map(|c| &c.fraction)
    }

    #[inline]
    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    /// Highlight `level` of the current path (`1..=depth`).
    pub fn set_highlight(&mut self, level: usize) -> Result<()> {
        let depth = self.current_path().map_or(0, SelectionPath::len);
        self.highlight = Highlight::at(level, depth)?;
        Ok(())
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = Highlight::NONE;
    }

    /// Nested on-path squares of the current path, root first.
    pub fn squares(&self) -> Vec<Square> {
        self.current_path()
            .map(|path| path_squares(path, self.highlight))
            .unwrap_or_default()
    }

    /// The four quadrants subdividing the current path's square at `level`.
    pub fn level_grid(&self, level: usize) -> Option<[Square; 4]> {
        level_grid(self.current_path()?, level, self.highlight)
    }

    fn check_depth(&self, depth: i64) -> Result<usize> {
        if depth < 0 {
            return Err(Error::InvalidDepth { depth });
        }
        let max = self.settings.max_depth;
        match usize::try_from(depth) {
            Ok(depth) if depth <= max => Ok(depth),
            _ => Err(Error::DepthExceedsLimit { depth, max }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilbert::{resolve, Quadrant};

    #[test]
    fn test_request_resolution() {
        let mut viz = Visualizer::default();
        let path = viz.request_resolution(0.1875, 2).unwrap();
        assert_eq!(path.labels(), vec![0, 3]);
        assert_eq!(path.quadrants(), vec![Quadrant::BottomLeft, Quadrant::TopLeft]);
        assert_eq!(viz.current_path(), Some(&path));
    }

    #[test]
    fn test_depth_zero_is_valid() {
        let mut viz = Visualizer::default();
        let path = viz.request_resolution(0.75, 0).unwrap();
        assert!(path.is_empty());
        assert_eq!(viz.squares().len(), 1);
    }

    #[test]
    fn test_invalid_depth() {
        let mut viz = Visualizer::default();
        assert!(matches!(
            viz.request_resolution(0.5, -1),
            Err(Error::InvalidDepth { depth: -1 })
        ));
        assert!(matches!(
            viz.request_resolution(0.5, 6),
            Err(Error::DepthExceedsLimit { depth: 6, max: 5 })
        ));
    }

    #[test]
    fn test_invalid_fraction() {
        let mut viz = Visualizer::default();
        for value in [1.0, -0.1, f64::NAN] {
            assert!(matches!(
                viz.request_resolution(value, 2),
                Err(Error::InvalidFraction { .. })
            ));
        }
        assert!(viz.current_path().is_none());
    }

    #[test]
    fn test_matches_direct_resolution() {
        let mut viz = Visualizer::default();
        let fraction = Fraction::from_f64(0.6180339887, 52).unwrap();
        for depth in 0..=5 {
            let via_adapter = viz.request_resolution(0.6180339887, depth).unwrap();
            assert_eq!(via_adapter, resolve(fraction.bits(), depth as usize));
        }
    }

    #[test]
    fn test_cache_reuses_and_invalidates() {
        let mut viz = Visualizer::default();
        let first = viz.request_resolution(0.3, 4).unwrap();
        let again = viz.request_resolution(0.3, 4).unwrap();
        assert_eq!(first, again);

        viz.set_mode(CurveMode::FixedTable);
        let fixed = viz.request_resolution(0.3, 4).unwrap();
        assert_eq!(fixed.mode(), CurveMode::FixedTable);
        assert_eq!(fixed.labels(), first.labels());
    }

    #[test]
    fn test_highlight_lifecycle() {
        let mut viz = Visualizer::default();
        assert!(viz.set_highlight(1).is_err());

        viz.request_resolution(0.1875, 3).unwrap();
        viz.set_highlight(3).unwrap();
        let squares = viz.squares();
        assert!(squares[3].is_highlighted);
        assert!(squares[2].is_highlighted_ancestor);

        assert!(matches!(
            viz.set_highlight(4),
            Err(Error::InvalidHighlight { level: 4, depth: 3 })
        ));
        assert_eq!(viz.highlight().level(), Some(3));

        // Shrinking the depth drops a highlight that no longer fits.
        viz.request_resolution(0.1875, 2).unwrap();
        assert_eq!(viz.highlight().level(), None);

        viz.set_highlight(1).unwrap();
        viz.clear_highlight();
        assert!(viz.squares().iter().all(|s| !s.is_highlighted));
    }

    #[test]
    fn test_level_grid_through_adapter() {
        let mut viz = Visualizer::default();
        assert!(viz.level_grid(0).is_none());
        viz.request_resolution(0.1875, 2).unwrap();
        let grid = viz.level_grid(0).unwrap();
        assert!(grid[0].is_on_path);
        assert_eq!(grid[0].quadrant, Some(Quadrant::BottomLeft));
    }
}
