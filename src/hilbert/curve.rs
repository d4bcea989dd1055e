//! Whole-curve helpers built on the resolver.
//!
//! `d2xy` and `xy2d` are the classic closed-form conversions between a
//! position along the curve and grid coordinates. They use the same base
//! orientation as [`QuadrantTable::ROOT`](super::table::QuadrantTable::ROOT)
//! with y growing upward, so they agree cell for cell with
//! [`SelectionPath::cell`](super::resolver::SelectionPath::cell).

use rayon::prelude::*;

use super::resolver::resolve_with;
use super::rotation::CurveMode;
use crate::error::{Error, Result};

/// Deepest curve [`trace`] will enumerate (4^10 cells).
pub const MAX_TRACE_DEPTH: usize = 10;

/// Rotate/flip a quadrant appropriately for the Hilbert curve transformation.
///
/// Signed arithmetic keeps the reflection `n - 1 - x` well defined while x
/// still carries bits from coarser levels during `xy2d`.
#[inline]
fn rot(n: u64, x: &mut u64, y: &mut u64, rx: u64, ry: u64) {
    if ry == 0 {
        if rx == 1 {
            let n_minus_1 = n as i64 - 1;
            *x = (n_minus_1 - *x as i64) as u64;
            *y = (n_minus_1 - *y as i64) as u64;
        }
        std::mem::swap(x, y);
    }
}

/// Side length of the grid at `depth` levels of subdivision.
///
/// Saturates at `2^63` for depths beyond what a `u64` grid can hold.
#[inline]
pub fn grid_side(depth: usize) -> u64 {
    1u64 << depth.min(63)
}

/// Convert (x, y) grid coordinates to distance along the curve.
///
/// `n` is the grid side and must be a power of 2.
pub fn xy2d(n: u64, mut x: u64, mut y: u64) -> u64 {
    let mut d = 0u64;
    let mut s = n / 2;

    while s > 0 {
        let rx = u64::from((x & s) > 0);
        let ry = u64::from((y & s) > 0);
        d += s * s * ((3 * rx) ^ ry);
        rot(s, &mut x, &mut y, rx, ry);
        s /= 2;
    }

    d
}

/// Convert distance along the curve to (x, y) grid coordinates.
///
/// `n` is the grid side and must be a power of 2.
pub fn d2xy(n: u64, d: u64) -> (u64, u64) {
    let mut x = 0u64;
    let mut y = 0u64;
    let mut s = 1u64;
    let mut t = d;

    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);

        rot(s, &mut x, &mut y, rx, ry);

        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }

    (x, y)
}

/// Most-significant-first bits of `index`, two per level.
pub fn index_bits(index: u64, depth: usize) -> Vec<bool> {
    (0..2 * depth)
        .rev()
        .map(|shift| shift < 64 && (index >> shift) & 1 == 1)
        .collect()
}

/// Bits whose resolution to `depth` levels lands in cell `(x, y)`.
///
/// This is the inverse of [`resolve`](super::resolver::resolve) followed by
/// [`SelectionPath::cell`](super::resolver::SelectionPath::cell).
pub fn locate(x: u64, y: u64, depth: usize) -> Result<Vec<bool>> {
    if depth > 32 {
        return Err(Error::DepthExceedsLimit {
            depth: depth as i64,
            max: 32,
        });
    }
    let n = grid_side(depth);
    if x >= n || y >= n {
        return Err(Error::CellOutOfRange { x, y, side: n });
    }
    Ok(index_bits(xy2d(n, x, y), depth))
}

/// Cells of the full curve at `depth`, in curve order.
///
/// Each index is resolved independently, so the work is spread across the
/// rayon pool; `collect` keeps the output in index order.
pub fn trace(depth: usize, mode: CurveMode) -> Result<Vec<(u64, u64)>> {
    if depth > MAX_TRACE_DEPTH {
        return Err(Error::DepthExceedsLimit {
            depth: depth as i64,
            max: MAX_TRACE_DEPTH,
        });
    }

    let count = 1u64 << (2 * depth);
    let cells: Vec<(u64, u64)> = (0..count)
        .into_par_iter()
        .map(|index| resolve_with(&index_bits(index, depth), depth, mode).cell())
        .collect();

    Ok(cells)
}

/// True when two cells share an edge.
#[inline]
pub fn is_adjacent(a: (u64, u64), b: (u64, u64)) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}
