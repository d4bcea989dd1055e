//! Hilbert-order quadrant resolution.
//!
//! This module provides:
//! - Quadrant index tables and their inverse lookup
//! - The per-level rotation/reflection of those tables
//! - The resolver that turns a bit sequence into per-level selections
//! - Closed-form curve conversions, whole-curve tracing and point location

pub mod curve;
pub mod resolver;
pub mod rotation;
pub mod table;

pub use curve::{d2xy, grid_side, index_bits, is_adjacent, locate, trace, xy2d, MAX_TRACE_DEPTH};
pub use resolver::{bit_pair, resolve, resolve_with, Selection, SelectionPath};
pub use rotation::{transform, CurveMode, FIRST_LABEL, LAST_LABEL};
pub use table::{Quadrant, QuadrantTable};
