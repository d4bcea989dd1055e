//! Rendering adapter for front-ends.
//!
//! This module contains:
//! - `Visualizer` - request handling, memoization and highlight state
//! - `Square` - positioned squares of the recursion tree
//! - `Highlight` - the single externally owned highlighted level

mod state;
mod types;

pub use state::Visualizer;
pub use types::{level_grid, path_squares, Highlight, Square};
