//! hilbert-fraction - map a binary fraction to nested Hilbert-curve quadrants.
//!
//! The fraction's bits are read two at a time. Each pair names which quadrant
//! of the current square holds the point, in Hilbert traversal order, and the
//! quadrant labelling is reflected on the way down so that consecutive
//! positions along the curve stay edge-adjacent at every depth.
//!
//! ```
//! use hilbert_fraction::hilbert::{resolve, Quadrant};
//!
//! // 0.0011 in binary: label 0, then label 3.
//! let path = resolve(&[false, false, true, true], 2);
//! assert_eq!(path.labels(), vec![0, 3]);
//! assert_eq!(path.quadrants(), vec![Quadrant::BottomLeft, Quadrant::TopLeft]);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod fraction;
pub mod hilbert;

pub use app::{Highlight, Square, Visualizer};
pub use config::Settings;
pub use error::{Error, Result};
pub use fraction::Fraction;
pub use hilbert::{resolve, resolve_with, transform, CurveMode, QuadrantTable, SelectionPath};
