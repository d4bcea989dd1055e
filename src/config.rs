//! Runtime settings.
//!
//! Settings are layered:
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. `HILBERT_FRACTION_*` environment variables
//!
//! and validated once all layers are applied.
//!
//! ```toml
//! max_depth = 5
//! precision_bits = 52
//! mode = "hilbert"
//! ```

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::fraction::F64_MAX_FRACTION_BITS;
use crate::hilbert::CurveMode;

/// Default depth ceiling for interactive requests.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Default number of mantissa bits taken from an `f64` input.
pub const DEFAULT_PRECISION_BITS: usize = 52;

/// Hard upper bound on `max_depth`; grid coordinates are `u64`.
pub const DEPTH_CEILING: usize = 32;

pub const ENV_MAX_DEPTH: &str = "HILBERT_FRACTION_MAX_DEPTH";
pub const ENV_PRECISION_BITS: &str = "HILBERT_FRACTION_PRECISION_BITS";
pub const ENV_MODE: &str = "HILBERT_FRACTION_MODE";

/// Resolution settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Largest depth a caller may request.
    pub max_depth: usize,
    /// Mantissa bits extracted from floating-point fractions.
    pub precision_bits: usize,
    /// Curve mode used for resolution.
    pub mode: CurveMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            precision_bits: DEFAULT_PRECISION_BITS,
            mode: CurveMode::Hilbert,
        }
    }
}

impl Settings {
    /// Load settings from an optional TOML file, apply environment overrides
    /// and validate the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let settings = Self::from_file(path)?;
                info!(path = %path.display(), "loaded settings file");
                settings
            }
            None => Self::default(),
        };

        settings.apply_environment_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse a TOML settings file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse TOML settings; missing keys take their defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `HILBERT_FRACTION_*` environment variables.
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_DEPTH) {
            self.max_depth = parse_count(ENV_MAX_DEPTH, &value)?;
        }
        if let Some(value) = lookup(ENV_PRECISION_BITS) {
            self.precision_bits = parse_count(ENV_PRECISION_BITS, &value)?;
        }
        if let Some(value) = lookup(ENV_MODE) {
            self.mode = value.parse()?;
        }
        Ok(())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.max_depth == 0 || self.max_depth > DEPTH_CEILING {
            errors.push(format!(
                "max_depth = {} is outside 1..={DEPTH_CEILING}",
                self.max_depth
            ));
        }
        if self.precision_bits < 2 || self.precision_bits > F64_MAX_FRACTION_BITS {
            errors.push(format!(
                "precision_bits = {} is outside 2..={F64_MAX_FRACTION_BITS}",
                self.precision_bits
            ));
        }

        if !errors.is_empty() {
            return Err(Error::Config(errors.join("; ")));
        }

        if self.precision_bits < 2 * self.max_depth {
            warn!(
                precision_bits = self.precision_bits,
                max_depth = self.max_depth,
                "precision covers fewer levels than max_depth; deeper levels read zero bits"
            );
        }

        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|e| Error::Config(format!("{key} = '{value}' is not a count: {e}")))
}
