//! Game-specific error types.
//!
//! The simulation itself cannot fail: every input is a discrete signal and
//! falling off the screen is an ordinary state transition.  The only fallible
//! boundary is configuration, which is parsed from TOML and validated before
//! it is allowed to drive the generator and the physics.
//!
//! ## Usage
//!
//! ```rust
//! use hopper::config::GameConfig;
//! use hopper::error::GameResult;
//!
//! fn load(contents: &str) -> GameResult<GameConfig> {
//!     let config = GameConfig::from_toml_str(contents)?;
//!     Ok(config)
//! }
//! ```

use std::fmt;

/// Top-level error enum for Hopper.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// The configuration file was not valid TOML or had mistyped values.
    ConfigParse {
        /// Parser message, including line/column where available.
        message: String,
    },

    /// A `[min, max]` pair was supplied with `min > max`.
    InvertedRange {
        /// Name of the range (for logging).
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// A constant is outside its safe operating range.
    UnsafeConstant {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigParse { message } => {
                write!(f, "failed to parse game config: {}", message)
            }
            GameError::InvertedRange { name, min, max } => write!(
                f,
                "range '{}' is inverted: min {} is greater than max {}",
                name, min, max
            ),
            GameError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for GameError {}

impl From<toml::de::Error> for GameError {
    fn from(e: toml::de::Error) -> Self {
        GameError::ConfigParse {
            message: e.to_string(),
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is a finite number.
pub fn require_finite(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "any finite value",
        })
    }
}

/// Returns an error unless `value` is finite and strictly positive.
pub fn require_positive(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

/// Returns an error unless `value` is finite and zero or positive.
pub fn require_non_negative(name: &'static str, value: f32) -> GameResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GameError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, ∞)",
        })
    }
}

/// Returns an error if either bound is non-finite or `min > max`.
pub fn require_ordered(name: &'static str, min: f32, max: f32) -> GameResult<()> {
    require_finite(name, min)?;
    require_finite(name, max)?;
    if min <= max {
        Ok(())
    } else {
        Err(GameError::InvertedRange { name, min, max })
    }
}
