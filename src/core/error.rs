//! Error types for simulation setup.
//!
//! Nothing inside a running simulation can fail; these only surface while
//! building a [`Simulation`](crate::core::simulation::Simulation) or when a
//! caller hands it a bad scale ratio.

use crate::entities::obstacles::Species;
use thiserror::Error;

/// Rejected game configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be non-negative and finite, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("min jump height {min} exceeds max jump height {max}")]
    JumpRange { min: f64, max: f64 },

    #[error("{spawner} spawner has an empty species catalog")]
    EmptyCatalog { spawner: &'static str },

    #[error("{species:?} has a degenerate size {width}x{height}")]
    DegenerateSpecies {
        species: Species,
        width: f64,
        height: f64,
    },

    #[error("{spawner} spawn gap range [{min}, {max}] is invalid")]
    GapRange {
        spawner: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{spawner} spawner has no altitudes")]
    NoAltitudes { spawner: &'static str },
}

/// Rejected display scale ratio. The previous ratio stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ScaleError {
    #[error("scale ratio must be positive and finite, got {0}")]
    Invalid(f64),
}

/// Anything that can stop a simulation from being constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = ConfigError::NotPositive {
            field: "gravity",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "gravity must be positive and finite, got 0");

        let err = SetupError::from(ScaleError::Invalid(-1.0));
        assert_eq!(
            err.to_string(),
            "scale ratio must be positive and finite, got -1"
        );
    }

    #[test]
    fn test_config_error_wraps_into_setup_error() {
        let err: SetupError = ConfigError::EmptyCatalog { spawner: "bird" }.into();
        assert!(matches!(err, SetupError::Config(_)));
        assert!(err.to_string().contains("bird spawner"));
    }
}
