//! Error types for the planning engine

use thiserror::Error;

/// Result alias used across the engine
pub type PlanningResult<T> = Result<T, PlanningError>;

/// Errors raised by the planning engine and its loaders
#[derive(Error, Debug)]
pub enum PlanningError {
    /// An argument fell outside the domain of the calculation
    #[error("invalid input `{parameter}` = {value}: {constraint}")]
    InvalidInput {
        /// Name of the offending argument
        parameter: &'static str,
        /// The constraint that was violated
        constraint: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A profile or assumption set is inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlanningError {
    pub(crate) fn invalid(parameter: &'static str, constraint: &'static str, value: f64) -> Self {
        PlanningError::InvalidInput {
            parameter,
            constraint,
            value,
        }
    }

    /// Name of the rejected argument, if this is an input error
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            PlanningError::InvalidInput { parameter, .. } => Some(parameter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_parameter() {
        let err = PlanningError::invalid("rate", "must be greater than -1 (-100%)", -1.5);
        let msg = err.to_string();
        assert!(msg.contains("`rate`"));
        assert!(msg.contains("-1.5"));
        assert_eq!(err.parameter(), Some("rate"));
    }

    #[test]
    fn test_config_error_has_no_parameter() {
        let err = PlanningError::Config("retirement age before current age".into());
        assert_eq!(err.parameter(), None);
    }
}
