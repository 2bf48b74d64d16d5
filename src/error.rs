//! Error handling for the Plotty application
//!
//! This module defines the crate error type and a Result alias for use
//! throughout the application. Evaluation problems (division by zero,
//! domain errors) are not errors in this sense: they are reported per
//! sample through [`crate::expr::Undefined`].

use crate::expr::ParseError;
use thiserror::Error;

/// Main error type for Plotty operations
#[derive(Error, Debug)]
pub enum PlottyError {
    /// The function text could not be turned into an expression
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to user preset files
    #[error("Preset error: {0}")]
    Preset(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PlottyError>,
    },
}

impl PlottyError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PlottyError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for PlottyError {
    fn from(err: serde_json::Error) -> Self {
        PlottyError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for PlottyError {
    fn from(err: toml::de::Error) -> Self {
        PlottyError::Preset(err.to_string())
    }
}

/// Result type alias for Plotty operations
pub type Result<T> = std::result::Result<T, PlottyError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PlottyError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Into::<PlottyError>::into(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Into::<PlottyError>::into(e).with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlottyError::Config("missing data directory".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing data directory");
    }

    #[test]
    fn test_error_with_context() {
        let err = PlottyError::Preset("bad table".to_string());
        let with_ctx = err.with_context("Failed to load presets.toml");
        assert!(with_ctx.to_string().contains("Failed to load presets.toml"));
        assert!(with_ctx.to_string().contains("bad table"));
    }

    #[test]
    fn test_parse_error_converts() {
        let parse_err = crate::expr::parse("sin(").unwrap_err();
        let err: PlottyError = parse_err.into();
        assert!(err.to_string().starts_with("Parse error:"));
    }

    #[test]
    fn test_result_ext_on_io_error() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = result.context("Reading app state").unwrap_err();
        assert!(err.to_string().starts_with("Reading app state"));
    }
}
