//! Error types for Strata operations.
//!
//! This module provides the main error type [`StrataError`] which wraps the
//! core errors and the failures of configuration, layout and rendering.

use std::io;

use thiserror::Error;

pub use strata_core::error::{CatalogIssue, ConfigurationError, NotFoundError};

/// The main error type for Strata operations.
///
/// # Catalog Variant
///
/// The `Configuration` variant carries every catalog issue found while
/// building the registry, so a reporter can render each one separately.
#[derive(Debug, Error)]
pub enum StrataError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Configuration file error: {0}")]
    Config(String),

    #[error("Style error: {0}")]
    Style(String),

    #[error("Layout error: {0}")]
    Layout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_transparent() {
        let err = StrataError::from(NotFoundError::UnknownDiagram {
            diagram: "mainframe".to_string(),
        });
        assert_eq!(err.to_string(), "unknown diagram `mainframe`");
    }

    #[test]
    fn test_configuration_keeps_issues() {
        let err = StrataError::from(ConfigurationError::from(CatalogIssue::DuplicateShortcut {
            label: "Hypervisor".to_string(),
        }));
        match err {
            StrataError::Configuration(inner) => assert_eq!(inner.issues().len(), 1),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }
}
