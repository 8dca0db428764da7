//! Error adapter for converting StrataError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a catalog fails validation with several issues, each
//! [`CatalogIssue`] is rendered independently.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan};

use strata::{
    StrataError,
    error::{CatalogIssue, NotFoundError},
};

/// Adapter for a single catalog issue.
pub struct IssueAdapter<'a>(pub &'a CatalogIssue);

impl fmt::Debug for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for IssueAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for IssueAdapter<'_> {}

impl MietteDiagnostic for IssueAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.0.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.0.help().map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }
}

/// Adapter for every other [`StrataError`] variant.
pub struct ErrorAdapter<'a>(pub &'a StrataError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StrataError::Io(_) => "strata::io",
            StrataError::Configuration(_) => "strata::catalog",
            StrataError::NotFound(_) => "strata::not_found",
            StrataError::Config(_) => "strata::config",
            StrataError::Style(_) => "strata::style",
            StrataError::Layout(_) => "strata::layout",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StrataError::NotFound(NotFoundError::UnknownShortcut { .. }) => {
                "run `strata shortcuts` to see the available labels"
            }
            StrataError::NotFound(_) => {
                "run `strata list` to see the available diagrams and components"
            }
            StrataError::Style(_) => "colors accept CSS syntax such as `#E3F2FD` or `white`",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// One issue of an invalid catalog.
    Issue(IssueAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Issue(i) => fmt::Display::fmt(i, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Issue(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Issue(i) => i.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`StrataError`] into a list of reportable errors.
///
/// For [`StrataError::Configuration`], this returns one [`Reportable`] for
/// each catalog issue. For other error variants, this returns a single
/// [`Reportable`].
pub fn to_reportables(err: &StrataError) -> Vec<Reportable<'_>> {
    match err {
        StrataError::Configuration(config_err) if !config_err.issues().is_empty() => config_err
            .issues()
            .iter()
            .map(|issue| Reportable::Issue(IssueAdapter(issue)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Render every diagnostic of `err` with `reporter`, one string each.
pub fn render_reports(err: &StrataError, reporter: &GraphicalReportHandler) -> Vec<String> {
    to_reportables(err)
        .iter()
        .map(|reportable| {
            let mut writer = String::new();
            match reporter.render_report(&mut writer, reportable) {
                Ok(()) => writer,
                Err(_) => reportable.to_string(),
            }
        })
        .collect()
}
