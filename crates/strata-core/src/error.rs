//! Error types for the registry and the selection controller.
//!
//! - [`ConfigurationError`] is raised only while building a
//!   [`Registry`](crate::registry::Registry) and carries every
//!   [`CatalogIssue`] found in the static catalog.
//! - [`NotFoundError`] is the recoverable runtime error of lookups and
//!   selection. It never alters selection state.

use thiserror::Error;

/// A single integrity problem in a static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogIssue {
    #[error("diagram #{position} has an empty name")]
    EmptyDiagramName { position: usize },

    #[error("diagram `{diagram}` is defined more than once")]
    DuplicateDiagram { diagram: String },

    #[error("diagram `{diagram}` has an empty `{field}`")]
    EmptyDiagramField {
        diagram: String,
        field: &'static str,
    },

    #[error("component #{position} of diagram `{diagram}` has an empty id")]
    EmptyComponentId { diagram: String, position: usize },

    #[error("component `{component}` in diagram `{diagram}` has an empty `{field}`")]
    EmptyComponentField {
        diagram: String,
        component: String,
        field: &'static str,
    },

    #[error("component `{component}` is defined more than once in diagram `{diagram}`")]
    DuplicateComponent { diagram: String, component: String },

    #[error("layout of diagram `{diagram}` places unknown component `{component}`")]
    UnknownLayoutComponent { diagram: String, component: String },

    #[error("layout of diagram `{diagram}` gives component `{component}` an empty label")]
    EmptyLayoutLabel { diagram: String, component: String },

    #[error("shortcut #{position} has an empty label")]
    EmptyShortcutLabel { position: usize },

    #[error("shortcut `{label}` is defined more than once")]
    DuplicateShortcut { label: String },

    #[error("shortcut `{label}` points to unknown component `{diagram}/{component}`")]
    UnresolvedShortcut {
        label: String,
        diagram: String,
        component: String,
    },
}

impl CatalogIssue {
    /// Stable, searchable code for this kind of issue.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyDiagramName { .. } => "strata::catalog::empty_diagram_name",
            Self::DuplicateDiagram { .. } => "strata::catalog::duplicate_diagram",
            Self::EmptyDiagramField { .. } => "strata::catalog::empty_diagram_field",
            Self::EmptyComponentId { .. } => "strata::catalog::empty_component_id",
            Self::EmptyComponentField { .. } => "strata::catalog::empty_component_field",
            Self::DuplicateComponent { .. } => "strata::catalog::duplicate_component",
            Self::UnknownLayoutComponent { .. } => "strata::catalog::unknown_layout_component",
            Self::EmptyLayoutLabel { .. } => "strata::catalog::empty_layout_label",
            Self::EmptyShortcutLabel { .. } => "strata::catalog::empty_shortcut_label",
            Self::DuplicateShortcut { .. } => "strata::catalog::duplicate_shortcut",
            Self::UnresolvedShortcut { .. } => "strata::catalog::unresolved_shortcut",
        }
    }

    /// Suggested fix, when there is an obvious one.
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateDiagram { .. } | Self::DuplicateComponent { .. } => {
                Some("ids must be unique within a diagram; rename or remove the duplicate")
            }
            Self::UnknownLayoutComponent { .. } => {
                Some("add the component to the diagram's component table or fix the id")
            }
            Self::UnresolvedShortcut { .. } => {
                Some("shortcuts must point to a component of a known diagram")
            }
            Self::EmptyDiagramField { .. }
            | Self::EmptyComponentField { .. }
            | Self::EmptyLayoutLabel { .. } => Some("display text must not be blank"),
            _ => None,
        }
    }
}

/// The static catalog is malformed. Raised at startup only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid component catalog{}", self.summary())]
pub struct ConfigurationError {
    issues: Vec<CatalogIssue>,
}

impl ConfigurationError {
    /// Create a configuration error from the issues found.
    pub fn new(issues: Vec<CatalogIssue>) -> Self {
        Self { issues }
    }

    /// All issues found, in catalog order.
    pub fn issues(&self) -> &[CatalogIssue] {
        &self.issues
    }

    /// The first issue, followed by how many others there are.
    fn summary(&self) -> String {
        match self.issues.as_slice() {
            [] => String::new(),
            [first] => format!(": {first}"),
            [first, rest @ ..] => format!(": {first} (+{} more)", rest.len()),
        }
    }
}

impl From<CatalogIssue> for ConfigurationError {
    fn from(issue: CatalogIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }
}

/// A diagram, component or shortcut that the registry does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("unknown diagram `{diagram}`")]
    UnknownDiagram { diagram: String },

    #[error("component `{component}` not found in diagram `{diagram}`")]
    UnknownComponent { diagram: String, component: String },

    #[error("unknown shortcut `{label}`")]
    UnknownShortcut { label: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duplicate(component: &str) -> CatalogIssue {
        CatalogIssue::DuplicateComponent {
            diagram: "virtualization".to_string(),
            component: component.to_string(),
        }
    }

    #[test]
    fn test_configuration_error_display_single() {
        let err = ConfigurationError::from(duplicate("vm"));
        assert_eq!(
            err.to_string(),
            "invalid component catalog: component `vm` is defined more than once in diagram `virtualization`"
        );
    }

    #[test]
    fn test_configuration_error_display_multiple() {
        let err = ConfigurationError::new(vec![
            duplicate("vm"),
            duplicate("hypervisor"),
            duplicate("guest-os"),
        ]);
        assert_eq!(err.issues().len(), 3);
        assert!(err.to_string().ends_with("(+2 more)"));

        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
        assert_eq!(
            ConfigurationError::new(Vec::new()).to_string(),
            "invalid component catalog"
        );
    }

    #[test]
    fn test_issue_codes_and_help() {
        let issue = duplicate("vm");
        assert_eq!(issue.code(), "strata::catalog::duplicate_component");
        assert!(issue.help().is_some());

        let issue = CatalogIssue::EmptyShortcutLabel { position: 0 };
        assert!(issue.help().is_none());
    }

    #[test]
    fn test_not_found_display() {
        let err = NotFoundError::UnknownComponent {
            diagram: "virtualization".to_string(),
            component: "nonexistent-id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "component `nonexistent-id` not found in diagram `virtualization`"
        );
    }
}
