//! The selection controller.
//!
//! [`SelectionController`] owns the only mutable state of the system: which
//! single component, if any, the user chose last. It borrows the
//! [`Registry`] to resolve ids and never copies a descriptor, so
//! [`SelectionController::current`] is always reference-identical to an
//! entry of the registry.
//!
//! ```text
//!              select(valid)          select(valid)
//!  Unselected ───────────────► Selected ◄──────────┐
//!      ▲                          │  └─────────────┘
//!      └────────── clear() ───────┘
//! ```
//!
//! A `select` that fails leaves the state untouched. One controller is meant
//! per user session; any number of them may borrow the same registry.
//!
//! # Example
//!
//! ```
//! use strata_core::{registry::Registry, selection::SelectionController};
//!
//! let registry = Registry::builtin().unwrap();
//! let mut selection = SelectionController::new(&registry);
//! assert!(selection.current().is_none());
//!
//! selection.select("virtualization", "hypervisor").unwrap();
//! assert_eq!(selection.current().unwrap().display_name(), "Hypervisor");
//!
//! assert!(selection.select("virtualization", "nonexistent-id").is_err());
//! assert_eq!(selection.current().unwrap().display_name(), "Hypervisor");
//!
//! selection.clear();
//! assert!(selection.current().is_none());
//! ```

use std::ptr;

use log::debug;

use crate::{
    error::NotFoundError,
    registry::{ComponentDescriptor, Registry},
};

/// What is currently selected.
///
/// Two states are equal when they reference the same registry entry.
#[derive(Debug, Clone, Copy, Default)]
pub enum SelectionState<'r> {
    #[default]
    Unselected,
    Selected(&'r ComponentDescriptor),
}

impl<'r> SelectionState<'r> {
    /// The selected descriptor, if any.
    pub fn descriptor(&self) -> Option<&'r ComponentDescriptor> {
        match *self {
            Self::Unselected => None,
            Self::Selected(descriptor) => Some(descriptor),
        }
    }

    /// Returns true if `descriptor` is the selected registry entry.
    ///
    /// Comparison is by identity: an equal-looking descriptor of another
    /// diagram is not considered selected.
    pub fn is(&self, descriptor: &ComponentDescriptor) -> bool {
        self.descriptor()
            .is_some_and(|selected| ptr::eq(selected, descriptor))
    }
}

impl PartialEq for SelectionState<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Unselected, Self::Unselected) => true,
            (Self::Selected(a), Self::Selected(b)) => ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for SelectionState<'_> {}

/// Tracks the single selected component of one session.
#[derive(Debug, Clone)]
pub struct SelectionController<'r> {
    registry: &'r Registry,
    state: SelectionState<'r>,
}

impl<'r> SelectionController<'r> {
    /// Create a controller with nothing selected.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            state: SelectionState::Unselected,
        }
    }

    /// The registry selections are resolved against.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn state(&self) -> SelectionState<'r> {
        self.state
    }

    /// The selected descriptor, or `None` before any selection and after
    /// [`clear`](Self::clear).
    pub fn current(&self) -> Option<&'r ComponentDescriptor> {
        self.state.descriptor()
    }

    /// Select component `id` of `diagram`.
    ///
    /// Selecting the already selected component is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown diagram or id; the current
    /// selection is kept.
    pub fn select(
        &mut self,
        diagram: &str,
        id: &str,
    ) -> Result<&'r ComponentDescriptor, NotFoundError> {
        let descriptor = self.registry.get(diagram, id).inspect_err(|err| {
            debug!(diagram = diagram, component = id, err:%; "Selection rejected");
        })?;

        self.set(descriptor);
        debug!(diagram = diagram, component = id; "Component selected");
        Ok(descriptor)
    }

    /// Select the target of the shortcut labelled `label`.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::UnknownShortcut`] for an unknown label; the
    /// current selection is kept.
    pub fn select_shortcut(
        &mut self,
        label: &str,
    ) -> Result<&'r ComponentDescriptor, NotFoundError> {
        let registry = self.registry;
        let shortcut = registry.shortcut(label)?;
        self.select(shortcut.diagram(), shortcut.component_id())
    }

    /// Drop the selection. Idempotent.
    pub fn clear(&mut self) {
        if self.state != SelectionState::Unselected {
            debug!("Selection cleared");
        }
        self.state = SelectionState::Unselected;
    }

    fn set(&mut self, descriptor: &'r ComponentDescriptor) {
        self.state = SelectionState::Selected(descriptor);
    }
}
