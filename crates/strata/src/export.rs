//! Export of laid out diagrams.
//!
//! This module provides the [`Exporter`] trait that turns positioned boxes
//! into an output format. It is the last stage of the rendering pipeline:
//!
//! ```text
//! Registry
//!     ↓ layout
//! Positioned boxes (DiagramLayout / OverviewLayout)
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] — SVG output via [`svg::Svg`]
//!
//! Exporters produce text in memory; writing it to disk is left to the
//! caller.

/// SVG export backend.
pub mod svg;

use strata_core::selection::SelectionState;

use crate::layout::{DiagramLayout, OverviewLayout};

/// Abstraction for diagram export backends.
///
/// The selection is passed in so the backend can highlight the selected
/// component and fill the detail panel.
pub trait Exporter {
    /// Exports every diagram side by side, followed by the detail panel.
    fn export_overview(&self, layout: &OverviewLayout<'_>, selection: SelectionState<'_>) -> String;

    /// Exports a single diagram, followed by the detail panel.
    fn export_diagram(&self, layout: &DiagramLayout<'_>, selection: SelectionState<'_>) -> String;
}
