//! Strata - Side-by-side virtualization and containerization diagrams.
//!
//! Layout, hit testing and SVG rendering for the diagrams of a
//! [`Registry`](registry::Registry). The registry and the selection state
//! live in `strata-core` and are re-exported here.

pub mod config;
pub mod detail;
pub mod error;
pub mod export;
pub mod layout;

pub use strata_core::{catalog, color, geometry, registry, selection};

pub use error::StrataError;

use log::{debug, info};

use strata_core::{
    geometry::Point,
    registry::{ComponentDescriptor, Diagram, Registry},
    selection::SelectionState,
};

use config::AppConfig;
use detail::DetailPanel;
use export::{Exporter, svg::Svg};
use layout::{DiagramLayout, LayoutEngine, OverviewLayout};

/// Lays out and renders the diagrams of a registry.
///
/// The visualizer is read-only: it borrows the registry and is told the
/// current selection on every call, so one visualizer can serve any number of
/// [`SelectionController`](selection::SelectionController)s.
///
/// # Examples
///
/// ```rust
/// use strata::{Visualizer, config::AppConfig, registry::Registry, selection::SelectionController};
///
/// let registry = Registry::builtin().expect("built-in catalog is valid");
/// let visualizer = Visualizer::new(&registry, AppConfig::default())
///     .expect("default style is valid");
///
/// let mut selection = SelectionController::new(&registry);
/// selection.select("containerization", "host-os").expect("known component");
///
/// let svg = visualizer
///     .render_overview_svg(selection.state())
///     .expect("Failed to render");
/// assert!(svg.contains("component selected"));
/// ```
#[derive(Debug)]
pub struct Visualizer<'r> {
    registry: &'r Registry,
    engine: LayoutEngine,
    exporter: Svg,
}

impl<'r> Visualizer<'r> {
    /// Create a visualizer for `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Style`] if the configuration holds an invalid
    /// color.
    pub fn new(registry: &'r Registry, config: AppConfig) -> Result<Self, StrataError> {
        let engine = LayoutEngine::new(config.layout());
        let exporter = Svg::new(&config)?;
        debug!(config:?; "Visualizer configured");

        Ok(Self {
            registry,
            engine,
            exporter,
        })
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Lay out the diagram named `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFound`] for an unknown diagram.
    pub fn layout(&self, diagram: &str) -> Result<DiagramLayout<'r>, StrataError> {
        let diagram = self.registry.diagram(diagram)?;
        self.engine.layout_diagram(diagram)
    }

    /// Lay out every diagram side by side.
    pub fn overview_layout(&self) -> Result<OverviewLayout<'r>, StrataError> {
        self.engine.layout_overview(self.registry)
    }

    /// Render one diagram and the detail panel to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFound`] for an unknown diagram.
    pub fn render_diagram_svg(
        &self,
        diagram: &str,
        selection: SelectionState<'_>,
    ) -> Result<String, StrataError> {
        info!(diagram = diagram; "Rendering diagram");
        let layout = self.layout(diagram)?;
        let svg = self.exporter.export_diagram(&layout, selection);

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// Render both diagrams side by side with the detail panel below them.
    pub fn render_overview_svg(&self, selection: SelectionState<'_>) -> Result<String, StrataError> {
        info!(diagrams = self.registry.diagrams().len(); "Rendering overview");
        let layout = self.overview_layout()?;
        let svg = self.exporter.export_overview(&layout, selection);

        info!(bytes = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }

    /// The detail panel for the given selection.
    pub fn detail_panel(&self, selection: SelectionState<'r>) -> DetailPanel<'r> {
        DetailPanel::for_selection(selection.descriptor())
    }

    /// Where layout coordinates start inside the rendered SVG documents.
    pub fn content_origin(&self) -> Point {
        self.exporter.content_origin()
    }

    /// The component under `point`, given in the coordinates of the SVG
    /// produced by [`Visualizer::render_diagram_svg`].
    ///
    /// Returns the innermost box's descriptor, ready to be passed to
    /// [`SelectionController::select`](selection::SelectionController::select).
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NotFound`] for an unknown diagram.
    pub fn hit_test(
        &self,
        diagram: &str,
        point: Point,
    ) -> Result<Option<&'r ComponentDescriptor>, StrataError> {
        let layout = self.layout(diagram)?;
        let hit = layout
            .hit_test(point.sub_point(self.content_origin()))
            .map(|node| node.descriptor());
        debug!(diagram = diagram, point:?, hit:? = hit.map(ComponentDescriptor::id); "Hit test");
        Ok(hit)
    }

    /// The diagram and component under `point`, given in the coordinates of
    /// the SVG produced by [`Visualizer::render_overview_svg`].
    pub fn hit_test_overview(
        &self,
        point: Point,
    ) -> Result<Option<(&'r Diagram, &'r ComponentDescriptor)>, StrataError> {
        let layout = self.overview_layout()?;
        Ok(layout
            .hit_test(point.sub_point(self.content_origin()))
            .map(|(diagram, node)| (diagram, node.descriptor())))
    }
}
