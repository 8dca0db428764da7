//! SVG rendering of diagrams and the detail panel.

mod diagram;
mod panel;

use std::collections::HashMap;

use log::debug;
use svg::{Document, node::element as svg_element};

use strata_core::{
    catalog::StyleTag,
    color::Color,
    geometry::{Insets, Point, Size},
    selection::SelectionState,
};

use super::Exporter;
use crate::{
    config::{AppConfig, StyleConfig, Swatch},
    detail::DetailPanel,
    error::StrataError,
    layout::{DiagramLayout, OverviewLayout},
};

const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// Space between the content and the edge of the picture.
const MARGIN: f32 = 20.0;

/// Resolved colors used while rendering.
#[derive(Debug, Clone)]
pub struct Theme {
    background: Option<Color>,
    highlight: Color,
    text: Color,
    swatches: HashMap<StyleTag, Swatch>,
}

impl Theme {
    /// Parse every color of the style configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Style`] for the first color that does not
    /// parse.
    pub fn from_config(style: &StyleConfig) -> Result<Self, StrataError> {
        let swatches = StyleTag::ALL
            .into_iter()
            .map(|tag| style.swatch(tag).map(|swatch| (tag, swatch)))
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(StrataError::Style)?;

        Ok(Self {
            background: style.background_color().map_err(StrataError::Style)?,
            highlight: style.highlight_color().map_err(StrataError::Style)?,
            text: style.text_color().map_err(StrataError::Style)?,
            swatches,
        })
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn highlight(&self) -> Color {
        self.highlight
    }

    pub fn text(&self) -> Color {
        self.text
    }

    /// Colors of a style group.
    pub fn swatch(&self, tag: StyleTag) -> Swatch {
        // Every tag is resolved in `from_config`.
        self.swatches[&tag]
    }
}

/// SVG exporter.
#[derive(Debug, Clone)]
pub struct Svg {
    theme: Theme,
    font_size: f32,
    padding: Insets,
    diagram_gap: f32,
    panel_width: Option<f32>,
}

impl Svg {
    /// Create an exporter from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Style`] if a configured color is invalid.
    pub fn new(config: &AppConfig) -> Result<Self, StrataError> {
        let layout = config.layout();
        Ok(Self {
            theme: Theme::from_config(config.style())?,
            font_size: layout.font_size(),
            padding: Insets::uniform(layout.padding()),
            diagram_gap: layout.diagram_gap(),
            panel_width: layout.panel_width(),
        })
    }

    /// Where layout coordinates start inside the rendered document.
    pub fn content_origin(&self) -> Point {
        Point::new(MARGIN, MARGIN)
    }

    /// Renders all diagrams of the overview and the detail panel below them.
    pub fn render_overview(
        &self,
        layout: &OverviewLayout<'_>,
        selection: SelectionState<'_>,
    ) -> Document {
        let mut content = svg_element::Group::new();
        for placed in layout.diagrams() {
            let offset = placed.offset();
            let group = svg_element::Group::new()
                .set("transform", format!("translate({}, {})", offset.x(), offset.y()))
                .add(self.render_diagram_content(placed.layout(), selection));
            content = content.add(group);
        }

        self.finish_document(content, layout.size(), selection)
    }

    /// Renders one diagram and the detail panel below it.
    pub fn render_diagram(&self, layout: &DiagramLayout<'_>, selection: SelectionState<'_>) -> Document {
        let content = svg_element::Group::new().add(self.render_diagram_content(layout, selection));
        self.finish_document(content, layout.size(), selection)
    }

    /// Appends the detail panel under the diagrams and wraps everything in a
    /// sized document.
    fn finish_document(
        &self,
        content: svg_element::Group,
        diagrams_size: Size,
        selection: SelectionState<'_>,
    ) -> Document {
        let panel = DetailPanel::for_selection(selection.descriptor());
        let panel_width = self.panel_width.unwrap_or(diagrams_size.width());
        let panel_top = diagrams_size.height() + self.diagram_gap;
        let (panel_group, panel_size) =
            self.render_panel(&panel, Point::new(0.0, panel_top), panel_width);

        let content_size = Size::new(
            diagrams_size.width().max(panel_size.width()),
            panel_top + panel_size.height(),
        );
        let svg_size = self.calculate_svg_dimensions(content_size);

        let doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", svg_size.width(), svg_size.height()),
            )
            .set("width", svg_size.width())
            .set("height", svg_size.height());
        let doc = self.add_background(doc, svg_size);

        let origin = self.content_origin();
        let main_group = content
            .add(panel_group)
            .set("transform", format!("translate({}, {})", origin.x(), origin.y()));

        doc.add(main_group)
    }

    fn calculate_svg_dimensions(&self, content_size: Size) -> Size {
        let width = MARGIN.mul_add(2.0, content_size.width());
        let height = MARGIN.mul_add(2.0, content_size.height());

        debug!(width = width, height = height; "Final SVG dimensions");

        Size::new(width, height)
    }

    fn add_background(&self, doc: Document, size: Size) -> Document {
        let Some(color) = self.theme.background() else {
            return doc;
        };

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width())
            .set("height", size.height())
            .set("fill", color)
            .set("fill-opacity", color.alpha());
        doc.add(background)
    }

    /// A single line of text with its top-left corner at `origin`.
    fn text(&self, content: &str, origin: Point, font_size: f32) -> svg_element::Text {
        svg_element::Text::new(content)
            .set("x", origin.x())
            .set("y", origin.y())
            .set("dominant-baseline", "hanging")
            .set("font-family", FONT_FAMILY)
            .set("font-size", font_size)
            .set("fill", self.theme.text())
    }
}

impl Exporter for Svg {
    fn export_overview(&self, layout: &OverviewLayout<'_>, selection: SelectionState<'_>) -> String {
        let doc = self.render_overview(layout, selection);
        debug!("SVG overview rendered");
        doc.to_string()
    }

    fn export_diagram(&self, layout: &DiagramLayout<'_>, selection: SelectionState<'_>) -> String {
        let doc = self.render_diagram(layout, selection);
        debug!(diagram = layout.diagram().name(); "SVG diagram rendered");
        doc.to_string()
    }
}
