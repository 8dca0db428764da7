//! SVG rendering of a single diagram: header and nested boxes.

use svg::node::element as svg_element;

use strata_core::{geometry::Point, selection::SelectionState};

use super::Svg;
use crate::layout::{DiagramLayout, NodeBox};

const CORNER_RADIUS: f32 = 8.0;
const STROKE_WIDTH: f32 = 2.0;
const SELECTED_STROKE_WIDTH: f32 = 4.0;
const HALO_WIDTH: f32 = 4.0;
const HALO_ALPHA: f32 = 0.3;

impl Svg {
    /// Renders the title, the caption and every box of a diagram in
    /// diagram-local coordinates.
    ///
    /// Boxes are emitted outermost first so that nested boxes paint over
    /// their parents.
    pub(super) fn render_diagram_content(
        &self,
        layout: &DiagramLayout<'_>,
        selection: SelectionState<'_>,
    ) -> svg_element::Group {
        let diagram = layout.diagram();

        let mut group = svg_element::Group::new()
            .set("class", "diagram")
            .set("data-diagram", diagram.name());

        let title = self
            .text(diagram.title(), Point::default(), layout.title_font_size())
            .set("class", "title")
            .set("font-weight", "bold");
        group = group.add(title);

        if !diagram.caption().is_empty() {
            let caption = self
                .text(diagram.caption(), layout.caption_origin(), layout.caption_font_size())
                .set("class", "caption")
                .set("font-style", "italic");
            group = group.add(caption);
        }

        layout.root().iter().fold(group, |group, node| {
            group.add(self.render_node(diagram.name(), node, selection.is(node.descriptor())))
        })
    }

    fn render_node(&self, diagram: &str, node: &NodeBox<'_>, selected: bool) -> svg_element::Group {
        let descriptor = node.descriptor();
        let swatch = self.theme.swatch(descriptor.style());
        let bounds = node.bounds();

        let (stroke, stroke_width) = if selected {
            (self.theme.highlight(), SELECTED_STROKE_WIDTH)
        } else {
            (swatch.border(), STROKE_WIDTH)
        };

        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", swatch.fill())
            .set("stroke", stroke)
            .set("stroke-width", stroke_width);

        let mut label = self.text(node.label(), node.label_origin(), self.font_size);
        if !node.children().is_empty() {
            label = label.set("font-weight", "bold");
        }

        let class = if selected {
            "component selected"
        } else {
            "component"
        };

        let mut group = svg_element::Group::new()
            .set("class", class)
            .set("data-diagram", diagram)
            .set("data-component", descriptor.id());

        if selected {
            let halo = self.theme.highlight().with_alpha(HALO_ALPHA);
            group = group.add(
                svg_element::Rectangle::new()
                    .set("x", bounds.min_x() - HALO_WIDTH)
                    .set("y", bounds.min_y() - HALO_WIDTH)
                    .set("width", bounds.width() + 2.0 * HALO_WIDTH)
                    .set("height", bounds.height() + 2.0 * HALO_WIDTH)
                    .set("rx", CORNER_RADIUS + HALO_WIDTH)
                    .set("fill", halo)
                    .set("fill-opacity", halo.alpha())
                    .set("class", "halo"),
            );
        }

        group.add(rect).add(label)
    }
}

#[cfg(test)]
mod tests {
    use strata_core::{registry::Registry, selection::SelectionController};

    use crate::{
        config::{AppConfig, LayoutConfig},
        export::svg::Svg,
        layout::LayoutEngine,
    };

    #[test]
    fn test_only_selected_entry_is_highlighted() {
        let registry = Registry::builtin().unwrap();
        let diagram = registry.diagram("virtualization").unwrap();
        let layout = LayoutEngine::new(&LayoutConfig::default())
            .layout_diagram(diagram)
            .unwrap();

        let mut selection = SelectionController::new(&registry);
        selection.select("virtualization", "hypervisor").unwrap();

        let svg = Svg::new(&AppConfig::default())
            .unwrap()
            .render_diagram(&layout, selection.state())
            .to_string();

        assert_eq!(svg.matches("component selected").count(), 1);

        let marker = svg.find("component selected").unwrap();
        let tag_start = svg[..marker].rfind('<').unwrap();
        let tag_end = marker + svg[marker..].find('>').unwrap();
        assert!(svg[tag_start..tag_end].contains(r#"data-component="hypervisor""#));
    }

    #[test]
    fn test_shared_component_highlights_every_placement() {
        let registry = Registry::builtin().unwrap();
        let diagram = registry.diagram("virtualization").unwrap();
        let layout = LayoutEngine::new(&LayoutConfig::default())
            .layout_diagram(diagram)
            .unwrap();

        let mut selection = SelectionController::new(&registry);
        selection.select("virtualization", "guest-os").unwrap();

        let svg = Svg::new(&AppConfig::default())
            .unwrap()
            .render_diagram(&layout, selection.state())
            .to_string();

        // Both VMs place the same Guest OS entry.
        assert_eq!(svg.matches("component selected").count(), 2);
        assert_eq!(svg.matches(r#"class="halo""#).count(), 2);
    }

    #[test]
    fn test_labels_are_escaped() {
        let registry = Registry::builtin().unwrap();
        let diagram = registry.diagram("containerization").unwrap();
        let layout = LayoutEngine::new(&LayoutConfig::default())
            .layout_diagram(diagram)
            .unwrap();

        let svg = Svg::new(&AppConfig::default())
            .unwrap()
            .render_diagram(&layout, Default::default())
            .to_string();

        assert!(svg.contains("Libs &amp; Bins"));
        assert_eq!(svg.matches(r#"data-component="container""#).count(), 3);
    }
}
