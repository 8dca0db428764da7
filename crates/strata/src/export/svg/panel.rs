//! SVG rendering of the detail panel.

use svg::node::element as svg_element;

use strata_core::geometry::{Point, Size};

use super::Svg;
use crate::{
    detail::DetailPanel,
    layout::{chars_per_line, text_size},
};

const PANEL_FILL: &str = "#F9F9F9";
const PANEL_BORDER: &str = "#DDDDDD";
const CORNER_RADIUS: f32 = 8.0;
const TITLE_SCALE: f32 = 1.15;

impl Svg {
    /// Renders the panel with its top-left corner at `top_left` and returns
    /// it with its size.
    ///
    /// The body is wrapped to the panel width; the height follows the
    /// number of lines.
    pub(super) fn render_panel(
        &self,
        panel: &DetailPanel<'_>,
        top_left: Point,
        width: f32,
    ) -> (svg_element::Group, Size) {
        let text_width = width - self.padding.horizontal_sum();
        let line_height = text_size("", self.font_size).height();
        let lines = panel.body_lines(chars_per_line(text_width, self.font_size));

        let mut group = svg_element::Group::new().set("class", "detail-panel");
        let mut cursor = top_left.add_point(Point::new(self.padding.left(), self.padding.top()));

        let mut texts = Vec::with_capacity(lines.len() + 1);
        if let Some(title) = panel.title() {
            let font_size = self.font_size * TITLE_SCALE;
            texts.push(
                self.text(title, cursor, font_size)
                    .set("class", "detail-title")
                    .set("font-weight", "bold"),
            );
            cursor = cursor.add_point(Point::new(0.0, text_size(title, font_size).height()));
        }

        for line in &lines {
            texts.push(self.text(line, cursor, self.font_size).set("class", "detail-body"));
            cursor = cursor.add_point(Point::new(0.0, line_height));
        }

        let size = Size::new(width, cursor.y() - top_left.y() + self.padding.bottom());
        let rect = svg_element::Rectangle::new()
            .set("x", top_left.x())
            .set("y", top_left.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", CORNER_RADIUS)
            .set("fill", PANEL_FILL)
            .set("stroke", PANEL_BORDER)
            .set("stroke-width", 1);

        group = group.add(rect);
        let group = texts.into_iter().fold(group, |group, text| group.add(text));
        (group, size)
    }
}
