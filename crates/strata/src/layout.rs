//! Nested-box layout of the diagrams.
//!
//! The layout turns a diagram's [`LayoutNode`] tree into positioned
//! [`NodeBox`]es in two passes:
//!
//! 1. **measure** (bottom-up): a box is as large as its label plus its
//!    children, arranged in a column or a row, plus padding.
//! 2. **place** (top-down): column children are stretched to the parent's
//!    inner width, row children share the spare width equally and take the
//!    row's height.
//!
//! Text is not shaped; label extents are estimated from the character count
//! and the font size, which is enough for the short labels of the catalog.
//!
//! Every [`NodeBox`] borrows its descriptor from the registry, which is what
//! lets [`DiagramLayout::hit_test`] turn a click position straight into a
//! selectable component.

use log::{debug, trace};

use strata_core::{
    catalog::Arrangement,
    geometry::{Bounds, Insets, Point, Size},
    registry::{ComponentDescriptor, Diagram, LayoutNode, Registry},
};

use crate::{config::LayoutConfig, error::StrataError};

/// Average glyph advance relative to the font size.
const CHAR_WIDTH_RATIO: f32 = 0.6;
const LINE_HEIGHT_RATIO: f32 = 1.4;
const TITLE_SCALE: f32 = 1.3;
const CAPTION_SCALE: f32 = 0.9;

/// Estimated extent of a single line of text.
pub(crate) fn text_size(text: &str, font_size: f32) -> Size {
    Size::new(
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO,
        font_size * LINE_HEIGHT_RATIO,
    )
}

/// How many characters of the given font fit in `width`.
pub(crate) fn chars_per_line(width: f32, font_size: f32) -> usize {
    (width / (font_size * CHAR_WIDTH_RATIO)).floor().max(1.0) as usize
}

/// A positioned box of a diagram.
#[derive(Debug)]
pub struct NodeBox<'r> {
    descriptor: &'r ComponentDescriptor,
    label: &'r str,
    bounds: Bounds,
    label_origin: Point,
    depth: usize,
    children: Vec<NodeBox<'r>>,
}

impl<'r> NodeBox<'r> {
    /// The registry entry this box represents.
    pub fn descriptor(&self) -> &'r ComponentDescriptor {
        self.descriptor
    }

    /// Text drawn in the box: the placement label or the display name.
    pub fn label(&self) -> &'r str {
        self.label
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Top-left corner of the label line.
    pub fn label_origin(&self) -> Point {
        self.label_origin
    }

    /// Nesting depth, `0` for the outermost box.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[NodeBox<'r>] {
        &self.children
    }

    /// This box and all nested boxes, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &NodeBox<'r>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// A fully laid out diagram, in diagram-local coordinates.
#[derive(Debug)]
pub struct DiagramLayout<'r> {
    diagram: &'r Diagram,
    title_font_size: f32,
    caption_font_size: f32,
    caption_origin: Point,
    root: NodeBox<'r>,
    size: Size,
}

impl<'r> DiagramLayout<'r> {
    pub fn diagram(&self) -> &'r Diagram {
        self.diagram
    }

    /// The title is drawn at the origin.
    pub fn title_font_size(&self) -> f32 {
        self.title_font_size
    }

    pub fn caption_font_size(&self) -> f32 {
        self.caption_font_size
    }

    pub fn caption_origin(&self) -> Point {
        self.caption_origin
    }

    /// The outermost box.
    pub fn root(&self) -> &NodeBox<'r> {
        &self.root
    }

    /// Extent of title, caption and boxes.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the innermost box containing `point`, or `None` when the
    /// point is outside every box.
    pub fn hit_test(&self, point: Point) -> Option<&NodeBox<'r>> {
        let mut current = &self.root;
        if !current.bounds.contains(point) {
            return None;
        }

        while let Some(child) = current
            .children
            .iter()
            .find(|child| child.bounds.contains(point))
        {
            current = child;
        }
        Some(current)
    }
}

/// A diagram of the overview and where it sits.
#[derive(Debug)]
pub struct PlacedDiagram<'r> {
    offset: Point,
    layout: DiagramLayout<'r>,
}

impl<'r> PlacedDiagram<'r> {
    /// Top-left corner of the diagram within the overview.
    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn layout(&self) -> &DiagramLayout<'r> {
        &self.layout
    }
}

/// Every diagram of a registry laid out side by side.
#[derive(Debug)]
pub struct OverviewLayout<'r> {
    diagrams: Vec<PlacedDiagram<'r>>,
    size: Size,
}

impl<'r> OverviewLayout<'r> {
    /// Diagrams left to right, in registry order.
    pub fn diagrams(&self) -> &[PlacedDiagram<'r>] {
        &self.diagrams
    }

    /// Extent of the diagram row.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the diagram and innermost box at `point`, in overview
    /// coordinates.
    pub fn hit_test(&self, point: Point) -> Option<(&'r Diagram, &NodeBox<'r>)> {
        self.diagrams.iter().find_map(|placed| {
            placed
                .layout
                .hit_test(point.sub_point(placed.offset))
                .map(|node| (placed.layout.diagram, node))
        })
    }
}

/// Intermediate result of the measure pass.
struct Measured<'r> {
    descriptor: &'r ComponentDescriptor,
    label: &'r str,
    arrangement: Arrangement,
    size: Size,
    children: Vec<Measured<'r>>,
}

/// Computes box positions from the layout metrics.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    padding: Insets,
    spacing: f32,
    font_size: f32,
    diagram_gap: f32,
}

impl LayoutEngine {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            padding: Insets::uniform(config.padding()),
            spacing: config.spacing(),
            font_size: config.font_size(),
            diagram_gap: config.diagram_gap(),
        }
    }

    /// Lay out one diagram with its title at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Layout`] if the layout tree references a
    /// component the diagram does not contain.
    pub fn layout_diagram<'r>(&self, diagram: &'r Diagram) -> Result<DiagramLayout<'r>, StrataError> {
        let title_font_size = self.font_size * TITLE_SCALE;
        let caption_font_size = self.font_size * CAPTION_SCALE;

        let title = text_size(diagram.title(), title_font_size);
        let caption = if diagram.caption().is_empty() {
            Size::default()
        } else {
            text_size(diagram.caption(), caption_font_size)
        };
        let header = title.merge_vertical(caption);

        let measured = self.measure(diagram, diagram.layout())?;
        let width = measured.size.width().max(header.width());
        let root_size = measured.size.with_width(width);
        let root_top = header.height() + self.spacing;

        let root = self.place(measured, Point::new(0.0, root_top), root_size, 0);
        let size = Size::new(width, root_top + root_size.height());

        debug!(
            diagram = diagram.name(),
            width = size.width(),
            height = size.height();
            "Diagram laid out"
        );
        trace!(root:?; "Diagram boxes");

        Ok(DiagramLayout {
            diagram,
            title_font_size,
            caption_font_size,
            caption_origin: Point::new(0.0, title.height()),
            root,
            size,
        })
    }

    /// Lay out every diagram of the registry side by side.
    pub fn layout_overview<'r>(
        &self,
        registry: &'r Registry,
    ) -> Result<OverviewLayout<'r>, StrataError> {
        let mut diagrams = Vec::with_capacity(registry.diagrams().len());
        let mut x = 0.0f32;
        let mut height = 0.0f32;

        for diagram in registry.diagrams() {
            let layout = self.layout_diagram(diagram)?;
            let offset = Point::new(x, 0.0);

            x += layout.size().width() + self.diagram_gap;
            height = height.max(layout.size().height());
            diagrams.push(PlacedDiagram { offset, layout });
        }

        let width = if diagrams.is_empty() {
            0.0
        } else {
            x - self.diagram_gap
        };

        Ok(OverviewLayout {
            diagrams,
            size: Size::new(width, height),
        })
    }

    pub fn diagram_gap(&self) -> f32 {
        self.diagram_gap
    }

    fn label_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_RATIO
    }

    fn measure<'r>(
        &self,
        diagram: &'r Diagram,
        node: &'r LayoutNode,
    ) -> Result<Measured<'r>, StrataError> {
        let descriptor = diagram.component(node.component_id()).ok_or_else(|| {
            StrataError::Layout(format!(
                "diagram `{}` places unknown component `{}`",
                diagram.name(),
                node.component_id()
            ))
        })?;
        let label = node.label().unwrap_or(descriptor.display_name());

        let children = node
            .children()
            .iter()
            .map(|child| self.measure(diagram, child))
            .collect::<Result<Vec<_>, _>>()?;

        let label_size = text_size(label, self.font_size);
        let content = match self.children_size(&children, node.arrangement()) {
            Some(block) => label_size
                .merge_vertical(Size::new(0.0, self.spacing))
                .merge_vertical(block),
            None => label_size,
        };

        Ok(Measured {
            descriptor,
            label,
            arrangement: node.arrangement(),
            size: content.add_padding(self.padding),
            children,
        })
    }

    /// Extent of the children block, `None` without children.
    fn children_size(&self, children: &[Measured<'_>], arrangement: Arrangement) -> Option<Size> {
        let gaps = children.len().checked_sub(1)? as f32 * self.spacing;
        let sizes = children.iter().map(|child| child.size);

        Some(match arrangement {
            Arrangement::Column => {
                let stacked = sizes.fold(Size::default(), Size::merge_vertical);
                Size::new(stacked.width(), stacked.height() + gaps)
            }
            Arrangement::Row => {
                let lined = sizes.fold(Size::default(), Size::merge_horizontal);
                Size::new(lined.width() + gaps, lined.height())
            }
        })
    }

    fn place<'r>(
        &self,
        measured: Measured<'r>,
        top_left: Point,
        size: Size,
        depth: usize,
    ) -> NodeBox<'r> {
        let label_origin = top_left.add_point(Point::new(self.padding.left(), self.padding.top()));
        let inner_left = label_origin.x();
        let inner_top = label_origin.y() + self.label_height() + self.spacing;
        let inner_width = size.width() - self.padding.horizontal_sum();

        let mut children = Vec::with_capacity(measured.children.len());
        match measured.arrangement {
            Arrangement::Column => {
                let mut y = inner_top;
                for child in measured.children {
                    let child_size = child.size.with_width(inner_width);
                    let next_y = y + child_size.height() + self.spacing;
                    children.push(self.place(child, Point::new(inner_left, y), child_size, depth + 1));
                    y = next_y;
                }
            }
            Arrangement::Row => {
                let count = measured.children.len();
                let gaps = count.saturating_sub(1) as f32 * self.spacing;
                let natural: f32 = measured.children.iter().map(|c| c.size.width()).sum();
                let extra = if count == 0 {
                    0.0
                } else {
                    (inner_width - natural - gaps).max(0.0) / count as f32
                };
                let row_height = measured
                    .children
                    .iter()
                    .map(|c| c.size.height())
                    .fold(0.0, f32::max);

                let mut x = inner_left;
                for child in measured.children {
                    let child_size = Size::new(child.size.width() + extra, row_height);
                    let next_x = x + child_size.width() + self.spacing;
                    children.push(self.place(child, Point::new(x, inner_top), child_size, depth + 1));
                    x = next_x;
                }
            }
        }

        NodeBox {
            descriptor: measured.descriptor,
            label: measured.label,
            bounds: Bounds::new_from_top_left(top_left, size),
            label_origin,
            depth,
            children,
        }
    }
}
