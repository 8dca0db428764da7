//! Configuration types for Strata diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] and
//! every field has a default, so a configuration file only needs to list
//! what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Box padding, spacing and font metrics.
//! - [`StyleConfig`] - Background, highlight, text color and per-group palette.
//!
//! # Example
//!
//! ```
//! # use strata::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().unwrap().is_none());
//! assert_eq!(config.layout().font_size(), 14.0);
//! ```

use std::collections::HashMap;

use serde::Deserialize;

use strata_core::{catalog::StyleTag, color::Color};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Metrics used by the box layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Space between a box border and its content.
    padding: f32,

    /// Space between sibling boxes, and between a box label and its children.
    spacing: f32,

    /// Font size of component labels.
    font_size: f32,

    /// Horizontal gap between the two diagrams and vertical gap above the
    /// detail panel.
    diagram_gap: f32,

    /// Width of the detail panel; `0` makes it as wide as the diagrams.
    panel_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 10.0,
            spacing: 8.0,
            font_size: 14.0,
            diagram_gap: 40.0,
            panel_width: 0.0,
        }
    }
}

impl LayoutConfig {
    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn diagram_gap(&self) -> f32 {
        self.diagram_gap
    }

    /// Configured detail panel width, `None` when it follows the content.
    pub fn panel_width(&self) -> Option<f32> {
        (self.panel_width > 0.0).then_some(self.panel_width)
    }
}

/// Fill and border override for one style group.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwatchConfig {
    #[serde(default)]
    fill: Option<String>,

    #[serde(default)]
    border: Option<String>,
}

/// Resolved fill and border colors of a style group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swatch {
    fill: Color,
    border: Color,
}

impl Swatch {
    pub fn fill(&self) -> Color {
        self.fill
    }

    pub fn border(&self) -> Color {
        self.border
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Color fields hold CSS color strings and are parsed on access.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Optional background color of the whole picture.
    background_color: Option<String>,

    /// Border color of the selected component.
    highlight_color: String,

    /// Color of labels and panel text.
    text_color: String,

    /// Per style group overrides of the default palette.
    palette: HashMap<StyleTag, SwatchConfig>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            highlight_color: "#F59E0B".to_string(),
            text_color: "#1F2937".to_string(),
            palette: HashMap::new(),
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string is not a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the parsed highlight [`Color`].
    pub fn highlight_color(&self) -> Result<Color, String> {
        Color::new(&self.highlight_color)
            .map_err(|err| format!("Invalid highlight color in config: {err}"))
    }

    /// Returns the parsed text [`Color`].
    pub fn text_color(&self) -> Result<Color, String> {
        Color::new(&self.text_color).map_err(|err| format!("Invalid text color in config: {err}"))
    }

    /// Returns the colors of a style group: the configured override where
    /// present, the built-in default otherwise.
    pub fn swatch(&self, tag: StyleTag) -> Result<Swatch, String> {
        let overrides = self.palette.get(&tag);
        let fill = overrides
            .and_then(|swatch| swatch.fill.as_deref())
            .unwrap_or(tag.default_fill());
        let border = overrides
            .and_then(|swatch| swatch.border.as_deref())
            .unwrap_or(tag.default_border());

        let parse = |value: &str, part: &str| {
            Color::new(value).map_err(|err| format!("Invalid {part} color for `{tag}`: {err}"))
        };

        Ok(Swatch {
            fill: parse(fill, "fill")?,
            border: parse(border, "border")?,
        })
    }
}
