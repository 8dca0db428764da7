//! Static catalog definitions.
//!
//! A catalog is written as plain data: [`CatalogDefinition`] lists the
//! diagrams ([`DiagramDefinition`]) and the quick-select shortcuts
//! ([`ShortcutDefinition`]). Each diagram carries its component table and a
//! declarative layout tree ([`LayoutDefinition`]) describing how the
//! components nest visually.
//!
//! Definitions are unchecked. They become usable only once turned into a
//! [`Registry`](crate::registry::Registry), which validates them. The
//! built-in virtualization/containerization catalog lives in [`builtin`].
//!
//! # Example
//!
//! ```
//! use strata_core::catalog::{
//!     Arrangement, CatalogDefinition, ComponentDefinition, DiagramDefinition,
//!     LayoutDefinition, StyleTag,
//! };
//! use strata_core::registry::Registry;
//!
//! const COMPONENTS: &[ComponentDefinition<'static>] = &[
//!     ComponentDefinition::new("server", "Server", "Bare metal.", StyleTag::PhysicalServer),
//!     ComponentDefinition::new("os", "OS", "The kernel.", StyleTag::HostOs),
//! ];
//! const CHILDREN: &[LayoutDefinition<'static>] = &[LayoutDefinition::leaf("os", None)];
//!
//! let catalog = CatalogDefinition {
//!     diagrams: &[DiagramDefinition {
//!         name: "tiny",
//!         title: "Tiny",
//!         caption: "",
//!         components: COMPONENTS,
//!         layout: LayoutDefinition::node("server", None, Arrangement::Column, CHILDREN),
//!     }],
//!     shortcuts: &[],
//! };
//!
//! let registry = Registry::new(&catalog).unwrap();
//! assert_eq!(registry.get("tiny", "os").unwrap().display_name(), "OS");
//! ```

pub mod builtin;

use std::fmt;

use serde::Deserialize;

/// Visual group of a component.
///
/// The tag only selects colors; it has no behavioral effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleTag {
    PhysicalServer,
    Hypervisor,
    VirtualMachine,
    GuestOs,
    LibsBins,
    Application,
    HostOs,
    ContainerRuntime,
    Container,
}

impl StyleTag {
    /// Every style tag, in declaration order.
    pub const ALL: [StyleTag; 9] = [
        StyleTag::PhysicalServer,
        StyleTag::Hypervisor,
        StyleTag::VirtualMachine,
        StyleTag::GuestOs,
        StyleTag::LibsBins,
        StyleTag::Application,
        StyleTag::HostOs,
        StyleTag::ContainerRuntime,
        StyleTag::Container,
    ];

    /// Returns the kebab-case name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PhysicalServer => "physical-server",
            Self::Hypervisor => "hypervisor",
            Self::VirtualMachine => "virtual-machine",
            Self::GuestOs => "guest-os",
            Self::LibsBins => "libs-bins",
            Self::Application => "application",
            Self::HostOs => "host-os",
            Self::ContainerRuntime => "container-runtime",
            Self::Container => "container",
        }
    }

    /// Default box fill color as a CSS color string.
    pub fn default_fill(&self) -> &'static str {
        match self {
            Self::PhysicalServer => "#E3F2FD",
            Self::Hypervisor => "#E0F2F7",
            Self::VirtualMachine => "#E8F5E9",
            Self::GuestOs => "#FFEBEE",
            Self::LibsBins => "#FFFDE7",
            Self::Application => "#E8EAF6",
            Self::HostOs => "#FFF3E0",
            Self::ContainerRuntime => "#E0F7FA",
            Self::Container => "#FCE4EC",
        }
    }

    /// Default box border color as a CSS color string.
    pub fn default_border(&self) -> &'static str {
        match self {
            Self::PhysicalServer => "#90CAF9",
            Self::Hypervisor => "#BBDEFB",
            Self::VirtualMachine => "#C8E6C9",
            Self::GuestOs => "#EF9A9A",
            Self::LibsBins => "#FFEB3B",
            Self::Application => "#C5CAE9",
            Self::HostOs => "#FFCC80",
            Self::ContainerRuntime => "#B2DFDB",
            Self::Container => "#F8BBD0",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a layout node places its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    /// Children stacked top to bottom, each stretched to the parent's width.
    #[default]
    Column,
    /// Children side by side, sharing the parent's width.
    Row,
}

/// One entry of a diagram's component table.
#[derive(Debug, Clone, Copy)]
pub struct ComponentDefinition<'a> {
    pub id: &'a str,
    pub display_name: &'a str,
    pub description: &'a str,
    pub style: StyleTag,
}

impl<'a> ComponentDefinition<'a> {
    pub const fn new(
        id: &'a str,
        display_name: &'a str,
        description: &'a str,
        style: StyleTag,
    ) -> Self {
        Self {
            id,
            display_name,
            description,
            style,
        }
    }
}

/// A box in the visual hierarchy of a diagram.
///
/// The same component may be placed several times (two VMs sharing the
/// `vm` descriptor); `label` overrides the component's display name for
/// this placement only.
#[derive(Debug, Clone, Copy)]
pub struct LayoutDefinition<'a> {
    pub component: &'a str,
    pub label: Option<&'a str>,
    pub arrangement: Arrangement,
    pub children: &'a [LayoutDefinition<'a>],
}

impl<'a> LayoutDefinition<'a> {
    /// A box without children.
    pub const fn leaf(component: &'a str, label: Option<&'a str>) -> Self {
        Self {
            component,
            label,
            arrangement: Arrangement::Column,
            children: &[],
        }
    }

    /// A box containing `children`, placed according to `arrangement`.
    pub const fn node(
        component: &'a str,
        label: Option<&'a str>,
        arrangement: Arrangement,
        children: &'a [LayoutDefinition<'a>],
    ) -> Self {
        Self {
            component,
            label,
            arrangement,
            children,
        }
    }
}

/// A diagram: its metadata, component table and layout tree.
#[derive(Debug, Clone, Copy)]
pub struct DiagramDefinition<'a> {
    /// Lookup key, e.g. `"virtualization"`.
    pub name: &'a str,
    pub title: &'a str,
    /// Hint shown under the title. May be empty.
    pub caption: &'a str,
    /// Components in canonical presentation order.
    pub components: &'a [ComponentDefinition<'a>],
    pub layout: LayoutDefinition<'a>,
}

/// A labelled quick-select button mapped to one component.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutDefinition<'a> {
    pub label: &'a str,
    pub diagram: &'a str,
    pub component: &'a str,
}

impl<'a> ShortcutDefinition<'a> {
    pub const fn new(label: &'a str, diagram: &'a str, component: &'a str) -> Self {
        Self {
            label,
            diagram,
            component,
        }
    }
}

/// The full static catalog a registry is built from.
#[derive(Debug, Clone, Copy)]
pub struct CatalogDefinition<'a> {
    pub diagrams: &'a [DiagramDefinition<'a>],
    pub shortcuts: &'a [ShortcutDefinition<'a>],
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_style_tag_names_are_unique() {
        let names: HashSet<_> = StyleTag::ALL.iter().map(StyleTag::name).collect();
        assert_eq!(names.len(), StyleTag::ALL.len());
    }

    #[test]
    fn test_style_tag_default_colors_parse() {
        for tag in StyleTag::ALL {
            assert!(
                crate::color::Color::new(tag.default_fill()).is_ok(),
                "fill of {tag}"
            );
            assert!(
                crate::color::Color::new(tag.default_border()).is_ok(),
                "border of {tag}"
            );
        }
    }

    #[test]
    fn test_leaf_has_no_children() {
        let leaf = LayoutDefinition::leaf("app", Some("Application"));
        assert!(leaf.children.is_empty());
        assert_eq!(leaf.arrangement, Arrangement::Column);
        assert_eq!(leaf.label, Some("Application"));
    }
}
