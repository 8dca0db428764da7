//! The component registry.
//!
//! A [`Registry`] is built once from a [`CatalogDefinition`] and is
//! read-only afterwards. It exclusively owns every [`ComponentDescriptor`];
//! everything else (selection state, layouts, renderers) borrows from it.
//!
//! Construction validates the whole catalog and reports every problem at
//! once as a [`ConfigurationError`]. Lookups fail with [`NotFoundError`].
//!
//! # Example
//!
//! ```
//! use strata_core::registry::Registry;
//!
//! let registry = Registry::builtin().unwrap();
//!
//! let hypervisor = registry.get("virtualization", "hypervisor").unwrap();
//! assert_eq!(hypervisor.display_name(), "Hypervisor");
//!
//! let ids: Vec<_> = registry
//!     .all("containerization")
//!     .unwrap()
//!     .map(|component| component.id())
//!     .collect();
//! assert_eq!(ids[0], "physical-server-cont");
//! ```

use std::collections::HashSet;

use indexmap::{IndexMap, map::Entry};
use log::{debug, info, warn};

use crate::{
    catalog::{
        Arrangement, CatalogDefinition, ComponentDefinition, DiagramDefinition, LayoutDefinition,
        ShortcutDefinition, StyleTag, builtin,
    },
    error::{CatalogIssue, ConfigurationError, NotFoundError},
};

/// Metadata of one diagram node.
#[derive(Debug, PartialEq, Eq)]
pub struct ComponentDescriptor {
    id: String,
    display_name: String,
    description: String,
    style: StyleTag,
}

impl ComponentDescriptor {
    /// Key of the component, unique within its diagram.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Explanatory text for the detail panel.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Visual group of the component.
    pub fn style(&self) -> StyleTag {
        self.style
    }
}

/// A validated node of a diagram's visual hierarchy.
#[derive(Debug)]
pub struct LayoutNode {
    component: String,
    label: Option<String>,
    arrangement: Arrangement,
    children: Vec<LayoutNode>,
}

impl LayoutNode {
    /// Id of the component this box represents.
    pub fn component_id(&self) -> &str {
        &self.component
    }

    /// Label override for this placement, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    pub fn children(&self) -> &[LayoutNode] {
        &self.children
    }

    /// Iterates over this node and all of its descendants in pre-order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }
}

/// Pre-order iterator over a layout tree.
#[derive(Debug)]
pub struct PreOrder<'a> {
    stack: Vec<&'a LayoutNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a LayoutNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// One diagram of the registry: metadata, components and layout.
#[derive(Debug)]
pub struct Diagram {
    name: String,
    title: String,
    caption: String,
    components: IndexMap<String, ComponentDescriptor>,
    layout: LayoutNode,
}

impl Diagram {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Hint shown under the title. May be empty.
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Looks up a component of this diagram.
    pub fn component(&self, id: &str) -> Option<&ComponentDescriptor> {
        self.components.get(id)
    }

    /// Components in canonical presentation order.
    pub fn components(&self) -> impl ExactSizeIterator<Item = &ComponentDescriptor> {
        self.components.values()
    }

    /// Root of the visual hierarchy.
    pub fn layout(&self) -> &LayoutNode {
        &self.layout
    }
}

/// A labelled quick-select entry resolving to one component.
#[derive(Debug, PartialEq, Eq)]
pub struct Shortcut {
    label: String,
    diagram: String,
    component: String,
}

impl Shortcut {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn diagram(&self) -> &str {
        &self.diagram
    }

    pub fn component_id(&self) -> &str {
        &self.component
    }
}

/// Immutable catalog of every diagram and its components.
#[derive(Debug)]
pub struct Registry {
    diagrams: IndexMap<String, Diagram>,
    shortcuts: Vec<Shortcut>,
}

impl Registry {
    /// Build a registry from a static catalog definition.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] listing every [`CatalogIssue`] when
    /// a diagram or component id is duplicated, a required field is blank,
    /// the layout places an unknown component, or a shortcut does not
    /// resolve.
    pub fn new(definition: &CatalogDefinition<'_>) -> Result<Self, ConfigurationError> {
        let mut issues = Vec::new();
        let mut diagrams = IndexMap::with_capacity(definition.diagrams.len());

        for (position, diagram_def) in definition.diagrams.iter().enumerate() {
            if is_blank(diagram_def.name) {
                issues.push(CatalogIssue::EmptyDiagramName { position });
                continue;
            }

            let diagram = build_diagram(diagram_def, &mut issues);
            match diagrams.entry(diagram_def.name.to_string()) {
                Entry::Occupied(_) => issues.push(CatalogIssue::DuplicateDiagram {
                    diagram: diagram_def.name.to_string(),
                }),
                Entry::Vacant(entry) => {
                    entry.insert(diagram);
                }
            }
        }

        let shortcuts = build_shortcuts(definition.shortcuts, &diagrams, &mut issues);

        if !issues.is_empty() {
            return Err(ConfigurationError::new(issues));
        }

        info!(
            diagrams = diagrams.len(),
            shortcuts = shortcuts.len();
            "Component registry built"
        );

        Ok(Self {
            diagrams,
            shortcuts,
        })
    }

    /// Build the registry of the built-in virtualization and
    /// containerization diagrams.
    pub fn builtin() -> Result<Self, ConfigurationError> {
        Self::new(&builtin::CATALOG)
    }

    /// Returns the diagram registered under `name`.
    pub fn diagram(&self, name: &str) -> Result<&Diagram, NotFoundError> {
        self.diagrams
            .get(name)
            .ok_or_else(|| NotFoundError::UnknownDiagram {
                diagram: name.to_string(),
            })
    }

    /// Diagrams in catalog order.
    pub fn diagrams(&self) -> impl ExactSizeIterator<Item = &Diagram> {
        self.diagrams.values()
    }

    /// Returns the descriptor of component `id` in diagram `diagram`.
    ///
    /// # Errors
    ///
    /// [`NotFoundError::UnknownDiagram`] or [`NotFoundError::UnknownComponent`].
    pub fn get(&self, diagram: &str, id: &str) -> Result<&ComponentDescriptor, NotFoundError> {
        self.diagram(diagram)?
            .component(id)
            .ok_or_else(|| NotFoundError::UnknownComponent {
                diagram: diagram.to_string(),
                component: id.to_string(),
            })
    }

    /// Every component of `diagram` in canonical presentation order.
    pub fn all(
        &self,
        diagram: &str,
    ) -> Result<impl ExactSizeIterator<Item = &ComponentDescriptor>, NotFoundError> {
        Ok(self.diagram(diagram)?.components())
    }

    /// Quick-select shortcuts in catalog order.
    pub fn shortcuts(&self) -> &[Shortcut] {
        &self.shortcuts
    }

    /// Returns the shortcut with the given label.
    pub fn shortcut(&self, label: &str) -> Result<&Shortcut, NotFoundError> {
        self.shortcuts
            .iter()
            .find(|shortcut| shortcut.label == label)
            .ok_or_else(|| NotFoundError::UnknownShortcut {
                label: label.to_string(),
            })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn build_diagram(definition: &DiagramDefinition<'_>, issues: &mut Vec<CatalogIssue>) -> Diagram {
    let name = definition.name;

    if is_blank(definition.title) {
        issues.push(CatalogIssue::EmptyDiagramField {
            diagram: name.to_string(),
            field: "title",
        });
    }

    let mut components = IndexMap::with_capacity(definition.components.len());
    for (position, component) in definition.components.iter().enumerate() {
        if let Some(descriptor) = build_component(name, position, component, issues) {
            match components.entry(descriptor.id.clone()) {
                Entry::Occupied(_) => issues.push(CatalogIssue::DuplicateComponent {
                    diagram: name.to_string(),
                    component: descriptor.id,
                }),
                Entry::Vacant(entry) => {
                    entry.insert(descriptor);
                }
            }
        }
    }

    let layout = build_layout(name, &definition.layout, &components, issues);

    let placed: HashSet<&str> = layout.iter().map(LayoutNode::component_id).collect();
    for id in components.keys().filter(|id| !placed.contains(id.as_str())) {
        warn!(diagram = name, component = id.as_str(); "Component is not placed in the layout");
    }

    debug!(diagram = name, components = components.len(); "Diagram catalog validated");

    Diagram {
        name: name.to_string(),
        title: definition.title.to_string(),
        caption: definition.caption.to_string(),
        components,
        layout,
    }
}

fn build_component(
    diagram: &str,
    position: usize,
    definition: &ComponentDefinition<'_>,
    issues: &mut Vec<CatalogIssue>,
) -> Option<ComponentDescriptor> {
    if is_blank(definition.id) {
        issues.push(CatalogIssue::EmptyComponentId {
            diagram: diagram.to_string(),
            position,
        });
        return None;
    }

    let mut valid = true;
    for (field, value) in [
        ("display_name", definition.display_name),
        ("description", definition.description),
    ] {
        if is_blank(value) {
            issues.push(CatalogIssue::EmptyComponentField {
                diagram: diagram.to_string(),
                component: definition.id.to_string(),
                field,
            });
            valid = false;
        }
    }

    valid.then(|| ComponentDescriptor {
        id: definition.id.to_string(),
        display_name: definition.display_name.to_string(),
        description: definition.description.to_string(),
        style: definition.style,
    })
}

fn build_layout(
    diagram: &str,
    definition: &LayoutDefinition<'_>,
    components: &IndexMap<String, ComponentDescriptor>,
    issues: &mut Vec<CatalogIssue>,
) -> LayoutNode {
    if !components.contains_key(definition.component) {
        issues.push(CatalogIssue::UnknownLayoutComponent {
            diagram: diagram.to_string(),
            component: definition.component.to_string(),
        });
    }

    if definition.label.is_some_and(is_blank) {
        issues.push(CatalogIssue::EmptyLayoutLabel {
            diagram: diagram.to_string(),
            component: definition.component.to_string(),
        });
    }

    LayoutNode {
        component: definition.component.to_string(),
        label: definition.label.map(str::to_string),
        arrangement: definition.arrangement,
        children: definition
            .children
            .iter()
            .map(|child| build_layout(diagram, child, components, issues))
            .collect(),
    }
}

fn build_shortcuts(
    definitions: &[ShortcutDefinition<'_>],
    diagrams: &IndexMap<String, Diagram>,
    issues: &mut Vec<CatalogIssue>,
) -> Vec<Shortcut> {
    let mut labels = HashSet::new();
    let mut shortcuts = Vec::with_capacity(definitions.len());

    for (position, definition) in definitions.iter().enumerate() {
        if is_blank(definition.label) {
            issues.push(CatalogIssue::EmptyShortcutLabel { position });
            continue;
        }

        if !labels.insert(definition.label) {
            issues.push(CatalogIssue::DuplicateShortcut {
                label: definition.label.to_string(),
            });
            continue;
        }

        let resolves = diagrams
            .get(definition.diagram)
            .is_some_and(|diagram| diagram.component(definition.component).is_some());
        if !resolves {
            issues.push(CatalogIssue::UnresolvedShortcut {
                label: definition.label.to_string(),
                diagram: definition.diagram.to_string(),
                component: definition.component.to_string(),
            });
            continue;
        }

        shortcuts.push(Shortcut {
            label: definition.label.to_string(),
            diagram: definition.diagram.to_string(),
            component: definition.component.to_string(),
        });
    }

    shortcuts
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Mutex};

    use log::{
        Level, LevelFilter, Log, Metadata, Record,
        kv::{Key, Source},
    };

    use super::*;
    use crate::catalog::builtin::{CONTAINERIZATION, VIRTUALIZATION};

    const COMPONENTS: &[ComponentDefinition<'static>] = &[
        ComponentDefinition::new("server", "Server", "Bare metal.", StyleTag::PhysicalServer),
        ComponentDefinition::new("os", "OS", "Kernel.", StyleTag::HostOs),
    ];
    const CHILDREN: &[LayoutDefinition<'static>] = &[LayoutDefinition::leaf("os", None)];
    const LAYOUT: LayoutDefinition<'static> =
        LayoutDefinition::node("server", None, Arrangement::Column, CHILDREN);

    fn diagram<'a>(
        name: &'a str,
        components: &'a [ComponentDefinition<'a>],
        layout: LayoutDefinition<'a>,
    ) -> DiagramDefinition<'a> {
        DiagramDefinition {
            name,
            title: "Title",
            caption: "",
            components,
            layout,
        }
    }

    #[derive(Debug)]
    struct CapturedRecord {
        level: Level,
        message: String,
        diagram: Option<String>,
        component: Option<String>,
    }

    static CAPTURED: Mutex<Vec<CapturedRecord>> = Mutex::new(Vec::new());

    /// Keeps every warning so tests can check what the registry reported.
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record<'_>) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let value = |key: &str| {
                record
                    .key_values()
                    .get(Key::from_str(key))
                    .map(|value| value.to_string())
            };
            CAPTURED.lock().unwrap().push(CapturedRecord {
                level: record.level(),
                message: record.args().to_string(),
                diagram: value("diagram"),
                component: value("component"),
            });
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    fn capture_logs() {
        // Only the first call installs the logger; later ones are no-ops.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Warn);
    }

    fn issues_of(definition: &CatalogDefinition<'_>) -> Vec<CatalogIssue> {
        Registry::new(definition)
            .expect_err("catalog should be rejected")
            .issues()
            .to_vec()
    }

    #[test]
    fn test_builtin_registry_builds() {
        let registry = Registry::builtin().expect("built-in catalog is valid");
        let names: Vec<_> = registry.diagrams().map(Diagram::name).collect();
        assert_eq!(names, [VIRTUALIZATION, CONTAINERIZATION]);
        assert_eq!(registry.shortcuts().len(), 9);
    }

    #[test]
    fn test_get_returns_requested_id_for_every_builtin_component() {
        let registry = Registry::builtin().unwrap();
        for diagram in registry.diagrams() {
            for component in diagram.components() {
                let found = registry.get(diagram.name(), component.id()).unwrap();
                assert_eq!(found.id(), component.id());
                assert!(std::ptr::eq(found, component));
            }
        }
    }

    #[test]
    fn test_get_unknown_diagram() {
        let registry = Registry::builtin().unwrap();
        let err = registry.get("mainframe", "hypervisor").unwrap_err();
        assert_eq!(
            err,
            NotFoundError::UnknownDiagram {
                diagram: "mainframe".to_string()
            }
        );
    }

    #[test]
    fn test_get_does_not_cross_diagrams() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.get(CONTAINERIZATION, "hypervisor").is_err());
        assert!(registry.get(VIRTUALIZATION, "host-os").is_err());
    }

    #[test]
    fn test_physical_server_is_kept_per_diagram() {
        let registry = Registry::builtin().unwrap();
        let virt = registry.get(VIRTUALIZATION, "physical-server").unwrap();
        let cont = registry.get(CONTAINERIZATION, "physical-server-cont").unwrap();

        assert_eq!(virt.display_name(), cont.display_name());
        assert_ne!(virt.description(), cont.description());
    }

    #[test]
    fn test_all_is_unique_and_stable() {
        let registry = Registry::builtin().unwrap();
        for diagram in [VIRTUALIZATION, CONTAINERIZATION] {
            let first: Vec<_> = registry.all(diagram).unwrap().map(|c| c.id()).collect();
            let second: Vec<_> = registry.all(diagram).unwrap().map(|c| c.id()).collect();
            let unique: HashSet<_> = first.iter().collect();

            assert_eq!(first, second);
            assert_eq!(unique.len(), first.len());
        }
    }

    #[test]
    fn test_all_follows_layout_pre_order() {
        let registry = Registry::builtin().unwrap();
        for diagram in registry.diagrams() {
            let mut seen = Vec::new();
            for node in diagram.layout().iter() {
                if !seen.contains(&node.component_id()) {
                    seen.push(node.component_id());
                }
            }
            let ordered: Vec<_> = diagram.components().map(|c| c.id()).collect();
            assert_eq!(ordered, seen, "order of {}", diagram.name());
        }
    }

    #[test]
    fn test_all_unknown_diagram() {
        let registry = Registry::builtin().unwrap();
        assert!(registry.all("").is_err());
    }

    #[test]
    fn test_layout_labels() {
        let registry = Registry::builtin().unwrap();
        let layout = registry.diagram(VIRTUALIZATION).unwrap().layout();
        let labels: Vec<_> = layout.iter().filter_map(LayoutNode::label).collect();
        assert_eq!(
            labels,
            [
                "VM 1",
                "Libs & Bins",
                "Application",
                "VM 2",
                "Libs & Bins",
                "Application"
            ]
        );
        assert_eq!(layout.children()[0].arrangement(), Arrangement::Row);
    }

    #[test]
    fn test_shortcut_lookup() {
        let registry = Registry::builtin().unwrap();
        let shortcut = registry.shortcut("Libs & Bins").unwrap();
        assert_eq!(shortcut.diagram(), VIRTUALIZATION);
        assert_eq!(shortcut.component_id(), "libs-bins-vm");
        assert!(registry.shortcut("Libs and Bins").is_err());
    }

    #[test]
    fn test_duplicate_component_rejected() {
        let components = [
            ComponentDefinition::new("server", "Server", "Bare metal.", StyleTag::PhysicalServer),
            ComponentDefinition::new("server", "Server 2", "Again.", StyleTag::PhysicalServer),
        ];
        let layout = LayoutDefinition::leaf("server", None);
        let issues = issues_of(&CatalogDefinition {
            diagrams: &[diagram("d", &components, layout)],
            shortcuts: &[],
        });
        assert_eq!(
            issues,
            [CatalogIssue::DuplicateComponent {
                diagram: "d".to_string(),
                component: "server".to_string()
            }]
        );
    }

    #[test]
    fn test_same_id_in_two_diagrams_is_allowed() {
        let registry = Registry::new(&CatalogDefinition {
            diagrams: &[diagram("a", COMPONENTS, LAYOUT), diagram("b", COMPONENTS, LAYOUT)],
            shortcuts: &[],
        })
        .unwrap();

        let a = registry.get("a", "os").unwrap();
        let b = registry.get("b", "os").unwrap();
        assert!(!std::ptr::eq(a, b));
    }

    #[test]
    fn test_duplicate_diagram_rejected() {
        let issues = issues_of(&CatalogDefinition {
            diagrams: &[diagram("a", COMPONENTS, LAYOUT), diagram("a", COMPONENTS, LAYOUT)],
            shortcuts: &[],
        });
        assert_eq!(
            issues,
            [CatalogIssue::DuplicateDiagram {
                diagram: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_blank_fields_rejected() {
        let components = [
            ComponentDefinition::new("server", "  ", "", StyleTag::PhysicalServer),
            ComponentDefinition::new("", "Nameless", "No id.", StyleTag::HostOs),
        ];
        let issues = issues_of(&CatalogDefinition {
            diagrams: &[DiagramDefinition {
                title: "",
                ..diagram("d", &components, LayoutDefinition::leaf("server", None))
            }],
            shortcuts: &[],
        });

        let codes: Vec<_> = issues.iter().map(CatalogIssue::code).collect();
        assert_eq!(
            codes,
            [
                "strata::catalog::empty_diagram_field",
                "strata::catalog::empty_component_field",
                "strata::catalog::empty_component_field",
                "strata::catalog::empty_component_id",
                // `server` was dropped, so the layout no longer resolves
                "strata::catalog::unknown_layout_component",
            ]
        );
    }

    #[test]
    fn test_empty_diagram_name_rejected() {
        let issues = issues_of(&CatalogDefinition {
            diagrams: &[diagram("", COMPONENTS, LAYOUT)],
            shortcuts: &[],
        });
        assert_eq!(issues, [CatalogIssue::EmptyDiagramName { position: 0 }]);
    }

    #[test]
    fn test_layout_issues_rejected() {
        let children = [
            LayoutDefinition::leaf("kernel", None),
            LayoutDefinition::leaf("os", Some("")),
        ];
        let layout = LayoutDefinition::node("server", None, Arrangement::Row, &children);
        let issues = issues_of(&CatalogDefinition {
            diagrams: &[diagram("d", COMPONENTS, layout)],
            shortcuts: &[],
        });
        assert_eq!(
            issues,
            [
                CatalogIssue::UnknownLayoutComponent {
                    diagram: "d".to_string(),
                    component: "kernel".to_string()
                },
                CatalogIssue::EmptyLayoutLabel {
                    diagram: "d".to_string(),
                    component: "os".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unplaced_component_is_accepted_with_warning() {
        capture_logs();

        let registry = Registry::new(&CatalogDefinition {
            diagrams: &[diagram("unplaced", COMPONENTS, LayoutDefinition::leaf("server", None))],
            shortcuts: &[],
        })
        .unwrap();
        assert!(registry.get("unplaced", "os").is_ok());

        let warnings = CAPTURED.lock().unwrap();
        let unplaced: Vec<_> = warnings
            .iter()
            .filter(|record| record.diagram.as_deref() == Some("unplaced"))
            .collect();
        assert_eq!(unplaced.len(), 1, "{warnings:?}");
        assert_eq!(unplaced[0].level, Level::Warn);
        assert_eq!(unplaced[0].component.as_deref(), Some("os"));
        assert_eq!(unplaced[0].message, "Component is not placed in the layout");
    }

    #[test]
    fn test_placed_components_log_no_warning() {
        capture_logs();

        Registry::new(&CatalogDefinition {
            diagrams: &[diagram("placed", COMPONENTS, LAYOUT)],
            shortcuts: &[],
        })
        .unwrap();

        let warnings = CAPTURED.lock().unwrap();
        assert!(
            !warnings
                .iter()
                .any(|record| record.diagram.as_deref() == Some("placed")),
            "{warnings:?}"
        );
    }

    #[test]
    fn test_shortcut_issues_rejected() {
        let issues = issues_of(&CatalogDefinition {
            diagrams: &[diagram("d", COMPONENTS, LAYOUT)],
            shortcuts: &[
                ShortcutDefinition::new("OS", "d", "os"),
                ShortcutDefinition::new("OS", "d", "server"),
                ShortcutDefinition::new("Kernel", "d", "kernel"),
                ShortcutDefinition::new(" ", "d", "os"),
            ],
        });
        assert_eq!(
            issues,
            [
                CatalogIssue::DuplicateShortcut {
                    label: "OS".to_string()
                },
                CatalogIssue::UnresolvedShortcut {
                    label: "Kernel".to_string(),
                    diagram: "d".to_string(),
                    component: "kernel".to_string()
                },
                CatalogIssue::EmptyShortcutLabel { position: 3 },
            ]
        );
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
