//! The built-in virtualization and containerization catalog.
//!
//! "Physical Server" appears in both diagrams with different ids and
//! slightly different descriptions. The two entries are kept distinct.

use super::{
    Arrangement, CatalogDefinition, ComponentDefinition, DiagramDefinition, LayoutDefinition,
    ShortcutDefinition, StyleTag,
};

/// Name of the virtualization diagram.
pub const VIRTUALIZATION: &str = "virtualization";

/// Name of the containerization diagram.
pub const CONTAINERIZATION: &str = "containerization";

const CAPTION: &str = "Click on any component to see its description below.";

const VIRTUALIZATION_COMPONENTS: &[ComponentDefinition<'static>] = &[
    ComponentDefinition::new(
        "physical-server",
        "Physical Server",
        "The underlying physical hardware (CPU, RAM, storage).",
        StyleTag::PhysicalServer,
    ),
    ComponentDefinition::new(
        "hypervisor",
        "Hypervisor",
        "Software that creates and runs virtual machines (VMs). It manages hardware resources for VMs.",
        StyleTag::Hypervisor,
    ),
    ComponentDefinition::new(
        "vm",
        "Virtual Machine (VM)",
        "An isolated environment with its own OS, libraries, and application, simulating a complete computer system.",
        StyleTag::VirtualMachine,
    ),
    ComponentDefinition::new(
        "guest-os",
        "Guest OS",
        "The operating system (e.g., Windows, Linux) running inside a virtual machine.",
        StyleTag::GuestOs,
    ),
    ComponentDefinition::new(
        "libs-bins-vm",
        "Libraries & Binaries (VM)",
        "Software dependencies and executable files within the VM.",
        StyleTag::LibsBins,
    ),
    ComponentDefinition::new(
        "app-vm",
        "Application (VM)",
        "The software application running on the Guest OS within the VM.",
        StyleTag::Application,
    ),
];

const CONTAINERIZATION_COMPONENTS: &[ComponentDefinition<'static>] = &[
    ComponentDefinition::new(
        "physical-server-cont",
        "Physical Server",
        "The underlying physical hardware.",
        StyleTag::PhysicalServer,
    ),
    ComponentDefinition::new(
        "host-os",
        "Host OS",
        "The operating system installed directly on the physical server. Containers share its kernel.",
        StyleTag::HostOs,
    ),
    ComponentDefinition::new(
        "container-runtime",
        "Container Runtime",
        "Software (like Docker Engine) that manages containers, creating and running them.",
        StyleTag::ContainerRuntime,
    ),
    ComponentDefinition::new(
        "container",
        "Container",
        "A lightweight, portable package that bundles an application and its dependencies, sharing the host OS kernel.",
        StyleTag::Container,
    ),
    ComponentDefinition::new(
        "libs-bins-cont",
        "Libraries & Binaries (Container)",
        "Software dependencies and executable files within the container.",
        StyleTag::LibsBins,
    ),
    ComponentDefinition::new(
        "app-cont",
        "Application (Container)",
        "The software application running inside the container.",
        StyleTag::Application,
    ),
];

const VM_CONTENTS: &[LayoutDefinition<'static>] = &[
    LayoutDefinition::leaf("guest-os", None),
    LayoutDefinition::leaf("libs-bins-vm", Some("Libs & Bins")),
    LayoutDefinition::leaf("app-vm", Some("Application")),
];

const VIRTUAL_MACHINES: &[LayoutDefinition<'static>] = &[
    LayoutDefinition::node("vm", Some("VM 1"), Arrangement::Column, VM_CONTENTS),
    LayoutDefinition::node("vm", Some("VM 2"), Arrangement::Column, VM_CONTENTS),
];

const HYPERVISOR: &[LayoutDefinition<'static>] = &[LayoutDefinition::node(
    "hypervisor",
    None,
    Arrangement::Row,
    VIRTUAL_MACHINES,
)];

const CONTAINER_CONTENTS: &[LayoutDefinition<'static>] = &[
    LayoutDefinition::leaf("libs-bins-cont", Some("Libs & Bins")),
    LayoutDefinition::leaf("app-cont", Some("Application")),
];

const CONTAINERS: &[LayoutDefinition<'static>] = &[
    LayoutDefinition::node("container", Some("Container 1"), Arrangement::Column, CONTAINER_CONTENTS),
    LayoutDefinition::node("container", Some("Container 2"), Arrangement::Column, CONTAINER_CONTENTS),
    LayoutDefinition::node("container", Some("Container 3"), Arrangement::Column, CONTAINER_CONTENTS),
];

const CONTAINER_RUNTIME: &[LayoutDefinition<'static>] = &[LayoutDefinition::node(
    "container-runtime",
    None,
    Arrangement::Row,
    CONTAINERS,
)];

const HOST_OS: &[LayoutDefinition<'static>] = &[LayoutDefinition::node(
    "host-os",
    None,
    Arrangement::Column,
    CONTAINER_RUNTIME,
)];

const DIAGRAMS: &[DiagramDefinition<'static>] = &[
    DiagramDefinition {
        name: VIRTUALIZATION,
        title: "Virtualization Architecture",
        caption: CAPTION,
        components: VIRTUALIZATION_COMPONENTS,
        layout: LayoutDefinition::node("physical-server", None, Arrangement::Column, HYPERVISOR),
    },
    DiagramDefinition {
        name: CONTAINERIZATION,
        title: "Containerization Architecture",
        caption: CAPTION,
        components: CONTAINERIZATION_COMPONENTS,
        layout: LayoutDefinition::node(
            "physical-server-cont",
            None,
            Arrangement::Column,
            HOST_OS,
        ),
    },
];

// "Libs & Bins" and "Application" resolve to the VM entries.
const SHORTCUTS: &[ShortcutDefinition<'static>] = &[
    ShortcutDefinition::new("Physical Server (All)", VIRTUALIZATION, "physical-server"),
    ShortcutDefinition::new("Hypervisor", VIRTUALIZATION, "hypervisor"),
    ShortcutDefinition::new("Virtual Machine (VM)", VIRTUALIZATION, "vm"),
    ShortcutDefinition::new("Host OS", CONTAINERIZATION, "host-os"),
    ShortcutDefinition::new("Container Runtime", CONTAINERIZATION, "container-runtime"),
    ShortcutDefinition::new("Container", CONTAINERIZATION, "container"),
    ShortcutDefinition::new("Guest OS", VIRTUALIZATION, "guest-os"),
    ShortcutDefinition::new("Libs & Bins", VIRTUALIZATION, "libs-bins-vm"),
    ShortcutDefinition::new("Application", VIRTUALIZATION, "app-vm"),
];

/// The built-in catalog definition.
pub const CATALOG: CatalogDefinition<'static> = CatalogDefinition {
    diagrams: DIAGRAMS,
    shortcuts: SHORTCUTS,
};
