//! Plain-text listings shared by the subcommands and the interactive session.

use std::io::Write;

use strata::{StrataError, detail::DetailPanel, registry::Registry};

/// Components of `diagram`, or of every diagram, in canonical order.
pub fn write_components(
    out: &mut impl Write,
    registry: &Registry,
    diagram: Option<&str>,
) -> Result<(), StrataError> {
    let diagrams = match diagram {
        Some(name) => vec![registry.diagram(name)?],
        None => registry.diagrams().collect(),
    };

    for diagram in diagrams {
        writeln!(out, "{} ({})", diagram.title(), diagram.name())?;
        for component in diagram.components() {
            writeln!(out, "  {:<22} {}", component.id(), component.display_name())?;
        }
    }
    Ok(())
}

pub fn write_shortcuts(out: &mut impl Write, registry: &Registry) -> Result<(), StrataError> {
    for shortcut in registry.shortcuts() {
        writeln!(
            out,
            "  {:<24} {}:{}",
            shortcut.label(),
            shortcut.diagram(),
            shortcut.component_id()
        )?;
    }
    Ok(())
}

pub fn write_panel(out: &mut impl Write, panel: &DetailPanel<'_>) -> Result<(), StrataError> {
    writeln!(out, "{panel}")?;
    Ok(())
}
