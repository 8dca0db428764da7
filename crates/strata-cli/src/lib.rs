//! Strata CLI library
//!
//! This module contains the core CLI logic for the Strata diagram tool.

pub mod error_adapter;
pub mod session;

mod args;
mod config;
mod output;

pub use args::{Args, Command, Target};

use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use log::info;

use strata::{
    StrataError, Visualizer, detail::DetailPanel, registry::Registry,
    selection::SelectionController,
};

use session::Session;

/// Run the Strata CLI application against standard input and output.
///
/// # Errors
///
/// Returns `StrataError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - An invalid built-in catalog
/// - Unknown diagrams, components or shortcuts given on the command line
pub fn run(args: &Args) -> Result<(), StrataError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(args, stdin.lock(), &mut stdout.lock())
}

/// Run the Strata CLI application with the given input and output streams.
pub fn run_with(args: &Args, input: impl BufRead, out: &mut impl Write) -> Result<(), StrataError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let registry = Registry::builtin()?;
    let visualizer = Visualizer::new(&registry, app_config)?;

    match &args.command {
        Command::Render {
            output,
            diagram,
            select,
        } => {
            info!(output_path = output.as_str(), diagram:? = diagram; "Rendering diagrams");

            let mut selection = SelectionController::new(&registry);
            if let Some(target) = select {
                selection.select(&target.diagram, &target.id)?;
            }

            let svg = match diagram {
                Some(diagram) => visualizer.render_diagram_svg(diagram, selection.state())?,
                None => visualizer.render_overview_svg(selection.state())?,
            };
            fs::write(output, svg)?;

            info!(output_file = output.as_str(); "SVG exported successfully");
        }
        Command::List { diagram } => {
            output::write_components(out, &registry, diagram.as_deref())?;
        }
        Command::Show { diagram, id } => {
            let descriptor = registry.get(diagram, id)?;
            output::write_panel(out, &DetailPanel::Component(descriptor))?;
        }
        Command::Shortcuts => output::write_shortcuts(out, &registry)?,
        Command::Interactive { output } => {
            let mut session = Session::new(&visualizer, output.as_ref().map(PathBuf::from));
            session.run(input, out)?;
        }
    }

    out.flush()?;
    Ok(())
}
