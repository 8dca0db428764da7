//! Interactive selection session.
//!
//! A [`Session`] reads one command per line and dispatches it synchronously
//! to its own [`SelectionController`]. After every command that changes the
//! selection it prints the detail panel and, when an output path is set,
//! rewrites the overview SVG.
//!
//! Lookup failures and malformed lines are reported on the output and the
//! session carries on; only I/O and rendering failures end it.

use std::{
    fs,
    io::{BufRead, Write},
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use log::{info, warn};

use strata::{StrataError, Visualizer, geometry::Point, selection::SelectionController};

use crate::output;

/// One line of session input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "session", disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    /// Select a component by diagram and id
    Select { diagram: String, id: String },

    /// Select the component under a point of a rendered diagram
    Click {
        diagram: String,
        #[arg(allow_negative_numbers = true)]
        x: f32,
        #[arg(allow_negative_numbers = true)]
        y: f32,
    },

    /// Select the target of a shortcut
    Press {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        label: Vec<String>,
    },

    /// Clear the selection
    Clear,

    /// Print the detail panel
    Show,

    /// List the components of one or every diagram
    List { diagram: Option<String> },

    /// List the shortcuts
    Shortcuts,

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session goes on after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One user's interactive session over a shared [`Visualizer`].
pub struct Session<'v, 'r> {
    visualizer: &'v Visualizer<'r>,
    selection: SelectionController<'r>,
    output: Option<PathBuf>,
}

impl<'v, 'r> Session<'v, 'r> {
    pub fn new(visualizer: &'v Visualizer<'r>, output: Option<PathBuf>) -> Self {
        Self {
            visualizer,
            selection: SelectionController::new(visualizer.registry()),
            output,
        }
    }

    pub fn selection(&self) -> &SelectionController<'r> {
        &self.selection
    }

    /// Process `input` until it ends or a `quit` command.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<(), StrataError> {
        info!("Interactive session started");
        self.refresh(out)?;

        for line in input.lines() {
            if self.execute(&line?, out)? == Flow::Quit {
                break;
            }
        }

        info!("Interactive session ended");
        Ok(())
    }

    /// Process a single line of input.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow, StrataError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match Line::try_parse_from(words) {
            Ok(line) => line.command,
            Err(err) => {
                write!(out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match self.dispatch(command, out) {
            Err(StrataError::NotFound(err)) => {
                warn!(err:%; "Command rejected");
                writeln!(out, "error: {err}")?;
                Ok(Flow::Continue)
            }
            other => other,
        }
    }

    fn dispatch(&mut self, command: SessionCommand, out: &mut impl Write) -> Result<Flow, StrataError> {
        let registry = self.visualizer.registry();

        match command {
            SessionCommand::Select { diagram, id } => {
                self.selection.select(&diagram, &id)?;
                self.refresh(out)?;
            }
            SessionCommand::Click { diagram, x, y } => {
                match self.visualizer.hit_test(&diagram, Point::new(x, y))? {
                    Some(descriptor) => {
                        self.selection.select(&diagram, descriptor.id())?;
                        self.refresh(out)?;
                    }
                    None => writeln!(out, "nothing at ({x}, {y}) in `{diagram}`")?,
                }
            }
            SessionCommand::Press { label } => {
                self.selection.select_shortcut(&label.join(" "))?;
                self.refresh(out)?;
            }
            SessionCommand::Clear => {
                self.selection.clear();
                self.refresh(out)?;
            }
            SessionCommand::Show => {
                output::write_panel(out, &self.visualizer.detail_panel(self.selection.state()))?;
            }
            SessionCommand::List { diagram } => {
                output::write_components(out, registry, diagram.as_deref())?;
            }
            SessionCommand::Shortcuts => output::write_shortcuts(out, registry)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Print the panel and rewrite the SVG for the current selection.
    fn refresh(&self, out: &mut impl Write) -> Result<(), StrataError> {
        let state = self.selection.state();
        output::write_panel(out, &self.visualizer.detail_panel(state))?;

        if let Some(path) = &self.output {
            let svg = self.visualizer.render_overview_svg(state)?;
            fs::write(path, svg)?;
            info!(output_file = path.display().to_string(); "SVG refreshed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use strata::{config::AppConfig, detail::PLACEHOLDER, registry::Registry};

    use super::*;

    fn run_lines(session: &mut Session<'_, '_>, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            session.execute(line, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_select_then_clear() {
        let registry = Registry::builtin().unwrap();
        let visualizer = Visualizer::new(&registry, AppConfig::default()).unwrap();
        let mut session = Session::new(&visualizer, None);

        let text = run_lines(&mut session, &["select virtualization hypervisor"]);
        assert!(text.starts_with("Hypervisor\n----------\n"));
        assert_eq!(session.selection().current().unwrap().id(), "hypervisor");

        let text = run_lines(&mut session, &["clear"]);
        assert_eq!(text.trim_end(), PLACEHOLDER);
        assert!(session.selection().current().is_none());
    }

    #[test]
    fn test_unknown_id_is_reported_and_kept() {
        let registry = Registry::builtin().unwrap();
        let visualizer = Visualizer::new(&registry, AppConfig::default()).unwrap();
        let mut session = Session::new(&visualizer, None);

        let text = run_lines(
            &mut session,
            &["select containerization host-os", "select virtualization nonexistent-id"],
        );
        assert!(text.contains("error: component `nonexistent-id` not found in diagram `virtualization`"));
        assert_eq!(session.selection().current().unwrap().id(), "host-os");
    }

    #[test]
    fn test_press_multi_word_label() {
        let registry = Registry::builtin().unwrap();
        let visualizer = Visualizer::new(&registry, AppConfig::default()).unwrap();
        let mut session = Session::new(&visualizer, None);

        run_lines(&mut session, &["press Physical Server (All)"]);
        assert_eq!(session.selection().current().unwrap().id(), "physical-server");

        let text = run_lines(&mut session, &["press Kernel"]);
        assert!(text.contains("error:"), "{text}");
        assert_eq!(session.selection().current().unwrap().id(), "physical-server");
    }

    #[test]
    fn test_click_selects_innermost_box() {
        let registry = Registry::builtin().unwrap();
        let visualizer = Visualizer::new(&registry, AppConfig::default()).unwrap();
        let layout = visualizer.layout("virtualization").unwrap();
        let guest_os = layout
            .root()
            .iter()
            .find(|node| node.descriptor().id() == "guest-os")
            .unwrap();
        let point = guest_os
            .label_origin()
            .add_point(visualizer.content_origin());

        let mut session = Session::new(&visualizer, None);
        let line = format!("click virtualization {} {}", point.x(), point.y());
        run_lines(&mut session, &[line.as_str()]);
        assert_eq!(session.selection().current().unwrap().id(), "guest-os");

        let text = run_lines(&mut session, &["click virtualization -5 -5"]);
        assert!(text.starts_with("nothing at"), "{text}");
        assert_eq!(session.selection().current().unwrap().id(), "guest-os");
    }

    #[test]
    fn test_malformed_lines_keep_going() {
        let registry = Registry::builtin().unwrap();
        let visualizer = Visualizer::new(&registry, AppConfig::default()).unwrap();
        let mut session = Session::new(&visualizer, None);

        let mut out = Vec::new();
        assert_eq!(session.execute("", &mut out).unwrap(), Flow::Continue);
        assert_eq!(session.execute("   ", &mut out).unwrap(), Flow::Continue);
        assert!(out.is_empty());

        assert_eq!(session.execute("launch rocket", &mut out).unwrap(), Flow::Continue);
        assert_eq!(session.execute("select virtualization", &mut out).unwrap(), Flow::Continue);
        assert!(!out.is_empty());
        assert!(session.selection().current().is_none());

        assert_eq!(session.execute("exit", &mut out).unwrap(), Flow::Quit);
    }

    #[test]
    fn test_run_rewrites_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.svg");

        let registry = Registry::builtin().unwrap();
        let visualizer = Visualizer::new(&registry, AppConfig::default()).unwrap();
        let mut session = Session::new(&visualizer, Some(path.clone()));

        let input = "select containerization container\nquit\nselect virtualization vm\n";
        let mut out = Vec::new();
        session.run(input.as_bytes(), &mut out).unwrap();

        let svg = fs::read_to_string(&path).unwrap();
        assert_eq!(svg.matches("component selected").count(), 3);
        assert_eq!(session.selection().current().unwrap().id(), "container");
    }
}
