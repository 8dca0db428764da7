//! Command-line argument definitions for the Strata CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the configuration file and the
//! logging verbosity; the [`Command`] picks what to do.

use std::{fmt, str::FromStr};

use clap::{Parser, Subcommand};

/// Command-line arguments for the Strata diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the diagrams to an SVG file
    Render {
        /// Path to the output SVG file
        #[arg(short, long, default_value = "out.svg")]
        output: String,

        /// Render only this diagram instead of both side by side
        #[arg(short, long)]
        diagram: Option<String>,

        /// Component to highlight, as DIAGRAM:ID
        #[arg(short, long)]
        select: Option<Target>,
    },

    /// List the components of one or every diagram
    List {
        /// Diagram name
        diagram: Option<String>,
    },

    /// Print the details of one component
    Show { diagram: String, id: String },

    /// List the quick-select shortcuts
    Shortcuts,

    /// Read selection commands from standard input
    Interactive {
        /// Rewrite this SVG file after every change
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// A component reference written as `DIAGRAM:ID`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub diagram: String,
    pub id: String,
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((diagram, id)) if !diagram.is_empty() && !id.is_empty() => Ok(Self {
                diagram: diagram.to_string(),
                id: id.to_string(),
            }),
            _ => Err(format!("expected DIAGRAM:ID, got `{s}`")),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.diagram, self.id)
    }
}
