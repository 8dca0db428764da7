//! The detail panel shown under the diagrams.

use std::fmt;

use strata_core::registry::ComponentDescriptor;

/// Prompt shown while nothing is selected.
pub const PLACEHOLDER: &str = "Select a component to see its details.";

/// What the detail panel displays for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailPanel<'r> {
    Empty,
    Component(&'r ComponentDescriptor),
}

impl<'r> DetailPanel<'r> {
    /// Build the panel for the presently selected descriptor.
    pub fn for_selection(selection: Option<&'r ComponentDescriptor>) -> Self {
        selection.map_or(Self::Empty, Self::Component)
    }

    /// Heading line: the component's display name, or `None` for the
    /// placeholder.
    pub fn title(&self) -> Option<&'r str> {
        match *self {
            Self::Empty => None,
            Self::Component(descriptor) => Some(descriptor.display_name()),
        }
    }

    /// Body text: the description, or the placeholder prompt.
    pub fn body(&self) -> &'r str {
        match *self {
            Self::Empty => PLACEHOLDER,
            Self::Component(descriptor) => descriptor.description(),
        }
    }

    /// Body text wrapped at word boundaries to at most `max_chars` per line.
    pub fn body_lines(&self, max_chars: usize) -> Vec<String> {
        wrap(self.body(), max_chars)
    }
}

impl fmt::Display for DetailPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = self.title() {
            writeln!(f, "{title}")?;
            writeln!(f, "{}", "-".repeat(title.chars().count()))?;
        }
        write!(f, "{}", self.body())
    }
}

/// Greedy word wrap. Words longer than `max_chars` get a line of their own.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };

        if needed > max_chars && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
