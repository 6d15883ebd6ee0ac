//! Logging and debugging facilities for floatbar.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - Debug visualization for document trees
//!
//! # Tracing Integration
//!
//! floatbar uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("floatbar=debug,floatbar_core::event=trace")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`DocumentTreeDebug`] to print the element hierarchy:
//!
//! ```
//! use floatbar_core::dom::Document;
//! use floatbar_core::logging::DocumentTreeDebug;
//!
//! let mut doc = Document::new();
//! let bar = doc.create_element("div");
//! doc.add_class(bar, "floatbar").unwrap();
//! doc.append_child(doc.body(), bar).unwrap();
//!
//! let dump = DocumentTreeDebug::new(&doc).to_string();
//! assert!(dump.contains("div.floatbar"));
//! ```

use std::fmt::{self, Write as _};

use crate::dom::{Document, NodeId};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Document tree mutations.
    pub const DOM: &str = "floatbar_core::dom";
    /// Event dispatch.
    pub const EVENT: &str = "floatbar_core::event";
    /// Signal/slot system.
    pub const SIGNAL: &str = "floatbar_core::signal";
    /// Toolbar lifecycle: create, state updates, visibility.
    pub const TOOLBAR: &str = "floatbar::toolbar";
    /// Select and color popovers.
    pub const POPOVER: &str = "floatbar::popover";
    /// Command dispatch and the link flow.
    pub const COMMANDS: &str = "floatbar::commands";
    /// Stylesheet and modal injection.
    pub const INJECT: &str = "floatbar::inject";
    /// Option loading.
    pub const CONFIG: &str = "floatbar::config";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact dash-prefixed lines.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node IDs.
    pub show_ids: bool,
    /// Whether to show attributes other than `id`.
    pub show_attributes: bool,
    /// Whether to show each node's own text.
    pub show_text: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_attributes: true,
            show_text: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }

    /// Options for tag, class and id only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_attributes: false,
            show_text: false,
            ..Default::default()
        }
    }
}

/// Renders a document subtree as an indented outline.
///
/// Each line reads like a selector: `button.floatbar-btn#bold [data-cmd="bold"]`.
#[derive(Debug, Clone)]
pub struct DocumentTreeDebug<'a> {
    doc: &'a Document,
    root: NodeId,
    options: TreeFormatOptions,
}

impl<'a> DocumentTreeDebug<'a> {
    /// Visualize the whole document with default options.
    pub fn new(doc: &'a Document) -> Self {
        Self {
            doc,
            root: doc.root(),
            options: TreeFormatOptions::default(),
        }
    }

    /// Visualize only the subtree rooted at `root`.
    pub fn subtree(doc: &'a Document, root: NodeId) -> Self {
        Self {
            root,
            ..Self::new(doc)
        }
    }

    /// Replace the format options.
    pub fn with_options(mut self, options: TreeFormatOptions) -> Self {
        self.options = options;
        self
    }

    fn write_node(&self, out: &mut impl fmt::Write, id: NodeId, depth: usize, is_last: bool) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let Ok(tag) = self.doc.tag(id) else {
            return writeln!(out, "{}(removed {id:?})", self.prefix(depth, is_last));
        };

        out.write_str(&self.prefix(depth, is_last))?;
        out.write_str(tag)?;
        for class in self.doc.class_list(id).unwrap_or_default() {
            write!(out, ".{class}")?;
        }
        if let Some(element_id) = self.doc.attribute(id, "id") {
            write!(out, "#{element_id}")?;
        }
        if self.options.show_attributes {
            self.write_attributes(out, id)?;
        }
        if self.options.show_ids {
            write!(out, " [{id:?}]")?;
        }
        if self.options.show_text {
            match (self.doc.text(id), self.doc.markup(id)) {
                (_, Some(markup)) => write!(out, " <{} bytes of markup>", markup.len())?,
                (Some(text), None) if !text.is_empty() => write!(out, " {text:?}")?,
                _ => {}
            }
        }
        out.write_char('\n')?;

        let children = self.doc.children(id).unwrap_or_default();
        let count = children.len();
        for (i, &child) in children.iter().enumerate() {
            self.write_node(out, child, depth + 1, i + 1 == count)?;
        }
        Ok(())
    }

    fn write_attributes(&self, out: &mut impl fmt::Write, id: NodeId) -> fmt::Result {
        const SHOWN: [&str; 6] = ["type", "data-cmd", "data-name", "title", "aria-pressed", "hidden"];
        let mut parts = String::new();
        for name in SHOWN {
            if let Some(value) = self.doc.attribute(id, name) {
                if !parts.is_empty() {
                    parts.push(' ');
                }
                write!(parts, "{name}={value:?}")?;
            }
        }
        if parts.is_empty() {
            Ok(())
        } else {
            write!(out, " [{parts}]")
        }
    }

    fn prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();
        for _ in 1..depth {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

impl fmt::Display for DocumentTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root == self.doc.root() {
            writeln!(f, "Document {:?} ({} nodes):", self.doc.id(), self.doc.node_count())?;
        }
        self.write_node(f, self.root, 0, true)
    }
}
