//! Floatbar - a floating contextual formatting toolbar for rich-text editors.
//!
//! The toolbar lives inside a host [`Document`](floatbar_core::Document) and
//! talks to the host's text engine in two directions:
//!
//! - **Commands out**: clicks, select picks and color picks become
//!   [`Command`]s delivered to a sink bound with
//!   [`FormatToolbar::bind_commands`]
//! - **State in**: [`FormatState`] snapshots passed to
//!   [`FormatToolbar::update_state`] drive highlights, select labels and
//!   color indicators
//!
//! Which controls appear is decided by an [`ItemCatalog`] filtered through
//! [`ToolbarOptions::items`]. Placement helpers live in [`position`], and
//! [`inject`] adds the stylesheet and the shared link editor to a document.
//!
//! # Example
//!
//! ```
//! use floatbar::inject::inject_toolbar_styles;
//! use floatbar::{FormatToolbar, ToolbarOptions};
//! use floatbar_core::{Document, Rect};
//!
//! let mut doc = Document::new();
//! inject_toolbar_styles(&mut doc)?;
//!
//! let options = ToolbarOptions::new().with_items(["formatBlock", "bold", "italic", "link"]);
//! let toolbar = FormatToolbar::new(options);
//! let root = toolbar.create(&mut doc)?;
//! doc.append_child(doc.body(), root)?;
//!
//! toolbar.bind_commands(&mut doc, |_, command| println!("{command}"));
//! toolbar.position_near(&mut doc, Rect::new(120.0, 300.0, 80.0, 18.0), None);
//! toolbar.show(&mut doc);
//! assert_eq!(toolbar.item_names(), ["formatBlock", "bold", "italic", "link"]);
//! # Ok::<(), floatbar::Error>(())
//! ```

pub mod catalog;
mod command;
pub mod config;
mod error;
mod format_state;
pub mod inject;
pub mod position;
mod toolbar;

pub use catalog::{ItemCatalog, ItemDef, ItemKind, SelectOption};
pub use command::{Command, CommandArg};
pub use config::{CustomRenderer, ItemRef, ToolbarGroup, ToolbarOptions, ToolbarPlacement};
pub use error::{Error, Result};
pub use format_state::FormatState;
pub use toolbar::{
    ACTIVE_CLASS, COLOR_SELECTED, ColorSelected, CommandSink, FormatToolbar, LINK_PROMPT,
    LinkInput, LinkModal, RESET_COLOR, ROOT_CLASS, SELECT_CHANGED, SelectChanged, VISIBLE_CLASS,
    color_command, normalize_value, select_command,
};

pub use floatbar_core::{Document, NodeId, Point, Rect, Signal, Size};
