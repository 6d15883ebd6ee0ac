//! The floating formatting toolbar.
//!
//! [`FormatToolbar`] owns an element subtree inside a host [`Document`]. It
//! builds one control per catalog item, keeps at most one popover open,
//! mirrors format-state snapshots onto its controls and turns user input into
//! [`Command`]s for a single host-provided sink.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use floatbar::{Command, FormatState, FormatToolbar, ToolbarOptions};
//! use floatbar_core::Document;
//!
//! let mut doc = Document::new();
//! let toolbar = FormatToolbar::new(ToolbarOptions::default());
//! let root = toolbar.create(&mut doc)?;
//! doc.append_child(doc.body(), root)?;
//!
//! let sent = Arc::new(Mutex::new(Vec::new()));
//! let sink = sent.clone();
//! toolbar.bind_commands(&mut doc, move |_, command| sink.lock().push(command));
//!
//! let bold = toolbar.item_element("bold").unwrap();
//! doc.click(bold)?;
//! assert_eq!(*sent.lock(), vec![Command::Bold]);
//!
//! toolbar.update_state(&mut doc, Some(&FormatState::new().with("bold", true)));
//! assert!(doc.has_class(bold, "active"));
//! # Ok::<(), floatbar::Error>(())
//! ```
//!
//! # Signals
//!
//! - `popover_opened(String)`: a select or color popover opened; carries the item name
//! - `popover_closed(())`: the open popover closed
//! - `visibility_changed(bool)`: the toolbar was shown or hidden

mod build;
mod commands;
mod link;
mod popover;
mod sync;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use floatbar_core::logging::targets;
use floatbar_core::{
    Document, DocumentId, DomError, DomResult, ListenerId, NodeId, Point, Rect, Signal,
};
use parking_lot::Mutex;

use crate::catalog::{ItemCatalog, ItemDef};
use crate::command::Command;
use crate::config::ToolbarOptions;
use crate::error::Result;
use crate::format_state::FormatState;
use crate::position::place_near;

pub use build::ROOT_CLASS;
pub use commands::{color_command, select_command};
pub use link::{LINK_PROMPT, LinkInput, LinkModal};
pub use popover::{
    COLOR_SELECTED, ColorSelected, RESET_COLOR, SELECT_CHANGED, SelectChanged, normalize_value,
};

/// Receives every command the toolbar dispatches.
pub type CommandSink = Arc<dyn Fn(&mut Document, Command) + Send + Sync>;

/// Class toggled on the root, the link modal and its backdrop to show them.
pub const VISIBLE_CLASS: &str = "visible";

/// Class marking a highlighted button or the current select option.
pub const ACTIVE_CLASS: &str = "active";

/// A control built for one catalog item.
pub(crate) struct RenderedItem {
    pub(crate) def: ItemDef,
    /// The node appended to the root: the button, or the select/color wrapper.
    pub(crate) element: NodeId,
    /// The clickable button.
    pub(crate) trigger: NodeId,
    pub(crate) label: Option<NodeId>,
    pub(crate) indicator: Option<NodeId>,
}

pub(crate) struct OpenPopover {
    pub(crate) element: NodeId,
    /// The wrapper the popover is attached to.
    pub(crate) owner: NodeId,
    pub(crate) item: String,
}

pub(crate) struct ToolbarState {
    pub(crate) options: ToolbarOptions,
    pub(crate) catalog: ItemCatalog,
    pub(crate) root: Option<NodeId>,
    pub(crate) document: Option<DocumentId>,
    pub(crate) items: Vec<RenderedItem>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) popover: Option<OpenPopover>,
    pub(crate) sink: Option<CommandSink>,
    pub(crate) listeners_attached: bool,
    pub(crate) last_state: Option<FormatState>,
    pub(crate) visible: bool,
    pub(crate) link_session: Option<link::LinkSession>,
    pub(crate) outside_click: Option<ListenerId>,
}

impl ToolbarState {
    fn new(options: ToolbarOptions, catalog: ItemCatalog) -> Self {
        Self {
            options,
            catalog,
            root: None,
            document: None,
            items: Vec::new(),
            index: HashMap::new(),
            popover: None,
            sink: None,
            listeners_attached: false,
            last_state: None,
            visible: false,
            link_session: None,
            outside_click: None,
        }
    }

    pub(crate) fn item(&self, name: &str) -> Option<&RenderedItem> {
        self.index.get(name).and_then(|&i| self.items.get(i))
    }

    fn rendered_defs(&self) -> Vec<ItemDef> {
        self.items.iter().map(|item| item.def.clone()).collect()
    }

    fn check_document(&self, doc: &Document) -> DomResult<()> {
        match self.document {
            Some(expected) if expected != doc.id() => Err(DomError::CrossDocument {
                expected,
                got: doc.id(),
            }),
            _ => Ok(()),
        }
    }

    fn clear_mount(&mut self) {
        self.root = None;
        self.document = None;
        self.items.clear();
        self.index.clear();
        self.popover = None;
        self.listeners_attached = false;
        self.visible = false;
        self.outside_click = None;
    }
}

/// State shared between the toolbar handle and its document listeners.
pub(crate) struct Shared {
    pub(crate) state: Mutex<ToolbarState>,
    pub(crate) popover_opened: Signal<String>,
    pub(crate) popover_closed: Signal<()>,
    pub(crate) visibility_changed: Signal<bool>,
}

/// A floating contextual formatting toolbar.
///
/// Listeners installed in the document hold only a weak reference to the
/// toolbar, so dropping the toolbar leaves them inert.
pub struct FormatToolbar {
    shared: Arc<Shared>,
}

impl FormatToolbar {
    /// Create a toolbar over the standard catalog.
    pub fn new(options: ToolbarOptions) -> Self {
        Self::with_catalog(options, ItemCatalog::standard())
    }

    /// Create a toolbar over a custom catalog.
    pub fn with_catalog(options: ToolbarOptions, catalog: ItemCatalog) -> Self {
        tracing::trace!(target: targets::TOOLBAR, ?options, items = catalog.len(), "new toolbar");
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ToolbarState::new(options, catalog)),
                popover_opened: Signal::new(),
                popover_closed: Signal::new(),
                visibility_changed: Signal::new(),
            }),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Build the toolbar element in `doc` and return it for the host to mount.
    ///
    /// Calling this again returns the element already built. The element is
    /// created detached; appending it somewhere is up to the host.
    pub fn create(&self, doc: &mut Document) -> Result<NodeId> {
        let weak = Arc::downgrade(&self.shared);
        let (root, renderer, defs, snapshot) = {
            let mut state = self.shared.state.lock();
            if let Some(root) = state.root {
                state.check_document(doc)?;
                if doc.contains(root) {
                    tracing::trace!(target: targets::TOOLBAR, ?root, "toolbar already created");
                    return Ok(root);
                }
                tracing::warn!(target: targets::TOOLBAR, ?root, "toolbar element was removed by the host, rebuilding");
                if let Some(listener) = state.outside_click {
                    doc.remove_listener(listener);
                }
                state.clear_mount();
            }

            let root = build::build_toolbar(doc, &mut state, &weak)?;
            state.root = Some(root);
            state.document = Some(doc.id());

            let listener = build::install_outside_click(doc, &weak)?;
            state.outside_click = Some(listener);

            if state.sink.is_some() {
                commands::attach(doc, &mut state, &weak)?;
            }

            tracing::debug!(target: targets::TOOLBAR, ?root, items = state.items.len(), "created toolbar");
            (
                root,
                state.options.custom_renderer.clone(),
                state.rendered_defs(),
                state.last_state.clone(),
            )
        };

        if let Some(renderer) = renderer {
            renderer(doc, root, &defs, snapshot.as_ref());
        }
        Ok(root)
    }

    /// Register the command sink, replacing any earlier one.
    ///
    /// Control listeners are attached once per built element set; later
    /// calls only swap the sink they forward to. A sink bound before
    /// [`create`](Self::create) is picked up when the element is built.
    pub fn bind_commands<F>(&self, doc: &mut Document, sink: F)
    where
        F: Fn(&mut Document, Command) + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(&self.shared);
        let mut state = self.shared.state.lock();
        if let Err(err) = state.check_document(doc) {
            tracing::warn!(target: targets::COMMANDS, %err, "ignoring bind_commands for a foreign document");
            return;
        }
        state.sink = Some(Arc::new(sink));

        if state.root.is_none() {
            tracing::debug!(target: targets::COMMANDS, "sink bound before create");
            return;
        }
        if state.listeners_attached {
            tracing::debug!(target: targets::COMMANDS, "replaced command sink");
            return;
        }
        match commands::attach(doc, &mut state, &weak) {
            Ok(()) => tracing::debug!(target: targets::COMMANDS, "bound command listeners"),
            Err(err) => tracing::warn!(target: targets::COMMANDS, %err, "failed to attach command listeners"),
        }
    }

    /// Reflect a format-state snapshot on the controls.
    ///
    /// `None` leaves every visual as it is. A snapshot received before
    /// [`create`](Self::create) is stored and used by the first popover.
    pub fn update_state(&self, doc: &mut Document, snapshot: Option<&FormatState>) {
        let Some(snapshot) = snapshot else {
            tracing::trace!(target: targets::TOOLBAR, "no snapshot, keeping visuals");
            return;
        };

        let render = {
            let mut state = self.shared.state.lock();
            if let Err(err) = state.check_document(doc) {
                tracing::warn!(target: targets::TOOLBAR, %err, "ignoring update_state for a foreign document");
                return;
            }
            state.last_state = Some(snapshot.clone());
            let Some(root) = state.root else {
                return;
            };

            sync::apply_snapshot(doc, &state.items, snapshot);
            tracing::trace!(target: targets::TOOLBAR, attributes = snapshot.len(), "applied snapshot");
            state
                .options
                .custom_renderer
                .clone()
                .map(|renderer| (renderer, root, state.rendered_defs()))
        };

        if let Some((renderer, root, defs)) = render {
            renderer(doc, root, &defs, Some(snapshot));
        }
    }

    /// Place the toolbar near a selection rectangle.
    ///
    /// Uses the root's last reported layout box for the toolbar size and
    /// writes `left`/`top` onto it. Returns the applied position, or `None`
    /// when there is nothing to position.
    pub fn position_near(
        &self,
        doc: &mut Document,
        selection: Rect,
        container: Option<Rect>,
    ) -> Option<Point> {
        let state = self.shared.state.lock();
        if let Err(err) = state.check_document(doc) {
            tracing::warn!(target: targets::TOOLBAR, %err, "ignoring position_near for a foreign document");
            return None;
        }
        let root = state.root?;

        let size = doc.bounds(root).size;
        let point = place_near(selection, size, container, doc.viewport());
        let applied = doc
            .set_style(root, "left", format!("{}px", point.x))
            .and_then(|()| doc.set_style(root, "top", format!("{}px", point.y)));
        match applied {
            Ok(()) => {
                tracing::trace!(target: targets::TOOLBAR, x = point.x, y = point.y, "positioned toolbar");
                Some(point)
            }
            Err(err) => {
                tracing::warn!(target: targets::TOOLBAR, %err, "failed to position toolbar");
                None
            }
        }
    }

    /// Show the toolbar.
    pub fn show(&self, doc: &mut Document) {
        self.set_visible(doc, true);
    }

    /// Hide the toolbar and close any open popover.
    pub fn hide(&self, doc: &mut Document) {
        if self.set_visible(doc, false) {
            popover::close_popover(&self.shared, doc);
        }
    }

    /// Returns `false` when the call was ignored.
    fn set_visible(&self, doc: &mut Document, visible: bool) -> bool {
        let changed = {
            let mut state = self.shared.state.lock();
            if let Err(err) = state.check_document(doc) {
                tracing::warn!(target: targets::TOOLBAR, %err, visible, "ignoring visibility change for a foreign document");
                return false;
            }
            let Some(root) = state.root else {
                tracing::trace!(target: targets::TOOLBAR, visible, "toolbar not created, ignoring visibility change");
                return false;
            };
            if let Err(err) = doc.toggle_class(root, VISIBLE_CLASS, visible) {
                tracing::warn!(target: targets::TOOLBAR, %err, "failed to toggle visibility");
                return false;
            }
            let changed = state.visible != visible;
            state.visible = visible;
            changed
        };

        if changed {
            tracing::debug!(target: targets::TOOLBAR, visible, "toolbar visibility changed");
            self.shared.visibility_changed.emit(visible);
        }
        true
    }

    /// Tear the toolbar down: close popovers and the link editor, remove the
    /// element from the document and forget every control.
    ///
    /// Further calls are no-ops. The sink and last snapshot survive, so a
    /// later [`create`](Self::create) starts from them.
    pub fn destroy(&self, doc: &mut Document) {
        let (had_popover, was_visible) = {
            let mut state = self.shared.state.lock();
            let Some(root) = state.root else {
                tracing::trace!(target: targets::TOOLBAR, "toolbar already destroyed");
                return;
            };
            if let Err(err) = state.check_document(doc) {
                tracing::warn!(target: targets::TOOLBAR, %err, "ignoring destroy for a foreign document");
                return;
            }

            if let Some(listener) = state.outside_click {
                doc.remove_listener(listener);
            }
            if doc.contains(root) {
                if let Err(err) = doc.remove(root) {
                    tracing::warn!(target: targets::TOOLBAR, %err, "failed to remove toolbar element");
                }
            }
            let had_popover = state.popover.is_some();
            let was_visible = state.visible;
            state.clear_mount();
            (had_popover, was_visible)
        };

        link::end_session(&self.shared, doc);
        tracing::debug!(target: targets::TOOLBAR, "destroyed toolbar");

        if had_popover {
            self.shared.popover_closed.emit(());
        }
        if was_visible {
            self.shared.visibility_changed.emit(false);
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The toolbar root, if created.
    pub fn element(&self) -> Option<NodeId> {
        self.shared.state.lock().root
    }

    /// The document the toolbar is mounted in, if created.
    pub fn document(&self) -> Option<DocumentId> {
        self.shared.state.lock().document
    }

    /// Whether the toolbar is shown.
    pub fn is_visible(&self) -> bool {
        self.shared.state.lock().visible
    }

    /// The open popover element, if any.
    pub fn active_popover(&self) -> Option<NodeId> {
        self.shared
            .state
            .lock()
            .popover
            .as_ref()
            .map(|popover| popover.element)
    }

    /// Name of the item owning the open popover, if any.
    pub fn active_popover_item(&self) -> Option<String> {
        self.shared
            .state
            .lock()
            .popover
            .as_ref()
            .map(|popover| popover.item.clone())
    }

    /// The clickable button of an item.
    pub fn item_element(&self, name: &str) -> Option<NodeId> {
        self.shared.state.lock().item(name).map(|item| item.trigger)
    }

    /// The node an item contributes to the root: its button, or its wrapper.
    pub fn item_container(&self, name: &str) -> Option<NodeId> {
        self.shared.state.lock().item(name).map(|item| item.element)
    }

    /// Names of the rendered items in display order.
    pub fn item_names(&self) -> Vec<String> {
        self.shared
            .state
            .lock()
            .items
            .iter()
            .map(|item| item.def.name.clone())
            .collect()
    }

    /// The options the toolbar was created with.
    pub fn options(&self) -> ToolbarOptions {
        self.shared.state.lock().options.clone()
    }

    /// The last snapshot passed to [`update_state`](Self::update_state).
    pub fn last_state(&self) -> Option<FormatState> {
        self.shared.state.lock().last_state.clone()
    }

    /// Whether a command sink is bound.
    pub fn has_sink(&self) -> bool {
        self.shared.state.lock().sink.is_some()
    }

    /// Whether the link editor modal is open.
    pub fn is_link_editing(&self) -> bool {
        self.shared.state.lock().link_session.is_some()
    }

    // =========================================================================
    // Signals
    // =========================================================================

    /// Emitted with the item name when a popover opens.
    pub fn popover_opened(&self) -> &Signal<String> {
        &self.shared.popover_opened
    }

    /// Emitted when the open popover closes.
    pub fn popover_closed(&self) -> &Signal<()> {
        &self.shared.popover_closed
    }

    /// Emitted when the toolbar is shown or hidden.
    pub fn visibility_changed(&self) -> &Signal<bool> {
        &self.shared.visibility_changed
    }
}

impl Default for FormatToolbar {
    fn default() -> Self {
        Self::new(ToolbarOptions::default())
    }
}

impl fmt::Debug for FormatToolbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("FormatToolbar")
            .field("root", &state.root)
            .field("document", &state.document)
            .field("items", &state.items.len())
            .field("visible", &state.visible)
            .field("popover_open", &state.popover.is_some())
            .field("has_sink", &state.sink.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolbarOptions;

    fn mounted(options: ToolbarOptions) -> (Document, FormatToolbar, NodeId) {
        let mut doc = Document::new();
        let toolbar = FormatToolbar::new(options);
        let root = toolbar.create(&mut doc).unwrap();
        doc.append_child(doc.body(), root).unwrap();
        (doc, toolbar, root)
    }

    #[test]
    fn test_create_is_idempotent() {
        let (mut doc, toolbar, root) = mounted(ToolbarOptions::default());
        assert_eq!(toolbar.create(&mut doc).unwrap(), root);
        assert_eq!(doc.query_all_class(doc.body(), "floatbar").len(), 1);
    }

    #[test]
    fn test_root_contract() {
        let (doc, _toolbar, root) = mounted(ToolbarOptions::default().with_wrap(false));
        assert!(doc.has_class(root, "floatbar"));
        assert_eq!(doc.attribute(root, "role"), Some("toolbar"));
        assert_eq!(doc.attribute(root, "aria-label"), Some("Text formatting"));
        assert!(doc.has_class(root, "floatbar--flex"));
        assert!(!doc.has_class(root, "floatbar--wrap"));
        assert!(doc.has_class(root, "floatbar--responsive"));
        assert_eq!(doc.style(root, "display"), None);
    }

    #[test]
    fn test_foreign_document_rejected() {
        let (_doc, toolbar, _root) = mounted(ToolbarOptions::default());
        let mut other = Document::new();
        assert!(matches!(
            toolbar.create(&mut other),
            Err(crate::Error::Dom(DomError::CrossDocument { .. }))
        ));

        toolbar.show(&mut other);
        assert!(!toolbar.is_visible());
        toolbar.destroy(&mut other);
        assert!(toolbar.element().is_some());
    }

    #[test]
    fn test_rebuild_after_host_removed_root() {
        let (mut doc, toolbar, root) = mounted(ToolbarOptions::default());
        doc.remove(root).unwrap();
        let rebuilt = toolbar.create(&mut doc).unwrap();
        assert_ne!(rebuilt, root);
        assert!(doc.contains(rebuilt));
        assert_eq!(toolbar.item_names().len(), ItemCatalog::standard().len());
    }

    #[test]
    fn test_visibility_signal_only_on_change() {
        let (mut doc, toolbar, root) = mounted(ToolbarOptions::default());
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        toolbar
            .visibility_changed()
            .connect(move |&visible| changes_clone.lock().push(visible));

        toolbar.show(&mut doc);
        toolbar.show(&mut doc);
        assert!(doc.has_class(root, VISIBLE_CLASS));
        toolbar.hide(&mut doc);
        assert!(!doc.has_class(root, VISIBLE_CLASS));
        assert_eq!(*changes.lock(), vec![true, false]);
    }

    #[test]
    fn test_show_before_create_is_ignored() {
        let mut doc = Document::new();
        let toolbar = FormatToolbar::default();
        toolbar.show(&mut doc);
        assert!(!toolbar.is_visible());
    }

    #[test]
    fn test_position_near_writes_px() {
        let (mut doc, toolbar, root) = mounted(ToolbarOptions::default());
        doc.set_bounds(root, Rect::new(0.0, 0.0, 200.0, 40.0)).unwrap();
        let point = toolbar
            .position_near(&mut doc, Rect::new(400.0, 300.0, 100.0, 20.0), None)
            .unwrap();
        assert_eq!(point, Point::new(350.0, 252.0));
        assert_eq!(doc.style(root, "left"), Some("350px"));
        assert_eq!(doc.style(root, "top"), Some("252px"));
    }

    #[test]
    fn test_position_before_create() {
        let mut doc = Document::new();
        let toolbar = FormatToolbar::default();
        assert_eq!(
            toolbar.position_near(&mut doc, Rect::new(0.0, 0.0, 10.0, 10.0), None),
            None
        );
    }
}
