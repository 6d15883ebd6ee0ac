//! Retained element tree standing in for a host document.
//!
//! A [`Document`] owns an arena of element nodes keyed by [`NodeId`], with
//! the familiar pieces a toolbar needs from a browser document: classes,
//! attributes, inline style, text, raw markup, form values, host-reported
//! layout boxes, focus, and an event system with capture and bubble phases.
//!
//! Every document starts with three structural nodes: the document node
//! itself ([`Document::root`]), and its `head` and `body` children. They can
//! be decorated but never detached or removed.
//!
//! # Example
//!
//! ```
//! use floatbar_core::dom::{Document, EventType, ListenerOptions};
//!
//! let mut doc = Document::new();
//! let button = doc.create_element("button");
//! doc.append_child(doc.body(), button)?;
//! doc.add_class(button, "primary")?;
//!
//! doc.add_listener(button, EventType::Click, ListenerOptions::default(), |doc, event| {
//!     if let Some(target) = event.target() {
//!         let _ = doc.add_class(target, "clicked");
//!     }
//! })?;
//!
//! doc.click(button)?;
//! assert!(doc.has_class(button, "clicked"));
//! # Ok::<(), floatbar_core::DomError>(())
//! ```

mod event;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::{new_key_type, SlotMap};

pub use event::{Event, EventPhase, EventType, Listener, ListenerId, ListenerOptions};
use event::ListenerEntry;

use crate::error::{DomError, DomResult};
use crate::geometry::{Rect, Size};
use crate::logging::targets;

new_key_type! {
    /// A stable handle to an element node inside one [`Document`].
    ///
    /// Handles become invalid when the node is removed. They are meaningless
    /// in any other document.
    pub struct NodeId;
}

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(u64);

impl DocumentId {
    /// Build an ID from its raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value of this ID.
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The host's blocking text prompt.
///
/// Receives the message to show and returns the entered text, or `None` when
/// the user dismissed the prompt.
pub type PromptHandler = Box<dyn FnMut(&str) -> Option<String> + Send>;

/// Default viewport used until the host reports one.
pub const DEFAULT_VIEWPORT: Size = Size::new(1024.0, 768.0);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: String,
    markup: Option<String>,
    value: String,
    bounds: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }
}

/// A host document: an element tree plus focus, viewport and event state.
pub struct Document {
    id: DocumentId,
    nodes: SlotMap<NodeId, NodeData>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    listeners: SlotMap<ListenerId, ListenerEntry>,
    node_listeners: HashMap<NodeId, Vec<ListenerId>>,
    viewport: Size,
    focused: Option<NodeId>,
    scrolled_into_view: Option<NodeId>,
    prompt_handler: Option<PromptHandler>,
}

impl Document {
    /// Create an empty document with `head` and `body`.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new("#document"));
        let head = nodes.insert(NodeData::new("head"));
        let body = nodes.insert(NodeData::new("body"));
        for child in [head, body] {
            nodes[child].parent = Some(root);
            nodes[root].children.push(child);
        }

        let id = DocumentId::next();
        tracing::trace!(target: targets::DOM, ?id, "created document");

        Self {
            id,
            nodes,
            root,
            head,
            body,
            listeners: SlotMap::with_key(),
            node_listeners: HashMap::new(),
            viewport: DEFAULT_VIEWPORT,
            focused: None,
            scrolled_into_view: None,
            prompt_handler: None,
        }
    }

    /// Create an empty document with the given viewport size.
    pub fn with_viewport(viewport: Size) -> Self {
        let mut doc = Self::new();
        doc.viewport = viewport;
        doc
    }

    /// This document's identity.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// The document node. Document-level listeners are registered here.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `head` element.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    fn is_structural(&self, id: NodeId) -> bool {
        id == self.root || id == self.head || id == self.body
    }

    fn node(&self, id: NodeId) -> DomResult<&NodeData> {
        self.nodes.get(id).ok_or(DomError::InvalidNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(DomError::InvalidNode(id))
    }

    // ------------------------------------------------------------------------
    // Tree structure
    // ------------------------------------------------------------------------

    /// Create a detached element with the given tag name.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.nodes.insert(NodeData::new(tag));
        tracing::trace!(target: targets::DOM, ?id, tag, "created element");
        id
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_structural(child) {
            return Err(DomError::StructuralNode(child));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::CircularParentage);
        }

        self.unlink(child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Detach a node from its parent, keeping it (and its subtree) alive.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        if self.is_structural(id) {
            return Err(DomError::StructuralNode(id));
        }
        self.unlink(id);
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes.get(id).and_then(|data| data.parent) {
            if let Some(parent_data) = self.nodes.get_mut(parent) {
                parent_data.children.retain(|&child| child != id);
            }
        }
        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = None;
        }
    }

    /// Detach a node and free it together with its subtree and listeners.
    #[tracing::instrument(skip(self), target = "floatbar_core::dom", level = "trace")]
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        self.detach(id)?;

        let mut doomed = self.descendants(id);
        doomed.push(id);
        tracing::trace!(target: targets::DOM, ?id, count = doomed.len(), "removing subtree");

        for node in doomed {
            self.free(node);
        }
        Ok(())
    }

    fn free(&mut self, id: NodeId) {
        if let Some(ids) = self.node_listeners.remove(&id) {
            for listener in ids {
                self.listeners.remove(listener);
            }
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.scrolled_into_view == Some(id) {
            self.scrolled_into_view = None;
        }
        self.nodes.remove(id);
    }

    /// Whether the node exists in this document (attached or not).
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether the node is attached to the document tree.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(id) && self.is_inclusive_ancestor(self.root, id)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> DomResult<Option<NodeId>> {
        self.node(id).map(|data| data.parent)
    }

    /// Get the children of a node.
    pub fn children(&self, id: NodeId) -> DomResult<&[NodeId]> {
        self.node(id).map(|data| data.children.as_slice())
    }

    /// Get a node's tag name (lowercase).
    pub fn tag(&self, id: NodeId) -> DomResult<&str> {
        self.node(id).map(|data| data.tag.as_str())
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes.get(node).and_then(|data| data.parent);
        }
        false
    }

    /// Ancestors of a node, nearest first, ending at the top of its tree.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = self.nodes.get(id).and_then(|data| data.parent);
        while let Some(node) = current {
            result.push(node);
            current = self.nodes.get(node).and_then(|data| data.parent);
        }
        result
    }

    /// Descendants of a node in document (depth-first pre-) order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(id) {
            Some(data) => data.children.iter().rev().copied().collect(),
            None => return result,
        };
        while let Some(node) = stack.pop() {
            result.push(node);
            if let Some(data) = self.nodes.get(node) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        result
    }

    /// The nearest inclusive ancestor with the given tag.
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&node| self.nodes.get(node).is_some_and(|data| data.tag == tag))
    }

    /// Number of live nodes, structural nodes included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// First connected element whose `id` attribute equals `element_id`.
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.query_attribute(self.root, "id", element_id)
    }

    /// First descendant of `scope` carrying `class`.
    pub fn query_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&node| self.has_class(node, class))
    }

    /// All descendants of `scope` carrying `class`, in document order.
    pub fn query_all_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| self.has_class(node, class))
            .collect()
    }

    /// First descendant of `scope` whose attribute `name` equals `value`.
    pub fn query_attribute(&self, scope: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&node| self.attribute(node, name) == Some(value))
    }

    /// All descendants of `scope` with the given tag, in document order.
    pub fn query_all_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| self.nodes.get(node).is_some_and(|data| data.tag == tag))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Classes and attributes
    // ------------------------------------------------------------------------

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        let data = self.node_mut(id)?;
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        self.node_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Add the class when `force` is true, remove it otherwise.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, force: bool) -> DomResult<()> {
        if force {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }

    /// Whether the node carries `class`. Invalid nodes carry nothing.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    /// The node's classes in insertion order.
    pub fn class_list(&self, id: NodeId) -> DomResult<&[String]> {
        self.node(id).map(|data| data.classes.as_slice())
    }

    /// Set an attribute.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> DomResult<()> {
        self.node_mut(id)?
            .attributes
            .insert(name.to_string(), value.into());
        Ok(())
    }

    /// Get an attribute value.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|data| data.attributes.get(name))
            .map(String::as_str)
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> DomResult<Option<String>> {
        Ok(self.node_mut(id)?.attributes.remove(name))
    }

    /// Set the `id` attribute.
    pub fn set_element_id(&mut self, id: NodeId, element_id: &str) -> DomResult<()> {
        self.set_attribute(id, "id", element_id)
    }

    // ------------------------------------------------------------------------
    // Inline style
    // ------------------------------------------------------------------------

    /// Set one inline style property.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) -> DomResult<()> {
        self.node_mut(id)?
            .style
            .insert(property.to_string(), value.into());
        Ok(())
    }

    /// Get one inline style property.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(id)
            .and_then(|data| data.style.get(property))
            .map(String::as_str)
    }

    /// Remove one inline style property.
    pub fn remove_style(&mut self, id: NodeId, property: &str) -> DomResult<()> {
        self.node_mut(id)?.style.remove(property);
        Ok(())
    }

    /// Apply a declaration list such as `"font-family: Georgia, serif; color: red"`.
    ///
    /// Declarations without a colon are ignored.
    pub fn set_style_text(&mut self, id: NodeId, css: &str) -> DomResult<()> {
        let data = self.node_mut(id)?;
        for declaration in css.split(';') {
            if let Some((property, value)) = declaration.split_once(':') {
                let property = property.trim();
                if !property.is_empty() {
                    data.style
                        .insert(property.to_ascii_lowercase(), value.trim().to_string());
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// Replace the node's content with plain text.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> DomResult<()> {
        self.clear_children(id)?;
        let data = self.node_mut(id)?;
        data.text = text.into();
        data.markup = None;
        Ok(())
    }

    /// The node's own text.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|data| data.text.as_str())
    }

    /// The node's text followed by all descendant text, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        std::iter::once(id)
            .chain(self.descendants(id))
            .filter_map(|node| self.nodes.get(node))
            .map(|data| data.text.as_str())
            .collect()
    }

    /// Replace the node's content with raw markup.
    ///
    /// The markup is stored verbatim for the host renderer; it is not parsed
    /// into nodes.
    pub fn set_markup(&mut self, id: NodeId, markup: impl Into<String>) -> DomResult<()> {
        self.clear_children(id)?;
        let data = self.node_mut(id)?;
        data.markup = Some(markup.into());
        data.text.clear();
        Ok(())
    }

    /// The node's raw markup, if it was set with [`set_markup`](Self::set_markup).
    pub fn markup(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).and_then(|data| data.markup.as_deref())
    }

    fn clear_children(&mut self, id: NodeId) -> DomResult<()> {
        let children = self.node(id)?.children.clone();
        for child in children {
            if !self.is_structural(child) {
                self.remove(child)?;
            }
        }
        Ok(())
    }

    /// Set a form control's value.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) -> DomResult<()> {
        self.node_mut(id)?.value = value.into();
        Ok(())
    }

    /// A form control's value.
    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id).map(|data| data.value.as_str())
    }

    // ------------------------------------------------------------------------
    // Geometry, focus, host capabilities
    // ------------------------------------------------------------------------

    /// Record the layout box the host computed for a node.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) -> DomResult<()> {
        self.node_mut(id)?.bounds = bounds;
        Ok(())
    }

    /// The node's last reported layout box, or an empty rect.
    pub fn bounds(&self, id: NodeId) -> Rect {
        self.nodes.get(id).map(|data| data.bounds).unwrap_or(Rect::ZERO)
    }

    /// The viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Move focus to a node.
    pub fn focus(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        self.focused = Some(id);
        Ok(())
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The focused node, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Ask the host to scroll a node into view.
    pub fn scroll_into_view(&mut self, id: NodeId) -> DomResult<()> {
        self.node(id)?;
        self.scrolled_into_view = Some(id);
        Ok(())
    }

    /// The last node passed to [`scroll_into_view`](Self::scroll_into_view).
    pub fn last_scrolled_into_view(&self) -> Option<NodeId> {
        self.scrolled_into_view
    }

    /// Install the host's blocking prompt.
    pub fn set_prompt_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str) -> Option<String> + Send + 'static,
    {
        self.prompt_handler = Some(Box::new(handler));
    }

    /// Remove the host's blocking prompt.
    pub fn clear_prompt_handler(&mut self) {
        self.prompt_handler = None;
    }

    /// Show a blocking prompt. Without a handler this behaves as a dismissal.
    pub fn prompt(&mut self, message: &str) -> Option<String> {
        match self.prompt_handler.as_mut() {
            Some(handler) => handler(message),
            None => {
                tracing::debug!(target: targets::DOM, message, "no prompt handler installed");
                None
            }
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Register a listener on a node.
    pub fn add_listener<F>(
        &mut self,
        id: NodeId,
        kind: EventType,
        options: ListenerOptions,
        handler: F,
    ) -> DomResult<ListenerId>
    where
        F: Fn(&mut Document, &mut Event) + Send + Sync + 'static,
    {
        self.node(id)?;
        let handler: Listener = Arc::new(handler);
        let listener = self.listeners.insert(ListenerEntry {
            node: id,
            kind,
            options,
            handler,
        });
        self.node_listeners.entry(id).or_default().push(listener);
        tracing::trace!(target: targets::EVENT, ?id, %kind, capture = options.capture, "added listener");
        Ok(listener)
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn remove_listener(&mut self, listener: ListenerId) -> bool {
        let Some(entry) = self.listeners.remove(listener) else {
            return false;
        };
        if let Some(ids) = self.node_listeners.get_mut(&entry.node) {
            ids.retain(|&id| id != listener);
            if ids.is_empty() {
                self.node_listeners.remove(&entry.node);
            }
        }
        true
    }

    /// Number of listeners registered on a node.
    pub fn listener_count(&self, id: NodeId) -> usize {
        self.node_listeners.get(&id).map_or(0, Vec::len)
    }

    /// Whether a listener is still registered.
    pub fn has_listener(&self, listener: ListenerId) -> bool {
        self.listeners.contains_key(listener)
    }

    /// Dispatch an event to `target` and return it after all phases ran.
    pub fn dispatch(&mut self, target: NodeId, mut event: Event) -> DomResult<Event> {
        self.node(target)?;
        tracing::trace!(target: targets::EVENT, kind = %event.kind(), ?target, "dispatching event");

        let mut path = self.ancestors(target);
        path.reverse();
        event.begin(target);

        for &node in &path {
            self.invoke(node, &mut event, EventPhase::Capturing);
            if event.propagation_stopped() {
                event.finish();
                return Ok(event);
            }
        }

        self.invoke(target, &mut event, EventPhase::AtTarget);

        if !event.propagation_stopped() {
            for &node in path.iter().rev() {
                self.invoke(node, &mut event, EventPhase::Bubbling);
                if event.propagation_stopped() {
                    break;
                }
            }
        }

        event.finish();
        Ok(event)
    }

    fn invoke(&mut self, node: NodeId, event: &mut Event, phase: EventPhase) {
        let kind = event.kind();
        let matching: Vec<ListenerId> = match self.node_listeners.get(&node) {
            Some(ids) => ids
                .iter()
                .copied()
                .filter(|&id| {
                    self.listeners.get(id).is_some_and(|entry| {
                        entry.kind == kind
                            && match phase {
                                EventPhase::Capturing => entry.options.capture,
                                EventPhase::Bubbling => !entry.options.capture,
                                EventPhase::AtTarget => true,
                                EventPhase::None => false,
                            }
                    })
                })
                .collect(),
            None => return,
        };

        event.enter(node, phase);
        for id in matching {
            // Listeners removed by an earlier handler in this pass are skipped.
            let Some(entry) = self.listeners.get(id) else {
                continue;
            };
            let handler = entry.handler.clone();
            if entry.options.once {
                self.remove_listener(id);
            }
            handler(self, event);
        }
    }

    /// Simulate a pointer press. Unless prevented, focus moves to the target.
    ///
    /// Returns `true` when the default action ran.
    pub fn pointer_down(&mut self, target: NodeId) -> DomResult<bool> {
        let event = self.dispatch(target, Event::new(EventType::PointerDown))?;
        if event.default_prevented() {
            return Ok(false);
        }
        if self.contains(target) {
            self.focused = Some(target);
        }
        Ok(true)
    }

    /// Simulate a click. Unless prevented, a submit button submits its form.
    ///
    /// Returns `true` when the default action was not prevented.
    pub fn click(&mut self, target: NodeId) -> DomResult<bool> {
        let event = self.dispatch(target, Event::new(EventType::Click))?;
        if event.default_prevented() {
            return Ok(false);
        }

        let submitter = self
            .closest(target, "button")
            .filter(|&button| self.attribute(button, "type") == Some("submit"));
        if let Some(form) = submitter.and_then(|button| self.closest(button, "form")) {
            self.submit(form)?;
        }
        Ok(true)
    }

    /// Simulate a form submission.
    ///
    /// Returns `true` when the submission was not prevented.
    pub fn submit(&mut self, form: NodeId) -> DomResult<bool> {
        let event = self.dispatch(form, Event::new(EventType::Submit))?;
        Ok(!event.default_prevented())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("viewport", &self.viewport)
            .field("focused", &self.focused)
            .finish()
    }
}
