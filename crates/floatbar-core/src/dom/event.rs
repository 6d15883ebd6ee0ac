//! Events and listeners for the document tree.
//!
//! Dispatch follows the familiar three phases: capture listeners run from the
//! document node down to the target's parent, every listener on the target
//! runs in registration order, then bubble listeners run from the target's
//! parent back up to the document node.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use slotmap::new_key_type;

use super::{Document, NodeId};

new_key_type! {
    /// Identifier of a registered event listener.
    ///
    /// Returned by [`Document::add_listener`] and accepted by
    /// [`Document::remove_listener`].
    pub struct ListenerId;
}

/// The kind of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// A pointer button was pressed. The default action moves focus to the target.
    PointerDown,
    /// A click. The default action of a submit button submits its form.
    Click,
    /// A form submission.
    Submit,
    /// An application-defined event identified by name.
    Custom(&'static str),
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointerDown => f.write_str("pointerdown"),
            Self::Click => f.write_str("click"),
            Self::Submit => f.write_str("submit"),
            Self::Custom(name) => f.write_str(name),
        }
    }
}

/// The phase an event is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventPhase {
    /// Not being dispatched.
    #[default]
    None,
    /// Travelling from the document node toward the target.
    Capturing,
    /// At the target node.
    AtTarget,
    /// Travelling from the target back toward the document node.
    Bubbling,
}

/// Options for [`Document::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    /// Run during the capture phase instead of the bubble phase.
    pub capture: bool,
    /// Remove the listener after its first invocation.
    pub once: bool,
}

impl ListenerOptions {
    /// Options for a capture-phase listener.
    pub const CAPTURE: Self = Self {
        capture: true,
        once: false,
    };

    /// Options for a listener that fires at most once.
    pub const ONCE: Self = Self {
        capture: false,
        once: true,
    };
}

/// A listener callback.
///
/// Listeners receive the document mutably so they can restructure the tree
/// while handling an event.
pub type Listener = Arc<dyn Fn(&mut Document, &mut Event) + Send + Sync>;

pub(crate) struct ListenerEntry {
    pub(crate) node: NodeId,
    pub(crate) kind: EventType,
    pub(crate) options: ListenerOptions,
    pub(crate) handler: Listener,
}

/// An event travelling through the document.
pub struct Event {
    kind: EventType,
    target: Option<NodeId>,
    current_target: Option<NodeId>,
    phase: EventPhase,
    default_prevented: bool,
    propagation_stopped: bool,
    detail: Option<Arc<dyn Any + Send + Sync>>,
}

impl Event {
    /// Create an event of the given kind with no detail.
    pub fn new(kind: EventType) -> Self {
        Self {
            kind,
            target: None,
            current_target: None,
            phase: EventPhase::None,
            default_prevented: false,
            propagation_stopped: false,
            detail: None,
        }
    }

    /// Create a custom event carrying a typed detail payload.
    pub fn custom<T: Any + Send + Sync>(name: &'static str, detail: T) -> Self {
        let mut event = Self::new(EventType::Custom(name));
        event.detail = Some(Arc::new(detail));
        event
    }

    /// The event kind.
    pub fn kind(&self) -> EventType {
        self.kind
    }

    /// The node the event was dispatched to.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// The node whose listener is currently running.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    /// The current dispatch phase.
    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Cancel the event's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching further nodes.
    ///
    /// Remaining listeners on the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Borrow the detail payload as `T`, if present and of that type.
    pub fn detail<T: Any>(&self) -> Option<&T> {
        self.detail.as_ref().and_then(|detail| detail.downcast_ref::<T>())
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("target", &self.target)
            .field("current_target", &self.current_target)
            .field("phase", &self.phase)
            .field("default_prevented", &self.default_prevented)
            .field("propagation_stopped", &self.propagation_stopped)
            .field("has_detail", &self.detail.is_some())
            .finish()
    }
}

impl Event {
    pub(crate) fn begin(&mut self, target: NodeId) {
        self.target = Some(target);
        self.propagation_stopped = false;
    }

    pub(crate) fn enter(&mut self, node: NodeId, phase: EventPhase) {
        self.current_target = Some(node);
        self.phase = phase;
    }

    pub(crate) fn finish(&mut self) {
        self.current_target = None;
        self.phase = EventPhase::None;
    }
}
