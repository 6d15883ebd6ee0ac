//! Core systems for floatbar.
//!
//! This crate provides the host-side building blocks the floatbar toolbar is
//! written against:
//!
//! - **Document**: A retained element tree with classes, attributes, inline
//!   style, focus, and host-reported layout boxes
//! - **Events**: Capture/target/bubble dispatch with cancellable default actions
//! - **Signal/Slot System**: Type-safe notifications for toolbar observers
//! - **Geometry**: Points, sizes and client rectangles
//! - **Logging**: `tracing` targets and document tree dumps
//!
//! # Document Example
//!
//! ```
//! use floatbar_core::{Document, EventType, ListenerOptions};
//!
//! let mut doc = Document::new();
//! let editor = doc.create_element("div");
//! let button = doc.create_element("button");
//! doc.append_child(doc.body(), editor)?;
//! doc.append_child(doc.body(), button)?;
//! doc.focus(editor)?;
//!
//! // Keep the editor focused when the button is pressed.
//! doc.add_listener(button, EventType::PointerDown, ListenerOptions::CAPTURE, |_, event| {
//!     event.prevent_default();
//! })?;
//!
//! doc.pointer_down(button)?;
//! assert_eq!(doc.focused(), Some(editor));
//! # Ok::<(), floatbar_core::DomError>(())
//! ```
//!
//! # Signal/Slot Example
//!
//! ```
//! use floatbar_core::Signal;
//!
//! let visibility_changed = Signal::<bool>::new();
//! let conn_id = visibility_changed.connect(|visible| {
//!     println!("toolbar visible: {visible}");
//! });
//!
//! visibility_changed.emit(true);
//! visibility_changed.disconnect(conn_id);
//! ```

pub mod dom;
mod error;
pub mod geometry;
pub mod logging;
pub mod signal;

pub use dom::{
    Document, DocumentId, Event, EventPhase, EventType, Listener, ListenerId, ListenerOptions,
    NodeId, PromptHandler,
};
pub use error::{DomError, DomResult};
pub use geometry::{Point, Rect, Size};
pub use logging::{DocumentTreeDebug, TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
