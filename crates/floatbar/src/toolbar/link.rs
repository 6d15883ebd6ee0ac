//! URL entry for the link button.
//!
//! When the document carries the injected link modal the URL is edited there;
//! otherwise the document's blocking prompt is used.

use std::sync::{Arc, Weak};

use floatbar_core::logging::targets;
use floatbar_core::{Document, DomResult, EventType, ListenerId, ListenerOptions, NodeId};

use super::commands::dispatch_command;
use super::{Shared, VISIBLE_CLASS};
use crate::command::Command;
use crate::inject::{
    LINK_BACKDROP_CLASS, LINK_CANCEL_ID, LINK_FORM_ID, LINK_INPUT_ID, LINK_MODAL_CLASS,
    LINK_REMOVE_ID,
};

/// Message shown by the prompt fallback.
pub const LINK_PROMPT: &str = "Enter URL:";

/// Vertical gap between the link button and the modal.
const MODAL_OFFSET: f32 = 8.0;

/// The parts of an injected link modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkModal {
    pub modal: NodeId,
    pub backdrop: NodeId,
    pub form: NodeId,
    pub input: NodeId,
    pub remove: Option<NodeId>,
    pub cancel: Option<NodeId>,
}

/// How a URL is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkInput {
    Modal(LinkModal),
    Prompt,
}

impl LinkInput {
    /// Use the modal when all of its required parts are in the document.
    pub fn detect(doc: &Document) -> Self {
        let root = doc.root();
        let parts = (
            doc.query_class(root, LINK_MODAL_CLASS),
            doc.query_class(root, LINK_BACKDROP_CLASS),
            doc.element_by_id(LINK_FORM_ID),
            doc.element_by_id(LINK_INPUT_ID),
        );
        match parts {
            (Some(modal), Some(backdrop), Some(form), Some(input)) => Self::Modal(LinkModal {
                modal,
                backdrop,
                form,
                input,
                remove: doc.element_by_id(LINK_REMOVE_ID),
                cancel: doc.element_by_id(LINK_CANCEL_ID),
            }),
            _ => Self::Prompt,
        }
    }
}

/// An open modal and the listeners it owns.
pub(crate) struct LinkSession {
    modal: LinkModal,
    listeners: Vec<ListenerId>,
}

pub(super) fn request_link(shared: &Arc<Shared>, doc: &mut Document, trigger: NodeId) {
    match LinkInput::detect(doc) {
        LinkInput::Modal(modal) => open_modal(shared, doc, trigger, modal),
        LinkInput::Prompt => match doc.prompt(LINK_PROMPT).filter(|url| !url.is_empty()) {
            Some(url) => dispatch_command(shared, doc, Command::Link(url)),
            None => tracing::debug!(target: targets::COMMANDS, "link prompt dismissed"),
        },
    }
}

fn open_modal(shared: &Arc<Shared>, doc: &mut Document, trigger: NodeId, modal: LinkModal) {
    if end_session(shared, doc) {
        tracing::debug!(target: targets::COMMANDS, "replaced stale link session");
    }

    let mut listeners = Vec::new();
    let weak = Arc::downgrade(shared);
    if let Err(err) = show_modal(doc, &weak, trigger, modal, &mut listeners) {
        tracing::warn!(target: targets::COMMANDS, %err, "failed to open link editor");
        for listener in listeners {
            doc.remove_listener(listener);
        }
        hide_modal(doc, modal);
        return;
    }

    shared.state.lock().link_session = Some(LinkSession { modal, listeners });
    tracing::debug!(target: targets::COMMANDS, "opened link editor");
}

fn show_modal(
    doc: &mut Document,
    weak: &Weak<Shared>,
    trigger: NodeId,
    modal: LinkModal,
    listeners: &mut Vec<ListenerId>,
) -> DomResult<()> {
    let anchor = doc.bounds(trigger);
    doc.set_style(modal.modal, "left", format!("{}px", anchor.left()))?;
    doc.set_style(
        modal.modal,
        "top",
        format!("{}px", anchor.bottom() + MODAL_OFFSET),
    )?;
    doc.add_class(modal.modal, VISIBLE_CLASS)?;
    doc.add_class(modal.backdrop, VISIBLE_CLASS)?;
    doc.set_value(modal.input, "")?;
    doc.focus(modal.input)?;

    let submit_weak = weak.clone();
    listeners.push(doc.add_listener(
        modal.form,
        EventType::Submit,
        ListenerOptions::default(),
        move |doc, event| {
            event.prevent_default();
            let Some(shared) = submit_weak.upgrade() else {
                return;
            };
            let url = doc.value(modal.input).unwrap_or_default().to_string();
            if !url.is_empty() {
                dispatch_command(&shared, doc, Command::Link(url));
            }
            end_session(&shared, doc);
        },
    )?);

    if let Some(remove) = modal.remove {
        let remove_weak = weak.clone();
        listeners.push(doc.add_listener(
            remove,
            EventType::Click,
            ListenerOptions::default(),
            move |doc, _| {
                let Some(shared) = remove_weak.upgrade() else {
                    return;
                };
                dispatch_command(&shared, doc, Command::Unlink);
                end_session(&shared, doc);
            },
        )?);
    }

    for dismiss in std::iter::once(modal.backdrop).chain(modal.cancel) {
        let dismiss_weak = weak.clone();
        listeners.push(doc.add_listener(
            dismiss,
            EventType::Click,
            ListenerOptions::default(),
            move |doc, _| {
                if let Some(shared) = dismiss_weak.upgrade() {
                    end_session(&shared, doc);
                }
            },
        )?);
    }
    Ok(())
}

fn hide_modal(doc: &mut Document, modal: LinkModal) {
    for node in [modal.modal, modal.backdrop] {
        if let Err(err) = doc.remove_class(node, VISIBLE_CLASS) {
            tracing::trace!(target: targets::COMMANDS, %err, "link modal part is gone");
        }
    }
}

/// Close the link editor and detach its listeners. Returns whether one was open.
pub(crate) fn end_session(shared: &Shared, doc: &mut Document) -> bool {
    let session = shared.state.lock().link_session.take();
    let Some(session) = session else {
        return false;
    };
    for listener in session.listeners {
        doc.remove_listener(listener);
    }
    hide_modal(doc, session.modal);
    tracing::debug!(target: targets::COMMANDS, "closed link editor");
    true
}
