//! Select dropdowns and color palettes.
//!
//! At most one popover is open per toolbar. Picking an entry dispatches a
//! custom event on the owning wrapper ([`SELECT_CHANGED`] or
//! [`COLOR_SELECTED`]) and closes the popover.

use std::sync::Weak;

use floatbar_core::logging::targets;
use floatbar_core::{Document, DomResult, Event, EventType, ListenerOptions, NodeId};

use super::{ACTIVE_CLASS, OpenPopover, Shared};
use crate::catalog::{ItemDef, ItemKind, SelectOption};
use crate::format_state::FormatState;

/// Name of the event dispatched on a select wrapper when an option is picked.
pub const SELECT_CHANGED: &str = "select-changed";

/// Name of the event dispatched on a color wrapper when a color is picked.
pub const COLOR_SELECTED: &str = "color-selected";

/// Color carried by the palette's reset entry.
pub const RESET_COLOR: &str = "initial";

/// Detail of a [`SELECT_CHANGED`] event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectChanged {
    pub name: String,
    pub value: String,
}

/// Detail of a [`COLOR_SELECTED`] event.
///
/// `color` is `initial` when the palette's reset entry was picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSelected {
    pub color: String,
    pub command: Option<String>,
}

/// Canonical form used to compare select values: lowercase, quotes removed,
/// first comma-separated token, trimmed.
///
/// ```
/// use floatbar::normalize_value;
///
/// assert_eq!(normalize_value("'Times New Roman', serif"), "times new roman");
/// assert_eq!(normalize_value("  H2 "), "h2");
/// ```
pub fn normalize_value(value: &str) -> String {
    let unquoted: String = value
        .to_lowercase()
        .chars()
        .filter(|&c| c != '\'' && c != '"')
        .collect();
    unquoted
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Open the item's popover, or close it when it is already the open one.
pub(super) fn toggle(weak: &Weak<Shared>, doc: &mut Document, name: &str) {
    let Some(shared) = weak.upgrade() else {
        return;
    };

    let mut replaced = false;
    let opened = {
        let mut state = shared.state.lock();
        let Some((owner, def)) = state.item(name).map(|item| (item.element, item.def.clone()))
        else {
            tracing::warn!(target: targets::POPOVER, item = name, "no such item");
            return;
        };
        if matches!(def.kind, ItemKind::Button { .. }) {
            tracing::warn!(target: targets::POPOVER, item = name, "buttons have no popover");
            return;
        }

        if state.popover.as_ref().is_some_and(|open| open.owner == owner) {
            drop(state);
            close_popover(&shared, doc);
            return;
        }

        if let Some(previous) = state.popover.take() {
            discard(doc, previous.element);
            replaced = true;
        }

        let snapshot = state.last_state.clone().unwrap_or_default();
        let built = match &def.kind {
            ItemKind::Select { options, .. } => {
                build_dropdown(doc, weak, owner, &def, options, &snapshot)
            }
            ItemKind::ColorPicker { colors, command, .. } => {
                build_palette(doc, weak, owner, colors, command.as_deref())
            }
            ItemKind::Button { .. } => return,
        };

        match built {
            Ok(element) => {
                state.popover = Some(OpenPopover {
                    element,
                    owner,
                    item: name.to_string(),
                });
                tracing::debug!(target: targets::POPOVER, item = name, "opened popover");
                true
            }
            Err(err) => {
                tracing::warn!(target: targets::POPOVER, item = name, %err, "failed to open popover");
                false
            }
        }
    };

    if replaced {
        shared.popover_closed.emit(());
    }
    if opened {
        shared.popover_opened.emit(name.to_string());
    }
}

/// Close the open popover. Returns whether one was open.
pub(crate) fn close_popover(shared: &Shared, doc: &mut Document) -> bool {
    let open = shared.state.lock().popover.take();
    let Some(open) = open else {
        return false;
    };
    discard(doc, open.element);
    tracing::debug!(target: targets::POPOVER, item = %open.item, "closed popover");
    shared.popover_closed.emit(());
    true
}

fn close_popover_weak(weak: &Weak<Shared>, doc: &mut Document) {
    if let Some(shared) = weak.upgrade() {
        close_popover(&shared, doc);
    }
}

fn discard(doc: &mut Document, element: NodeId) {
    if !doc.contains(element) {
        return;
    }
    if let Err(err) = doc.remove(element) {
        tracing::warn!(target: targets::POPOVER, %err, "failed to remove popover");
    }
}

/// Build `build` into a fresh element attached to `owner`, or nothing at all.
fn attach_built<F>(doc: &mut Document, owner: NodeId, tag: &str, build: F) -> DomResult<NodeId>
where
    F: FnOnce(&mut Document, NodeId) -> DomResult<Option<NodeId>>,
{
    let element = doc.create_element(tag);
    let active = match build(doc, element).and_then(|active| {
        doc.append_child(owner, element)?;
        Ok(active)
    }) {
        Ok(active) => active,
        Err(err) => {
            discard(doc, element);
            return Err(err);
        }
    };
    if let Some(active) = active {
        doc.scroll_into_view(active)?;
    }
    Ok(element)
}

fn keep_focus(doc: &mut Document, node: NodeId) -> DomResult<()> {
    doc.add_listener(
        node,
        EventType::PointerDown,
        ListenerOptions::default(),
        |_, event| event.prevent_default(),
    )?;
    Ok(())
}

fn build_dropdown(
    doc: &mut Document,
    weak: &Weak<Shared>,
    owner: NodeId,
    def: &ItemDef,
    options: &[SelectOption],
    snapshot: &FormatState,
) -> DomResult<NodeId> {
    let current = normalize_value(&def.value_for(snapshot).unwrap_or_default());

    attach_built(doc, owner, "div", |doc, dropdown| {
        doc.add_class(dropdown, "floatbar-select-dropdown")?;
        doc.set_attribute(dropdown, "role", "listbox")?;

        let mut active = None;
        for option in options.iter().filter(|option| !option.is_placeholder()) {
            let button = doc.create_element("button");
            doc.add_class(button, "floatbar-select-option")?;
            doc.set_attribute(button, "type", "button")?;
            doc.set_attribute(button, "role", "option")?;
            doc.set_attribute(button, "data-value", option.value.as_str())?;
            doc.set_text(button, option.label.as_str())?;
            if let Some(style) = &option.style {
                doc.set_style_text(button, style)?;
            }
            if normalize_value(&option.value) == current {
                doc.add_class(button, ACTIVE_CLASS)?;
                doc.set_attribute(button, "aria-selected", "true")?;
                active.get_or_insert(button);
            }

            keep_focus(doc, button)?;
            let weak = weak.clone();
            let detail = SelectChanged {
                name: def.name.clone(),
                value: option.value.clone(),
            };
            doc.add_listener(button, EventType::Click, ListenerOptions::default(), move |doc, event| {
                event.stop_propagation();
                let event = Event::custom(SELECT_CHANGED, detail.clone());
                if let Err(err) = doc.dispatch(owner, event) {
                    tracing::warn!(target: targets::POPOVER, %err, "failed to dispatch select change");
                }
                close_popover_weak(&weak, doc);
            })?;
            doc.append_child(dropdown, button)?;
        }
        Ok(active)
    })
}

fn build_palette(
    doc: &mut Document,
    weak: &Weak<Shared>,
    owner: NodeId,
    colors: &[String],
    command: Option<&str>,
) -> DomResult<NodeId> {
    attach_built(doc, owner, "div", |doc, picker| {
        doc.add_class(picker, "floatbar-color-picker")?;

        let reset = doc.create_element("div");
        doc.add_class(reset, "floatbar-color-reset")?;
        doc.set_text(reset, "Default")?;
        pick_on_click(doc, weak, owner, reset, RESET_COLOR.to_string(), command)?;
        doc.append_child(picker, reset)?;

        let grid = doc.create_element("div");
        doc.add_class(grid, "floatbar-color-grid")?;
        for color in colors {
            let swatch = doc.create_element("button");
            doc.add_class(swatch, "floatbar-color-swatch")?;
            doc.set_attribute(swatch, "type", "button")?;
            doc.set_attribute(swatch, "data-color", color.as_str())?;
            doc.set_attribute(swatch, "title", color.as_str())?;
            doc.set_style(swatch, "background-color", color.as_str())?;
            pick_on_click(doc, weak, owner, swatch, color.clone(), command)?;
            doc.append_child(grid, swatch)?;
        }
        doc.append_child(picker, grid)?;
        Ok(None)
    })
}

fn pick_on_click(
    doc: &mut Document,
    weak: &Weak<Shared>,
    owner: NodeId,
    node: NodeId,
    color: String,
    command: Option<&str>,
) -> DomResult<()> {
    keep_focus(doc, node)?;
    let weak = weak.clone();
    let detail = ColorSelected {
        color,
        command: command.map(str::to_string),
    };
    doc.add_listener(node, EventType::Click, ListenerOptions::default(), move |doc, event| {
        event.stop_propagation();
        let event = Event::custom(COLOR_SELECTED, detail.clone());
        if let Err(err) = doc.dispatch(owner, event) {
            tracing::warn!(target: targets::POPOVER, %err, "failed to dispatch color selection");
        }
        close_popover_weak(&weak, doc);
    })?;
    Ok(())
}
