//! Element construction for the toolbar root and its controls.

use std::sync::Weak;

use floatbar_core::logging::targets;
use floatbar_core::{Document, DomResult, EventType, ListenerId, ListenerOptions, NodeId};

use super::{RenderedItem, Shared, ToolbarState, popover};
use crate::catalog::{ItemDef, ItemKind};

/// Class of the toolbar root.
pub const ROOT_CLASS: &str = "floatbar";

/// Build the root and one control per resolved item.
///
/// On failure the partially built root is removed and the item table is left
/// empty.
pub(super) fn build_toolbar(
    doc: &mut Document,
    state: &mut ToolbarState,
    weak: &Weak<Shared>,
) -> DomResult<NodeId> {
    let root = doc.create_element("div");
    match populate(doc, root, state, weak) {
        Ok(()) => Ok(root),
        Err(err) => {
            state.items.clear();
            state.index.clear();
            if let Err(cleanup) = doc.remove(root) {
                tracing::warn!(target: targets::TOOLBAR, %cleanup, "failed to discard partial toolbar");
            }
            Err(err)
        }
    }
}

fn populate(
    doc: &mut Document,
    root: NodeId,
    state: &mut ToolbarState,
    weak: &Weak<Shared>,
) -> DomResult<()> {
    doc.add_class(root, ROOT_CLASS)?;
    doc.set_attribute(root, "role", "toolbar")?;
    doc.set_attribute(root, "aria-label", "Text formatting")?;
    doc.toggle_class(root, "floatbar--flex", state.options.flex)?;
    doc.toggle_class(root, "floatbar--wrap", state.options.wrap)?;
    doc.toggle_class(root, "floatbar--responsive", state.options.responsive)?;

    let names = state.options.item_names();
    let defs: Vec<ItemDef> = state
        .catalog
        .resolve(names.as_deref())
        .into_iter()
        .cloned()
        .collect();

    let mut last_group: Option<String> = None;
    for def in defs {
        if let (Some(last), Some(group)) = (&last_group, &def.group) {
            if last != group {
                let sep = doc.create_element("span");
                doc.add_class(sep, "floatbar-sep")?;
                doc.set_attribute(sep, "aria-hidden", "true")?;
                doc.append_child(root, sep)?;
            }
        }

        let control = build_control(doc, &def, weak)?;
        // Keep focus (and the selection) in the editing surface.
        doc.add_listener(
            control.element,
            EventType::PointerDown,
            ListenerOptions::CAPTURE,
            |_, event| event.prevent_default(),
        )?;
        doc.append_child(root, control.element)?;

        if def.group.is_some() {
            last_group = def.group.clone();
        }
        state.index.insert(def.name.clone(), state.items.len());
        state.items.push(RenderedItem {
            def,
            element: control.element,
            trigger: control.trigger,
            label: control.label,
            indicator: control.indicator,
        });
    }
    Ok(())
}

struct Control {
    element: NodeId,
    trigger: NodeId,
    label: Option<NodeId>,
    indicator: Option<NodeId>,
}

fn build_control(doc: &mut Document, def: &ItemDef, weak: &Weak<Shared>) -> DomResult<Control> {
    let label = def.label.as_deref().unwrap_or(def.name.as_str());
    match &def.kind {
        ItemKind::Button { icon, command, .. } => {
            let button = icon_button(doc, def, label, icon.as_deref(), command.as_deref())?;
            doc.set_attribute(button, "aria-pressed", "false")?;
            Ok(Control {
                element: button,
                trigger: button,
                label: None,
                indicator: None,
            })
        }
        ItemKind::Select { .. } => {
            let wrapper = doc.create_element("div");
            doc.add_class(wrapper, "floatbar-select-wrapper")?;
            doc.set_attribute(wrapper, "data-name", &def.name)?;

            let button = doc.create_element("button");
            doc.add_class(button, "floatbar-select-btn")?;
            doc.set_attribute(button, "type", "button")?;
            doc.set_attribute(button, "aria-haspopup", "listbox")?;
            doc.set_attribute(button, "aria-label", label)?;

            let text = doc.create_element("span");
            doc.add_class(text, "label")?;
            doc.set_text(text, def.placeholder_label())?;
            doc.append_child(button, text)?;

            let caret = doc.create_element("span");
            doc.add_class(caret, "floatbar-caret")?;
            doc.set_attribute(caret, "aria-hidden", "true")?;
            doc.append_child(button, caret)?;

            doc.append_child(wrapper, button)?;
            toggle_on_click(doc, button, def, weak)?;
            Ok(Control {
                element: wrapper,
                trigger: button,
                label: Some(text),
                indicator: None,
            })
        }
        ItemKind::ColorPicker {
            icon,
            command,
            indicator_fallback,
            ..
        } => {
            let wrapper = doc.create_element("div");
            doc.add_class(wrapper, "floatbar-color-wrapper")?;
            doc.set_attribute(wrapper, "data-name", &def.name)?;

            let button = icon_button(doc, def, label, icon.as_deref(), command.as_deref())?;

            let svg = doc.create_element("svg");
            doc.add_class(svg, "floatbar-indicator")?;
            doc.set_attribute(svg, "viewBox", "0 0 24 4")?;
            doc.set_attribute(svg, "aria-hidden", "true")?;
            let path = doc.create_element("path");
            doc.add_class(path, "color-indicator")?;
            doc.set_attribute(path, "d", "M4 2h16")?;
            doc.set_style(path, "stroke", indicator_fallback.as_str())?;
            doc.append_child(svg, path)?;
            doc.append_child(button, svg)?;

            doc.append_child(wrapper, button)?;
            toggle_on_click(doc, button, def, weak)?;
            Ok(Control {
                element: wrapper,
                trigger: button,
                label: None,
                indicator: Some(path),
            })
        }
    }
}

fn icon_button(
    doc: &mut Document,
    def: &ItemDef,
    label: &str,
    icon: Option<&str>,
    command: Option<&str>,
) -> DomResult<NodeId> {
    let button = doc.create_element("button");
    doc.add_class(button, "floatbar-btn")?;
    doc.set_attribute(button, "type", "button")?;
    doc.set_attribute(button, "data-name", &def.name)?;
    if let Some(command) = command {
        doc.set_attribute(button, "data-command", command)?;
    }
    doc.set_attribute(button, "aria-label", label)?;
    doc.set_attribute(button, "title", label)?;

    let span = doc.create_element("span");
    doc.add_class(span, "floatbar-icon")?;
    match icon {
        Some(icon) if icon.trim_start().starts_with('<') => doc.set_markup(span, icon)?,
        Some(icon) => doc.set_text(span, icon)?,
        None => doc.set_text(span, label)?,
    }
    doc.append_child(button, span)?;
    Ok(button)
}

fn toggle_on_click(
    doc: &mut Document,
    button: NodeId,
    def: &ItemDef,
    weak: &Weak<Shared>,
) -> DomResult<ListenerId> {
    let weak = weak.clone();
    let name = def.name.clone();
    doc.add_listener(button, EventType::Click, ListenerOptions::default(), move |doc, event| {
        event.stop_propagation();
        popover::toggle(&weak, doc, &name);
    })
}

/// Close the open popover when a click lands outside it.
pub(super) fn install_outside_click(
    doc: &mut Document,
    weak: &Weak<Shared>,
) -> DomResult<ListenerId> {
    let weak = weak.clone();
    let root = doc.root();
    doc.add_listener(root, EventType::Click, ListenerOptions::default(), move |doc, event| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let Some(target) = event.target() else {
            return;
        };
        let inside = {
            let state = shared.state.lock();
            match &state.popover {
                Some(open) => doc.is_inclusive_ancestor(open.element, target),
                None => return,
            }
        };
        if !inside {
            popover::close_popover(&shared, doc);
        }
    })
}
