//! Translation of control input into [`Command`]s.

use std::sync::{Arc, Weak};

use floatbar_core::logging::targets;
use floatbar_core::{Document, DomResult, Event, EventType, ListenerOptions, NodeId};

use super::popover::{COLOR_SELECTED, ColorSelected, SELECT_CHANGED, SelectChanged};
use super::{Shared, ToolbarState, link};
use crate::catalog::ItemKind;
use crate::command::Command;

/// Attach the per-control command listeners, once per built element set.
pub(super) fn attach(
    doc: &mut Document,
    state: &mut ToolbarState,
    weak: &Weak<Shared>,
) -> DomResult<()> {
    if state.listeners_attached {
        return Ok(());
    }

    for item in &state.items {
        let weak = weak.clone();
        let name = item.def.name.clone();
        match &item.def.kind {
            ItemKind::Select { .. } => {
                doc.add_listener(
                    item.element,
                    EventType::Custom(SELECT_CHANGED),
                    ListenerOptions::default(),
                    move |doc, event| on_select_changed(&weak, doc, event),
                )?;
            }
            ItemKind::ColorPicker { .. } => {
                doc.add_listener(
                    item.element,
                    EventType::Custom(COLOR_SELECTED),
                    ListenerOptions::default(),
                    move |doc, event| on_color_selected(&weak, doc, event),
                )?;
            }
            ItemKind::Button { .. } => {
                let trigger = item.trigger;
                doc.add_listener(
                    trigger,
                    EventType::Click,
                    ListenerOptions::default(),
                    move |doc, _| on_button_click(&weak, doc, &name, trigger),
                )?;
            }
        }
    }

    state.listeners_attached = true;
    Ok(())
}

/// The command a select dispatches for a picked value.
///
/// `formatBlock` maps `p`, `blockquote` and `h<level>` onto block commands
/// (any other value is sent as a command of that name), `fontFamily` sets the
/// font stack, and any other select sends its own name with the value.
///
/// ```
/// use floatbar::{Command, select_command};
///
/// assert_eq!(select_command("formatBlock", "h3"), Command::Heading(3));
/// assert_eq!(
///     select_command("fontFamily", "Georgia, serif"),
///     Command::SetFontFamily("Georgia, serif".into()),
/// );
/// ```
pub fn select_command(item: &str, value: &str) -> Command {
    match item {
        "formatBlock" => match value {
            "p" => Command::Paragraph,
            "blockquote" => Command::Blockquote,
            _ => match heading_level(value) {
                Some(level) => Command::Heading(level),
                None => Command::Custom {
                    name: value.to_string(),
                    argument: None,
                },
            },
        },
        "fontFamily" => Command::SetFontFamily(value.to_string()),
        _ => Command::Custom {
            name: item.to_string(),
            argument: Some(value.to_string()),
        },
    }
}

fn heading_level(value: &str) -> Option<u32> {
    let digits = value.strip_prefix('h')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// The command a color picker dispatches. `initial`, sent by the reset entry,
/// becomes `inherit`.
pub fn color_command(command: &str, color: &str) -> Command {
    let color = if color == "initial" { "inherit" } else { color };
    Command::from_parts(command, Some(color.to_string()))
}

fn on_select_changed(weak: &Weak<Shared>, doc: &mut Document, event: &mut Event) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Some(detail) = event.detail::<SelectChanged>() else {
        return;
    };
    if detail.value.is_empty() {
        return;
    }
    let command = select_command(&detail.name, &detail.value);
    dispatch_command(&shared, doc, command);
}

fn on_color_selected(weak: &Weak<Shared>, doc: &mut Document, event: &mut Event) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Some(ColorSelected {
        color,
        command: Some(command),
    }) = event.detail::<ColorSelected>()
    else {
        return;
    };
    let command = color_command(command, color);
    dispatch_command(&shared, doc, command);
}

fn on_button_click(weak: &Weak<Shared>, doc: &mut Document, name: &str, trigger: NodeId) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let (command, bound) = {
        let state = shared.state.lock();
        let command = state
            .item(name)
            .and_then(|item| item.def.command())
            .map(str::to_string);
        (command, state.sink.is_some())
    };
    let Some(command) = command else {
        return;
    };
    if !bound {
        tracing::trace!(target: targets::COMMANDS, %command, "no sink bound, ignoring click");
        return;
    }

    if command == "link" {
        link::request_link(&shared, doc, trigger);
    } else {
        dispatch_command(&shared, doc, Command::from_parts(&command, None));
    }
}

/// Forward a command to the bound sink; without one the command is dropped.
pub(crate) fn dispatch_command(shared: &Arc<Shared>, doc: &mut Document, command: Command) {
    let sink = shared.state.lock().sink.clone();
    match sink {
        Some(sink) => {
            tracing::debug!(target: targets::COMMANDS, %command, "dispatching command");
            sink(doc, command);
        }
        None => tracing::trace!(target: targets::COMMANDS, %command, "no sink bound, dropping command"),
    }
}
