//! Mirroring a format-state snapshot onto the rendered controls.

use floatbar_core::logging::targets;
use floatbar_core::{Document, DomResult};

use super::popover::normalize_value;
use super::{ACTIVE_CLASS, RenderedItem};
use crate::catalog::{ItemDef, ItemKind, SelectOption};
use crate::format_state::FormatState;

pub(super) fn apply_snapshot(doc: &mut Document, items: &[RenderedItem], snapshot: &FormatState) {
    for item in items {
        if let Err(err) = apply_item(doc, item, snapshot) {
            tracing::warn!(target: targets::TOOLBAR, item = %item.def.name, %err, "failed to reflect format state");
        }
    }
}

fn apply_item(doc: &mut Document, item: &RenderedItem, snapshot: &FormatState) -> DomResult<()> {
    match &item.def.kind {
        ItemKind::Select {
            options,
            get_value: Some(get_value),
        } => {
            if let Some(label) = item.label {
                let value = get_value(snapshot);
                doc.set_text(label, select_label(&item.def, options, &value))?;
            }
        }
        ItemKind::ColorPicker {
            get_value: Some(get_value),
            indicator_fallback,
            ..
        } => {
            if let Some(indicator) = item.indicator {
                let color = get_value(snapshot);
                if shows_color(&color) {
                    doc.set_style(indicator, "stroke", color)?;
                    doc.set_style(indicator, "display", "block")?;
                } else {
                    doc.set_style(indicator, "stroke", indicator_fallback.as_str())?;
                }
            }
        }
        ItemKind::Button {
            is_active: Some(is_active),
            ..
        } => {
            let active = is_active(snapshot);
            doc.toggle_class(item.trigger, ACTIVE_CLASS, active)?;
            doc.set_attribute(item.trigger, "aria-pressed", active.to_string())?;
        }
        _ => {}
    }
    Ok(())
}

/// Text shown on a select for a value.
///
/// The label of the option matching `value`; else the value's first
/// comma-separated token without quotes; else the placeholder label.
pub(super) fn select_label(def: &ItemDef, options: &[SelectOption], value: &str) -> String {
    let wanted = normalize_value(value);
    if let Some(option) = options
        .iter()
        .find(|option| normalize_value(&option.value) == wanted)
    {
        return option.label.clone();
    }
    if !value.is_empty() {
        let first = value.split(',').next().unwrap_or(value);
        return first.replace(['\'', '"'], "");
    }
    def.placeholder_label().to_string()
}

fn shows_color(color: &str) -> bool {
    !matches!(color, "" | "inherit" | "initial" | "transparent")
}
