//! One-time injection of the toolbar stylesheet and the shared link modal.
//!
//! Both injections are idempotent per document: they look for what they
//! would insert and do nothing when it is already there, whoever put it there.

use floatbar_core::logging::targets;
use floatbar_core::{Document, DomResult, NodeId};

/// Id of the injected toolbar stylesheet.
pub const TOOLBAR_STYLE_ID: &str = "floatbar-toolbar-styles";

/// Id of the injected editor stylesheet.
pub const EDITOR_STYLE_ID: &str = "floatbar-editor-styles";

/// The toolbar stylesheet.
pub const TOOLBAR_CSS: &str = include_str!("../assets/toolbar.css");

/// Resets heading margins inside the editing surface.
pub const EDITOR_CSS: &str = "h1, h2, h3, h4, h5, h6 {\n  margin: 0 !important;\n  padding: 0 !important;\n}\n";

/// Class of the link modal.
pub const LINK_MODAL_CLASS: &str = "link-modal";
/// Class of the link modal's backdrop.
pub const LINK_BACKDROP_CLASS: &str = "link-modal-backdrop";
/// Id of the link form.
pub const LINK_FORM_ID: &str = "link-form";
/// Id of the URL input.
pub const LINK_INPUT_ID: &str = "link-url-input";
/// Id of the remove-link button.
pub const LINK_REMOVE_ID: &str = "link-remove";
/// Id of the cancel button.
pub const LINK_CANCEL_ID: &str = "link-cancel";

const LINK_ICON: &str = r#"<svg viewBox="0 0 24 24"><path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71"/><path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71"/></svg>"#;
const TRASH_ICON: &str = r#"<svg viewBox="0 0 24 24"><path d="M3 6h18M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2"/></svg>"#;

/// What [`inject_toolbar_styles`] inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InjectOutcome {
    pub stylesheet: bool,
    pub link_modal: bool,
}

/// Insert the toolbar stylesheet and the link modal, each only if missing.
///
/// ```
/// use floatbar::inject::inject_toolbar_styles;
/// use floatbar_core::Document;
///
/// let mut doc = Document::new();
/// assert!(inject_toolbar_styles(&mut doc)?.stylesheet);
/// assert!(!inject_toolbar_styles(&mut doc)?.stylesheet);
/// # Ok::<(), floatbar_core::DomError>(())
/// ```
pub fn inject_toolbar_styles(doc: &mut Document) -> DomResult<InjectOutcome> {
    let mut outcome = InjectOutcome::default();

    if doc.element_by_id(TOOLBAR_STYLE_ID).is_none() {
        append_style(doc, TOOLBAR_STYLE_ID, TOOLBAR_CSS)?;
        outcome.stylesheet = true;
    }

    if doc.query_class(doc.root(), LINK_MODAL_CLASS).is_none() {
        build_link_modal(doc)?;
        outcome.link_modal = true;
    }

    tracing::debug!(target: targets::INJECT, ?outcome, "injected toolbar assets");
    Ok(outcome)
}

/// Insert the editor stylesheet if missing. Returns whether it was inserted.
pub fn inject_editor_styles(doc: &mut Document) -> DomResult<bool> {
    if doc.element_by_id(EDITOR_STYLE_ID).is_some() {
        return Ok(false);
    }
    append_style(doc, EDITOR_STYLE_ID, EDITOR_CSS)?;
    tracing::debug!(target: targets::INJECT, "injected editor styles");
    Ok(true)
}

fn append_style(doc: &mut Document, id: &str, css: &str) -> DomResult<NodeId> {
    let style = doc.create_element("style");
    doc.set_element_id(style, id)?;
    doc.set_text(style, css)?;
    doc.append_child(doc.head(), style)?;
    Ok(style)
}

fn child(doc: &mut Document, parent: NodeId, tag: &str, class: Option<&str>) -> DomResult<NodeId> {
    let node = doc.create_element(tag);
    if let Some(class) = class {
        doc.add_class(node, class)?;
    }
    doc.append_child(parent, node)?;
    Ok(node)
}

fn build_link_modal(doc: &mut Document) -> DomResult<()> {
    let body = doc.body();
    child(doc, body, "div", Some(LINK_BACKDROP_CLASS))?;
    let modal = child(doc, body, "div", Some(LINK_MODAL_CLASS))?;

    let form = child(doc, modal, "form", None)?;
    doc.set_element_id(form, LINK_FORM_ID)?;

    let input_group = child(doc, form, "div", Some("input-group"))?;
    let icon = child(doc, input_group, "span", None)?;
    doc.set_markup(icon, LINK_ICON)?;
    let input = child(doc, input_group, "input", None)?;
    doc.set_attribute(input, "type", "text")?;
    doc.set_element_id(input, LINK_INPUT_ID)?;
    doc.set_attribute(input, "placeholder", "https://...")?;
    doc.set_attribute(input, "autocomplete", "off")?;

    let actions = child(doc, form, "div", Some("actions"))?;
    let left = child(doc, actions, "div", Some("left"))?;
    let remove = child(doc, left, "button", Some("remove"))?;
    doc.set_attribute(remove, "type", "button")?;
    doc.set_element_id(remove, LINK_REMOVE_ID)?;
    doc.set_attribute(remove, "title", "Remove link")?;
    doc.set_markup(remove, TRASH_ICON)?;

    let right = child(doc, actions, "div", Some("right"))?;
    let cancel = child(doc, right, "button", Some("cancel"))?;
    doc.set_attribute(cancel, "type", "button")?;
    doc.set_element_id(cancel, LINK_CANCEL_ID)?;
    doc.set_text(cancel, "Cancel")?;
    let apply = child(doc, right, "button", Some("apply"))?;
    doc.set_attribute(apply, "type", "submit")?;
    doc.set_text(apply, "Apply")?;

    Ok(())
}
