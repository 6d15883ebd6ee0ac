//! The built-in controls, fonts and palette.

use super::item::{ItemDef, SelectOption};
use crate::format_state::FormatState;

/// Default font stacks offered by the `fontFamily` select.
pub const DEFAULT_FONTS: [&str; 10] = [
    "Arial, sans-serif",
    "Helvetica, sans-serif",
    "Times New Roman, serif",
    "Courier New, monospace",
    "Verdana, sans-serif",
    "Georgia, serif",
    "Palatino, serif",
    "Garamond, serif",
    "Bookman, serif",
    "Comic Sans MS, cursive",
];

/// The 6x10 palette shared by both color pickers, row by row.
pub const DEFAULT_COLORS: [&str; 60] = [
    "#000000", "#434343", "#666666", "#999999", "#B7B7B7", "#CCCCCC", "#D9D9D9", "#EFEFEF", "#F3F3F3", "#FFFFFF",
    "#980000", "#FF0000", "#FF9900", "#FFFF00", "#00FF00", "#00FFFF", "#4A86E8", "#0000FF", "#9900FF", "#FF00FF",
    "#E6B8AF", "#F4CCCC", "#FCE5CD", "#FFF2CC", "#D9EAD3", "#D0E0E3", "#C9DAF8", "#CFE2F3", "#D9D2E9", "#EAD1DC",
    "#DD7E6B", "#EA9999", "#F9CB9C", "#FFE599", "#B6D7A8", "#A2C4C9", "#A4C2F4", "#9FC5E8", "#B4A7D6", "#D5A6BD",
    "#CC4125", "#E06666", "#F6B26B", "#FFD966", "#93C47D", "#76A5AF", "#6D9EEB", "#6FA8DC", "#8E7CC3", "#C27BA0",
    "#A61C00", "#CC0000", "#E69138", "#F1C232", "#6AA84F", "#45818E", "#3C78D8", "#3D85C6", "#674EA7", "#A64D79",
];

mod icons {
    pub const BOLD: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M6 12h9a4 4 0 0 1 0 8H7a1 1 0 0 1-1-1V5a1 1 0 0 1 1-1h7a4 4 0 0 1 0 8"/></svg>"#;
    pub const ITALIC: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><line x1="19" y1="4" x2="10" y2="4"/><line x1="14" y1="20" x2="5" y2="20"/><line x1="15" y1="4" x2="9" y2="20"/></svg>"#;
    pub const UNDERLINE: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M6 4v6a6 6 0 0 0 12 0V4"/><line x1="4" y1="20" x2="20" y2="20"/></svg>"#;
    pub const STRIKE: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M16 4H9a3 3 0 0 0-2.83 4"/><path d="M14 12a4 4 0 0 1 0 8H6"/><line x1="4" y1="12" x2="20" y2="12"/></svg>"#;
    pub const TEXT_COLOR: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M4 20h16"/><path d="m6 16 6-11 6 11"/><path d="M8 12h8"/></svg>"#;
    pub const HIGHLIGHT: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="m9 11-6 6v3h9l3-3"/><path d="m22 12-4.6 4.6a2 2 0 0 1-2.8 0l-5.2-5.2a2 2 0 0 1 0-2.8L14 4"/></svg>"#;
    pub const CLEAR: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M8 5h11a1 1 0 0 1 1 1v2a1 1 0 0 1-1 1h-1"/><path d="M11 5v14"/><path d="M7 19h8"/><line x1="2" y1="2" x2="22" y2="22"/></svg>"#;
    pub const LINK: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71"/><path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71"/></svg>"#;
    pub const ALIGN_LEFT: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><line x1="21" y1="6" x2="3" y2="6"/><line x1="15" y1="12" x2="3" y2="12"/><line x1="17" y1="18" x2="3" y2="18"/></svg>"#;
    pub const ALIGN_CENTER: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><line x1="21" y1="6" x2="3" y2="6"/><line x1="19" y1="12" x2="5" y2="12"/><line x1="21" y1="18" x2="3" y2="18"/></svg>"#;
    pub const ALIGN_RIGHT: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><line x1="21" y1="6" x2="3" y2="6"/><line x1="21" y1="12" x2="9" y2="12"/><line x1="21" y1="18" x2="7" y2="18"/></svg>"#;
    pub const ALIGN_JUSTIFY: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><line x1="3" y1="6" x2="21" y2="6"/><line x1="3" y1="12" x2="21" y2="12"/><line x1="3" y1="18" x2="21" y2="18"/></svg>"#;
    pub const BULLETS: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M3 12h.01"/><path d="M3 18h.01"/><path d="M3 6h.01"/><path d="M8 12h13"/><path d="M8 18h13"/><path d="M8 6h13"/></svg>"#;
    pub const NUMBERS: &str = r#"<svg viewBox="0 0 24 24" aria-hidden="true"><path d="M10 12h11"/><path d="M10 18h11"/><path d="M10 6h11"/><path d="M4 10h2"/><path d="M4 6h1v4"/><path d="M6 18H4c0-1 2-2 2-3s-1-1.5-2-1"/></svg>"#;
}

fn block_value(state: &FormatState) -> String {
    if state.truthy("heading") {
        format!("h{}", state.text("heading"))
    } else if state.truthy("blockquote") {
        "blockquote".to_string()
    } else {
        "p".to_string()
    }
}

fn font_options() -> Vec<SelectOption> {
    DEFAULT_FONTS
        .iter()
        .map(|&stack| {
            let family = stack.split(',').next().unwrap_or(stack);
            SelectOption::new(family, stack).with_style(format!("font-family: {stack}"))
        })
        .collect()
}

fn palette() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()
}

fn toggle(name: &str, label: &str, icon: &str, group: &str, is_active: fn(&FormatState) -> bool) -> ItemDef {
    ItemDef::button(name, name)
        .with_label(label)
        .with_icon(icon)
        .with_group(group)
        .with_active(is_active)
}

/// The default controls in display order.
pub fn standard_items() -> Vec<ItemDef> {
    let mut block_options = vec![SelectOption::new("Paragraph", "p")];
    block_options.extend((1..=6).map(|level| SelectOption::new(format!("Heading {level}"), format!("h{level}"))));
    block_options.push(SelectOption::new("Quote", "blockquote"));

    vec![
        ItemDef::select("formatBlock", block_options)
            .with_label("Text Style")
            .with_group("block")
            .with_value(block_value),
        ItemDef::select("fontFamily", font_options())
            .with_label("Font Family")
            .with_group("font")
            .with_value(|f| f.text("fontFamily")),
        toggle("bold", "Bold", icons::BOLD, "inline", |f| f.truthy("bold")),
        toggle("italic", "Italic", icons::ITALIC, "inline", |f| f.truthy("italic")),
        toggle("underline", "Underline", icons::UNDERLINE, "inline", |f| f.truthy("underline")),
        toggle("strike", "Strike", icons::STRIKE, "inline", |f| f.truthy("strike")),
        ItemDef::color_picker("color", "setColor", palette())
            .with_label("Text Color")
            .with_icon(icons::TEXT_COLOR)
            .with_group("color")
            .with_value(|f| f.text("color"))
            .with_indicator_fallback("currentColor"),
        ItemDef::color_picker("backgroundColor", "setBackgroundColor", palette())
            .with_label("Highlight Color")
            .with_icon(icons::HIGHLIGHT)
            .with_group("color")
            .with_value(|f| f.text("backgroundColor"))
            .with_indicator_fallback("transparent"),
        ItemDef::button("clearFormat", "clearFormat")
            .with_label("Clear Formatting")
            .with_icon(icons::CLEAR)
            .with_group("inline"),
        toggle("link", "Link", icons::LINK, "link", |f| f.is_present_non_null("link")),
        toggle("alignLeft", "Align Left", icons::ALIGN_LEFT, "align", |f| f.equals("align", "left")),
        toggle("alignCenter", "Align Center", icons::ALIGN_CENTER, "align", |f| f.equals("align", "center")),
        toggle("alignRight", "Align Right", icons::ALIGN_RIGHT, "align", |f| f.equals("align", "right")),
        toggle("alignJustify", "Justify", icons::ALIGN_JUSTIFY, "align", |f| f.equals("align", "justify")),
        toggle("unorderedList", "Bullet list", icons::BULLETS, "list", |f| f.equals("list", "unordered")),
        toggle("orderedList", "Numbered list", icons::NUMBERS, "list", |f| f.equals("list", "ordered")),
    ]
}
