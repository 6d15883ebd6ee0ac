//! End-to-end behavior of the toolbar inside a document.

use std::sync::Arc;

use floatbar::inject::{LINK_CANCEL_ID, LINK_INPUT_ID, LINK_REMOVE_ID, inject_toolbar_styles};
use floatbar::{
    ACTIVE_CLASS, Command, Document, FormatState, FormatToolbar, ItemCatalog, ItemDef, NodeId,
    Rect, SelectOption, ToolbarOptions, VISIBLE_CLASS,
};
use floatbar_core::Size;
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("floatbar=trace,floatbar_core=debug")
        .with_test_writer()
        .try_init();
}

struct Fixture {
    doc: Document,
    toolbar: FormatToolbar,
    root: NodeId,
    editor: NodeId,
    sent: Arc<Mutex<Vec<Command>>>,
}

impl Fixture {
    fn new(options: ToolbarOptions) -> Self {
        setup();
        let mut doc = Document::with_viewport(Size::new(1024.0, 768.0));
        let editor = doc.create_element("div");
        doc.set_attribute(editor, "contenteditable", "true").unwrap();
        doc.append_child(doc.body(), editor).unwrap();
        doc.focus(editor).unwrap();

        let toolbar = FormatToolbar::new(options);
        let root = toolbar.create(&mut doc).unwrap();
        doc.append_child(doc.body(), root).unwrap();

        Self {
            doc,
            toolbar,
            root,
            editor,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn bound(options: ToolbarOptions) -> Self {
        let mut fixture = Self::new(options);
        fixture.bind();
        fixture
    }

    fn bind(&mut self) {
        let sent = self.sent.clone();
        self.toolbar
            .bind_commands(&mut self.doc, move |_, command| sent.lock().push(command));
    }

    fn click_item(&mut self, name: &str) {
        let node = self.toolbar.item_element(name).unwrap();
        self.doc.click(node).unwrap();
    }

    fn popover_entry(&self, class: &str, attribute: &str, value: &str) -> NodeId {
        let popover = self.toolbar.active_popover().unwrap();
        self.doc
            .query_all_class(popover, class)
            .into_iter()
            .find(|&node| self.doc.attribute(node, attribute) == Some(value))
            .unwrap()
    }

    fn sent(&self) -> Vec<Command> {
        self.sent.lock().clone()
    }
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn test_renders_whole_catalog_by_default() {
    let fx = Fixture::new(ToolbarOptions::default());
    let catalog = ItemCatalog::standard();
    assert_eq!(fx.toolbar.item_names().len(), catalog.len());

    let controls = fx
        .doc
        .children(fx.root)
        .unwrap()
        .iter()
        .filter(|&&child| !fx.doc.has_class(child, "floatbar-sep"))
        .count();
    assert_eq!(controls, catalog.len());
}

#[test]
fn test_allow_list_order_and_filtering() {
    let fx = Fixture::new(
        ToolbarOptions::default().with_items(["italic", "bold", "nope", "bold", "formatBlock"]),
    );
    assert_eq!(fx.toolbar.item_names(), ["italic", "bold", "formatBlock"]);
}

#[test]
fn test_empty_allow_list_renders_everything() {
    let fx = Fixture::new(ToolbarOptions::default().with_items(Vec::<String>::new()));
    assert_eq!(fx.toolbar.item_names().len(), ItemCatalog::standard().len());
}

#[test]
fn test_pressing_controls_keeps_editor_focus() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let bold = fx.toolbar.item_element("bold").unwrap();
    assert!(!fx.doc.pointer_down(bold).unwrap());

    let select = fx.toolbar.item_element("fontFamily").unwrap();
    assert!(!fx.doc.pointer_down(select).unwrap());
    assert_eq!(fx.doc.focused(), Some(fx.editor));
}

// =========================================================================
// Popovers
// =========================================================================

#[test]
fn test_double_toggle_closes_popover() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    fx.click_item("formatBlock");
    assert!(fx.toolbar.active_popover().is_some());
    fx.click_item("formatBlock");
    assert_eq!(fx.toolbar.active_popover(), None);
    assert!(fx.doc.query_all_class(fx.root, "floatbar-select-dropdown").is_empty());
}

#[test]
fn test_popovers_are_mutually_exclusive() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let opened = Arc::new(Mutex::new(Vec::new()));
    let closed = Arc::new(Mutex::new(0));
    let opened_clone = opened.clone();
    let closed_clone = closed.clone();
    fx.toolbar
        .popover_opened()
        .connect(move |name| opened_clone.lock().push(name.clone()));
    fx.toolbar.popover_closed().connect(move |_| *closed_clone.lock() += 1);

    fx.click_item("formatBlock");
    fx.click_item("fontFamily");
    fx.click_item("color");

    assert_eq!(fx.toolbar.active_popover_item().as_deref(), Some("color"));
    assert!(fx.doc.query_all_class(fx.root, "floatbar-select-dropdown").is_empty());
    assert_eq!(fx.doc.query_all_class(fx.root, "floatbar-color-picker").len(), 1);
    assert_eq!(*opened.lock(), ["formatBlock", "fontFamily", "color"]);
    assert_eq!(*closed.lock(), 2);
}

#[test]
fn test_click_outside_closes_popover() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    fx.click_item("backgroundColor");
    let picker = fx.toolbar.active_popover().unwrap();

    let grid = fx.doc.query_class(picker, "floatbar-color-grid").unwrap();
    fx.doc.click(grid).unwrap();
    assert_eq!(fx.toolbar.active_popover(), Some(picker));

    fx.doc.click(fx.editor).unwrap();
    assert_eq!(fx.toolbar.active_popover(), None);
    assert!(!fx.doc.contains(picker));
}

#[test]
fn test_palette_layout() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    fx.click_item("color");
    let picker = fx.toolbar.active_popover().unwrap();
    let reset = fx.doc.query_class(picker, "floatbar-color-reset").unwrap();
    assert_eq!(fx.doc.text(reset), Some("Default"));

    let swatches = fx.doc.query_all_class(picker, "floatbar-color-swatch");
    assert_eq!(swatches.len(), floatbar::catalog::DEFAULT_COLORS.len());
    assert_eq!(fx.doc.attribute(swatches[0], "data-color"), Some("#000000"));
    assert_eq!(fx.doc.style(swatches[0], "background-color"), Some("#000000"));
}

// =========================================================================
// State reflection
// =========================================================================

#[test]
fn test_active_state_is_reversible() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let bold = fx.toolbar.item_element("bold").unwrap();
    assert_eq!(fx.doc.attribute(bold, "aria-pressed"), Some("false"));

    fx.toolbar
        .update_state(&mut fx.doc, Some(&FormatState::new().with("bold", true)));
    assert!(fx.doc.has_class(bold, ACTIVE_CLASS));
    assert_eq!(fx.doc.attribute(bold, "aria-pressed"), Some("true"));

    fx.toolbar
        .update_state(&mut fx.doc, Some(&FormatState::new().with("bold", false)));
    assert!(!fx.doc.has_class(bold, ACTIVE_CLASS));
    assert_eq!(fx.doc.attribute(bold, "aria-pressed"), Some("false"));
}

#[test]
fn test_none_snapshot_keeps_stale_visuals() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let snapshot = FormatState::new().with("italic", true).with("align", "center");
    fx.toolbar.update_state(&mut fx.doc, Some(&snapshot));
    fx.toolbar.update_state(&mut fx.doc, None);

    let italic = fx.toolbar.item_element("italic").unwrap();
    let center = fx.toolbar.item_element("alignCenter").unwrap();
    assert!(fx.doc.has_class(italic, ACTIVE_CLASS));
    assert!(fx.doc.has_class(center, ACTIVE_CLASS));
    assert_eq!(fx.toolbar.last_state(), Some(snapshot));
}

#[test]
fn test_select_labels_follow_state() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let block = fx.toolbar.item_element("formatBlock").unwrap();
    let font = fx.toolbar.item_element("fontFamily").unwrap();
    let block_label = fx.doc.query_class(block, "label").unwrap();
    let font_label = fx.doc.query_class(font, "label").unwrap();
    assert_eq!(fx.doc.text(font_label), Some("Font Family"));

    let snapshot = FormatState::new()
        .with("heading", 3)
        .with("fontFamily", "'Georgia', serif");
    fx.toolbar.update_state(&mut fx.doc, Some(&snapshot));
    assert_eq!(fx.doc.text(block_label), Some("Heading 3"));
    assert_eq!(fx.doc.text(font_label), Some("Georgia"));

    let unknown = FormatState::new().with("fontFamily", "\"Fira Sans\", sans-serif");
    fx.toolbar.update_state(&mut fx.doc, Some(&unknown));
    assert_eq!(fx.doc.text(block_label), Some("Paragraph"));
    assert_eq!(fx.doc.text(font_label), Some("Fira Sans"));
}

#[test]
fn test_color_indicator_follows_state() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let color = fx.toolbar.item_element("color").unwrap();
    let highlight = fx.toolbar.item_element("backgroundColor").unwrap();
    let color_path = fx.doc.query_class(color, "color-indicator").unwrap();
    let highlight_path = fx.doc.query_class(highlight, "color-indicator").unwrap();

    let snapshot = FormatState::new()
        .with("color", "#FF0000")
        .with("backgroundColor", "transparent");
    fx.toolbar.update_state(&mut fx.doc, Some(&snapshot));
    assert_eq!(fx.doc.style(color_path, "stroke"), Some("#FF0000"));
    assert_eq!(fx.doc.style(color_path, "display"), Some("block"));
    assert_eq!(fx.doc.style(highlight_path, "stroke"), Some("transparent"));

    fx.toolbar
        .update_state(&mut fx.doc, Some(&FormatState::new().with("color", "inherit")));
    assert_eq!(fx.doc.style(color_path, "stroke"), Some("currentColor"));
}

#[test]
fn test_items_without_state_hooks_ignore_snapshots() {
    setup();
    let catalog = ItemCatalog::new()
        .with(ItemDef::button("strike", "strike").with_label("Strike"))
        .with(ItemDef::select(
            "size",
            vec![
                SelectOption::new("Size", ""),
                SelectOption::new("Large", "large"),
            ],
        ))
        .with(
            ItemDef::color_picker("ink", "setInk", vec!["#000000".into()])
                .with_indicator_fallback("#999999"),
        );
    let placeholder = catalog.get("size").unwrap().placeholder_label().to_string();

    let mut doc = Document::new();
    let toolbar = FormatToolbar::with_catalog(ToolbarOptions::default(), catalog);
    toolbar.create(&mut doc).unwrap();
    let strike = toolbar.item_element("strike").unwrap();
    let size_label = doc
        .query_class(toolbar.item_element("size").unwrap(), "label")
        .unwrap();
    let ink_path = doc
        .query_class(toolbar.item_element("ink").unwrap(), "color-indicator")
        .unwrap();

    let snapshot = FormatState::new()
        .with("strike", true)
        .with("size", "large")
        .with("ink", "#FF0000");
    toolbar.update_state(&mut doc, Some(&snapshot));

    assert_eq!(doc.text(size_label), Some(placeholder.as_str()));
    assert_eq!(doc.style(ink_path, "stroke"), Some("#999999"));
    assert_ne!(doc.style(ink_path, "display"), Some("block"));
    assert!(!doc.has_class(strike, ACTIVE_CLASS));
    assert_eq!(doc.attribute(strike, "aria-pressed"), Some("false"));
}

#[test]
fn test_whole_float_heading_label() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let block = fx.toolbar.item_element("formatBlock").unwrap();
    let block_label = fx.doc.query_class(block, "label").unwrap();

    let snapshot = FormatState::from_json(r#"{"heading": 2.0}"#).unwrap();
    fx.toolbar.update_state(&mut fx.doc, Some(&snapshot));
    assert_eq!(fx.doc.text(block_label), Some("Heading 2"));
}

#[test]
fn test_custom_renderer_runs_after_updates() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let calls_clone = calls.clone();
    let options = ToolbarOptions::default()
        .with_items(["bold"])
        .with_custom_renderer(move |_, _, items, state| {
            calls_clone
                .lock()
                .push((items.len(), state.map(|s| s.truthy("bold"))));
        });
    let mut fx = Fixture::new(options);
    fx.toolbar
        .update_state(&mut fx.doc, Some(&FormatState::new().with("bold", true)));
    fx.toolbar.update_state(&mut fx.doc, None);

    assert_eq!(*calls.lock(), vec![(1, None), (1, Some(true))]);
}

// =========================================================================
// Commands
// =========================================================================

#[test]
fn test_bold_dispatch() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    fx.click_item("bold");
    fx.click_item("clearFormat");
    fx.click_item("orderedList");
    assert_eq!(
        fx.sent(),
        vec![Command::Bold, Command::ClearFormat, Command::OrderedList]
    );
}

#[test]
fn test_heading_dispatch_from_select() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    fx.click_item("formatBlock");
    let h2 = fx.popover_entry("floatbar-select-option", "data-value", "h2");
    fx.doc.click(h2).unwrap();

    assert_eq!(fx.sent(), vec![Command::Heading(2)]);
    assert_eq!(fx.toolbar.active_popover(), None);
}

#[test]
fn test_font_dispatch_from_select() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    fx.click_item("fontFamily");
    let georgia = fx.popover_entry("floatbar-select-option", "data-value", "Georgia, serif");
    fx.doc.click(georgia).unwrap();
    assert_eq!(
        fx.sent(),
        vec![Command::SetFontFamily("Georgia, serif".into())]
    );
}

#[test]
fn test_color_swatch_and_default_dispatch() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    fx.click_item("color");
    let red = fx.popover_entry("floatbar-color-swatch", "data-color", "#FF0000");
    fx.doc.click(red).unwrap();

    fx.click_item("backgroundColor");
    let picker = fx.toolbar.active_popover().unwrap();
    let reset = fx.doc.query_class(picker, "floatbar-color-reset").unwrap();
    fx.doc.click(reset).unwrap();

    assert_eq!(
        fx.sent(),
        vec![
            Command::SetColor("#FF0000".into()),
            Command::SetBackgroundColor("inherit".into()),
        ]
    );
}

#[test]
fn test_nothing_dispatched_without_sink() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    fx.click_item("bold");
    fx.click_item("formatBlock");
    let p = fx.popover_entry("floatbar-select-option", "data-value", "p");
    fx.doc.click(p).unwrap();
    assert!(fx.sent().is_empty());
    assert!(!fx.toolbar.has_sink());
}

#[test]
fn test_sink_bound_before_create() {
    setup();
    let mut doc = Document::new();
    let toolbar = FormatToolbar::new(ToolbarOptions::default().with_items(["underline"]));
    let sent = Arc::new(Mutex::new(Vec::new()));
    let sink = sent.clone();
    toolbar.bind_commands(&mut doc, move |_, command| sink.lock().push(command));

    toolbar.create(&mut doc).unwrap();
    let underline = toolbar.item_element("underline").unwrap();
    doc.click(underline).unwrap();
    assert_eq!(*sent.lock(), vec![Command::Underline]);
}

#[test]
fn test_rebinding_swaps_sink_without_duplicates() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    let second = Arc::new(Mutex::new(Vec::new()));
    let sink = second.clone();
    fx.toolbar
        .bind_commands(&mut fx.doc, move |_, command| sink.lock().push(command));

    fx.click_item("italic");
    assert!(fx.sent().is_empty());
    assert_eq!(*second.lock(), vec![Command::Italic]);
}

#[test]
fn test_sink_can_update_state_reentrantly() {
    setup();
    let mut doc = Document::new();
    let toolbar = Arc::new(FormatToolbar::new(ToolbarOptions::default()));
    let root = toolbar.create(&mut doc).unwrap();
    doc.append_child(doc.body(), root).unwrap();

    let handle = Arc::downgrade(&toolbar);
    toolbar.bind_commands(&mut doc, move |doc, command| {
        if command == Command::Bold {
            if let Some(toolbar) = handle.upgrade() {
                toolbar.update_state(doc, Some(&FormatState::new().with("bold", true)));
            }
        }
    });

    let bold = toolbar.item_element("bold").unwrap();
    doc.click(bold).unwrap();
    assert!(doc.has_class(bold, ACTIVE_CLASS));
}

// =========================================================================
// Link editing
// =========================================================================

#[test]
fn test_link_modal_apply() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    inject_toolbar_styles(&mut fx.doc).unwrap();
    let link = fx.toolbar.item_element("link").unwrap();
    fx.doc.set_bounds(link, Rect::new(200.0, 100.0, 32.0, 32.0)).unwrap();

    fx.doc.click(link).unwrap();
    assert!(fx.toolbar.is_link_editing());
    let modal = fx.doc.query_class(fx.doc.body(), "link-modal").unwrap();
    let backdrop = fx.doc.query_class(fx.doc.body(), "link-modal-backdrop").unwrap();
    let input = fx.doc.element_by_id(LINK_INPUT_ID).unwrap();
    assert!(fx.doc.has_class(modal, VISIBLE_CLASS));
    assert!(fx.doc.has_class(backdrop, VISIBLE_CLASS));
    assert_eq!(fx.doc.style(modal, "left"), Some("200px"));
    assert_eq!(fx.doc.style(modal, "top"), Some("140px"));
    assert_eq!(fx.doc.focused(), Some(input));

    fx.doc.set_value(input, "https://example.com").unwrap();
    let apply = fx.doc.query_class(modal, "apply").unwrap();
    fx.doc.click(apply).unwrap();

    assert_eq!(fx.sent(), vec![Command::Link("https://example.com".into())]);
    assert!(!fx.doc.has_class(modal, VISIBLE_CLASS));
    assert!(!fx.toolbar.is_link_editing());
    let form = fx.doc.element_by_id("link-form").unwrap();
    assert_eq!(fx.doc.listener_count(form), 0);
}

#[test]
fn test_link_modal_empty_url_only_closes() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    inject_toolbar_styles(&mut fx.doc).unwrap();
    fx.click_item("link");
    let form = fx.doc.element_by_id("link-form").unwrap();
    fx.doc.submit(form).unwrap();
    assert!(fx.sent().is_empty());
    assert!(!fx.toolbar.is_link_editing());
}

#[test]
fn test_link_modal_remove_and_cancel() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    inject_toolbar_styles(&mut fx.doc).unwrap();

    fx.click_item("link");
    let remove = fx.doc.element_by_id(LINK_REMOVE_ID).unwrap();
    fx.doc.click(remove).unwrap();
    assert_eq!(fx.sent(), vec![Command::Unlink]);

    fx.click_item("link");
    let cancel = fx.doc.element_by_id(LINK_CANCEL_ID).unwrap();
    fx.doc.click(cancel).unwrap();
    assert_eq!(fx.sent(), vec![Command::Unlink]);
    assert!(!fx.toolbar.is_link_editing());

    // Listeners from closed sessions must not fire again.
    fx.doc.click(remove).unwrap();
    assert_eq!(fx.sent(), vec![Command::Unlink]);
}

#[test]
fn test_link_modal_reopen_replaces_session() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    inject_toolbar_styles(&mut fx.doc).unwrap();
    fx.click_item("link");
    fx.click_item("link");

    let input = fx.doc.element_by_id(LINK_INPUT_ID).unwrap();
    fx.doc.set_value(input, "https://a.test").unwrap();
    let form = fx.doc.element_by_id("link-form").unwrap();
    assert_eq!(fx.doc.listener_count(form), 1);
    fx.doc.submit(form).unwrap();
    assert_eq!(fx.sent(), vec![Command::Link("https://a.test".into())]);
}

#[test]
fn test_link_prompt_fallback() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    let asked = Arc::new(Mutex::new(Vec::new()));
    let answers = Arc::new(Mutex::new(vec![Some(String::new()), Some("https://b.test".to_string())]));
    let asked_clone = asked.clone();
    fx.doc.set_prompt_handler(move |message| {
        asked_clone.lock().push(message.to_string());
        answers.lock().pop().flatten()
    });

    fx.click_item("link");
    fx.click_item("link");
    fx.click_item("link");
    assert_eq!(fx.sent(), vec![Command::Link("https://b.test".into())]);
    assert_eq!(asked.lock().len(), 3);
    assert!(asked.lock().iter().all(|m| m == floatbar::LINK_PROMPT));
}

#[test]
fn test_link_without_sink_never_prompts() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    let asked = Arc::new(Mutex::new(0));
    let asked_clone = asked.clone();
    fx.doc.set_prompt_handler(move |_| {
        *asked_clone.lock() += 1;
        Some("https://c.test".into())
    });
    fx.click_item("link");
    assert_eq!(*asked.lock(), 0);
}

// =========================================================================
// Lifecycle and placement
// =========================================================================

#[test]
fn test_show_hide_closes_popovers() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    fx.toolbar.show(&mut fx.doc);
    assert!(fx.toolbar.is_visible());
    fx.click_item("fontFamily");
    assert!(fx.toolbar.active_popover().is_some());

    fx.toolbar.hide(&mut fx.doc);
    assert!(!fx.toolbar.is_visible());
    assert!(!fx.doc.has_class(fx.root, VISIBLE_CLASS));
    assert_eq!(fx.toolbar.active_popover(), None);
}

#[test]
fn test_double_destroy() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    inject_toolbar_styles(&mut fx.doc).unwrap();
    fx.toolbar.show(&mut fx.doc);
    fx.click_item("link");

    let document_root = fx.doc.root();
    assert_eq!(fx.doc.listener_count(document_root), 1);

    fx.toolbar.destroy(&mut fx.doc);
    assert!(!fx.doc.contains(fx.root));
    assert_eq!(fx.toolbar.element(), None);
    assert!(fx.toolbar.item_names().is_empty());
    assert!(!fx.toolbar.is_link_editing());
    assert!(!fx.toolbar.is_visible());
    assert_eq!(fx.doc.listener_count(document_root), 0);

    fx.toolbar.destroy(&mut fx.doc);
    assert_eq!(fx.toolbar.element(), None);

    // A destroyed toolbar can be created again with its sink intact.
    let root = fx.toolbar.create(&mut fx.doc).unwrap();
    fx.doc.append_child(fx.doc.body(), root).unwrap();
    fx.click_item("bold");
    assert_eq!(fx.sent(), vec![Command::Bold]);
}

#[test]
fn test_placement_is_clamped() {
    let mut fx = Fixture::new(ToolbarOptions::default());
    fx.doc
        .set_bounds(fx.root, Rect::new(0.0, 0.0, 300.0, 40.0))
        .unwrap();

    let near_right = Rect::new(1000.0, 400.0, 20.0, 16.0);
    let point = fx.toolbar.position_near(&mut fx.doc, near_right, None).unwrap();
    assert_eq!(point.x, 1024.0 - 300.0 - 4.0);
    assert_eq!(point.y, 400.0 - 40.0 - 8.0);

    let container = Rect::new(50.0, 100.0, 600.0, 500.0);
    let near_top = Rect::new(60.0, 110.0, 40.0, 16.0);
    let point = fx
        .toolbar
        .position_near(&mut fx.doc, near_top, Some(container))
        .unwrap();
    assert_eq!(point.x, 4.0);
    assert_eq!(point.y, 126.0 + 8.0 - 100.0);
    assert_eq!(fx.doc.style(fx.root, "left"), Some("4px"));
    assert_eq!(fx.doc.style(fx.root, "top"), Some("34px"));
}

#[test]
fn test_dropping_toolbar_leaves_listeners_inert() {
    let mut fx = Fixture::bound(ToolbarOptions::default());
    let bold = fx.toolbar.item_element("bold").unwrap();
    let select = fx.toolbar.item_element("formatBlock").unwrap();
    let Fixture { mut doc, toolbar, sent, .. } = fx;
    drop(toolbar);

    doc.click(bold).unwrap();
    doc.click(select).unwrap();
    assert!(sent.lock().is_empty());
}
