//! Integration tests for document events and signals working together.

use std::sync::Arc;

use floatbar_core::{
    Document, DocumentTreeDebug, Event, EventPhase, EventType, ListenerOptions, NodeId, Rect,
    Signal, Size,
};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("floatbar_core=trace")
        .with_test_writer()
        .try_init();
}

struct Fixture {
    doc: Document,
    editor: NodeId,
    toolbar: NodeId,
    button: NodeId,
}

fn fixture() -> Fixture {
    let mut doc = Document::with_viewport(Size::new(800.0, 600.0));
    let editor = doc.create_element("div");
    doc.set_attribute(editor, "contenteditable", "true").unwrap();
    doc.append_child(doc.body(), editor).unwrap();

    let toolbar = doc.create_element("div");
    doc.add_class(toolbar, "toolbar").unwrap();
    doc.append_child(doc.body(), toolbar).unwrap();

    let button = doc.create_element("button");
    doc.set_attribute(button, "type", "button").unwrap();
    doc.append_child(toolbar, button).unwrap();

    Fixture {
        doc,
        editor,
        toolbar,
        button,
    }
}

#[test]
fn toolbar_press_keeps_editor_focus() {
    setup();
    let Fixture {
        mut doc,
        editor,
        toolbar,
        button,
    } = fixture();
    doc.focus(editor).unwrap();

    doc.add_listener(toolbar, EventType::PointerDown, ListenerOptions::CAPTURE, |_, event| {
        event.prevent_default();
    })
    .unwrap();

    assert!(!doc.pointer_down(button).unwrap());
    assert_eq!(doc.focused(), Some(editor));
}

#[test]
fn document_listener_sees_outside_presses_only_when_not_stopped() {
    setup();
    let Fixture {
        mut doc,
        editor,
        toolbar,
        button,
    } = fixture();
    let outside = Arc::new(Mutex::new(Vec::new()));

    doc.add_listener(toolbar, EventType::PointerDown, ListenerOptions::default(), |_, event| {
        event.stop_propagation();
    })
    .unwrap();
    let outside_clone = outside.clone();
    doc.add_listener(doc.root(), EventType::PointerDown, ListenerOptions::default(), move |_, event| {
        outside_clone.lock().push(event.target());
    })
    .unwrap();

    doc.pointer_down(button).unwrap();
    doc.pointer_down(editor).unwrap();
    assert_eq!(*outside.lock(), vec![Some(editor)]);
}

#[test]
fn listener_can_rebuild_the_tree_during_dispatch() {
    setup();
    let Fixture {
        mut doc,
        toolbar,
        button,
        ..
    } = fixture();

    doc.add_listener(button, EventType::Click, ListenerOptions::default(), move |doc, event| {
        assert_eq!(event.phase(), EventPhase::AtTarget);
        let popover = doc.create_element("div");
        doc.add_class(popover, "popover").unwrap();
        doc.append_child(toolbar, popover).unwrap();
        if let Some(target) = event.target() {
            doc.remove(target).unwrap();
        }
    })
    .unwrap();

    assert!(doc.click(button).unwrap());
    assert!(!doc.contains(button));
    assert!(doc.query_class(toolbar, "popover").is_some());
}

#[test]
fn custom_event_detail_reaches_ancestors() {
    setup();
    let Fixture {
        mut doc,
        toolbar,
        button,
        ..
    } = fixture();
    let seen = Arc::new(Mutex::new(None));

    let seen_clone = seen.clone();
    doc.add_listener(toolbar, EventType::Custom("color-picked"), ListenerOptions::default(), move |_, event| {
        *seen_clone.lock() = event.detail::<String>().cloned();
    })
    .unwrap();

    let event = doc
        .dispatch(button, Event::custom("color-picked", "#ff0000".to_string()))
        .unwrap();
    assert_eq!(event.phase(), EventPhase::None);
    assert_eq!(seen.lock().as_deref(), Some("#ff0000"));
}

#[test]
fn signal_slot_can_mutate_shared_state() {
    setup();
    let opened = Signal::<String>::new();
    let names = Arc::new(Mutex::new(Vec::new()));

    let names_clone = names.clone();
    opened.connect(move |name| names_clone.lock().push(name.clone()));
    opened.emit("fontFamily".to_string());
    opened.emit("color".to_string());

    assert_eq!(*names.lock(), vec!["fontFamily".to_string(), "color".to_string()]);
}

#[test]
fn bounds_and_tree_dump() {
    setup();
    let Fixture {
        mut doc, toolbar, ..
    } = fixture();
    doc.set_bounds(toolbar, Rect::new(10.0, 20.0, 300.0, 36.0)).unwrap();
    assert_eq!(doc.bounds(toolbar).right(), 310.0);
    assert_eq!(doc.viewport(), Size::new(800.0, 600.0));

    let dump = DocumentTreeDebug::new(&doc).to_string();
    assert!(dump.contains("div.toolbar"));
    assert!(dump.contains("button [type=\"button\"]"));
}
