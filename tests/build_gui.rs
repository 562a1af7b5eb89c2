use std::io::Write;

use nvlib_gui::{AutoGui, BaseAccess, ComponentKind, GuiConfig, GuiError, LayoutError, LayoutMode};

const LAYOUT: &str = r##"{
    "canvas": {"width": 640, "height": 480, "title": "Sign up"},
    "components": [
        {"id": "form", "type": "Panel", "x": 20, "y": 20, "width": 300, "height": 300},
        {"id": "side", "type": "CardView", "x": 340, "y": 20, "width": 280, "height": 300},
        {"id": "name", "type": "TextBox", "x": 40, "y": 40, "width": 200, "height": 24,
         "properties": {"hintText": "Enter name"}},
        {"id": "agree", "type": "Checkbox", "x": 40, "y": 80, "width": 200, "height": 24,
         "properties": {"text": "I agree", "checked": false}},
        {"id": "level", "type": "Slider", "x": 360, "y": 40, "width": 200, "height": 24},
        {"id": "submit", "type": "Button", "x": 250, "y": 400, "width": 120, "height": 40,
         "properties": {"text": "Submit", "backgroundColor": "#2d7dd2", "textColor": "white"}},
        {"id": "map", "type": "Map", "x": 0, "y": 0, "width": 10, "height": 10},
        {"id": "name", "type": "Label", "x": 0, "y": 450, "width": 100, "height": 20}
    ]
}"##;

fn layout_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_build_from_file() {
    let file = layout_file(LAYOUT);
    let mut gui = AutoGui::default();
    assert_eq!(gui.build_gui(file.path()), 6);
    assert_eq!(gui.canvas().title, "Sign up");

    let registry = gui.registry();
    let mut ids: Vec<&str> = registry.ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["agree", "form", "level", "name", "side", "submit"]);
    assert_eq!(registry.descriptor("name").unwrap().kind(), ComponentKind::TextBox);
    assert_eq!(registry.descriptor("name").unwrap().parent(), Some("form"));
    assert_eq!(registry.descriptor("level").unwrap().parent(), Some("side"));
    assert_eq!(registry.descriptor("submit").unwrap().parent(), None);
}

#[test]
fn test_reload_picks_up_edits() {
    let file = layout_file(LAYOUT);
    let mut gui = AutoGui::default();
    gui.build_gui(file.path());
    let before = gui.registry().generation();

    std::fs::write(
        file.path(),
        r#"{"components": [{"id": "only", "type": "Label", "x": 0, "y": 0, "width": 50, "height": 20}]}"#,
    )
    .unwrap();
    assert_eq!(gui.reload(), 1);
    assert!(gui.registry().generation() > before);
    assert!(gui.registry().contains("only"));
    assert!(!gui.registry().contains("submit"));
}

#[test]
fn test_malformed_file_is_reported() {
    let file = layout_file("{\"components\": [");
    let mut gui = AutoGui::default();
    assert!(matches!(
        gui.try_build_gui(file.path()),
        Err(GuiError::Layout(LayoutError::Json(_)))
    ));
    assert!(gui.registry().is_empty());
    assert_eq!(gui.build_gui(file.path()), 0);
}

#[test]
fn test_accessors_through_registry() {
    let file = layout_file(LAYOUT);
    let mut gui = AutoGui::new(GuiConfig {
        mode: LayoutMode::Absolute,
        ..Default::default()
    });
    gui.build_gui(file.path());

    let mut name = gui.registry_mut().value("name").unwrap();
    assert_eq!(name.text().as_deref(), Some(""));
    name.set_text("Alice");
    assert_eq!(name.text().as_deref(), Some("Alice"));

    let agree = gui.registry_mut().check("agree").unwrap();
    assert!(!agree.is_checked());

    let submit = gui.widget("submit").unwrap();
    assert_eq!(submit.text().as_deref(), Some("Submit"));
    assert!(submit.background_color().is_some());
}
