//! Uniform font rescaling when the root window is resized.

use egui::Vec2;

use crate::registry::WidgetRegistry;
use crate::widget::FontBook;

/// `min(current.w / original.w, current.h / original.h)`, or 1.0 for a degenerate canvas.
pub fn scale_factor(original: Vec2, current: Vec2) -> f32 {
    if original.x <= 0.0 || original.y <= 0.0 {
        return 1.0;
    }
    (current.x / original.x).min(current.y / original.y)
}

/// Reapplies every widget's font at `scale`. Spinners keep their size.
///
/// A widget whose font cannot be applied is logged and skipped; the rest are
/// still rescaled. Returns the number of failures.
pub fn rescale_fonts(registry: &mut WidgetRegistry, fonts: &FontBook, scale: f32) -> usize {
    let mut failures = 0;
    for descriptor in registry.iter_mut() {
        if let Err(e) = descriptor.rescale(fonts, scale) {
            log::debug!("Font not rescaled for '{}': {e}", descriptor.id());
            failures += 1;
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutMode;
    use crate::containment::ParentFrame;
    use crate::factory::create_component;
    use crate::layout::{CanvasSpec, ComponentSpec, Properties};
    use egui::vec2;
    use serde_json::{Value, json};

    fn registry(components: &[(&str, &str, Value)]) -> WidgetRegistry {
        let fonts = FontBook::new();
        let frame = ParentFrame::root(&CanvasSpec::default());
        let mut reg = WidgetRegistry::new();
        for (id, kind, props) in components {
            let properties = match props.clone() {
                Value::Object(map) => Properties::from(map),
                _ => Properties::default(),
            };
            let spec = ComponentSpec {
                id: (*id).into(),
                type_name: (*kind).into(),
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 30.0,
                properties,
            };
            let d = create_component(&spec, &frame, LayoutMode::Relative, &fonts).unwrap();
            reg.insert(d);
        }
        reg
    }

    fn sizes(reg: &WidgetRegistry) -> Vec<(String, u32)> {
        reg.iter()
            .map(|d| (d.id().to_owned(), d.font_size()))
            .collect()
    }

    #[test]
    fn test_scale_factor_uses_smaller_ratio() {
        let original = vec2(800.0, 600.0);
        assert_eq!(scale_factor(original, vec2(800.0, 600.0)), 1.0);
        assert_eq!(scale_factor(original, vec2(1600.0, 900.0)), 1.5);
        assert_eq!(scale_factor(original, vec2(400.0, 600.0)), 0.5);
        assert_eq!(scale_factor(vec2(0.0, 600.0), vec2(400.0, 600.0)), 1.0);
    }

    #[test]
    fn test_rescale_is_idempotent_at_unit_scale() {
        let mut reg = registry(&[
            ("a", "Button", json!({"fontSize": 13})),
            ("b", "Label", json!({})),
            ("c", "RadioGroup", json!({"fontSize": 17, "options": "x\ny"})),
        ]);
        let before = sizes(&reg);
        let fonts = FontBook::new();
        for _ in 0..3 {
            assert_eq!(rescale_fonts(&mut reg, &fonts, 1.0), 0);
        }
        assert_eq!(sizes(&reg), before);
    }

    #[test]
    fn test_rescale_floors_from_layout_size() {
        let mut reg = registry(&[("a", "Button", json!({"fontSize": 15}))]);
        let fonts = FontBook::new();
        rescale_fonts(&mut reg, &fonts, 0.5);
        assert_eq!(reg.descriptor("a").unwrap().font_size(), 7);
        rescale_fonts(&mut reg, &fonts, 2.0);
        assert_eq!(reg.descriptor("a").unwrap().font_size(), 30);
        rescale_fonts(&mut reg, &fonts, 0.01);
        assert_eq!(reg.descriptor("a").unwrap().font_size(), 1);
        rescale_fonts(&mut reg, &fonts, 1.0);
        assert_eq!(reg.descriptor("a").unwrap().font_size(), 15);
    }

    #[test]
    fn test_spinner_font_is_invariant() {
        let mut reg = registry(&[
            ("spin", "Spinner", json!({"fontSize": 12})),
            ("btn", "Button", json!({"fontSize": 12})),
        ]);
        let fonts = FontBook::new();
        for scale in [0.25, 0.5, 2.0, 3.7] {
            rescale_fonts(&mut reg, &fonts, scale);
            assert_eq!(reg.descriptor("spin").unwrap().font_size(), 12);
        }
        assert_ne!(reg.descriptor("btn").unwrap().font_size(), 12);
    }

    #[test]
    fn test_font_failure_does_not_stop_other_widgets() {
        let mut reg = registry(&[
            ("odd", "Label", json!({"fontFamily": "Nonexistent", "fontSize": 10})),
            ("ok", "Label", json!({"fontSize": 10})),
        ]);
        let fonts = FontBook::new();
        assert_eq!(rescale_fonts(&mut reg, &fonts, 2.0), 1);
        assert_eq!(reg.descriptor("odd").unwrap().font_size(), 20);
        assert_eq!(reg.descriptor("ok").unwrap().font_size(), 20);
    }

    #[test]
    fn test_invalid_scale_is_swallowed() {
        let mut reg = registry(&[("a", "Button", json!({}))]);
        let fonts = FontBook::new();
        assert_eq!(rescale_fonts(&mut reg, &fonts, f32::NAN), 1);
        assert_eq!(reg.descriptor("a").unwrap().font_size(), 10);
    }
}
