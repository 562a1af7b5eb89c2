//! Per-frame drawing of registered widgets.

use egui::{Color32, CornerRadius, FontId, Rect, RichText, UiBuilder, load::SizedTexture};
use std::collections::HashMap;

use crate::registry::{UiEvent, WidgetRegistry};
use crate::widget::{Descriptor, ImageState, WidgetState};

/// Text styling shared by a widget and its sub-labels.
struct Look {
    font: FontId,
    color: Option<Color32>,
    bold: bool,
}

impl Look {
    fn of(d: &Descriptor) -> Self {
        Self {
            font: d.font_id.clone(),
            color: d.style.text_color,
            bold: d.font.bold,
        }
    }

    fn text(&self, s: &str) -> RichText {
        let mut text = RichText::new(s).font(self.font.clone());
        if let Some(color) = self.color {
            text = text.color(color);
        }
        // egui bundles no bold face; `strong` draws with the emphasized text color
        if self.bold {
            text = text.strong();
        }
        text
    }
}

fn radius(r: f32) -> CornerRadius {
    CornerRadius::same(r.clamp(0.0, u8::MAX as f32) as u8)
}

/// Draws every visible widget inside `canvas`.
///
/// Containers are registered before their children, so a child's frame is
/// always known when it is reached. Children of hidden containers are hidden too.
pub(crate) fn draw_registry(ui: &mut egui::Ui, canvas: Rect, registry: &mut WidgetRegistry) {
    let mut frames: HashMap<String, Option<Rect>> = HashMap::new();
    let (descriptors, events) = registry.parts_mut();
    for d in descriptors.iter_mut() {
        let parent_rect = match &d.parent {
            None => Some(canvas),
            Some(id) => frames.get(id).copied().flatten(),
        };
        let rect = parent_rect
            .filter(|_| d.visible)
            .map(|parent| d.placement.resolve(parent));
        if d.kind.is_container() {
            frames.insert(d.id.clone(), rect);
        }
        if let Some(rect) = rect {
            draw_widget(ui, rect, d, events);
        }
    }
}

fn draw_widget(ui: &mut egui::Ui, rect: Rect, d: &mut Descriptor, events: &mut Vec<UiEvent>) {
    let look = Look::of(d);
    let id = d.id.clone();
    let style = d.style;
    match &mut d.state {
        WidgetState::Container => {
            let fill = style.background.unwrap_or(ui.visuals().faint_bg_color);
            ui.painter()
                .rect_filled(rect, radius(style.corner_radius), fill);
        }
        WidgetState::Button { text, .. } => {
            let mut button = egui::Button::new(look.text(text)).corner_radius(radius(style.corner_radius));
            if let Some(fill) = style.background {
                button = button.fill(fill);
            }
            if ui.put(rect, button).clicked() {
                events.push(UiEvent::Clicked(id));
            }
        }
        WidgetState::Label { text } => {
            ui.put(rect, egui::Label::new(look.text(text)));
        }
        WidgetState::TextBox {
            text,
            hint,
            hint_color,
        } => {
            let mut edit = egui::TextEdit::singleline(text)
                .hint_text(RichText::new(hint.as_str()).color(*hint_color))
                .font(look.font.clone());
            if let Some(color) = look.color {
                edit = edit.text_color(color);
            }
            if let Some(bg) = style.background {
                edit = edit.background_color(bg);
            }
            ui.put(rect, edit);
        }
        WidgetState::TextArea {
            text,
            hint,
            hint_color,
        } => {
            let mut edit = egui::TextEdit::multiline(text)
                .hint_text(RichText::new(hint.as_str()).color(*hint_color))
                .font(look.font.clone())
                .desired_width(rect.width());
            if let Some(color) = look.color {
                edit = edit.text_color(color);
            }
            if let Some(bg) = style.background {
                edit = edit.background_color(bg);
            }
            ui.put(rect, edit);
        }
        WidgetState::Image(ImageState::Ready { pixels, texture }) => {
            let texture = texture.get_or_insert_with(|| {
                ui.ctx().load_texture(
                    format!("nvlib-image-{id}"),
                    pixels.clone(),
                    egui::TextureOptions::LINEAR,
                )
            });
            ui.put(
                rect,
                egui::Image::from_texture(SizedTexture::new(texture.id(), rect.size())),
            );
        }
        WidgetState::Image(ImageState::Failed) => {
            let painter = ui.painter();
            painter.rect_filled(rect, radius(style.corner_radius), Color32::RED);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Image Error",
                look.font.clone(),
                Color32::WHITE,
            );
        }
        WidgetState::Checkbox {
            text,
            checked,
            checked_color,
            ..
        } => {
            let accent = *checked_color;
            let changed = ui
                .scope_builder(UiBuilder::new().max_rect(rect), |ui| {
                    if let Some(accent) = accent {
                        ui.visuals_mut().selection.bg_fill = accent;
                    }
                    ui.add(egui::Checkbox::new(checked, look.text(text))).changed()
                })
                .inner;
            if changed {
                events.push(UiEvent::Toggled(id));
            }
        }
        WidgetState::Toggle {
            text,
            on,
            on_color,
            off_color,
            ..
        } => {
            let mut button = egui::Button::selectable(*on, look.text(text));
            let fill = if *on { *on_color } else { *off_color };
            if let Some(fill) = fill {
                button = button.fill(fill);
            }
            if ui.put(rect, button).clicked() {
                *on = !*on;
                events.push(UiEvent::Toggled(id));
            }
        }
        WidgetState::Slider {
            value,
            min,
            max,
            progress_color,
            button_color,
        } => {
            let (progress_color, button_color) = (*progress_color, *button_color);
            let range = *min..=*max;
            ui.scope_builder(UiBuilder::new().max_rect(rect), |ui| {
                ui.spacing_mut().slider_width = rect.width();
                if let Some(color) = progress_color {
                    ui.visuals_mut().selection.bg_fill = color;
                }
                if let Some(color) = button_color {
                    let widgets = &mut ui.visuals_mut().widgets;
                    widgets.inactive.bg_fill = color;
                    widgets.hovered.bg_fill = color;
                    widgets.active.bg_fill = color;
                }
                ui.add(
                    egui::Slider::new(value, range)
                        .show_value(false)
                        .trailing_fill(true),
                );
            });
        }
        WidgetState::Progress {
            fraction,
            progress_color,
            label,
        } => {
            let mut bar = egui::ProgressBar::new(*fraction).desired_width(rect.width());
            if let Some(color) = progress_color {
                bar = bar.fill(*color);
            }
            ui.put(rect, bar);
            if let Some(label) = label {
                let (pos, align) = label.position.anchor(rect);
                let color = look.color.unwrap_or(ui.visuals().text_color());
                ui.painter()
                    .text(pos, align, &label.text, look.font.clone(), color);
            }
        }
        WidgetState::Dropdown {
            options,
            selected,
            selection_color,
            ..
        } => {
            let mut chosen = selected.clone();
            let accent = *selection_color;
            ui.scope_builder(UiBuilder::new().max_rect(rect), |ui| {
                if let Some(accent) = accent {
                    ui.visuals_mut().selection.bg_fill = accent;
                }
                if let Some(bg) = style.background {
                    ui.visuals_mut().widgets.inactive.weak_bg_fill = bg;
                }
                egui::ComboBox::from_id_salt(&id)
                    .width(rect.width())
                    .selected_text(look.text(selected))
                    .show_ui(ui, |ui| {
                        for option in options.iter() {
                            ui.selectable_value(&mut chosen, option.clone(), look.text(option));
                        }
                    });
            });
            if chosen != *selected {
                *selected = chosen.clone();
                events.push(UiEvent::Selected { id, value: chosen });
            }
        }
        WidgetState::RadioGroup {
            label,
            options,
            selected,
            checked_color,
            ..
        } => {
            let accent = *checked_color;
            let mut clicked = None;
            ui.scope_builder(UiBuilder::new().max_rect(rect), |ui| {
                if let Some(accent) = accent {
                    ui.visuals_mut().selection.bg_fill = accent;
                }
                ui.vertical(|ui| {
                    ui.label(look.text(label));
                    for option in options.iter() {
                        if ui.radio(*selected == *option, look.text(option)).clicked() {
                            clicked = Some(option.clone());
                        }
                    }
                });
            });
            // every click writes the variable, even when re-selecting
            if let Some(value) = clicked {
                *selected = value.clone();
                events.push(UiEvent::Selected { id, value });
            }
        }
        WidgetState::Spinner(spinner) => {
            let bg = style.background.unwrap_or(Color32::WHITE);
            ui.painter()
                .rect_filled(rect, radius(style.corner_radius), bg);
            let side = (rect.height() - 4.0).max(1.0);
            ui.scope_builder(UiBuilder::new().max_rect(rect.shrink(2.0)), |ui| {
                ui.horizontal_centered(|ui| {
                    let gap = ui.spacing().item_spacing.x;
                    let entry_width = (rect.width() - 2.0 * side - 2.0 * gap - 4.0).max(1.0);
                    if ui
                        .add_sized([side, side], egui::Button::new(look.text("-")).frame(false))
                        .clicked()
                    {
                        spinner.decrement();
                    }
                    let mut entry = egui::TextEdit::singleline(&mut spinner.entry)
                        .font(look.font.clone())
                        .horizontal_align(egui::Align::Center)
                        .frame(false);
                    if let Some(color) = look.color {
                        entry = entry.text_color(color);
                    }
                    ui.add_sized([entry_width, side], entry);
                    if ui
                        .add_sized([side, side], egui::Button::new(look.text("+")).frame(false))
                        .clicked()
                    {
                        spinner.increment();
                    }
                });
            });
        }
    }
}
