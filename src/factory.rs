//! Turns one layout component into a registered widget descriptor.

use egui::{Color32, vec2};

use crate::accessor::percent_text;
use crate::config::LayoutMode;
use crate::containment::{Parent, ParentFrame};
use crate::error::BuildError;
use crate::layout::ComponentSpec;
use crate::raster;
use crate::widget::{
    ComponentKind, DEFAULT_FAMILY, DEFAULT_SIZE, Descriptor, FontBook, FontSpec, ImageState,
    LabelPosition, Placement, ProgressLabel, SpinnerState, Style, WidgetState,
};

const HINT_GREY: Color32 = Color32::from_rgb(128, 128, 128);

/// Geometry of `spec` relative to its parent frame.
pub fn placement(spec: &ComponentSpec, frame: &ParentFrame, mode: LayoutMode) -> Placement {
    let offset = vec2(spec.x - frame.origin.x, spec.y - frame.origin.y);
    let size = vec2(spec.width.max(0.0), spec.height.max(0.0));
    match mode {
        LayoutMode::Absolute => Placement::Absolute { offset, size },
        LayoutMode::Relative => {
            let parent = vec2(frame.size.x.max(1.0), frame.size.y.max(1.0));
            Placement::Relative {
                rel_pos: offset / parent,
                rel_size: size / parent,
            }
        }
    }
}

/// Builds the descriptor for one component.
///
/// Missing properties fall back to defaults. Image decoding failures are
/// recovered with a placeholder; every other failure rejects the component.
pub fn create_component(
    spec: &ComponentSpec,
    frame: &ParentFrame,
    mode: LayoutMode,
    fonts: &FontBook,
) -> Result<Descriptor, BuildError> {
    let kind = spec.kind().ok_or_else(|| BuildError::UnsupportedType {
        id: spec.id.clone(),
        kind: spec.type_name.clone(),
    })?;
    let props = spec.properties.reader(&spec.id);

    let font_size = match props.number("fontSize")? {
        None => DEFAULT_SIZE,
        Some(size) if size >= 1.0 => size.round() as u32,
        Some(size) => {
            return Err(BuildError::MalformedProperty {
                id: spec.id.clone(),
                key: "fontSize".into(),
                reason: format!("font size must be at least 1, got {size}"),
            });
        }
    };
    let font = FontSpec {
        family: props
            .text("fontFamily")?
            .unwrap_or_else(|| DEFAULT_FAMILY.into()),
        size: font_size,
        bold: props.flag("bold")?,
    };

    let mut style = Style {
        text_color: props.color("textColor")?,
        background: props.color("backgroundColor")?,
        corner_radius: props.number("cornerRadius")?.unwrap_or(8.0),
    };

    let text = props.text("text")?;
    let state = match kind {
        ComponentKind::Button => WidgetState::Button {
            text: text.unwrap_or_default(),
            on_click: None,
        },
        ComponentKind::Label => {
            style.background = None;
            WidgetState::Label {
                text: props.text("iconName")?.or(text).unwrap_or_default(),
            }
        }
        ComponentKind::TextBox => WidgetState::TextBox {
            text: text.unwrap_or_default(),
            hint: props.text("hintText")?.unwrap_or_default(),
            hint_color: props.color("hintColor")?.unwrap_or(HINT_GREY),
        },
        ComponentKind::TextArea => {
            style.text_color = style.text_color.or(Some(Color32::BLACK));
            WidgetState::TextArea {
                text: text.unwrap_or_default(),
                hint: props.text("hintText")?.unwrap_or_default(),
                hint_color: props.color("hintColor")?.unwrap_or(HINT_GREY),
            }
        }
        ComponentKind::Image => {
            style.corner_radius = props.number("cornerRadius")?.unwrap_or(0.0);
            let src = props.text("src")?.unwrap_or_default();
            let opacity = props.number("opacity")?.unwrap_or(1.0);
            match raster::component_image(
                &src,
                spec.width.max(1.0) as u32,
                spec.height.max(1.0) as u32,
                style.corner_radius,
                opacity,
            ) {
                Ok(pixels) => WidgetState::Image(ImageState::Ready {
                    pixels,
                    texture: None,
                }),
                Err(e) => {
                    log::warn!("Image '{}' could not be decoded: {e}", spec.id);
                    WidgetState::Image(ImageState::Failed)
                }
            }
        }
        ComponentKind::CardView | ComponentKind::Panel => WidgetState::Container,
        ComponentKind::Checkbox => WidgetState::Checkbox {
            text: text.unwrap_or_default(),
            checked: props.flag("checked")?,
            checked_color: props.color("checkedColor")?,
            on_toggle: None,
        },
        ComponentKind::ToggleButton => WidgetState::Toggle {
            text: text.unwrap_or_default(),
            on: props.flag("checked")?,
            on_color: props.color("onColor")?,
            off_color: props.color("offColor")?,
            on_toggle: None,
        },
        ComponentKind::Slider => {
            let min = props.number("min")?.unwrap_or(0.0);
            let max = props.number("max")?.unwrap_or(100.0);
            let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
            WidgetState::Slider {
                value: props.number("value")?.unwrap_or(50.0).clamp(lo, hi),
                min,
                max,
                progress_color: props.color("progressColor")?,
                button_color: props.color("buttonColor")?,
            }
        }
        ComponentKind::ProgressBar => {
            let percent = props.number("value")?.unwrap_or(50.0);
            let label = if props.flag("showPercentage")? {
                Some(ProgressLabel {
                    text: percent_text(percent),
                    position: LabelPosition::from_name(
                        props
                            .text("percentagePosition")?
                            .as_deref()
                            .unwrap_or("center"),
                    ),
                })
            } else {
                None
            };
            WidgetState::Progress {
                fraction: (percent / 100.0).clamp(0.0, 1.0),
                progress_color: props.color("progressColor")?,
                label,
            }
        }
        ComponentKind::Dropdown => {
            let options = props.lines("options")?;
            let selected = text
                .or_else(|| options.first().cloned())
                .unwrap_or_default();
            WidgetState::Dropdown {
                options,
                selected,
                selection_color: props.color("selectionColor")?,
                on_select: None,
            }
        }
        ComponentKind::RadioGroup => WidgetState::RadioGroup {
            label: props.text("label")?.unwrap_or_default(),
            options: props.lines("options")?,
            selected: props.text("checkedValue")?.unwrap_or_default(),
            checked_color: props.color("checkedColor")?,
            on_select: None,
        },
        ComponentKind::Spinner => {
            style.background = style.background.or(Some(Color32::WHITE));
            style.text_color = style.text_color.or(Some(Color32::BLACK));
            WidgetState::Spinner(SpinnerState::new(
                props.integer("value")?.unwrap_or(0),
                props.integer("min")?.unwrap_or(0),
                props.integer("max")?.unwrap_or(100),
            ))
        }
    };

    let parent = match &frame.parent {
        Parent::Root => None,
        Parent::Container(id) => Some(id.clone()),
    };
    let mut descriptor = Descriptor::new(
        spec.id.clone(),
        kind,
        parent,
        placement(spec, frame, mode),
        style,
        font,
        state,
    );
    if let Err(e) = descriptor.apply_font(fonts, font_size) {
        log::warn!("Font for '{}' not applied: {e}", spec.id);
    }
    Ok(descriptor)
}
