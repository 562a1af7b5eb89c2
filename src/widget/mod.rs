mod color;
mod font;

pub use color::parse_color;
pub use font::{DEFAULT_FAMILY, DEFAULT_SIZE, FontBook, FontSpec};

use egui::{Color32, ColorImage, FontId, Pos2, Rect, TextureHandle, Vec2, pos2};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FontError;
use crate::registry::{Callback, SelectCallback};

/// The closed set of component types a layout may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Button,
    Label,
    TextBox,
    TextArea,
    Image,
    CardView,
    Panel,
    Checkbox,
    ToggleButton,
    Slider,
    ProgressBar,
    Dropdown,
    RadioGroup,
    Spinner,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 14] = [
        ComponentKind::Button,
        ComponentKind::Label,
        ComponentKind::TextBox,
        ComponentKind::TextArea,
        ComponentKind::Image,
        ComponentKind::CardView,
        ComponentKind::Panel,
        ComponentKind::Checkbox,
        ComponentKind::ToggleButton,
        ComponentKind::Slider,
        ComponentKind::ProgressBar,
        ComponentKind::Dropdown,
        ComponentKind::RadioGroup,
        ComponentKind::Spinner,
    ];

    /// Looks up a kind by the `type` string used in layout documents.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            ComponentKind::Button => "Button",
            ComponentKind::Label => "Label",
            ComponentKind::TextBox => "TextBox",
            ComponentKind::TextArea => "TextArea",
            ComponentKind::Image => "Image",
            ComponentKind::CardView => "CardView",
            ComponentKind::Panel => "Panel",
            ComponentKind::Checkbox => "Checkbox",
            ComponentKind::ToggleButton => "ToggleButton",
            ComponentKind::Slider => "Slider",
            ComponentKind::ProgressBar => "ProgressBar",
            ComponentKind::Dropdown => "Dropdown",
            ComponentKind::RadioGroup => "RadioGroup",
            ComponentKind::Spinner => "Spinner",
        }
    }

    /// Containers act as coordinate-space parents for other components.
    pub const fn is_container(&self) -> bool {
        matches!(self, ComponentKind::CardView | ComponentKind::Panel)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a widget sits inside its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Pixel offset and size, fixed-size windows
    Absolute { offset: Vec2, size: Vec2 },
    /// Fractions of the parent's size, resizable windows
    Relative { rel_pos: Vec2, rel_size: Vec2 },
}

impl Placement {
    pub fn resolve(&self, parent: Rect) -> Rect {
        match *self {
            Placement::Absolute { offset, size } => Rect::from_min_size(parent.min + offset, size),
            Placement::Relative { rel_pos, rel_size } => {
                let parent_size = parent.size();
                let min: Pos2 = parent.min + rel_pos * parent_size;
                Rect::from_min_size(min, rel_size * parent_size)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub text_color: Option<Color32>,
    pub background: Option<Color32>,
    pub corner_radius: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            text_color: None,
            background: None,
            corner_radius: 8.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelPosition {
    Left,
    Center,
    Right,
}

impl LabelPosition {
    pub fn from_name(name: &str) -> Self {
        match name {
            "left" => LabelPosition::Left,
            "right" => LabelPosition::Right,
            _ => LabelPosition::Center,
        }
    }

    /// Anchor point inside `rect` for the percentage label.
    pub fn anchor(&self, rect: Rect) -> (Pos2, egui::Align2) {
        let y = rect.center().y;
        match self {
            LabelPosition::Left => (
                pos2(rect.min.x + rect.width() * 0.05, y),
                egui::Align2::LEFT_CENTER,
            ),
            LabelPosition::Center => (rect.center(), egui::Align2::CENTER_CENTER),
            LabelPosition::Right => (
                pos2(rect.min.x + rect.width() * 0.95, y),
                egui::Align2::RIGHT_CENTER,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressLabel {
    pub text: String,
    pub position: LabelPosition,
}

pub enum ImageState {
    Ready {
        pixels: ColorImage,
        texture: Option<TextureHandle>,
    },
    /// Decoding failed; drawn as an error placeholder
    Failed,
}

/// Entry field flanked by decrement/increment controls.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinnerState {
    pub entry: String,
    pub min: i64,
    pub max: i64,
}

impl SpinnerState {
    pub fn new(value: i64, min: i64, max: i64) -> Self {
        Self {
            entry: value.to_string(),
            min,
            max,
        }
    }

    /// Current value clamped to the bounds; unparsable entries read as `min`.
    pub fn get(&self) -> i64 {
        match self.entry.trim().parse::<i64>() {
            Ok(v) => v.clamp(self.min, self.max.max(self.min)),
            Err(_) => self.min,
        }
    }

    /// Writes `value` into the entry without clamping.
    pub fn set(&mut self, value: i64) {
        self.entry = value.to_string();
    }

    pub fn increment(&mut self) {
        if let Ok(v) = self.entry.trim().parse::<i64>()
            && v < self.max
        {
            self.set(v + 1);
        }
    }

    pub fn decrement(&mut self) {
        if let Ok(v) = self.entry.trim().parse::<i64>()
            && v > self.min
        {
            self.set(v - 1);
        }
    }
}

/// Retained per-kind widget state: bound variables, sub-widget state and callbacks.
pub enum WidgetState {
    Button {
        text: String,
        on_click: Option<Callback>,
    },
    Label {
        text: String,
    },
    TextBox {
        text: String,
        hint: String,
        hint_color: Color32,
    },
    TextArea {
        text: String,
        hint: String,
        hint_color: Color32,
    },
    Image(ImageState),
    Container,
    Checkbox {
        text: String,
        checked: bool,
        checked_color: Option<Color32>,
        on_toggle: Option<Callback>,
    },
    Toggle {
        text: String,
        on: bool,
        on_color: Option<Color32>,
        off_color: Option<Color32>,
        on_toggle: Option<Callback>,
    },
    Slider {
        value: f32,
        min: f32,
        max: f32,
        progress_color: Option<Color32>,
        button_color: Option<Color32>,
    },
    Progress {
        fraction: f32,
        progress_color: Option<Color32>,
        label: Option<ProgressLabel>,
    },
    Dropdown {
        options: Vec<String>,
        selected: String,
        selection_color: Option<Color32>,
        on_select: Option<SelectCallback>,
    },
    RadioGroup {
        label: String,
        options: Vec<String>,
        selected: String,
        checked_color: Option<Color32>,
        on_select: Option<SelectCallback>,
    },
    Spinner(SpinnerState),
}

impl WidgetState {
    pub(crate) fn callback_slot(&mut self) -> Option<&mut Option<Callback>> {
        match self {
            WidgetState::Button { on_click, .. } => Some(on_click),
            WidgetState::Checkbox { on_toggle, .. } | WidgetState::Toggle { on_toggle, .. } => {
                Some(on_toggle)
            }
            _ => None,
        }
    }

    pub(crate) fn select_slot(&mut self) -> Option<&mut Option<SelectCallback>> {
        match self {
            WidgetState::Dropdown { on_select, .. } | WidgetState::RadioGroup { on_select, .. } => {
                Some(on_select)
            }
            _ => None,
        }
    }
}

/// Binds a component id to its live widget state and layout metadata.
pub struct Descriptor {
    pub(crate) id: String,
    pub(crate) kind: ComponentKind,
    /// Container id, `None` for the root canvas
    pub(crate) parent: Option<String>,
    pub(crate) placement: Placement,
    pub(crate) style: Style,
    /// Font as declared in the layout; rescaling always starts from this
    pub(crate) font: FontSpec,
    pub(crate) font_id: FontId,
    pub(crate) visible: bool,
    pub(crate) state: WidgetState,
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .field("placement", &self.placement)
            .field("font", &self.font)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

impl Descriptor {
    pub(crate) fn new(
        id: String,
        kind: ComponentKind,
        parent: Option<String>,
        placement: Placement,
        style: Style,
        font: FontSpec,
        state: WidgetState,
    ) -> Self {
        let font_id = FontBook::fallback(font.size);
        Self {
            id,
            kind,
            parent,
            placement,
            style,
            font,
            font_id,
            visible: true,
            state,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Size of the font currently applied to the widget.
    pub fn font_size(&self) -> u32 {
        self.font_id.size as u32
    }

    pub fn font_id(&self) -> &FontId {
        &self.font_id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    /// Resolves and applies the layout font at `size`.
    ///
    /// An unavailable family still applies the size with the default family
    /// and reports the failure.
    pub(crate) fn apply_font(&mut self, fonts: &FontBook, size: u32) -> Result<(), FontError> {
        match fonts.font_id(&self.font, size) {
            Ok(font_id) => {
                self.font_id = font_id;
                Ok(())
            }
            Err(e) => {
                self.font_id = FontBook::fallback(size);
                Err(e)
            }
        }
    }

    /// Reapplies the font for a window scale factor. Sub-labels of progress
    /// bars and radio groups draw with the same font and follow along.
    pub(crate) fn rescale(&mut self, fonts: &FontBook, scale: f32) -> Result<(), FontError> {
        if self.kind == ComponentKind::Spinner {
            return Ok(());
        }
        let size = self.font.scaled_size(scale)?;
        self.apply_font(fonts, size)
    }

    /// Text shown by the widget, if it has any.
    pub fn text(&self) -> Option<String> {
        match &self.state {
            WidgetState::Button { text, .. }
            | WidgetState::Label { text }
            | WidgetState::TextBox { text, .. }
            | WidgetState::TextArea { text, .. }
            | WidgetState::Checkbox { text, .. }
            | WidgetState::Toggle { text, .. } => Some(text.clone()),
            WidgetState::RadioGroup { label, .. } => Some(label.clone()),
            WidgetState::Dropdown { selected, .. } => Some(selected.clone()),
            WidgetState::Progress { label, .. } => label.as_ref().map(|l| l.text.clone()),
            WidgetState::Spinner(spinner) => Some(spinner.entry.clone()),
            WidgetState::Image(_) | WidgetState::Container | WidgetState::Slider { .. } => None,
        }
    }

    pub(crate) fn set_text(&mut self, new_text: &str) {
        match &mut self.state {
            WidgetState::Button { text, .. }
            | WidgetState::Label { text }
            | WidgetState::TextBox { text, .. }
            | WidgetState::TextArea { text, .. }
            | WidgetState::Checkbox { text, .. }
            | WidgetState::Toggle { text, .. } => *text = new_text.to_owned(),
            WidgetState::RadioGroup { label, .. } => *label = new_text.to_owned(),
            WidgetState::Dropdown { selected, .. } => *selected = new_text.to_owned(),
            WidgetState::Progress {
                label: Some(label), ..
            } => label.text = new_text.to_owned(),
            WidgetState::Spinner(spinner) => spinner.entry = new_text.to_owned(),
            WidgetState::Progress { label: None, .. }
            | WidgetState::Image(_)
            | WidgetState::Container
            | WidgetState::Slider { .. } => {
                log::debug!("'{}' ({}) has no text to set", self.id, self.kind);
            }
        }
    }
}
