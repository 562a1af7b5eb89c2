//! Typed accessors over registered widgets.
//!
//! Every accessor offers the [`BaseAccess`] capability; the kind-specific
//! structs add only the operations that make sense for their component type.
//! Accessors borrow the registry, so they cannot outlive a layout rebuild.

use egui::Color32;

use crate::error::{GuiError, GuiResult};
use crate::registry::{UiEvent, WidgetRegistry};
use crate::widget::{ComponentKind, Descriptor, WidgetState};

/// Operations shared by every component type.
pub trait BaseAccess {
    fn descriptor(&self) -> &Descriptor;
    fn descriptor_mut(&mut self) -> &mut Descriptor;

    fn id(&self) -> &str {
        &self.descriptor().id
    }

    fn kind(&self) -> ComponentKind {
        self.descriptor().kind
    }

    fn is_visible(&self) -> bool {
        self.descriptor().visible
    }

    /// Hides a visible widget or shows a hidden one at its layout position.
    fn toggle_visibility(&mut self) {
        let d = self.descriptor_mut();
        d.visible = !d.visible;
    }

    fn text(&self) -> Option<String> {
        self.descriptor().text()
    }

    fn set_text(&mut self, text: &str) {
        self.descriptor_mut().set_text(text);
    }

    fn text_color(&self) -> Option<Color32> {
        self.descriptor().style.text_color
    }

    fn set_text_color(&mut self, color: Color32) {
        self.descriptor_mut().style.text_color = Some(color);
    }

    fn background_color(&self) -> Option<Color32> {
        self.descriptor().style.background
    }

    fn set_background_color(&mut self, color: Color32) {
        self.descriptor_mut().style.background = Some(color);
    }

    fn is_bold(&self) -> bool {
        self.descriptor().font.bold
    }

    /// Bold text is drawn with egui's strong text color; the glyphs keep
    /// their regular weight unless a bold face is registered as its own family.
    fn set_bold(&mut self, bold: bool) {
        self.descriptor_mut().font.bold = bold;
    }
}

macro_rules! accessor {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name<'a> {
            descriptor: &'a mut Descriptor,
        }

        impl BaseAccess for $name<'_> {
            fn descriptor(&self) -> &Descriptor {
                &*self.descriptor
            }

            fn descriptor_mut(&mut self) -> &mut Descriptor {
                &mut *self.descriptor
            }
        }
    };
}

accessor!(
    /// Labels, images and containers.
    BaseAccessor
);
accessor!(ButtonAccessor);
accessor!(
    /// Single and multi-line text inputs.
    ValueAccessor
);
accessor!(CheckAccessor);
accessor!(ToggleAccessor);
accessor!(
    /// Dropdowns.
    SelectAccessor
);
accessor!(SliderAccessor);
accessor!(ProgressAccessor);
accessor!(SpinnerAccessor);

/// Radio groups notify their handler on every write to the selection,
/// including writes made through [`RadioGroupAccessor::set`].
pub struct RadioGroupAccessor<'a> {
    descriptor: &'a mut Descriptor,
    events: &'a mut Vec<UiEvent>,
}

impl BaseAccess for RadioGroupAccessor<'_> {
    fn descriptor(&self) -> &Descriptor {
        &*self.descriptor
    }

    fn descriptor_mut(&mut self) -> &mut Descriptor {
        &mut *self.descriptor
    }
}

fn set_callback(descriptor: &mut Descriptor, f: impl FnMut(&mut WidgetRegistry) + 'static) {
    if let Some(slot) = descriptor.state.callback_slot() {
        *slot = Some(Box::new(f));
    }
}

fn set_select_callback(
    descriptor: &mut Descriptor,
    f: impl FnMut(&mut WidgetRegistry, &str) + 'static,
) {
    if let Some(slot) = descriptor.state.select_slot() {
        *slot = Some(Box::new(f));
    }
}

impl ButtonAccessor<'_> {
    pub fn on_click(&mut self, f: impl FnMut(&mut WidgetRegistry) + 'static) {
        set_callback(self.descriptor, f);
    }
}

impl ValueAccessor<'_> {
    pub fn hint(&self) -> &str {
        match &self.descriptor.state {
            WidgetState::TextBox { hint, .. } | WidgetState::TextArea { hint, .. } => hint,
            _ => "",
        }
    }

    /// True while nothing has been typed and the hint is on display.
    pub fn is_showing_hint(&self) -> bool {
        match &self.descriptor.state {
            WidgetState::TextBox { text, hint, .. } | WidgetState::TextArea { text, hint, .. } => {
                text.is_empty() && !hint.is_empty()
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.descriptor.set_text("");
    }
}

impl CheckAccessor<'_> {
    pub fn is_checked(&self) -> bool {
        matches!(
            self.descriptor.state,
            WidgetState::Checkbox { checked: true, .. }
        )
    }

    pub fn on_toggle(&mut self, f: impl FnMut(&mut WidgetRegistry) + 'static) {
        set_callback(self.descriptor, f);
    }
}

impl ToggleAccessor<'_> {
    pub fn is_on(&self) -> bool {
        matches!(self.descriptor.state, WidgetState::Toggle { on: true, .. })
    }

    pub fn on_toggle(&mut self, f: impl FnMut(&mut WidgetRegistry) + 'static) {
        set_callback(self.descriptor, f);
    }
}

impl SelectAccessor<'_> {
    pub fn get(&self) -> String {
        match &self.descriptor.state {
            WidgetState::Dropdown { selected, .. } => selected.clone(),
            _ => String::new(),
        }
    }

    pub fn options(&self) -> &[String] {
        match &self.descriptor.state {
            WidgetState::Dropdown { options, .. } => options,
            _ => &[],
        }
    }

    /// Changes the selection without notifying the handler.
    pub fn set(&mut self, value: &str) {
        if let WidgetState::Dropdown { selected, .. } = &mut self.descriptor.state {
            *selected = value.to_owned();
        }
    }

    pub fn on_select(&mut self, f: impl FnMut(&mut WidgetRegistry, &str) + 'static) {
        set_select_callback(self.descriptor, f);
    }
}

impl RadioGroupAccessor<'_> {
    pub fn get(&self) -> String {
        match &self.descriptor.state {
            WidgetState::RadioGroup { selected, .. } => selected.clone(),
            _ => String::new(),
        }
    }

    pub fn options(&self) -> &[String] {
        match &self.descriptor.state {
            WidgetState::RadioGroup { options, .. } => options,
            _ => &[],
        }
    }

    /// Writes the selection and queues a notification for the handler.
    pub fn set(&mut self, value: &str) {
        if let WidgetState::RadioGroup { selected, .. } = &mut self.descriptor.state {
            *selected = value.to_owned();
            self.events.push(UiEvent::Selected {
                id: self.descriptor.id.clone(),
                value: value.to_owned(),
            });
        }
    }

    pub fn on_select(&mut self, f: impl FnMut(&mut WidgetRegistry, &str) + 'static) {
        set_select_callback(self.descriptor, f);
    }
}

impl SliderAccessor<'_> {
    pub fn get(&self) -> f32 {
        match self.descriptor.state {
            WidgetState::Slider { value, .. } => value,
            _ => 0.0,
        }
    }

    /// Sets the value, clamped to the slider's range.
    pub fn set(&mut self, new_value: f32) {
        if let WidgetState::Slider { value, min, max, .. } = &mut self.descriptor.state {
            let (lo, hi) = if *min <= *max { (*min, *max) } else { (*max, *min) };
            *value = new_value.clamp(lo, hi);
        }
    }
}

impl ProgressAccessor<'_> {
    /// Fill level in `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        match self.descriptor.state {
            WidgetState::Progress { fraction, .. } => fraction,
            _ => 0.0,
        }
    }

    /// Sets progress in percent, updating the bar and the percentage label.
    pub fn set(&mut self, percent: f32) {
        if let WidgetState::Progress {
            fraction, label, ..
        } = &mut self.descriptor.state
        {
            *fraction = (percent / 100.0).clamp(0.0, 1.0);
            if let Some(label) = label {
                label.text = percent_text(percent);
            }
        }
    }
}

pub(crate) fn percent_text(percent: f32) -> String {
    format!("{}%", percent.trunc() as i64)
}

impl SpinnerAccessor<'_> {
    /// Current value, clamped to the bounds.
    pub fn get(&self) -> i64 {
        match &self.descriptor.state {
            WidgetState::Spinner(spinner) => spinner.get(),
            _ => 0,
        }
    }

    /// Writes `value` into the entry as-is; bounds apply on the next read.
    pub fn set(&mut self, value: i64) {
        if let WidgetState::Spinner(spinner) = &mut self.descriptor.state {
            spinner.set(value);
        }
    }

    pub fn increment(&mut self) {
        if let WidgetState::Spinner(spinner) = &mut self.descriptor.state {
            spinner.increment();
        }
    }

    pub fn decrement(&mut self) {
        if let WidgetState::Spinner(spinner) = &mut self.descriptor.state {
            spinner.decrement();
        }
    }

    pub fn bounds(&self) -> (i64, i64) {
        match &self.descriptor.state {
            WidgetState::Spinner(spinner) => (spinner.min, spinner.max),
            _ => (0, 0),
        }
    }
}

/// The accessor for one component, picked by its kind.
pub enum Accessor<'a> {
    Base(BaseAccessor<'a>),
    Button(ButtonAccessor<'a>),
    Value(ValueAccessor<'a>),
    Check(CheckAccessor<'a>),
    Toggle(ToggleAccessor<'a>),
    Select(SelectAccessor<'a>),
    RadioGroup(RadioGroupAccessor<'a>),
    Slider(SliderAccessor<'a>),
    Progress(ProgressAccessor<'a>),
    Spinner(SpinnerAccessor<'a>),
}

impl<'a> Accessor<'a> {
    pub(crate) fn new(descriptor: &'a mut Descriptor, events: &'a mut Vec<UiEvent>) -> Self {
        match descriptor.kind {
            ComponentKind::Button => Accessor::Button(ButtonAccessor { descriptor }),
            ComponentKind::TextBox | ComponentKind::TextArea => {
                Accessor::Value(ValueAccessor { descriptor })
            }
            ComponentKind::Checkbox => Accessor::Check(CheckAccessor { descriptor }),
            ComponentKind::ToggleButton => Accessor::Toggle(ToggleAccessor { descriptor }),
            ComponentKind::Dropdown => Accessor::Select(SelectAccessor { descriptor }),
            ComponentKind::RadioGroup => {
                Accessor::RadioGroup(RadioGroupAccessor { descriptor, events })
            }
            ComponentKind::Slider => Accessor::Slider(SliderAccessor { descriptor }),
            ComponentKind::ProgressBar => Accessor::Progress(ProgressAccessor { descriptor }),
            ComponentKind::Spinner => Accessor::Spinner(SpinnerAccessor { descriptor }),
            ComponentKind::Label
            | ComponentKind::Image
            | ComponentKind::CardView
            | ComponentKind::Panel => Accessor::Base(BaseAccessor { descriptor }),
        }
    }

    fn wrong_kind(&self, expected: &'static str) -> GuiError {
        GuiError::WrongKind {
            id: self.id().to_owned(),
            expected,
            actual: self.kind(),
        }
    }

    pub fn into_button(self) -> GuiResult<ButtonAccessor<'a>> {
        match self {
            Accessor::Button(a) => Ok(a),
            other => Err(other.wrong_kind("Button")),
        }
    }

    pub fn into_value(self) -> GuiResult<ValueAccessor<'a>> {
        match self {
            Accessor::Value(a) => Ok(a),
            other => Err(other.wrong_kind("TextBox or TextArea")),
        }
    }

    pub fn into_check(self) -> GuiResult<CheckAccessor<'a>> {
        match self {
            Accessor::Check(a) => Ok(a),
            other => Err(other.wrong_kind("Checkbox")),
        }
    }

    pub fn into_toggle(self) -> GuiResult<ToggleAccessor<'a>> {
        match self {
            Accessor::Toggle(a) => Ok(a),
            other => Err(other.wrong_kind("ToggleButton")),
        }
    }

    pub fn into_select(self) -> GuiResult<SelectAccessor<'a>> {
        match self {
            Accessor::Select(a) => Ok(a),
            other => Err(other.wrong_kind("Dropdown")),
        }
    }

    pub fn into_radio_group(self) -> GuiResult<RadioGroupAccessor<'a>> {
        match self {
            Accessor::RadioGroup(a) => Ok(a),
            other => Err(other.wrong_kind("RadioGroup")),
        }
    }

    pub fn into_slider(self) -> GuiResult<SliderAccessor<'a>> {
        match self {
            Accessor::Slider(a) => Ok(a),
            other => Err(other.wrong_kind("Slider")),
        }
    }

    pub fn into_progress(self) -> GuiResult<ProgressAccessor<'a>> {
        match self {
            Accessor::Progress(a) => Ok(a),
            other => Err(other.wrong_kind("ProgressBar")),
        }
    }

    pub fn into_spinner(self) -> GuiResult<SpinnerAccessor<'a>> {
        match self {
            Accessor::Spinner(a) => Ok(a),
            other => Err(other.wrong_kind("Spinner")),
        }
    }
}

impl BaseAccess for Accessor<'_> {
    fn descriptor(&self) -> &Descriptor {
        match self {
            Accessor::Base(a) => a.descriptor(),
            Accessor::Button(a) => a.descriptor(),
            Accessor::Value(a) => a.descriptor(),
            Accessor::Check(a) => a.descriptor(),
            Accessor::Toggle(a) => a.descriptor(),
            Accessor::Select(a) => a.descriptor(),
            Accessor::RadioGroup(a) => a.descriptor(),
            Accessor::Slider(a) => a.descriptor(),
            Accessor::Progress(a) => a.descriptor(),
            Accessor::Spinner(a) => a.descriptor(),
        }
    }

    fn descriptor_mut(&mut self) -> &mut Descriptor {
        match self {
            Accessor::Base(a) => a.descriptor_mut(),
            Accessor::Button(a) => a.descriptor_mut(),
            Accessor::Value(a) => a.descriptor_mut(),
            Accessor::Check(a) => a.descriptor_mut(),
            Accessor::Toggle(a) => a.descriptor_mut(),
            Accessor::Select(a) => a.descriptor_mut(),
            Accessor::RadioGroup(a) => a.descriptor_mut(),
            Accessor::Slider(a) => a.descriptor_mut(),
            Accessor::Progress(a) => a.descriptor_mut(),
            Accessor::Spinner(a) => a.descriptor_mut(),
        }
    }
}
