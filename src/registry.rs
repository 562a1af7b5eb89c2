//! The widget registry: every live descriptor for the current layout, keyed by id.

use egui::Color32;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::accessor::{
    Accessor, ButtonAccessor, CheckAccessor, ProgressAccessor, RadioGroupAccessor,
    SelectAccessor, SliderAccessor, SpinnerAccessor, ToggleAccessor, ValueAccessor,
};
use crate::error::{GuiError, GuiResult};
use crate::widget::Descriptor;

/// Handler for clicks and toggles.
pub type Callback = Box<dyn FnMut(&mut WidgetRegistry)>;
/// Handler receiving the newly selected option.
pub type SelectCallback = Box<dyn FnMut(&mut WidgetRegistry, &str)>;

/// User interaction or state write waiting for its handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Clicked(String),
    Toggled(String),
    Selected { id: String, value: String },
}

impl UiEvent {
    pub fn id(&self) -> &str {
        match self {
            UiEvent::Clicked(id) | UiEvent::Toggled(id) => id,
            UiEvent::Selected { id, .. } => id,
        }
    }
}

/// Window-level request made from a handler, applied by the root window
/// once every queued event has been dispatched.
#[derive(Clone, Debug, PartialEq)]
pub enum WindowAction {
    Close,
    SetTitle(String),
    SetBackground(Color32),
    /// Rebuild from the layout file last loaded
    Reload,
    /// Replace the layout with the one at this path
    Open(PathBuf),
    /// Ask the user for a layout file
    Pick,
}

/// Detached reference to a component, valid only for the layout generation
/// it was taken from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WidgetRef {
    id: String,
    generation: u64,
}

impl WidgetRef {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Default)]
pub struct WidgetRegistry {
    generation: u64,
    /// Document order, containers first
    descriptors: Vec<Descriptor>,
    index: HashMap<String, usize>,
    pending: Vec<UiEvent>,
    actions: Vec<WindowAction>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Incremented every time the registry is cleared for a rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.descriptors.iter().map(|d| d.id.as_str())
    }

    pub fn descriptor(&self, id: &str) -> Option<&Descriptor> {
        self.index.get(id).map(|&i| &self.descriptors[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.descriptors.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Descriptor> {
        self.descriptors.iter_mut()
    }

    /// Descriptors and the event queue, borrowed together for drawing.
    pub(crate) fn parts_mut(&mut self) -> (&mut [Descriptor], &mut Vec<UiEvent>) {
        (&mut self.descriptors, &mut self.pending)
    }

    /// Adds a descriptor; an id that is already registered is rejected.
    pub(crate) fn insert(&mut self, descriptor: Descriptor) -> bool {
        if self.index.contains_key(&descriptor.id) {
            log::warn!("Component '{}' already registered", descriptor.id);
            return false;
        }
        self.index
            .insert(descriptor.id.clone(), self.descriptors.len());
        self.descriptors.push(descriptor);
        true
    }

    /// Drops every descriptor and starts a new generation.
    pub(crate) fn clear(&mut self) {
        self.descriptors.clear();
        self.index.clear();
        self.pending.clear();
        self.generation += 1;
    }

    fn position(&self, id: &str) -> GuiResult<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GuiError::UnknownComponent(id.to_owned()))
    }

    /// Typed accessor for `id`, chosen by the component's kind.
    pub fn accessor(&mut self, id: &str) -> GuiResult<Accessor<'_>> {
        let i = self.position(id)?;
        Ok(Accessor::new(&mut self.descriptors[i], &mut self.pending))
    }

    pub fn button(&mut self, id: &str) -> GuiResult<ButtonAccessor<'_>> {
        self.accessor(id)?.into_button()
    }

    pub fn value(&mut self, id: &str) -> GuiResult<ValueAccessor<'_>> {
        self.accessor(id)?.into_value()
    }

    pub fn check(&mut self, id: &str) -> GuiResult<CheckAccessor<'_>> {
        self.accessor(id)?.into_check()
    }

    pub fn toggle(&mut self, id: &str) -> GuiResult<ToggleAccessor<'_>> {
        self.accessor(id)?.into_toggle()
    }

    pub fn select(&mut self, id: &str) -> GuiResult<SelectAccessor<'_>> {
        self.accessor(id)?.into_select()
    }

    pub fn radio_group(&mut self, id: &str) -> GuiResult<RadioGroupAccessor<'_>> {
        self.accessor(id)?.into_radio_group()
    }

    pub fn slider(&mut self, id: &str) -> GuiResult<SliderAccessor<'_>> {
        self.accessor(id)?.into_slider()
    }

    pub fn progress(&mut self, id: &str) -> GuiResult<ProgressAccessor<'_>> {
        self.accessor(id)?.into_progress()
    }

    pub fn spinner(&mut self, id: &str) -> GuiResult<SpinnerAccessor<'_>> {
        self.accessor(id)?.into_spinner()
    }

    pub fn widget_ref(&self, id: &str) -> GuiResult<WidgetRef> {
        self.position(id)?;
        Ok(WidgetRef {
            id: id.to_owned(),
            generation: self.generation,
        })
    }

    /// Accessor for a detached reference; fails if the layout has been rebuilt since.
    pub fn resolve(&mut self, widget: &WidgetRef) -> GuiResult<Accessor<'_>> {
        if widget.generation != self.generation {
            return Err(GuiError::StaleWidget {
                id: widget.id.clone(),
                held: widget.generation,
                current: self.generation,
            });
        }
        self.accessor(&widget.id)
    }

    pub(crate) fn push_event(&mut self, event: UiEvent) {
        self.pending.push(event);
    }

    /// Queues a window action. Handlers use this to close, retitle or
    /// reload the window they run in.
    pub fn request(&mut self, action: WindowAction) {
        self.actions.push(action);
    }

    pub(crate) fn take_actions(&mut self) -> Vec<WindowAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn pending_events(&self) -> &[UiEvent] {
        &self.pending
    }

    /// Runs handlers for every queued event. Events raised by the handlers
    /// themselves stay queued for the next call.
    pub fn dispatch_pending(&mut self) -> usize {
        let events = std::mem::take(&mut self.pending);
        let mut handled = 0;
        for event in events {
            if self.dispatch(&event) {
                handled += 1;
            }
        }
        handled
    }

    fn dispatch(&mut self, event: &UiEvent) -> bool {
        let Some(&i) = self.index.get(event.id()) else {
            return false;
        };
        let generation = self.generation;
        match event {
            UiEvent::Clicked(_) | UiEvent::Toggled(_) => {
                let Some(mut callback) = self.descriptors[i]
                    .state
                    .callback_slot()
                    .and_then(Option::take)
                else {
                    return false;
                };
                callback(self);
                if self.generation == generation
                    && let Some(slot) = self.descriptors[i].state.callback_slot()
                    && slot.is_none()
                {
                    *slot = Some(callback);
                }
            }
            UiEvent::Selected { value, .. } => {
                let Some(mut callback) = self.descriptors[i]
                    .state
                    .select_slot()
                    .and_then(Option::take)
                else {
                    return false;
                };
                callback(self, value);
                if self.generation == generation
                    && let Some(slot) = self.descriptors[i].state.select_slot()
                    && slot.is_none()
                {
                    *slot = Some(callback);
                }
            }
        }
        true
    }
}
