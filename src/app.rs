//! The root window. Loads layout documents into the widget registry and drives
//! the eframe loop that draws them.

use eframe::egui;
use egui::{Color32, IconData, Rect, Vec2, ViewportCommand, vec2};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::accessor::Accessor;
use crate::config::{GuiConfig, LayoutMode};
use crate::containment::{self, Resolved};
use crate::error::{FontError, GuiError, GuiResult};
use crate::factory;
use crate::layout::{self, CanvasSpec, LayoutDocument};
use crate::raster;
use crate::registry::{WidgetRegistry, WindowAction};
use crate::render;
use crate::rescale;
use crate::widget::FontBook;

pub struct AutoGui {
    config: GuiConfig,
    registry: WidgetRegistry,
    fonts: FontBook,
    canvas: CanvasSpec,
    /// Last central panel size seen, for resize detection
    last_size: Option<Vec2>,
    icon: Option<Arc<IconData>>,
    layout_path: Option<PathBuf>,
    /// Viewport changes waiting for the next frame
    commands: Vec<ViewportCommand>,
}

impl Default for AutoGui {
    fn default() -> Self {
        Self::new(GuiConfig::default())
    }
}

impl AutoGui {
    pub fn new(config: GuiConfig) -> Self {
        Self {
            config,
            registry: WidgetRegistry::new(),
            fonts: FontBook::new(),
            canvas: CanvasSpec::default(),
            last_size: None,
            icon: None,
            layout_path: None,
            commands: Vec::new(),
        }
    }

    pub fn config(&self) -> &GuiConfig {
        &self.config
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// Typed access to a component of the current layout.
    pub fn widget(&mut self, id: &str) -> GuiResult<Accessor<'_>> {
        self.registry.accessor(id)
    }

    pub fn canvas(&self) -> &CanvasSpec {
        &self.canvas
    }

    pub fn layout_path(&self) -> Option<&Path> {
        self.layout_path.as_deref()
    }

    /// Replaces the current layout with the one in `path`.
    ///
    /// Errors are logged, never returned: a missing or malformed file leaves an
    /// empty registry. Returns the number of widgets built.
    pub fn build_gui(&mut self, path: impl AsRef<Path>) -> usize {
        self.try_build_gui(path).unwrap_or_else(|e| {
            log::error!("{e}");
            0
        })
    }

    /// Like [`AutoGui::build_gui`] but reports a layout that cannot be loaded.
    /// The registry is emptied either way.
    pub fn try_build_gui(&mut self, path: impl AsRef<Path>) -> GuiResult<usize> {
        let path = layout::resolve_resource(path.as_ref());
        self.layout_path = Some(path.clone());
        match LayoutDocument::from_path(&path) {
            Ok(doc) => Ok(self.build_document(&doc)),
            Err(e) => {
                self.reset(&CanvasSpec::default());
                Err(e.into())
            }
        }
    }

    /// Like [`AutoGui::build_gui`] but from JSON text already in memory.
    pub fn build_from_str(&mut self, json: &str) -> usize {
        match LayoutDocument::from_json_str(json) {
            Ok(doc) => self.build_document(&doc),
            Err(e) => {
                log::error!("Failed to parse layout: {e}");
                self.reset(&CanvasSpec::default());
                0
            }
        }
    }

    pub fn build_document(&mut self, doc: &LayoutDocument) -> usize {
        self.reset(&doc.canvas);
        let mut built = 0;
        for Resolved { spec, frame } in containment::resolve(doc) {
            match factory::create_component(spec, &frame, self.config.mode, &self.fonts) {
                Ok(descriptor) => {
                    if self.registry.insert(descriptor) {
                        built += 1;
                    }
                }
                Err(e) => log::warn!("Skipping component '{}': {e}", spec.id),
            }
        }
        log::info!(
            "Built {built} of {} components for '{}'",
            doc.components.len(),
            self.canvas.title
        );
        built
    }

    /// Drops every widget and resizes the window to `canvas`.
    fn reset(&mut self, canvas: &CanvasSpec) {
        self.registry.clear();
        self.canvas = canvas.clone();
        self.last_size = None;
        self.commands.push(ViewportCommand::InnerSize(self.canvas_size()));
        self.commands
            .push(ViewportCommand::Title(self.canvas.title.clone()));
        self.commands.push(ViewportCommand::Resizable(
            self.config.mode == LayoutMode::Relative,
        ));
    }

    fn canvas_size(&self) -> Vec2 {
        vec2(self.canvas.width.max(1.0), self.canvas.height.max(1.0))
    }

    /// Rescales fonts for a new root size. Absolute layouts keep their fonts.
    ///
    /// Returns the scale factor applied, if any.
    pub fn on_resize(&mut self, size: Vec2) -> Option<f32> {
        if self.config.mode != LayoutMode::Relative {
            return None;
        }
        let scale = rescale::scale_factor(self.canvas_size(), size);
        let failures = rescale::rescale_fonts(&mut self.registry, &self.fonts, scale);
        if failures > 0 {
            log::warn!("{failures} widget font(s) could not be rescaled to {scale:.3}");
        }
        Some(scale)
    }

    pub fn set_title(&mut self, title: &str) {
        self.canvas.title = title.to_owned();
        self.commands.push(ViewportCommand::Title(title.to_owned()));
    }

    pub fn set_background(&mut self, color: Color32) {
        self.config.background = color;
    }

    pub fn set_icon(&mut self, path: impl AsRef<Path>) -> GuiResult<()> {
        let path = layout::resolve_resource(path.as_ref());
        let icon = raster::load_icon(&path).map_err(|source| {
            let err = GuiError::Icon {
                path: path.clone(),
                source,
            };
            log::error!("{err}");
            err
        })?;
        let icon = Arc::new(icon);
        self.icon = Some(icon.clone());
        self.commands.push(ViewportCommand::Icon(Some(icon)));
        Ok(())
    }

    /// Makes `name` usable as a `fontFamily` in layouts built afterwards.
    pub fn register_font(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), FontError> {
        self.fonts.register(name, bytes).inspect_err(|e| log::error!("{e}"))
    }

    /// Asks the user for a layout file and builds it. `None` if the dialog was cancelled.
    pub fn load_new_gui(&mut self) -> Option<usize> {
        let path = rfd::FileDialog::new()
            .set_title("Select New GUI Layout File")
            .add_filter("JSON files", &["json"])
            .pick_file()?;
        Some(self.build_gui(path))
    }

    /// Rebuilds the layout last loaded from disk.
    pub fn reload(&mut self) -> usize {
        match self.layout_path.clone() {
            Some(path) => self.build_gui(path),
            None => {
                log::warn!("Nothing to reload: no layout file has been loaded");
                0
            }
        }
    }

    pub fn close_gui(&mut self) {
        self.commands.push(ViewportCommand::Close);
    }

    pub fn native_options(&self) -> eframe::NativeOptions {
        let mut viewport = egui::ViewportBuilder::default()
            .with_title(self.canvas.title.clone())
            .with_inner_size(self.canvas_size())
            .with_resizable(self.config.mode == LayoutMode::Relative);
        if let Some(icon) = &self.icon {
            viewport = viewport.with_icon(icon.clone());
        }
        eframe::NativeOptions {
            viewport,
            ..Default::default()
        }
    }

    /// Opens the window and blocks until it is closed.
    pub fn run(self) -> eframe::Result<()> {
        let options = self.native_options();
        let title = self.canvas.title.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(|cc| {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
                Ok(Box::new(self))
            }),
        )
    }

    /// Runs handlers for queued user interaction, then applies the window
    /// actions they requested. Returns the number of handlers run.
    pub fn process_events(&mut self) -> usize {
        let handled = self.registry.dispatch_pending();
        for action in self.registry.take_actions() {
            self.apply(action);
        }
        handled
    }

    fn apply(&mut self, action: WindowAction) {
        log::debug!("Window action {action:?}");
        match action {
            WindowAction::Close => self.close_gui(),
            WindowAction::SetTitle(title) => self.set_title(&title),
            WindowAction::SetBackground(color) => self.set_background(color),
            WindowAction::Reload => {
                self.reload();
            }
            WindowAction::Open(path) => {
                self.build_gui(path);
            }
            WindowAction::Pick => {
                self.load_new_gui();
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (open, reload) = ctx.input(|i| {
            let open = i.modifiers.command && i.key_pressed(egui::Key::O);
            let reload = i.modifiers.command && i.key_pressed(egui::Key::R);
            (open, reload)
        });
        if open {
            self.load_new_gui();
        } else if reload {
            self.reload();
        }
    }

    fn canvas_rect(&self, area: Rect) -> Rect {
        match self.config.mode {
            LayoutMode::Absolute => Rect::from_min_size(area.min, self.canvas_size()),
            LayoutMode::Relative => area,
        }
    }

    fn track_size(&mut self, size: Vec2) {
        let changed = self
            .last_size
            .is_none_or(|last| (last - size).length() > 0.5);
        if changed {
            self.last_size = Some(size);
            self.on_resize(size);
        }
    }
}

impl eframe::App for AutoGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(definitions) = self.fonts.take_definitions() {
            ctx.set_fonts(definitions);
        }
        if self.config.shortcuts {
            self.handle_shortcuts(ctx);
        }
        for command in self.commands.drain(..) {
            ctx.send_viewport_cmd(command);
        }

        let frame = egui::Frame::NONE.fill(self.config.background);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let area = ui.max_rect();
            self.track_size(area.size());
            let canvas = self.canvas_rect(area);
            render::draw_registry(ui, canvas, &mut self.registry);
        });

        self.process_events();
        if !self.commands.is_empty() {
            ctx.request_repaint();
        }
    }
}
