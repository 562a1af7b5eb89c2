//! Opens a window built from a JSON layout document.

use clap::{Parser, ValueEnum};
use egui::Color32;
use std::path::PathBuf;

use nvlib_gui::widget::parse_color;
use nvlib_gui::{AutoGui, GuiConfig, LayoutMode};

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Fixed-size window, pixel geometry
    Absolute,
    /// Resizable window, geometry and fonts scale with it
    Relative,
}

impl From<Mode> for LayoutMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Absolute => LayoutMode::Absolute,
            Mode::Relative => LayoutMode::Relative,
        }
    }
}

#[derive(Parser)]
#[command(name = "nvlib-gui", version)]
#[command(about = "Build a GUI from a JSON layout file", long_about = None)]
struct Cli {
    /// Layout file to open
    layout: Option<PathBuf>,

    /// Settings file (JSON); command-line flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Geometry mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Window background, e.g. "#f0f0f0" or "lightgray"
    #[arg(long, value_parser = color_arg)]
    background: Option<Color32>,

    /// Window icon image
    #[arg(long)]
    icon: Option<PathBuf>,

    /// Disable the Ctrl+O / Ctrl+R shortcuts
    #[arg(long)]
    no_shortcuts: bool,
}

fn color_arg(s: &str) -> Result<Color32, String> {
    parse_color(s).ok_or_else(|| format!("unrecognized color '{s}'"))
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GuiConfig::from_path(path).unwrap_or_else(|e| {
            log::error!("{e}; using default settings");
            GuiConfig::default()
        }),
        None => GuiConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode.into();
    }
    if let Some(background) = cli.background {
        config.background = background;
    }
    if cli.no_shortcuts {
        config.shortcuts = false;
    }

    let mut gui = AutoGui::new(config);
    if let Some(icon) = &cli.icon
        && gui.set_icon(icon).is_err()
    {
        log::warn!("Keeping the default window icon");
    }
    match &cli.layout {
        Some(layout) => {
            gui.build_gui(layout);
        }
        None => log::info!("No layout given; press Ctrl+O to open one"),
    }
    gui.run()
}
