mod input;
mod timing;

use crate::assets::{self, resolve_asset_path};
use crate::config::AppConfig;
use crate::configurator::{Configurator, ConfiguratorEvent, Effect, View};
use crate::render::{build_scene_mesh, DrawStats, Lighting};
use crate::scene::SceneGraph;
use crate::ui::{UiAction, UiState};
use input::{InputAction, InputState};
use timing::FrameTiming;

use egui::{CursorIcon, PointerButton, Sense};
use std::path::Path;
use std::time::Instant;

const WINDOW_TITLE: &str = "Configurador de Controlador";

pub struct ConfiguratorApp {
    config: AppConfig,
    configurator: Configurator,
    lighting: Lighting,
    ui: UiState,
    input: InputState,
    timing: FrameTiming,
}

impl ConfiguratorApp {
    pub fn new(config: AppConfig) -> Self {
        let environment = config.environment_path.as_deref().map(resolve_asset_path);
        let lighting = Lighting::new(assets::load_lighting(environment.as_deref()));

        let mut ui = UiState::new();
        let configurator = open_model(&config.model_path, &config, &mut ui);

        Self {
            config,
            configurator,
            lighting,
            ui,
            input: InputState::default(),
            timing: FrameTiming::new(WINDOW_TITLE.to_string()),
        }
    }

    fn handle_open_model_action(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("glTF", &["gltf", "glb"])
            .pick_file()
        else {
            return;
        };
        log::info!("Opening model: {}", path.display());
        self.configurator = open_model(&path, &self.config, &mut self.ui);
        self.config.model_path = path;
    }

    fn handle_keys(&mut self, ctx: &egui::Context) -> Vec<ConfiguratorEvent> {
        let keys: Vec<(egui::Key, bool)> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed,
                        repeat: false,
                        ..
                    } => Some((*key, *pressed)),
                    _ => None,
                })
                .collect()
        });

        let blocked = self.ui.has_notice() || ctx.wants_keyboard_input();
        let mut events = Vec::new();
        for (key, pressed) in keys {
            match self.input.handle_key(key, pressed) {
                _ if blocked => {}
                InputAction::SwitchView(view) => events.push(ConfiguratorEvent::SwitchView(view)),
                InputAction::SubmitOrder => events.push(ConfiguratorEvent::SubmitOrder),
                InputAction::None => {}
            }
        }
        events
    }

    /// Draws the model and turns pointer input over it into configurator events.
    fn show_viewport(&mut self, ctx: &egui::Context) -> Vec<ConfiguratorEvent> {
        let mut events = Vec::new();
        let mut stats = DrawStats::default();
        let frame = egui::Frame::default().fill(self.lighting.background());
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
            events.push(ConfiguratorEvent::Resize {
                width: rect.width(),
                height: rect.height(),
            });

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    events.push(ConfiguratorEvent::Pick {
                        x: pos.x - rect.left(),
                        y: pos.y - rect.top(),
                    });
                }
            }
            if response.dragged_by(PointerButton::Primary) {
                let delta = response.drag_delta();
                events.push(ConfiguratorEvent::Orbit {
                    dx: delta.x,
                    dy: delta.y,
                });
            }
            let camera = self.configurator.camera();
            if camera.orbit.enabled && !camera.is_transitioning() {
                if response.dragged() {
                    ctx.set_cursor_icon(CursorIcon::Grabbing);
                } else if response.hovered() {
                    ctx.set_cursor_icon(CursorIcon::Grab);
                }
            }
            if response.hovered() {
                let scroll = ui.input(|input| input.smooth_scroll_delta.y);
                if scroll != 0.0 {
                    events.push(ConfiguratorEvent::Zoom { delta: scroll });
                }
            }

            let (mesh, drawn) = build_scene_mesh(
                self.configurator.scene(),
                self.configurator.camera(),
                &self.lighting,
                rect,
            );
            stats = drawn;
            ui.painter().add(egui::Shape::mesh(mesh));
        });
        self.ui.set_draw_stats(stats);
        events
    }

    fn perform(&mut self, effects: Vec<Effect>) {
        let mut refresh_status = false;
        for effect in effects {
            match effect {
                Effect::Notice(message) => self.ui.show_notice(message),
                Effect::OpenUri(uri) => {
                    if let Err(err) = webbrowser::open(&uri) {
                        log::warn!("Failed to open mail client: {}", err);
                        self.ui.show_notice(format!(
                            "No se pudo abrir el cliente de correo:\n{}",
                            err
                        ));
                    }
                }
                Effect::PaletteChanged | Effect::SelectionChanged => refresh_status = true,
            }
        }
        if refresh_status {
            self.refresh_status();
        }
    }

    fn refresh_status(&mut self) {
        let view = self.configurator.view();
        let mut status = format!("Vista: {}", view.label());
        if let Some(name) = self
            .configurator
            .selected()
            .and_then(|id| self.configurator.scene().node(id))
            .map(|node| node.name.as_str())
        {
            status.push_str(&format!("  |  Pieza: {}", name));
        } else if view != View::Overview {
            status.push_str("  |  Haz clic en una pieza para seleccionarla");
        }
        self.ui.set_status(status);
    }
}

impl eframe::App for ConfiguratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(title) = self.timing.update(Instant::now()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
        let dt = self.timing.frame_dt;

        let mut events = self.handle_keys(ctx);
        events.push(ConfiguratorEvent::Frame { dt });
        if let Some(orbit) = self.input.orbit_event(dt) {
            events.push(orbit);
        }

        for action in self.ui.show_panels(ctx, &self.configurator) {
            match action {
                UiAction::Configurator(event) => events.push(event),
                UiAction::OpenModel => self.handle_open_model_action(),
                UiAction::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }

        events.extend(self.show_viewport(ctx));
        self.ui.show_notice_window(ctx);

        let mut effects = Vec::new();
        for event in events {
            effects.extend(self.configurator.dispatch(event));
        }
        self.perform(effects);

        ctx.request_repaint();
    }
}

/// Builds a configurator for the model at `path`, with an empty scene if it cannot be read.
fn open_model(path: &Path, config: &AppConfig, ui: &mut UiState) -> Configurator {
    let resolved = resolve_asset_path(path);
    match assets::load_model(&resolved) {
        Ok(scene) => {
            let configurator = Configurator::new(scene, config);
            ui.set_status(format!(
                "Modelo: {} ({} piezas configurables)",
                resolved.display(),
                configurator.catalog().total()
            ));
            configurator
        }
        Err(err) => {
            log::error!("Failed to load model: {}", err);
            ui.set_status(format!("No se pudo cargar el modelo: {}", resolved.display()));
            Configurator::new(SceneGraph::new(), config)
        }
    }
}

pub fn run(config: AppConfig) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(config.window_size)
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(ConfiguratorApp::new(config)))),
    )
}
