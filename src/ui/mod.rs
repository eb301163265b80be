use crate::configurator::{Configurator, ConfiguratorEvent, View};
use crate::palette::HexColor;
use crate::render::DrawStats;
use egui::{Color32, RichText, Sense, Stroke};

const SWATCH_SIZE: f32 = 34.0;
const SWATCHES_PER_ROW: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    Configurator(ConfiguratorEvent),
    OpenModel,
    Quit,
}

#[derive(Default)]
pub struct UiState {
    notice: Option<String>,
    status: String,
    draw_stats: DrawStats,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_notice(&mut self, message: String) {
        self.notice = Some(message);
    }

    pub fn has_notice(&self) -> bool {
        self.notice.is_some()
    }

    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }

    pub fn set_draw_stats(&mut self, stats: DrawStats) {
        self.draw_stats = stats;
    }

    /// Menu bar, status line and the configurator side panel.
    pub fn show_panels(
        &mut self,
        ctx: &egui::Context,
        configurator: &Configurator,
    ) -> Vec<UiAction> {
        let mut actions = Vec::new();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Archivo", |ui| {
                    if ui.button("Abrir modelo…").clicked() {
                        actions.push(UiAction::OpenModel);
                        ui.close_menu();
                    }
                    if ui.button("Salir").clicked() {
                        actions.push(UiAction::Quit);
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(&self.status).small());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(draw_stats_label(self.draw_stats)).small().weak());
                });
            });
        });

        egui::SidePanel::right("configurator_panel")
            .resizable(false)
            .exact_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Configurador");
                ui.add_space(6.0);
                view_selector(ui, configurator.view(), &mut actions);
                ui.separator();
                palette_panel(ui, configurator, &mut actions);
                ui.separator();
                order_panel(ui, configurator, &mut actions);
            });

        actions
    }

    /// Blocking notice; the backdrop swallows input until it is dismissed.
    pub fn show_notice_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.notice.as_deref() else {
            return;
        };
        let modal = egui::Modal::new(egui::Id::new("configurator_notice")).show(ctx, |ui| {
            ui.set_width(300.0);
            ui.heading("Aviso");
            ui.add_space(4.0);
            ui.label(message);
            ui.add_space(8.0);
            ui.button("Aceptar").clicked()
        });
        if modal.inner || modal.should_close() {
            self.notice = None;
        }
    }
}

fn draw_stats_label(stats: DrawStats) -> String {
    if stats.clipped == 0 {
        format!("{} triángulos", stats.triangles)
    } else {
        format!("{} triángulos, {} recortados", stats.triangles, stats.clipped)
    }
}

fn view_selector(ui: &mut egui::Ui, active: View, actions: &mut Vec<UiAction>) {
    ui.label("Vista");
    for view in View::ALL {
        let button = egui::Button::new(view.label())
            .selected(view == active)
            .min_size(egui::vec2(ui.available_width(), 0.0));
        if ui.add(button).clicked() {
            actions.push(UiAction::Configurator(ConfiguratorEvent::SwitchView(view)));
        }
    }
}

fn palette_panel(ui: &mut egui::Ui, configurator: &Configurator, actions: &mut Vec<UiAction>) {
    let display = configurator.palette_display();
    let Some(category) = display.category else {
        ui.label(RichText::new("Elige una pieza para ver sus colores.").weak());
        return;
    };
    ui.label(format!("Colores: {}", View::from(category).label()));
    if display.swatches.is_empty() {
        ui.label(RichText::new("Sin colores disponibles.").weak());
        return;
    }

    egui::Grid::new("palette_grid")
        .spacing(egui::vec2(6.0, 6.0))
        .show(ui, |ui| {
            for (index, swatch) in display.swatches.iter().enumerate() {
                if swatch_button(ui, swatch.hex, swatch.selected)
                    .on_hover_text(&swatch.name)
                    .clicked()
                {
                    actions.push(UiAction::Configurator(ConfiguratorEvent::ApplyColor {
                        name: swatch.name.clone(),
                        hex: swatch.hex,
                    }));
                }
                if (index + 1) % SWATCHES_PER_ROW == 0 {
                    ui.end_row();
                }
            }
        });

    if let Some(name) = display
        .swatches
        .iter()
        .find(|swatch| swatch.selected)
        .map(|swatch| swatch.name.as_str())
    {
        ui.label(RichText::new(name).small());
    }
}

fn swatch_button(ui: &mut egui::Ui, hex: HexColor, selected: bool) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::click());
    let radius = SWATCH_SIZE * 0.5 - 2.0;
    let stroke = if selected {
        Stroke::new(3.0, ui.visuals().selection.stroke.color)
    } else if response.hovered() {
        Stroke::new(2.0, ui.visuals().widgets.hovered.fg_stroke.color)
    } else {
        Stroke::new(1.0, Color32::from_gray(90))
    };
    let painter = ui.painter();
    painter.circle_filled(rect.center(), radius, Color32::from_rgb(hex.r, hex.g, hex.b));
    painter.circle_stroke(rect.center(), radius, stroke);
    response
}

fn order_panel(ui: &mut egui::Ui, configurator: &Configurator, actions: &mut Vec<UiAction>) {
    let summary = configurator.order_summary();
    egui::Grid::new("order_summary").num_columns(2).show(ui, |ui| {
        ui.label("Chasis");
        ui.label(&summary.chasis);
        ui.end_row();
        ui.label("Botones");
        ui.label(&summary.buttons);
        ui.end_row();
        ui.label("Knobs");
        ui.label(&summary.knobs);
        ui.end_row();
    });
    ui.add_space(8.0);
    let order = egui::Button::new(RichText::new("Comprar").strong())
        .min_size(egui::vec2(ui.available_width(), 28.0));
    if ui.add(order).clicked() {
        actions.push(UiAction::Configurator(ConfiguratorEvent::SubmitOrder));
    }
}
