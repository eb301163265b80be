//! View and selection controller.
//!
//! Owns the loaded model, the part catalog and the configurator state. The
//! host feeds it [`ConfiguratorEvent`]s and performs the returned
//! [`Effect`]s; nothing in here touches a window or a widget.

mod state;

pub use state::{ChosenColors, ColoringPolicy, View};
use state::ConfiguratorState;

use crate::classify::{classify_parts, Category, PartCatalog};
use crate::config::{AppConfig, CameraSettings};
use crate::order::{OrderSettings, OrderSummary};
use crate::palette::{HexColor, Palette, PaletteSet};
use crate::render::{pick_nearest, screen_to_ray, CameraRig, Easing};
use crate::scene::{IdleBob, NodeId, SceneGraph};

const NO_CATEGORY_NOTICE: &str =
    "Elige Chasis, Botones o Perillas antes de aplicar un color.";
const NO_SELECTION_NOTICE: &str =
    "Primero selecciona una pieza del modelo haciendo clic sobre ella.";
const ZOOM_SENSITIVITY: f32 = 0.002;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfiguratorEvent {
    SwitchView(View),
    Pick { x: f32, y: f32 },
    ApplyColor { name: String, hex: HexColor },
    SubmitOrder,
    Resize { width: f32, height: f32 },
    Frame { dt: f32 },
    /// Pointer drag in viewport pixels.
    Orbit { dx: f32, dy: f32 },
    /// Scroll amount; positive moves closer.
    Zoom { delta: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notice(String),
    OpenUri(String),
    PaletteChanged,
    SelectionChanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchDisplay {
    pub name: String,
    pub hex: HexColor,
    pub selected: bool,
}

/// Swatches currently offered to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteDisplay {
    pub category: Option<Category>,
    pub swatches: Vec<SwatchDisplay>,
}

pub struct Configurator {
    scene: SceneGraph,
    catalog: PartCatalog,
    state: ConfiguratorState,
    policy: ColoringPolicy,
    palettes: PaletteSet,
    palette_display: PaletteDisplay,
    camera: CameraRig,
    camera_settings: CameraSettings,
    highlight: [f32; 3],
    order: OrderSettings,
    viewport: [f32; 2],
    idle: IdleBob,
}

impl Configurator {
    /// Classifies the model's parts, fits it into view and enters the overview.
    pub fn new(mut scene: SceneGraph, config: &AppConfig) -> Self {
        let catalog = classify_parts(&mut scene, &config.initial_colors);
        scene.fit_to_size(config.model_size);

        let mut state = ConfiguratorState::default();
        for category in Category::ALL {
            let palette = if config.policy.uses_shared_palette() {
                config.palettes.shared()
            } else {
                config.palettes.for_category(category)
            };
            let name = palette
                .name_for_hex(config.initial_colors.get(category))
                .map(str::to_string);
            state.chosen.set(category, name);
        }

        let camera = CameraRig::new(
            config.camera.overview,
            config.camera.lens,
            config.camera.orbit,
        );

        let mut configurator = Self {
            scene,
            catalog,
            state,
            policy: config.policy,
            palettes: config.palettes.clone(),
            palette_display: PaletteDisplay::default(),
            camera,
            camera_settings: config.camera.clone(),
            highlight: config.highlight_emissive,
            order: config.order.clone(),
            viewport: [0.0, 0.0],
            idle: IdleBob::default(),
        };
        configurator.switch_view(View::Overview);
        configurator
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn catalog(&self) -> &PartCatalog {
        &self.catalog
    }

    pub fn view(&self) -> View {
        self.state.view
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.state.selected
    }

    pub fn palette_display(&self) -> &PaletteDisplay {
        &self.palette_display
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn dispatch(&mut self, event: ConfiguratorEvent) -> Vec<Effect> {
        match event {
            ConfiguratorEvent::SwitchView(view) => self.switch_view(view),
            ConfiguratorEvent::Pick { x, y } => self.pick_part(x, y),
            ConfiguratorEvent::ApplyColor { name, hex } => self.apply_color(&name, hex),
            ConfiguratorEvent::SubmitOrder => vec![self.submit_order()],
            ConfiguratorEvent::Resize { width, height } => {
                self.viewport = [width.max(0.0), height.max(0.0)];
                Vec::new()
            }
            ConfiguratorEvent::Frame { dt } => {
                self.advance(dt);
                Vec::new()
            }
            ConfiguratorEvent::Orbit { dx, dy } => {
                let height = self.viewport[1];
                if height > 0.0 {
                    let full_turn = std::f32::consts::TAU;
                    self.camera
                        .orbit_by(-full_turn * dx / height, -full_turn * dy / height);
                }
                Vec::new()
            }
            ConfiguratorEvent::Zoom { delta } => {
                self.camera.zoom_by((-delta * ZOOM_SENSITIVITY).exp());
                Vec::new()
            }
        }
    }

    pub fn switch_view(&mut self, target: View) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.state.selected.is_some() {
            self.clear_highlight();
            self.state.selected = None;
            effects.push(Effect::SelectionChanged);
        }

        self.state.view = target;
        self.rebuild_palette_display();
        effects.push(Effect::PaletteChanged);

        if target == View::Chasis && self.policy.auto_selects_chasis() {
            if let Some(&first) = self.catalog.parts(Category::Chasis).first() {
                self.select(first);
                effects.push(Effect::SelectionChanged);
            }
        }

        let pose = match target {
            View::Overview => self.camera_settings.overview,
            _ => self.camera_settings.focus,
        };
        self.camera.set_orbit_enabled(target == View::Overview);
        self.camera.transition_to(
            pose,
            self.camera_settings.transition_seconds,
            Easing::Power3InOut,
        );

        log::info!("Switched to view {:?}", target);
        effects
    }

    pub fn pick_part(&mut self, x: f32, y: f32) -> Vec<Effect> {
        let Some(category) = self.state.view.category() else {
            return Vec::new();
        };
        let parts = self.catalog.parts(category);
        if parts.is_empty() {
            return Vec::new();
        }
        let [width, height] = self.viewport;
        let inverse = self.camera.view_projection(width / height).inverse();
        let Some(ray) = screen_to_ray(x, y, width, height, inverse) else {
            return Vec::new();
        };

        match pick_nearest(&ray, &self.scene, parts) {
            Some(hit) => {
                self.clear_highlight();
                self.select(hit.node);
                log::debug!(
                    "Picked part {} at {:?} (distance {:.3})",
                    hit.node,
                    hit.point,
                    hit.distance
                );
                vec![Effect::SelectionChanged]
            }
            None => {
                self.clear_highlight();
                let sticky = self.state.view == View::Chasis && self.policy.auto_selects_chasis();
                if !sticky && self.state.selected.take().is_some() {
                    vec![Effect::SelectionChanged]
                } else {
                    Vec::new()
                }
            }
        }
    }

    pub fn apply_color(&mut self, name: &str, hex: HexColor) -> Vec<Effect> {
        if let Some(category) = self.state.view.category() {
            if self.catalog.parts(category).is_empty() {
                return Vec::new();
            }
        }
        let rgb = hex.to_rgb();
        match self.policy {
            ColoringPolicy::SinglePart => {
                let Some(selected) = self.state.selected else {
                    return vec![Effect::Notice(NO_SELECTION_NOTICE.to_string())];
                };
                let Some(mesh) = self.scene.mesh_mut(selected) else {
                    return Vec::new();
                };
                mesh.material.color = rgb;
                if let Some(category) = self.catalog.category_of(selected) {
                    self.state.chosen.set(category, Some(name.to_string()));
                }
            }
            ColoringPolicy::CategoryWide => {
                let Some(category) = self.state.view.category() else {
                    return vec![Effect::Notice(NO_CATEGORY_NOTICE.to_string())];
                };
                for &id in self.catalog.parts(category) {
                    if let Some(mesh) = self.scene.mesh_mut(id) {
                        mesh.material.color = rgb;
                    }
                }
                self.state.chosen.set(category, Some(name.to_string()));
            }
        }

        log::info!("Applied color {} ({})", name, hex);
        self.rebuild_palette_display();
        vec![Effect::PaletteChanged]
    }

    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary::from_chosen(&self.state.chosen)
    }

    pub fn submit_order(&self) -> Effect {
        let summary = self.order_summary();
        log::info!(
            "Submitting order: chasis={}, buttons={}, knobs={}",
            summary.chasis,
            summary.buttons,
            summary.knobs
        );
        Effect::OpenUri(summary.mailto_uri(&self.order))
    }

    /// Steps the camera and the idle animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.camera.update(dt);
        self.idle.advance(dt);
        self.scene.set_idle_offset(self.idle.offset());
    }

    fn active_palette(&self, category: Category) -> &Palette {
        if self.policy.uses_shared_palette() {
            self.palettes.shared()
        } else {
            self.palettes.for_category(category)
        }
    }

    fn rebuild_palette_display(&mut self) {
        let Some(category) = self.state.view.category() else {
            self.palette_display = PaletteDisplay::default();
            return;
        };
        let chosen = self.state.chosen.get(category);
        let swatches = self
            .active_palette(category)
            .swatches()
            .iter()
            .map(|swatch| SwatchDisplay {
                name: swatch.name.clone(),
                hex: swatch.hex,
                selected: chosen == Some(swatch.name.as_str()),
            })
            .collect();
        self.palette_display = PaletteDisplay {
            category: Some(category),
            swatches,
        };
    }

    fn select(&mut self, id: NodeId) {
        self.state.selected = Some(id);
        let highlight = self.highlight;
        if let Some(mesh) = self.scene.mesh_mut(id) {
            mesh.material.emissive = highlight;
        }
    }

    fn clear_highlight(&mut self) {
        if let Some(mesh) = self.state.selected.and_then(|id| self.scene.mesh_mut(id)) {
            mesh.material.emissive = [0.0, 0.0, 0.0];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::tests::quad;
    use crate::scene::{Material, MeshData, NodeKind};
    use glam::Vec3;

    const VIEWPORT: [f32; 2] = [800.0, 600.0];

    /// Flat device: chasis on the left half, buttons and knobs on the right.
    fn device(with_knobs: bool) -> SceneGraph {
        let mut scene = SceneGraph::new();
        let root = scene.add_node("BEATO3", NodeKind::Group, None);
        let mut part = |name: &str, rect: (f32, f32, f32, f32)| {
            let (positions, indices) = quad(rect.0, rect.1, rect.2, rect.3, 0.0);
            scene.add_node(
                name,
                NodeKind::Mesh(MeshData::new(
                    positions,
                    indices,
                    Material::standard([0.1, 0.1, 0.1], 0.5, 0.5),
                )),
                Some(root),
            );
        };
        part("CubeChasis_01", (-1.0, 0.0, -1.0, 1.0));
        part("Boton_A", (0.0, 0.5, -1.0, -0.5));
        part("Boton_B", (0.0, 0.5, 0.0, 0.5));
        if with_knobs {
            part("Knob_1", (0.5, 1.0, 0.5, 1.0));
        } else {
            part("Logo", (0.5, 1.0, 0.5, 1.0));
        }
        scene
    }

    fn configurator(policy: ColoringPolicy, with_knobs: bool) -> Configurator {
        let config = AppConfig {
            policy,
            ..AppConfig::default()
        };
        let mut configurator = Configurator::new(device(with_knobs), &config);
        configurator.dispatch(ConfiguratorEvent::Resize {
            width: VIEWPORT[0],
            height: VIEWPORT[1],
        });
        configurator
    }

    fn enter(configurator: &mut Configurator, view: View) {
        configurator.dispatch(ConfiguratorEvent::SwitchView(view));
        configurator.dispatch(ConfiguratorEvent::Frame { dt: 2.0 });
        assert!(!configurator.camera().is_transitioning());
    }

    fn node_named(configurator: &Configurator, name: &str) -> NodeId {
        configurator
            .scene()
            .depth_first()
            .into_iter()
            .find(|&id| {
                configurator
                    .scene()
                    .node(id)
                    .is_some_and(|node| node.name == name)
            })
            .unwrap()
    }

    /// Viewport pixel showing the model-space point `local`.
    fn pixel_of(configurator: &Configurator, local: Vec3) -> (f32, f32) {
        let world = configurator.scene().model_matrix().transform_point3(local);
        let view_proj = configurator
            .camera()
            .view_projection(VIEWPORT[0] / VIEWPORT[1]);
        let ndc = view_proj.project_point3(world);
        (
            (ndc.x + 1.0) * 0.5 * VIEWPORT[0],
            (1.0 - ndc.y) * 0.5 * VIEWPORT[1],
        )
    }

    fn pick(configurator: &mut Configurator, local: Vec3) -> Vec<Effect> {
        let (x, y) = pixel_of(configurator, local);
        configurator.dispatch(ConfiguratorEvent::Pick { x, y })
    }

    fn apply(configurator: &mut Configurator, name: &str, hex: &str) -> Vec<Effect> {
        configurator.dispatch(ConfiguratorEvent::ApplyColor {
            name: name.to_string(),
            hex: HexColor::parse(hex).unwrap(),
        })
    }

    fn color_of(configurator: &Configurator, id: NodeId) -> HexColor {
        HexColor::from_rgb(configurator.scene().mesh(id).unwrap().material.color)
    }

    const MISS: Vec3 = Vec3::new(0.0, 0.0, 4.0);

    #[test]
    fn starts_in_overview_with_default_names() {
        let configurator = configurator(ColoringPolicy::CategoryWide, true);
        assert_eq!(configurator.view(), View::Overview);
        assert!(configurator.camera().orbit.enabled);
        assert!(configurator.palette_display().swatches.is_empty());
        assert_eq!(configurator.catalog().total(), 4);

        let summary = configurator.order_summary();
        assert_eq!(summary.chasis, "Rojo Metálico");
        assert_eq!(summary.buttons, "Negro Clásico");
        assert_eq!(summary.knobs, "Negro Mate");
    }

    #[test]
    fn shared_palette_names_come_from_reverse_lookup() {
        let configurator = configurator(ColoringPolicy::SinglePart, true);
        let summary = configurator.order_summary();
        assert_eq!(summary.chasis, "Rojo Metálico");
        assert_eq!(summary.buttons, "Negro Ónix");
        assert_eq!(summary.knobs, "Negro Mate");
    }

    #[test]
    fn orbit_only_in_overview() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        for view in [View::Chasis, View::Buttons, View::Knobs] {
            enter(&mut configurator, view);
            assert!(!configurator.camera().orbit.enabled, "{view:?}");
            assert_eq!(configurator.camera().pose(), CameraSettings::default().focus);
        }
        enter(&mut configurator, View::Overview);
        assert!(configurator.camera().orbit.enabled);
        assert_eq!(configurator.camera().pose(), CameraSettings::default().overview);
    }

    #[test]
    fn palette_follows_the_view_and_marks_the_chosen_name() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        let effects = configurator.dispatch(ConfiguratorEvent::SwitchView(View::Buttons));
        assert!(effects.contains(&Effect::PaletteChanged));

        let display = configurator.palette_display();
        assert_eq!(display.category, Some(Category::Buttons));
        assert_eq!(display.swatches.len(), 7);
        let selected: Vec<&str> = display
            .swatches
            .iter()
            .filter(|swatch| swatch.selected)
            .map(|swatch| swatch.name.as_str())
            .collect();
        assert_eq!(selected, vec!["Negro Clásico"]);
    }

    #[test]
    fn category_wide_colors_every_part_of_the_view() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        enter(&mut configurator, View::Buttons);
        let effects = apply(&mut configurator, "Verde", "#1F7A1F");
        assert_eq!(effects, vec![Effect::PaletteChanged]);

        for name in ["Boton_A", "Boton_B"] {
            let id = node_named(&configurator, name);
            assert_eq!(color_of(&configurator, id), HexColor::new(0x1F, 0x7A, 0x1F));
        }
        let chasis = node_named(&configurator, "CubeChasis_01");
        assert_eq!(color_of(&configurator, chasis), HexColor::new(0xD0, 0x00, 0x00));
        assert_eq!(configurator.order_summary().buttons, "Verde");
        assert!(configurator
            .palette_display()
            .swatches
            .iter()
            .any(|swatch| swatch.name == "Verde" && swatch.selected));
    }

    #[test]
    fn category_wide_in_overview_needs_a_category() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        let effects = apply(&mut configurator, "Verde", "#1F7A1F");
        assert!(matches!(effects.as_slice(), [Effect::Notice(_)]));
        assert_eq!(configurator.order_summary().buttons, "Negro Clásico");
    }

    #[test]
    fn empty_category_ignores_colors() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, false);
        enter(&mut configurator, View::Knobs);
        assert!(configurator.catalog().parts(Category::Knobs).is_empty());

        let before = configurator.order_summary();
        assert!(apply(&mut configurator, "Blanco", "#F5F5F5").is_empty());
        assert_eq!(configurator.order_summary(), before);
        assert!(pick(&mut configurator, Vec3::new(0.75, 0.0, 0.75)).is_empty());

        let logo = node_named(&configurator, "Logo");
        assert_eq!(color_of(&configurator, logo), HexColor::from_rgb([0.1, 0.1, 0.1]));
    }

    #[test]
    fn empty_category_ignores_colors_without_a_selection() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, false);
        enter(&mut configurator, View::Knobs);
        assert_eq!(configurator.selected(), None);

        let before = configurator.order_summary();
        assert!(apply(&mut configurator, "Blanco Puro", "#F5F5F5").is_empty());
        assert_eq!(configurator.order_summary(), before);
    }

    #[test]
    fn orbit_responds_right_after_loading() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        assert!(!configurator.camera().is_transitioning());
        configurator.dispatch(ConfiguratorEvent::Orbit { dx: 80.0, dy: 0.0 });
        configurator.dispatch(ConfiguratorEvent::Frame { dt: 1.0 / 60.0 });
        assert_ne!(configurator.camera().pose(), CameraSettings::default().overview);
    }

    #[test]
    fn pick_selects_and_highlights_the_part_under_the_pointer() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, true);
        enter(&mut configurator, View::Buttons);
        let button_b = node_named(&configurator, "Boton_B");

        let effects = pick(&mut configurator, Vec3::new(0.25, 0.0, 0.25));
        assert_eq!(effects, vec![Effect::SelectionChanged]);
        assert_eq!(configurator.selected(), Some(button_b));
        let emissive = configurator.scene().mesh(button_b).unwrap().material.emissive;
        assert_eq!(emissive, AppConfig::default().highlight_emissive);

        enter(&mut configurator, View::Knobs);
        assert_eq!(configurator.selected(), None);
        let emissive = configurator.scene().mesh(button_b).unwrap().material.emissive;
        assert_eq!(emissive, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn pick_only_considers_the_active_category() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, true);
        enter(&mut configurator, View::Knobs);
        pick(&mut configurator, Vec3::new(-0.5, 0.0, 0.0));
        assert_eq!(configurator.selected(), None);

        pick(&mut configurator, Vec3::new(0.75, 0.0, 0.75));
        assert_eq!(configurator.selected(), Some(node_named(&configurator, "Knob_1")));
    }

    #[test]
    fn missed_pick_clears_selection_and_apply_then_warns() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, true);
        enter(&mut configurator, View::Buttons);
        pick(&mut configurator, Vec3::new(0.25, 0.0, -0.75));
        assert!(configurator.selected().is_some());

        let effects = pick(&mut configurator, MISS);
        assert_eq!(effects, vec![Effect::SelectionChanged]);
        assert_eq!(configurator.selected(), None);

        let effects = apply(&mut configurator, "Rosa", "#FF007F");
        assert!(matches!(effects.as_slice(), [Effect::Notice(_)]));
        assert_eq!(configurator.order_summary().buttons, "Negro Ónix");
    }

    #[test]
    fn single_part_colors_only_the_selection() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, true);
        enter(&mut configurator, View::Buttons);
        pick(&mut configurator, Vec3::new(0.25, 0.0, -0.75));
        let button_a = node_named(&configurator, "Boton_A");
        let button_b = node_named(&configurator, "Boton_B");
        assert_eq!(configurator.selected(), Some(button_a));

        assert_eq!(apply(&mut configurator, "Rosa", "#FF007F"), vec![Effect::PaletteChanged]);
        assert_eq!(color_of(&configurator, button_a), HexColor::new(0xFF, 0x00, 0x7F));
        assert_eq!(color_of(&configurator, button_b), HexColor::new(0x1C, 0x1C, 0x1C));
        assert_eq!(configurator.order_summary().buttons, "Rosa");
        assert_eq!(configurator.palette_display().swatches.len(), 12);
    }

    #[test]
    fn chasis_view_preselects_and_keeps_its_part() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, true);
        let chasis = node_named(&configurator, "CubeChasis_01");
        let effects = configurator.dispatch(ConfiguratorEvent::SwitchView(View::Chasis));
        assert!(effects.contains(&Effect::SelectionChanged));
        assert_eq!(configurator.selected(), Some(chasis));

        configurator.dispatch(ConfiguratorEvent::Frame { dt: 2.0 });
        assert!(pick(&mut configurator, MISS).is_empty());
        assert_eq!(configurator.selected(), Some(chasis));

        apply(&mut configurator, "Dorado", "#FFD700");
        assert_eq!(configurator.order_summary().chasis, "Dorado");
    }

    #[test]
    fn reselecting_the_active_view_clears_the_selection() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, true);
        enter(&mut configurator, View::Buttons);
        pick(&mut configurator, Vec3::new(0.25, 0.0, -0.75));
        let button_a = node_named(&configurator, "Boton_A");
        assert_eq!(configurator.selected(), Some(button_a));

        let effects = configurator.dispatch(ConfiguratorEvent::SwitchView(View::Buttons));
        assert!(effects.contains(&Effect::SelectionChanged));
        assert_eq!(configurator.selected(), None);
        let emissive = configurator.scene().mesh(button_a).unwrap().material.emissive;
        assert_eq!(emissive, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn category_wide_does_not_preselect() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        enter(&mut configurator, View::Chasis);
        assert_eq!(configurator.selected(), None);
    }

    #[test]
    fn overview_ignores_picks() {
        let mut configurator = configurator(ColoringPolicy::SinglePart, true);
        configurator.dispatch(ConfiguratorEvent::Frame { dt: 2.0 });
        assert!(pick(&mut configurator, Vec3::new(-0.5, 0.0, 0.0)).is_empty());
        assert_eq!(configurator.selected(), None);
    }

    #[test]
    fn submit_order_opens_a_mailto_link() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        let effects = configurator.dispatch(ConfiguratorEvent::SubmitOrder);
        let [Effect::OpenUri(uri)] = effects.as_slice() else {
            panic!("expected a single OpenUri effect, got {effects:?}");
        };
        assert!(uri.starts_with("mailto:tu-email@dominio.com?subject="));
        assert!(uri.contains("Negro%20Cl%C3%A1sico"));
    }

    #[test]
    fn pick_without_viewport_is_ignored() {
        let config = AppConfig {
            policy: ColoringPolicy::SinglePart,
            ..AppConfig::default()
        };
        let mut configurator = Configurator::new(device(true), &config);
        configurator.dispatch(ConfiguratorEvent::SwitchView(View::Buttons));
        configurator.dispatch(ConfiguratorEvent::Frame { dt: 2.0 });
        let effects = configurator.dispatch(ConfiguratorEvent::Pick { x: 10.0, y: 10.0 });
        assert!(effects.is_empty());
    }

    #[test]
    fn idle_bob_moves_the_model() {
        let mut configurator = configurator(ColoringPolicy::CategoryWide, true);
        let before = configurator.scene().model_matrix();
        configurator.dispatch(ConfiguratorEvent::Frame { dt: 1.5 });
        let after = configurator.scene().model_matrix();
        let lift = after.w_axis.y - before.w_axis.y;
        assert!((lift - 0.025).abs() < 1e-4);
    }
}
