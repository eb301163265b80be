//! Part classification: buckets the model's meshes into colorable categories
//! by name and assigns each category its default material.

use crate::palette::HexColor;
use crate::scene::{Material, NodeId, SceneGraph};
use serde::{Deserialize, Serialize};

/// Knob candidates at or above this mean channel value are not colorable.
pub const KNOB_LUMINANCE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Chasis,
    Buttons,
    Knobs,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Chasis, Category::Buttons, Category::Knobs];

    pub fn label(self) -> &'static str {
        match self {
            Category::Chasis => "Chasis",
            Category::Buttons => "Buttons",
            Category::Knobs => "Knobs",
        }
    }

    pub fn profile(self) -> MaterialProfile {
        match self {
            Category::Chasis => MaterialProfile {
                metalness: 0.9,
                roughness: 0.35,
            },
            Category::Buttons => MaterialProfile {
                metalness: 0.1,
                roughness: 0.2,
            },
            Category::Knobs => MaterialProfile {
                metalness: 0.0,
                roughness: 0.9,
            },
        }
    }

    /// Category suggested by a mesh name. Patterns are checked in priority order.
    pub fn from_mesh_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        if name.contains("cubechasis") {
            Some(Category::Chasis)
        } else if name.contains("boton") {
            Some(Category::Buttons)
        } else if name.contains("knob") {
            Some(Category::Knobs)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialProfile {
    pub metalness: f32,
    pub roughness: f32,
}

/// Starting color of each category's default material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryColors {
    pub chasis: HexColor,
    pub buttons: HexColor,
    pub knobs: HexColor,
}

impl CategoryColors {
    pub fn get(&self, category: Category) -> HexColor {
        match category {
            Category::Chasis => self.chasis,
            Category::Buttons => self.buttons,
            Category::Knobs => self.knobs,
        }
    }
}

impl Default for CategoryColors {
    fn default() -> Self {
        Self {
            chasis: HexColor::new(0xD0, 0x00, 0x00),
            buttons: HexColor::new(0x1C, 0x1C, 0x1C),
            knobs: HexColor::new(0x28, 0x28, 0x28),
        }
    }
}

/// Selectable parts per category, in traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartCatalog {
    chasis: Vec<NodeId>,
    buttons: Vec<NodeId>,
    knobs: Vec<NodeId>,
}

impl PartCatalog {
    pub fn parts(&self, category: Category) -> &[NodeId] {
        match category {
            Category::Chasis => &self.chasis,
            Category::Buttons => &self.buttons,
            Category::Knobs => &self.knobs,
        }
    }

    pub fn category_of(&self, id: NodeId) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.parts(*category).contains(&id))
    }

    pub fn total(&self) -> usize {
        self.chasis.len() + self.buttons.len() + self.knobs.len()
    }

    fn push(&mut self, category: Category, id: NodeId) {
        match category {
            Category::Chasis => self.chasis.push(id),
            Category::Buttons => self.buttons.push(id),
            Category::Knobs => self.knobs.push(id),
        }
    }
}

pub fn luminance(color: [f32; 3]) -> f32 {
    (color[0] + color[1] + color[2]) / 3.0
}

/// Walks the scene once and builds the part catalog, replacing the material
/// of every accepted part with its category default.
pub fn classify_parts(scene: &mut SceneGraph, colors: &CategoryColors) -> PartCatalog {
    let mut catalog = PartCatalog::default();

    for id in scene.depth_first() {
        let Some(name) = scene.node(id).map(|node| node.name.clone()) else {
            continue;
        };
        let Some(mesh) = scene.mesh_mut(id) else {
            continue;
        };
        mesh.cast_shadow = true;
        mesh.receive_shadow = true;

        let Some(category) = Category::from_mesh_name(&name) else {
            continue;
        };

        if category == Category::Knobs {
            let lightness = luminance(mesh.material.color);
            if lightness >= KNOB_LUMINANCE_THRESHOLD {
                log::debug!("Rejected knob '{}' (luminance {:.2})", name, lightness);
                mesh.material = Material::plain_white();
                mesh.selectable = false;
                continue;
            }
        }

        let profile = category.profile();
        mesh.material = Material::standard(
            colors.get(category).to_rgb(),
            profile.metalness,
            profile.roughness,
        );
        mesh.selectable = true;
        catalog.push(category, id);
        log::debug!("Classified '{}' as {}", name, category.label());
    }

    log::info!(
        "Classified parts: {} chasis, {} buttons, {} knobs",
        catalog.parts(Category::Chasis).len(),
        catalog.parts(Category::Buttons).len(),
        catalog.parts(Category::Knobs).len()
    );
    catalog
}
