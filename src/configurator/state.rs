use crate::classify::Category;
use crate::palette::UNDEFINED_COLOR_NAME;
use crate::scene::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Overview,
    Chasis,
    Buttons,
    Knobs,
}

impl View {
    pub const ALL: [View; 4] = [View::Overview, View::Chasis, View::Buttons, View::Knobs];

    /// Category being edited, `None` for the overview.
    pub fn category(self) -> Option<Category> {
        match self {
            View::Overview => None,
            View::Chasis => Some(Category::Chasis),
            View::Buttons => Some(Category::Buttons),
            View::Knobs => Some(Category::Knobs),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Overview => "Vista General",
            View::Chasis => "Chasis",
            View::Buttons => "Botones",
            View::Knobs => "Perillas",
        }
    }
}

impl From<Category> for View {
    fn from(category: Category) -> Self {
        match category {
            Category::Chasis => View::Chasis,
            Category::Buttons => View::Buttons,
            Category::Knobs => View::Knobs,
        }
    }
}

/// How an applied color reaches the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColoringPolicy {
    /// Every part of the active category, per-category palettes.
    #[default]
    CategoryWide,
    /// Only the picked part, one shared palette; the chasis view preselects its first part.
    SinglePart,
}

impl ColoringPolicy {
    pub fn auto_selects_chasis(self) -> bool {
        matches!(self, ColoringPolicy::SinglePart)
    }

    pub fn uses_shared_palette(self) -> bool {
        matches!(self, ColoringPolicy::SinglePart)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChosenColors {
    chasis: Option<String>,
    buttons: Option<String>,
    knobs: Option<String>,
}

impl ChosenColors {
    pub fn get(&self, category: Category) -> Option<&str> {
        match category {
            Category::Chasis => self.chasis.as_deref(),
            Category::Buttons => self.buttons.as_deref(),
            Category::Knobs => self.knobs.as_deref(),
        }
    }

    pub fn set(&mut self, category: Category, name: Option<String>) {
        let slot = match category {
            Category::Chasis => &mut self.chasis,
            Category::Buttons => &mut self.buttons,
            Category::Knobs => &mut self.knobs,
        };
        *slot = name;
    }

    pub fn name_or_sentinel(&self, category: Category) -> &str {
        self.get(category).unwrap_or(UNDEFINED_COLOR_NAME)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfiguratorState {
    pub view: View,
    pub selected: Option<NodeId>,
    pub chosen: ChosenColors,
}
