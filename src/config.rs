use crate::classify::CategoryColors;
use crate::configurator::ColoringPolicy;
use crate::order::OrderSettings;
use crate::palette::PaletteSet;
use crate::render::{CameraPose, Lens, OrbitControls};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub overview: CameraPose,
    pub focus: CameraPose,
    pub lens: Lens,
    pub orbit: OrbitControls,
    pub transition_seconds: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            overview: CameraPose::new([2.0, 1.0, -0.1], [0.0, -0.5, -0.1]),
            focus: CameraPose::new([1.0, 2.0, -0.6], [-0.1, -0.8, -0.6]),
            lens: Lens::default(),
            orbit: OrbitControls::default(),
            transition_seconds: 1.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub environment_path: Option<PathBuf>,
    /// Largest side of the model after fitting, in world units.
    pub model_size: f32,
    pub policy: ColoringPolicy,
    pub palettes: PaletteSet,
    pub initial_colors: CategoryColors,
    pub highlight_emissive: [f32; 3],
    pub camera: CameraSettings,
    pub order: OrderSettings,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/BEATO3.glb"),
            environment_path: Some(PathBuf::from("models/gem_studio_1k.hdr")),
            model_size: 1.8,
            policy: ColoringPolicy::default(),
            palettes: PaletteSet::default(),
            initial_colors: CategoryColors::default(),
            highlight_emissive: [0.25, 0.25, 0.25],
            camera: CameraSettings::default(),
            order: OrderSettings::default(),
            window_size: [1280.0, 800.0],
        }
    }
}

pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<AppConfig> {
    let json = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&json)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{HexColor, Palette, Swatch};

    #[test]
    fn config_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("configurator.json");

        let mut config = AppConfig::default();
        config.policy = ColoringPolicy::SinglePart;
        config.environment_path = None;
        config.order.recipient = "orders@example.com".to_string();
        config.palettes.knobs = Palette::new(vec![Swatch::new(
            "Cobre",
            HexColor::new(0xB8, 0x73, 0x33),
        )]);

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{ "policy": "single_part", "camera": { "transition_seconds": 0.5 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.policy, ColoringPolicy::SinglePart);
        assert_eq!(config.camera.transition_seconds, 0.5);
        assert_eq!(config.camera.overview, CameraSettings::default().overview);
        assert_eq!(config.model_path, PathBuf::from("models/BEATO3.glb"));
        assert_eq!(config.palettes, PaletteSet::default());
    }

    #[test]
    fn bad_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Json(_))));
        assert!(matches!(
            load_config(&dir.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
        let bad_hex = r##"{ "initial_colors": { "chasis": "#ZZ0000" } }"##;
        assert!(serde_json::from_str::<AppConfig>(bad_hex).is_err());
    }
}
