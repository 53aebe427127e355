use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::MAX_HOTSPOT_CAPACITY;
use crate::hints::{SamplingMode, ShapeMode};
use crate::theme;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration persisted to disk.
///
/// Mode-like fields stay strings here so an unrecognized value survives the
/// JSON parse and can be rejected with a descriptive fatal error during
/// validation instead of silently falling back to a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HintConfigData {
    /// Hotspot id capacity; ids at or beyond this are never highlighted
    pub max_hotspots: usize,

    /// "circle", "rectangle" or "mixed"
    pub shape_mode: String,

    /// Aspect-ratio split for mixed mode: boxes more elongated than this
    /// get a rectangle, the rest a circle
    pub ratio_threshold: f32,

    /// Outline thickness in pixels
    pub border_width: u32,

    /// Outline color (RGB, fully opaque)
    pub border_color: [u8; 3],

    /// Pick a fresh random outline color on every recompute
    pub random_border_color: bool,

    /// Outlines never end up smaller than this, however small the hotspot
    pub min_shape_size: u32,

    /// "full" (every pixel, deterministic) or "strided" (sparse, jittered)
    pub sampling: String,

    /// Sample spacing for strided sampling; ignored for full sampling
    pub stride: u32,

    /// Key held to show hints ("H", "SPACE", "TAB", ...)
    pub activation_key: String,

    /// Skip the built-in key polling entirely; the embedding layer drives
    /// the hint request messages itself
    pub custom_input_handling: bool,

    /// Pause the scene clock while hints are shown
    pub pause_while_shown: bool,

    /// Scene background image; falls back to the built-in demo scene
    pub background_image: Option<PathBuf>,

    /// Hotspot mask image (red channel = hotspot id); must match the
    /// background dimensions
    pub hotspot_mask: Option<PathBuf>,
}

impl Default for HintConfigData {
    fn default() -> Self {
        Self {
            max_hotspots: 32,
            shape_mode: ShapeMode::Mixed.as_str().to_string(),
            ratio_threshold: 1.5,
            border_width: 3,
            border_color: [
                theme::HINT_OUTLINE[0],
                theme::HINT_OUTLINE[1],
                theme::HINT_OUTLINE[2],
            ],
            random_border_color: false,
            min_shape_size: 20,
            sampling: "full".to_string(),
            stride: 2,
            activation_key: "H".to_string(),
            custom_input_handling: false,
            pause_while_shown: true,
            background_image: None,
            hotspot_mask: None,
        }
    }
}

/// Runtime configuration resource holding the raw persisted data.
#[derive(Resource)]
pub struct HintConfig {
    /// The persisted configuration data
    pub data: HintConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            data: HintConfigData::default(),
            config_path: crate::paths::config_file(),
        }
    }
}

/// Validated settings, parsed out of [`HintConfigData`] exactly once at
/// startup. Fixed for the rest of the run.
#[derive(Resource, Debug, Clone)]
pub struct HintSettings {
    pub max_hotspots: usize,
    pub mode: ShapeMode,
    pub ratio_threshold: f32,
    pub border_width: u32,
    pub border_color: [u8; 3],
    pub random_border_color: bool,
    pub min_shape_size: u32,
    pub sampling: SamplingMode,
    pub activation_key: KeyCode,
    pub custom_input_handling: bool,
    pub pause_while_shown: bool,
    pub background_image: Option<PathBuf>,
    pub hotspot_mask: Option<PathBuf>,
}

impl HintSettings {
    /// Validate raw config data. Any unrecognized mode or key string is a
    /// configuration error the caller treats as fatal.
    pub fn from_data(data: &HintConfigData) -> Result<Self, String> {
        let mode = ShapeMode::parse(&data.shape_mode)?;

        let sampling = match data.sampling.as_str() {
            "full" => SamplingMode::Full,
            "strided" => {
                if data.stride < 1 {
                    return Err(format!("stride must be at least 1, got {}", data.stride));
                }
                SamplingMode::Strided { step: data.stride }
            }
            other => {
                return Err(format!(
                    "unrecognized sampling mode {:?} (expected \"full\" or \"strided\")",
                    other
                ));
            }
        };

        if data.max_hotspots < 1 || data.max_hotspots > MAX_HOTSPOT_CAPACITY {
            return Err(format!(
                "max_hotspots must be between 1 and {}, got {}",
                MAX_HOTSPOT_CAPACITY, data.max_hotspots
            ));
        }

        if data.ratio_threshold <= 0.0 {
            return Err(format!(
                "ratio_threshold must be positive, got {}",
                data.ratio_threshold
            ));
        }

        let activation_key = parse_activation_key(&data.activation_key)?;

        Ok(Self {
            max_hotspots: data.max_hotspots,
            mode,
            ratio_threshold: data.ratio_threshold,
            border_width: data.border_width.max(1),
            border_color: data.border_color,
            random_border_color: data.random_border_color,
            min_shape_size: data.min_shape_size,
            sampling,
            activation_key,
            custom_input_handling: data.custom_input_handling,
            pause_while_shown: data.pause_while_shown,
            background_image: data.background_image.clone(),
            hotspot_mask: data.hotspot_mask.clone(),
        })
    }
}

/// Map a config key name onto the keyboard key it stands for.
fn parse_activation_key(name: &str) -> Result<KeyCode, String> {
    let key = match name.to_ascii_uppercase().as_str() {
        "A" => KeyCode::KeyA,
        "B" => KeyCode::KeyB,
        "C" => KeyCode::KeyC,
        "D" => KeyCode::KeyD,
        "E" => KeyCode::KeyE,
        "F" => KeyCode::KeyF,
        "G" => KeyCode::KeyG,
        "H" => KeyCode::KeyH,
        "I" => KeyCode::KeyI,
        "J" => KeyCode::KeyJ,
        "K" => KeyCode::KeyK,
        "L" => KeyCode::KeyL,
        "M" => KeyCode::KeyM,
        "N" => KeyCode::KeyN,
        "O" => KeyCode::KeyO,
        "P" => KeyCode::KeyP,
        "Q" => KeyCode::KeyQ,
        "R" => KeyCode::KeyR,
        "S" => KeyCode::KeyS,
        "T" => KeyCode::KeyT,
        "U" => KeyCode::KeyU,
        "V" => KeyCode::KeyV,
        "W" => KeyCode::KeyW,
        "X" => KeyCode::KeyX,
        "Y" => KeyCode::KeyY,
        "Z" => KeyCode::KeyZ,
        "SPACE" => KeyCode::Space,
        "TAB" => KeyCode::Tab,
        "ENTER" => KeyCode::Enter,
        "SHIFT" => KeyCode::ShiftLeft,
        "CTRL" => KeyCode::ControlLeft,
        "ALT" => KeyCode::AltLeft,
        other => {
            return Err(format!(
                "unrecognized activation key {:?} (expected a letter, SPACE, TAB, ENTER, SHIFT, CTRL or ALT)",
                other
            ));
        }
    };
    Ok(key)
}

/// Result of loading config from disk
struct LoadConfigResult {
    data: HintConfigData,
    /// Reason the config was reset to defaults, if it was
    reset_reason: Option<String>,
}

/// Load configuration from disk.
///
/// An unreadable or corrupt file resets to defaults with a warning; a file
/// that parses but carries an invalid mode value is NOT recovered here - it
/// fails validation later, fatally.
fn load_config(config_path: &std::path::Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        HintConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    HintConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (HintConfigData::default(), None)
    };

    LoadConfigResult { data, reset_reason }
}

/// Startup system: load config from disk, validate, and publish the
/// validated settings as a resource.
///
/// Panics on an invalid mode/key value - a misconfigured highlighter must
/// abort startup with a descriptive message rather than silently highlight
/// with some other shape.
fn load_config_system(mut commands: Commands, mut config: ResMut<HintConfig>) {
    let result = load_config(&config.config_path);
    config.data = result.data;

    if let Some(reason) = result.reset_reason {
        warn!("Config reset to defaults: {}", reason);
    }

    match HintSettings::from_data(&config.data) {
        Ok(settings) => {
            info!(
                "Hint settings: mode={}, sampling={:?}, max_hotspots={}",
                settings.mode.as_str(),
                settings.sampling,
                settings.max_hotspots
            );
            commands.insert_resource(settings);
        }
        Err(e) => {
            panic!("Invalid configuration in {:?}: {}", config.config_path, e);
        }
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HintConfig>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_validates() {
        let data = HintConfigData::default();
        let settings = HintSettings::from_data(&data).unwrap();
        assert_eq!(settings.mode, ShapeMode::Mixed);
        assert_eq!(settings.sampling, SamplingMode::Full);
        assert_eq!(settings.activation_key, KeyCode::KeyH);
        assert!(settings.pause_while_shown);
    }

    #[test]
    fn test_config_data_serialization_round_trip() {
        let data = HintConfigData {
            shape_mode: "circle".to_string(),
            stride: 3,
            background_image: Some(PathBuf::from("scenes/study.png")),
            ..Default::default()
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: HintConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.shape_mode, data.shape_mode);
        assert_eq!(parsed.stride, data.stride);
        assert_eq!(parsed.background_image, data.background_image);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: HintConfigData = serde_json::from_str(r#"{"shape_mode": "rectangle"}"#).unwrap();
        assert_eq!(parsed.shape_mode, "rectangle");
        assert_eq!(parsed.max_hotspots, 32);
        assert_eq!(parsed.activation_key, "H");
    }

    #[test]
    fn test_unknown_shape_mode_fails_validation() {
        let data = HintConfigData {
            shape_mode: "hexagon".to_string(),
            ..Default::default()
        };
        let err = HintSettings::from_data(&data).unwrap_err();
        assert!(err.contains("hexagon"));
    }

    #[test]
    fn test_unknown_sampling_mode_fails_validation() {
        let data = HintConfigData {
            sampling: "sparse".to_string(),
            ..Default::default()
        };
        let err = HintSettings::from_data(&data).unwrap_err();
        assert!(err.contains("sparse"));
    }

    #[test]
    fn test_zero_stride_fails_validation() {
        let data = HintConfigData {
            sampling: "strided".to_string(),
            stride: 0,
            ..Default::default()
        };
        assert!(HintSettings::from_data(&data).is_err());
    }

    #[test]
    fn test_capacity_bounds_enforced() {
        let mut data = HintConfigData {
            max_hotspots: 0,
            ..Default::default()
        };
        assert!(HintSettings::from_data(&data).is_err());

        data.max_hotspots = 300;
        assert!(HintSettings::from_data(&data).is_err());

        data.max_hotspots = 255;
        assert!(HintSettings::from_data(&data).is_ok());
    }

    #[test]
    fn test_activation_key_parsing() {
        assert_eq!(parse_activation_key("H").unwrap(), KeyCode::KeyH);
        assert_eq!(parse_activation_key("h").unwrap(), KeyCode::KeyH);
        assert_eq!(parse_activation_key("space").unwrap(), KeyCode::Space);
        assert_eq!(parse_activation_key("Tab").unwrap(), KeyCode::Tab);
        assert!(parse_activation_key("SUPERKEY").is_err());
    }

    #[test]
    fn test_strided_sampling_carries_stride() {
        let data = HintConfigData {
            sampling: "strided".to_string(),
            stride: 4,
            ..Default::default()
        };
        let settings = HintSettings::from_data(&data).unwrap();
        assert_eq!(settings.sampling, SamplingMode::Strided { step: 4 });
    }
}
