use crate::carousel::{
    CarouselError, CarouselItem, DROP_DISTANCE, DROP_DURATION_MS, GESTURE_PULL_GAIN, PULL_DAMPING,
    PULL_STIFFNESS, PULL_THRESHOLD, POINTER_ROTATION_GAIN, RELEASE_THRESHOLD, RESISTANCE_FACTOR,
    RESISTANCE_LIMIT, ROTATION_DAMPING, ROTATION_STIFFNESS, SELECTION_COOLDOWN_MS, SWIPE_ANCHOR_FOLLOW,
    SWIPE_COOLDOWN_MS, SWIPE_THRESHOLD,
};
use directories::ProjectDirs;
use orbit_input::{ActivationTarget, ItemId, ItemTitle};
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum EligibilityKind {
    #[default]
    #[strum(serialize = "Selectable", serialize = "unlocked", serialize = "open")]
    Selectable,
    #[strum(serialize = "Locked", serialize = "premium")]
    Locked,
}

/// Damped spring parameters for an [`Animator`](crate::carousel::Animator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    #[serde(default = "SpringConfig::unit_mass")]
    pub mass: f64,
}

impl SpringConfig {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    fn unit_mass() -> f64 {
        1.0
    }
}

/// Thresholds, gains and timings of the interaction engine.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Normalized horizontal distance from the trailing anchor that counts as a swipe.
    pub swipe_threshold: f64,
    /// Fraction of the remaining distance the trailing anchor covers per sample.
    pub anchor_follow: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "swipe_cooldown_ms")]
    pub swipe_cooldown: Duration,
    /// Normalized downward travel from the grab point that selects.
    pub pull_threshold: f64,
    /// Display units of pull per normalized unit of hand travel.
    pub gesture_pull_gain: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "selection_cooldown_ms")]
    pub selection_cooldown: Duration,
    pub resistance_limit: f64,
    pub resistance_factor: f64,
    /// Degrees of rotation per display unit of horizontal pointer drag.
    pub pointer_rotation_gain: f64,
    pub release_threshold: f64,
    pub rotation_spring: SpringConfig,
    pub pull_spring: SpringConfig,
    pub drop_distance: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "drop_duration_ms")]
    pub drop_duration: Duration,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            swipe_threshold: SWIPE_THRESHOLD,
            anchor_follow: SWIPE_ANCHOR_FOLLOW,
            swipe_cooldown: Duration::from_millis(SWIPE_COOLDOWN_MS),
            pull_threshold: PULL_THRESHOLD,
            gesture_pull_gain: GESTURE_PULL_GAIN,
            selection_cooldown: Duration::from_millis(SELECTION_COOLDOWN_MS),
            resistance_limit: RESISTANCE_LIMIT,
            resistance_factor: RESISTANCE_FACTOR,
            pointer_rotation_gain: POINTER_ROTATION_GAIN,
            release_threshold: RELEASE_THRESHOLD,
            rotation_spring: SpringConfig::new(ROTATION_STIFFNESS, ROTATION_DAMPING),
            pull_spring: SpringConfig::new(PULL_STIFFNESS, PULL_DAMPING),
            drop_distance: DROP_DISTANCE,
            drop_duration: Duration::from_millis(DROP_DURATION_MS),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub id: ItemId,
    pub title: ItemTitle,
    #[serde(default)]
    pub eligibility: EligibilityKind,
    pub target: Option<ActivationTarget>,
}

impl ItemConfig {
    pub fn to_item(&self) -> Result<CarouselItem, CarouselError> {
        match (self.eligibility, &self.target) {
            (EligibilityKind::Locked, _) => {
                Ok(CarouselItem::locked(self.id.clone(), self.title.clone()))
            }
            (EligibilityKind::Selectable, Some(target)) => Ok(CarouselItem::selectable(
                self.id.clone(),
                self.title.clone(),
                target.clone(),
            )),
            (EligibilityKind::Selectable, None) => {
                Err(CarouselError::MissingTarget(self.id.clone()))
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

impl Config {
    /// The configuration shipped inside the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    pub fn carousel_items(&self) -> Result<Vec<CarouselItem>, ConfigError> {
        if self.items.is_empty() {
            return Err(CarouselError::Empty.into());
        }
        Ok(self
            .items
            .iter()
            .map(ItemConfig::to_item)
            .collect::<Result<_, _>>()?)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid carousel: {0}")]
    Carousel(#[from] CarouselError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Loads `path`, or the user config file when `path` is `None`, then applies
/// `ORBIT_*` environment overrides (`ORBIT_TUNING__SWIPE_THRESHOLD=0.3`).
/// An empty item list falls back to the built-in items.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (get_config_path()?, false),
    };

    let s = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix("ORBIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let mut config: Config = s.try_deserialize()?;
    if config.items.is_empty() {
        config.items = Config::builtin()?.items;
    }
    Ok(config)
}

pub fn load_or_default() -> Config {
    match load_config(None) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to built-in config: {}", e);
            Config::builtin().unwrap_or_default()
        }
    }
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_eligibility_deserialization() {
        let cases = vec![
            ("\"selectable\"", EligibilityKind::Selectable),
            ("\"Selectable\"", EligibilityKind::Selectable),
            ("\"unlocked\"", EligibilityKind::Selectable),
            ("\"LOCKED\"", EligibilityKind::Locked),
            ("\"premium\"", EligibilityKind::Locked),
        ];

        for (json, expected) in cases {
            let deserialized: EligibilityKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_builtin_matches_default_tuning() {
        let config = Config::builtin().unwrap();
        assert_eq!(config.tuning, Tuning::default());

        let items = config.carousel_items().unwrap();
        assert_eq!(items.len(), 5);
        assert!(!items[3].is_selectable());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[tuning]
swipe_threshold = 0.3
selection_cooldown_ms = 1500

[[items]]
id = "a"
title = "A"
target = "/a"

[[items]]
id = "b"
title = "B"
eligibility = "locked"
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.tuning.swipe_threshold, 0.3);
        assert_eq!(config.tuning.selection_cooldown, Duration::from_millis(1500));
        assert_eq!(config.tuning.pull_threshold, PULL_THRESHOLD);
        assert_eq!(config.items.len(), 2);
    }

    #[test]
    fn test_selectable_without_target_is_rejected() {
        let item = ItemConfig {
            id: ItemId::from("broken"),
            title: ItemTitle::from("Broken"),
            eligibility: EligibilityKind::Selectable,
            target: None,
        };
        assert!(matches!(
            item.to_item(),
            Err(CarouselError::MissingTarget(id)) if id.as_str() == "broken"
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_config(Some(Path::new("/nonexistent/orbit/config.toml")));
        assert!(matches!(result, Err(ConfigError::Config(_))));
    }
}
