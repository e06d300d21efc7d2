//! Game configuration and audio themes
//!
//! Tunables for one session. The settings UI produces partial updates
//! (`ConfigPatch`); the engine applies them starting with the next tick.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::audio::SoundCue;

/// Allowed gravity per tick
pub const GRAVITY_RANGE: RangeInclusive<f32> = 0.1..=0.8;
/// Allowed pipe speed per tick
pub const SPEED_RANGE: RangeInclusive<f32> = 1.0..=5.0;
/// Allowed jump impulse (negative is upward)
pub const JUMP_RANGE: RangeInclusive<f32> = -10.0..=-3.0;
/// Allowed gap size between upper and lower pipe
pub const GAP_RANGE: RangeInclusive<f32> = 100.0..=300.0;
/// Allowed ticks between pipe spawns
pub const SPAWN_INTERVAL_RANGE: RangeInclusive<u32> = 1..=10_000;
const DEFAULT_SPAWN_INTERVAL: u32 = 260;

/// A selectable audio voice pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Folder under `/audio/` holding the pack's files
    pub folder: &'static str,
}

/// All known audio themes; the first one is the fallback
pub static AUDIO_THEMES: [AudioTheme; 4] = [
    AudioTheme {
        id: "default",
        name: "Classic Arcade",
        description: "Standard game sounds",
        folder: "default",
    },
    AudioTheme {
        id: "modi",
        name: "PM Modi",
        description: "Mitron! (Iconic speeches)",
        folder: "modi",
    },
    AudioTheme {
        id: "amitabh",
        name: "Amitabh Bachchan",
        description: "Deviyon aur Sajjanon...",
        folder: "amitabh",
    },
    AudioTheme {
        id: "srk",
        name: "Shahrukh Khan",
        description: "Picture abhi baaki hai...",
        folder: "srk",
    },
];

impl AudioTheme {
    /// Look up a theme by id
    pub fn find(id: &str) -> Option<&'static AudioTheme> {
        AUDIO_THEMES.iter().find(|t| t.id == id)
    }

    /// Look up a theme by id, falling back to the default pack
    pub fn resolve(id: &str) -> &'static AudioTheme {
        Self::find(id).unwrap_or(&AUDIO_THEMES[0])
    }

    /// Asset path for a sound cue in this pack
    pub fn cue_path(&self, cue: SoundCue) -> String {
        format!("/audio/{}/{}", self.folder, cue.file_name())
    }
}

/// Session tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    /// Vertical size of the passable gap
    pub gap_size: f32,
    /// Added to velocity every tick
    pub gravity: f32,
    /// Velocity set by an impulse (negative is up)
    #[serde(alias = "jumpStrength")]
    pub jump_impulse: f32,
    /// Pipe drift per tick
    #[serde(alias = "pipeSpeed")]
    pub obstacle_speed: f32,
    /// A pipe spawns once more than this many ticks passed since the last
    #[serde(alias = "pipeSpawnRate", deserialize_with = "interval_or_default")]
    pub spawn_interval_ticks: u32,
    pub audio_theme_id: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gap_size: 220.0,
            gravity: 0.15,
            jump_impulse: -5.0,
            obstacle_speed: 1.5,
            spawn_interval_ticks: DEFAULT_SPAWN_INTERVAL,
            audio_theme_id: AUDIO_THEMES[0].id.to_string(),
        }
    }
}

/// Partial configuration update; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub gap_size: Option<f32>,
    pub gravity: Option<f32>,
    #[serde(alias = "jumpStrength")]
    pub jump_impulse: Option<f32>,
    #[serde(alias = "pipeSpeed")]
    pub obstacle_speed: Option<f32>,
    #[serde(alias = "pipeSpawnRate", deserialize_with = "interval")]
    pub spawn_interval_ticks: Option<u32>,
    pub audio_theme_id: Option<String>,
}

impl ConfigPatch {
    /// Parse a patch from JSON. Unknown keys are ignored, and a canonical key
    /// wins over its legacy alias when both are present.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_value(canonical_fields(json)?)
    }

    /// Patch that sets every field to the given config's values
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            gap_size: Some(config.gap_size),
            gravity: Some(config.gravity),
            jump_impulse: Some(config.jump_impulse),
            obstacle_speed: Some(config.obstacle_speed),
            spawn_interval_ticks: Some(config.spawn_interval_ticks),
            audio_theme_id: Some(config.audio_theme_id.clone()),
        }
    }
}

/// Legacy key names and the field they stand for
const KEY_ALIASES: [(&str, &str); 3] = [
    ("jumpStrength", "jumpImpulse"),
    ("pipeSpeed", "obstacleSpeed"),
    ("pipeSpawnRate", "spawnIntervalTicks"),
];

/// Parse a JSON object, dropping aliases shadowed by their canonical key
fn canonical_fields(json: &str) -> Result<Value, serde_json::Error> {
    let mut fields: serde_json::Map<String, Value> = serde_json::from_str(json)?;
    for (alias, name) in KEY_ALIASES {
        if fields.contains_key(name) {
            fields.remove(alias);
        }
    }
    Ok(Value::Object(fields))
}

/// Round and saturate a tick count into `SPAWN_INTERVAL_RANGE`
fn saturate_interval(value: f64) -> Option<u32> {
    if !value.is_finite() {
        return None;
    }
    let (lo, hi) = (*SPAWN_INTERVAL_RANGE.start(), *SPAWN_INTERVAL_RANGE.end());
    Some(value.round().clamp(f64::from(lo), f64::from(hi)) as u32)
}

fn interval<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.and_then(saturate_interval))
}

fn interval_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(interval(deserializer)?.unwrap_or(DEFAULT_SPAWN_INTERVAL))
}

fn clamp_finite(value: Option<f32>, range: &RangeInclusive<f32>) -> Option<f32> {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(*range.start(), *range.end()))
}

impl GameConfig {
    /// Merge a patch into this config, clamping numbers to their ranges.
    ///
    /// Non-finite numbers and unknown audio theme ids are ignored.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(v) = clamp_finite(patch.gap_size, &GAP_RANGE) {
            self.gap_size = v;
        }
        if let Some(v) = clamp_finite(patch.gravity, &GRAVITY_RANGE) {
            self.gravity = v;
        }
        if let Some(v) = clamp_finite(patch.jump_impulse, &JUMP_RANGE) {
            self.jump_impulse = v;
        }
        if let Some(v) = clamp_finite(patch.obstacle_speed, &SPEED_RANGE) {
            self.obstacle_speed = v;
        }
        if let Some(v) = patch.spawn_interval_ticks {
            self.spawn_interval_ticks =
                v.clamp(*SPAWN_INTERVAL_RANGE.start(), *SPAWN_INTERVAL_RANGE.end());
        }
        if let Some(id) = &patch.audio_theme_id {
            match AudioTheme::find(id) {
                Some(theme) => self.audio_theme_id = theme.id.to_string(),
                None => log::debug!("Ignoring unknown audio theme {:?}", id),
            }
        }
    }

    /// Return a copy with every field forced into its valid range
    pub fn sanitized(&self) -> Self {
        let mut config = Self::default();
        config.apply(&ConfigPatch::from_config(self));
        config
    }

    /// The audio theme currently selected
    pub fn audio_theme(&self) -> &'static AudioTheme {
        AudioTheme::resolve(&self.audio_theme_id)
    }

    /// Load config from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if let Ok(json) = std::fs::read_to_string(path) {
            match canonical_fields(&json).and_then(serde_json::from_value::<GameConfig>) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return config.sanitized();
                }
                Err(e) => log::warn!("Ignoring malformed config {}: {}", path.display(), e),
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save config as JSON
    pub fn save_to(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match std::fs::write(path, json) {
                Ok(()) => log::info!("Config saved to {}", path.display()),
                Err(e) => log::warn!("Failed to save config: {}", e),
            },
            Err(e) => log::warn!("Failed to encode config: {}", e),
        }
    }
}
