//! Studio settings

use serde::{Deserialize, Serialize};
use shared::ViewRegistry;

/// One product view and its initial garment color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub key: String,
    pub background_color: String,
}

/// History limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum undo entries kept; oldest are evicted first
    pub limit: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { limit: 50 }
    }
}

/// Editing step sizes and bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    /// Offset applied to a duplicate so it is visibly distinct
    pub duplicate_offset: [f64; 2],
    /// Arrow-key step
    pub nudge_step: f64,
    /// Arrow-key step with the modifier held
    pub nudge_step_coarse: f64,
    /// Scale slider lower bound
    pub min_scale: f64,
    /// Scale slider upper bound
    pub max_scale: f64,
    /// Scale zoom-in/zoom-out button step
    pub scale_step: f64,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            duplicate_offset: [20.0, 20.0],
            nudge_step: 1.0,
            nudge_step_coarse: 10.0,
            min_scale: 0.1,
            max_scale: 3.0,
            scale_step: 0.1,
        }
    }
}

impl EditSettings {
    fn has_valid_scale_bounds(&self) -> bool {
        self.min_scale.is_finite()
            && self.max_scale.is_finite()
            && self.min_scale > 0.0
            && self.min_scale <= self.max_scale
    }

    /// Reset unusable slider bounds to the defaults. Returns true if anything changed.
    pub fn sanitize(&mut self) -> bool {
        if self.has_valid_scale_bounds() {
            return false;
        }
        let defaults = Self::default();
        tracing::warn!(
            "Invalid scale bounds [{}, {}], using [{}, {}]",
            self.min_scale,
            self.max_scale,
            defaults.min_scale,
            defaults.max_scale
        );
        self.min_scale = defaults.min_scale;
        self.max_scale = defaults.max_scale;
        true
    }

    /// Clamp a uniform scale to the slider range. Never panics, even on inverted bounds.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.min_scale).min(self.max_scale)
    }

    pub fn nudge(&self, coarse: bool) -> f64 {
        if coarse {
            self.nudge_step_coarse
        } else {
            self.nudge_step
        }
    }
}

fn default_views() -> Vec<ViewSettings> {
    ["front", "back"]
        .iter()
        .map(|key| ViewSettings {
            key: key.to_string(),
            background_color: "#ffffff".to_string(),
        })
        .collect()
}

/// All studio settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioSettings {
    /// Product views, in display order. Fixed for the lifetime of a session.
    #[serde(default = "default_views")]
    pub views: Vec<ViewSettings>,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub edit: EditSettings,
}

impl Default for StudioSettings {
    fn default() -> Self {
        Self {
            views: default_views(),
            history: HistorySettings::default(),
            edit: EditSettings::default(),
        }
    }
}

impl StudioSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "mockup", "mockup-studio")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if let Ok(json) = std::fs::read_to_string(&path) {
                match serde_json::from_str::<Self>(&json) {
                    Ok(mut settings) => {
                        settings.edit.sanitize();
                        return settings;
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring invalid settings at {}: {e}", path.display())
                    }
                }
            }
        }
        Self::default()
    }

    /// Save settings to file
    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(dir) = path.parent() {
                if std::fs::create_dir_all(dir).is_err() {
                    return;
                }
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to save settings to {}: {e}", path.display());
                }
            }
        }
    }

    /// Empty registry holding the configured views
    pub fn build_registry(&self) -> ViewRegistry {
        if self.views.is_empty() {
            return ViewRegistry::default();
        }
        ViewRegistry {
            version: 1,
            views: self
                .views
                .iter()
                .map(|v| shared::View::new(v.key.clone(), &v.background_color))
                .collect(),
        }
    }
}
