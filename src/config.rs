//! Reveal configuration persistence
//!
//! Stores tunables in `~/.config/reveal/config.yaml`. Every field has a default,
//! so partial files are fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::position::Side;

/// Longest animation a config value or scenario step can ask for
pub const MAX_ANIMATION_DURATION: Duration = Duration::from_secs(60);

/// Convert user-supplied seconds to a [`Duration`]. Negative and NaN values
/// mean instant; anything too long is clamped to [`MAX_ANIMATION_DURATION`].
pub fn animation_duration(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0))
        .map_or(MAX_ANIMATION_DURATION, |d| d.min(MAX_ANIMATION_DURATION))
}

/// Tunables read live by the gesture translator and the transition engine.
///
/// Changing a field while an animation runs affects the next transition only;
/// in-flight segments keep the offsets they captured when they started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// How much of the rear view is shown. Negative values are measured from
    /// the container's trailing edge (`width - |value|`).
    pub rear_view_reveal_width: f32,
    /// How far the front view may travel past `rear_view_reveal_width`
    pub rear_view_reveal_overdraw: f32,
    /// Parallax travel applied to the rear view while the front moves
    pub rear_view_reveal_displacement: f32,

    pub right_view_reveal_width: f32,
    pub right_view_reveal_overdraw: f32,
    pub right_view_reveal_displacement: f32,

    /// Bounce back to Left when released inside the rear overdraw region
    pub bounce_back_on_overdraw: bool,
    /// Bounce back to Left when released inside the right overdraw region
    pub bounce_back_on_left_overdraw: bool,

    /// Allow dragging linearly up to RightMost instead of rubber-banding
    pub stable_drag_on_overdraw: bool,
    /// Allow dragging linearly up to LeftSideMost instead of rubber-banding
    pub stable_drag_on_left_overdraw: bool,

    /// Horizontal velocity (points/s) at which a release counts as a flick
    pub quick_flick_velocity: f32,
    /// Default duration of programmatic animations, in seconds
    pub toggle_animation_duration: f64,

    pub front_view_shadow_radius: f32,
    pub front_view_shadow_offset: (f32, f32),
    pub front_view_shadow_opacity: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            rear_view_reveal_width: 260.0,
            rear_view_reveal_overdraw: 60.0,
            rear_view_reveal_displacement: 40.0,
            right_view_reveal_width: 260.0,
            right_view_reveal_overdraw: 60.0,
            right_view_reveal_displacement: 40.0,
            bounce_back_on_overdraw: true,
            bounce_back_on_left_overdraw: true,
            stable_drag_on_overdraw: false,
            stable_drag_on_left_overdraw: false,
            quick_flick_velocity: 300.0,
            toggle_animation_duration: 0.25,
            front_view_shadow_radius: 2.5,
            front_view_shadow_offset: (0.0, 2.5),
            front_view_shadow_opacity: 1.0,
        }
    }
}

/// The per-side view of [`RevealConfig`], so callers can work on "the active
/// side" without branching on rear vs right everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideConfig {
    pub reveal_width: f32,
    pub overdraw: f32,
    pub displacement: f32,
    pub bounce_back: bool,
    pub stable_drag: bool,
}

impl RevealConfig {
    /// Tunables for one side, with the reveal width resolved against the
    /// container width
    pub fn side(&self, side: Side, container_width: f32) -> SideConfig {
        let (width, overdraw, displacement, bounce_back, stable_drag) = match side {
            Side::Rear => (
                self.rear_view_reveal_width,
                self.rear_view_reveal_overdraw,
                self.rear_view_reveal_displacement,
                self.bounce_back_on_overdraw,
                self.stable_drag_on_overdraw,
            ),
            Side::Right => (
                self.right_view_reveal_width,
                self.right_view_reveal_overdraw,
                self.right_view_reveal_displacement,
                self.bounce_back_on_left_overdraw,
                self.stable_drag_on_left_overdraw,
            ),
        };

        let reveal_width = if width < 0.0 {
            (container_width + width).max(0.0)
        } else {
            width
        };

        SideConfig {
            reveal_width,
            overdraw: overdraw.max(0.0),
            displacement,
            bounce_back,
            stable_drag,
        }
    }

    /// Default animation duration as a [`Duration`]
    pub fn toggle_duration(&self) -> Duration {
        animation_duration(self.toggle_animation_duration)
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
