use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{
    clamp_duration, default_commit_threshold_px, default_drag_tween_secs,
    default_exit_distance_factor, default_exit_duration_secs, default_false,
    default_inertia_projection_secs, default_rotation_deg, default_scale_span_factor,
    default_snap_back_secs, default_true, default_undo_fade_secs, positive_or,
};

/// Everything stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub swipe: SwipeSettings,
    #[serde(default)]
    pub deck: DeckSettings,
}

impl AppConfig {
    /// Replace out-of-range values with usable ones.
    pub fn normalized(mut self) -> Self {
        self.swipe = self.swipe.normalized();
        self
    }
}

/// Gesture and animation tuning for the swipe deck.
///
/// Config keys live under `[swipe]`: `commit_threshold_px`,
/// `exit_distance_factor`, `exit_rotation_deg`, `exit_duration_secs`,
/// `drag_rotation_deg`, `drag_scale_span_factor`, `drag_tween_secs`,
/// `snap_back_secs`, `undo_fade_secs`, `inertia`, `inertia_projection_secs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeSettings {
    /// Release displacement (px) that must be strictly exceeded to commit a swipe.
    #[serde(default = "default_commit_threshold_px")]
    pub commit_threshold_px: f32,
    /// Exit offset as a multiple of the viewport width.
    #[serde(default = "default_exit_distance_factor")]
    pub exit_distance_factor: f32,
    /// Rotation applied to a card leaving the deck, in degrees.
    #[serde(default = "default_rotation_deg")]
    pub exit_rotation_deg: f32,
    #[serde(default = "default_exit_duration_secs")]
    pub exit_duration_secs: f32,
    /// Rotation reached at one full viewport width of drag, in degrees.
    #[serde(default = "default_rotation_deg")]
    pub drag_rotation_deg: f32,
    /// Drag distance (in viewport widths) at which the card scale reaches zero.
    #[serde(default = "default_scale_span_factor")]
    pub drag_scale_span_factor: f32,
    #[serde(default = "default_drag_tween_secs")]
    pub drag_tween_secs: f32,
    #[serde(default = "default_snap_back_secs")]
    pub snap_back_secs: f32,
    #[serde(default = "default_undo_fade_secs")]
    pub undo_fade_secs: f32,
    /// Project the release point along the pointer velocity.
    #[serde(default = "default_true")]
    pub inertia: bool,
    #[serde(default = "default_inertia_projection_secs")]
    pub inertia_projection_secs: f32,
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            commit_threshold_px: default_commit_threshold_px(),
            exit_distance_factor: default_exit_distance_factor(),
            exit_rotation_deg: default_rotation_deg(),
            exit_duration_secs: default_exit_duration_secs(),
            drag_rotation_deg: default_rotation_deg(),
            drag_scale_span_factor: default_scale_span_factor(),
            drag_tween_secs: default_drag_tween_secs(),
            snap_back_secs: default_snap_back_secs(),
            undo_fade_secs: default_undo_fade_secs(),
            inertia: default_true(),
            inertia_projection_secs: default_inertia_projection_secs(),
        }
    }
}

impl SwipeSettings {
    pub fn normalized(self) -> Self {
        Self {
            commit_threshold_px: if self.commit_threshold_px.is_finite() {
                self.commit_threshold_px.abs()
            } else {
                default_commit_threshold_px()
            },
            exit_distance_factor: positive_or(
                self.exit_distance_factor,
                default_exit_distance_factor(),
            ),
            exit_rotation_deg: finite_or(self.exit_rotation_deg, default_rotation_deg()),
            exit_duration_secs: clamp_duration(
                self.exit_duration_secs,
                default_exit_duration_secs(),
            ),
            drag_rotation_deg: finite_or(self.drag_rotation_deg, default_rotation_deg()),
            drag_scale_span_factor: positive_or(
                self.drag_scale_span_factor,
                default_scale_span_factor(),
            ),
            drag_tween_secs: clamp_duration(self.drag_tween_secs, default_drag_tween_secs()),
            snap_back_secs: clamp_duration(self.snap_back_secs, default_snap_back_secs()),
            undo_fade_secs: clamp_duration(self.undo_fade_secs, default_undo_fade_secs()),
            inertia: self.inertia,
            inertia_projection_secs: clamp_duration(
                self.inertia_projection_secs,
                default_inertia_projection_secs(),
            ),
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

/// Where cards come from and which debug affordances are shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckSettings {
    /// Optional TOML deck manifest; the built-in fish deck is used when unset.
    #[serde(default)]
    pub deck_path: Option<PathBuf>,
    /// Show the reset button that wipes persisted swipe state.
    #[serde(default = "default_false")]
    pub show_reset: bool,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            deck_path: None,
            show_reset: default_false(),
        }
    }
}
