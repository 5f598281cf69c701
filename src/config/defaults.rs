pub(super) const MIN_DURATION_SECS: f32 = 0.0;
pub(super) const MAX_DURATION_SECS: f32 = 5.0;

pub(super) fn default_true() -> bool {
    true
}

pub(super) fn default_false() -> bool {
    false
}

pub(super) fn default_commit_threshold_px() -> f32 {
    150.0
}

pub(super) fn default_exit_distance_factor() -> f32 {
    1.5
}

pub(super) fn default_rotation_deg() -> f32 {
    20.0
}

pub(super) fn default_exit_duration_secs() -> f32 {
    0.5
}

pub(super) fn default_scale_span_factor() -> f32 {
    2.0
}

pub(super) fn default_drag_tween_secs() -> f32 {
    0.1
}

pub(super) fn default_snap_back_secs() -> f32 {
    0.3
}

pub(super) fn default_undo_fade_secs() -> f32 {
    0.3
}

pub(super) fn default_inertia_projection_secs() -> f32 {
    0.2
}

pub(super) fn clamp_duration(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS)
    } else {
        fallback
    }
}

pub(super) fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
