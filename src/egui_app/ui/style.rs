use eframe::egui::{Color32, Stroke, Visuals, epaint::CornerRadius};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent_mint: Color32,
    pub accent_ice: Color32,
    pub warning: Color32,
    pub success: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(8, 14, 22),
        bg_secondary: Color32::from_rgb(16, 26, 38),
        bg_tertiary: Color32::from_rgb(28, 42, 58),
        panel_outline: Color32::from_rgb(38, 56, 76),
        text_primary: Color32::from_rgb(214, 226, 236),
        text_muted: Color32::from_rgb(140, 156, 172),
        accent_mint: Color32::from_rgb(127, 255, 212),
        accent_ice: Color32::from_rgb(167, 217, 255),
        warning: Color32::from_rgb(200, 128, 96),
        success: Color32::from_rgb(102, 176, 136),
    }
}

/// Footer badge tone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Done,
    Warning,
}

impl StatusTone {
    pub fn label(self) -> &'static str {
        match self {
            StatusTone::Info => "Swiping",
            StatusTone::Done => "Done",
            StatusTone::Warning => "Empty",
        }
    }
}

pub fn status_badge_color(tone: StatusTone) -> Color32 {
    let palette = palette();
    match tone {
        StatusTone::Info => palette.accent_ice,
        StatusTone::Done => palette.success,
        StatusTone::Warning => palette.warning,
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent_ice);
    visuals.widgets.inactive.bg_fill = palette.bg_tertiary;
    visuals.widgets.inactive.weak_bg_fill = palette.bg_tertiary;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent_mint);
    visuals.window_corner_radius = CornerRadius::same(6);
}

/// Card body fill faded by `opacity`.
pub fn card_fill(opacity: f32) -> Color32 {
    palette().bg_tertiary.gamma_multiply(opacity.clamp(0.0, 1.0))
}

pub fn card_accent(rgb: [u8; 3], opacity: f32) -> Color32 {
    Color32::from_rgb(rgb[0], rgb[1], rgb[2]).gamma_multiply(opacity.clamp(0.0, 1.0))
}
