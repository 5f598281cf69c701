//! Painting of transformed cards.

use eframe::egui::{
    self, Align2, FontId, Pos2, Shape, Stroke, Ui, Vec2, epaint::TextShape,
};

use crate::deck::{Card, Transform};

use super::style;

pub(super) const CARD_SIZE: Vec2 = Vec2::new(320.0, 440.0);
const MIN_TEXT_SCALE: f32 = 0.05;

/// Resting rectangle of every card: centered in `area`.
pub(super) fn resting_rect(area: egui::Rect) -> egui::Rect {
    let size = Vec2::new(
        CARD_SIZE.x.min(area.width() * 0.9),
        CARD_SIZE.y.min(area.height() * 0.9),
    );
    Align2::CENTER_CENTER.align_size_within_rect(size, area)
}

/// Rotate `offset` clockwise by `angle` radians (screen y points down).
fn rotate(offset: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(offset.x * cos - offset.y * sin, offset.x * sin + offset.y * cos)
}

/// Corners (clockwise from top-left) of a card resting in `rest` after `transform`.
pub(super) fn card_corners(rest: egui::Rect, transform: &Transform) -> [Pos2; 4] {
    let center = rest.center() + Vec2::new(transform.x, 0.0);
    let half = rest.size() * 0.5 * transform.scale.max(0.0);
    let angle = transform.rotation.to_radians();
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
    .map(|corner| center + rotate(corner, angle))
}

/// Screen-aligned area the pointer can grab for a card.
pub(super) fn hit_rect(rest: egui::Rect, transform: &Transform) -> egui::Rect {
    egui::Rect::from_points(&card_corners(rest, transform))
}

pub(super) fn paint_card(ui: &Ui, rest: egui::Rect, card: &Card) {
    let transform = card.transform;
    let opacity = transform.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || transform.scale <= 0.0 {
        return;
    }
    let painter = ui.painter();
    let accent = style::card_accent(card.content.accent, opacity);
    painter.add(Shape::convex_polygon(
        card_corners(rest, &transform).to_vec(),
        style::card_fill(opacity),
        Stroke::new(2.0, accent),
    ));

    if transform.scale < MIN_TEXT_SCALE {
        return;
    }
    let angle = transform.rotation.to_radians();
    let scale = transform.scale;
    let center = rest.center() + Vec2::new(transform.x, 0.0);
    let text_color = style::palette().text_primary.gamma_multiply(opacity);

    let title = painter.layout_no_wrap(
        card.content.name.clone(),
        FontId::proportional(30.0 * scale),
        accent,
    );
    let blurb = painter.layout(
        card.content.blurb.clone(),
        FontId::proportional(16.0 * scale),
        text_color,
        rest.width() * 0.8 * scale,
    );
    for (galley, anchor) in [
        (title, Vec2::new(0.0, -rest.height() * 0.18)),
        (blurb, Vec2::new(0.0, rest.height() * 0.12)),
    ] {
        let half = galley.size() * 0.5;
        let pos = center + rotate(anchor * scale - half, angle);
        painter.add(Shape::Text(
            TextShape::new(pos, galley, text_color).with_angle(angle),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rest() -> egui::Rect {
        egui::Rect::from_center_size(Pos2::new(100.0, 100.0), Vec2::new(40.0, 80.0))
    }

    #[test]
    fn neutral_transform_keeps_rest_corners() {
        let corners = card_corners(rest(), &Transform::NEUTRAL);
        assert_eq!(corners[0], Pos2::new(80.0, 60.0));
        assert_eq!(corners[2], Pos2::new(120.0, 140.0));
    }

    #[test]
    fn offset_and_scale_move_hit_area() {
        let transform = Transform {
            x: 50.0,
            scale: 0.5,
            ..Transform::NEUTRAL
        };
        let hit = hit_rect(rest(), &transform);
        assert_eq!(hit.center(), Pos2::new(150.0, 100.0));
        assert_eq!(hit.size(), Vec2::new(20.0, 40.0));
    }

    #[test]
    fn quarter_turn_swaps_extent() {
        let transform = Transform {
            rotation: 90.0,
            ..Transform::NEUTRAL
        };
        let size = hit_rect(rest(), &transform).size();
        assert!((size.x - 80.0).abs() < 1e-3);
        assert!((size.y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn resting_rect_fits_small_areas() {
        let area = egui::Rect::from_min_size(Pos2::ZERO, Vec2::new(200.0, 1000.0));
        let rect = resting_rect(area);
        assert_eq!(rect.width(), 180.0);
        assert_eq!(rect.height(), CARD_SIZE.y);
        assert_eq!(rect.center(), area.center());
    }
}
