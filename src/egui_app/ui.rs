//! egui renderer for the swipe deck.

mod card_view;
pub mod style;

use eframe::egui::{self, Align2, Color32, FontId, Frame, Margin, RichText, Sense, Vec2};

use crate::config::AppConfig;
use crate::deck::{CardSet, DeckController, ReleaseAction};
use crate::egui_app::state::StatusBarState;
use crate::storage::KeyValueStore;

/// Smallest window the deck stays usable in.
pub const MIN_VIEWPORT_SIZE: Vec2 = Vec2::new(420.0, 620.0);
/// Upper bound for a single animation step, so a stalled frame does not skip whole tweens.
const MAX_FRAME_DT: f32 = 0.1;
const INITIAL_VIEWPORT_WIDTH: f32 = 800.0;

/// Renders the deck and routes pointer input to the controller.
pub struct SwipeApp<S: KeyValueStore> {
    controller: DeckController<S>,
    status: StatusBarState,
    show_reset: bool,
    visuals_set: bool,
}

impl<S: KeyValueStore> SwipeApp<S> {
    pub fn new(cards: CardSet, store: S, config: AppConfig) -> Self {
        let controller = DeckController::new(
            cards,
            store,
            config.swipe.clone(),
            INITIAL_VIEWPORT_WIDTH,
        );
        let status =
            StatusBarState::progress(controller.current_index(), controller.card_count());
        Self {
            controller,
            status,
            show_reset: config.deck.show_reset,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn advance(&mut self, ctx: &egui::Context) {
        let dt = ctx.input(|i| i.stable_dt).min(MAX_FRAME_DT);
        if self.controller.tick(dt).is_empty() {
            return;
        }
        self.refresh_progress();
    }

    fn refresh_progress(&mut self) {
        self.status = StatusBarState::progress(
            self.controller.current_index(),
            self.controller.card_count(),
        );
    }

    fn render_controls(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("deck_controls")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let can_undo = !self.controller.history().is_empty()
                        && self.controller.leaving_position().is_none();
                    let undo = ui.add_enabled(can_undo, egui::Button::new("Undo"));
                    if undo.clicked() {
                        self.undo();
                    }
                    if self.show_reset && ui.button("Reset").clicked() {
                        self.controller.reset();
                        self.refresh_progress();
                    }
                    ui.separator();
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(6.0, 10.0),
                        5.0,
                        self.status.badge_color,
                    );
                    ui.add_space(16.0);
                    ui.label(RichText::new(&self.status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(&self.status.text);
                });
            });
    }

    fn undo(&mut self) {
        if let Some(position) = self.controller.undo_last_swipe() {
            self.status = StatusBarState::restored(position);
        }
    }

    fn render_deck(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let area = ui.available_rect_before_wrap();
            self.controller.set_viewport_width(area.width());
            let rest = card_view::resting_rect(area);

            for card in self.controller.cards().iter().filter(|card| card.visible) {
                card_view::paint_card(ui, rest, card);
            }
            if self.controller.is_exhausted() && self.controller.leaving_position().is_none() {
                ui.painter().text(
                    area.center(),
                    Align2::CENTER_CENTER,
                    "No more fish in the sea",
                    FontId::proportional(24.0),
                    style::palette().text_muted,
                );
            }

            let Some(position) = self.controller.active_position() else {
                return;
            };
            let Some(card) = self.controller.card(position) else {
                return;
            };
            let hit = card_view::hit_rect(rest, &card.transform);
            let response = ui.interact(hit, ui.id().with(("deck_card", position)), Sense::drag());
            if response.dragged() {
                let velocity = ui.input(|i| i.pointer.velocity().x);
                self.controller.drag(response.drag_delta().x, velocity);
            }
            if response.drag_stopped()
                && let Some(ReleaseAction::Commit(direction)) = self.controller.release()
            {
                tracing::debug!("Released card {position} toward the {}", direction.label());
            }
        });
    }
}

impl<S: KeyValueStore> eframe::App for SwipeApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.advance(ctx);
        self.render_controls(ctx);
        self.render_deck(ctx);
        if self.controller.is_animating() || self.controller.is_dragging() {
            ctx.request_repaint();
        }
    }
}
