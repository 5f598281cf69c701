//! The deck controller: cursor, swipe history, persistence and the single
//! draggable card.
//!
//! State changes caused by a swipe are deferred until its exit tween reports
//! completion through [`DeckController::tick`]; nothing is recorded on release.

use crate::config::SwipeSettings;
use crate::storage::KeyValueStore;

use super::card::{Card, CardPhase, CardSet, Transform};
use super::drag::{
    ActiveSlot, Direction, DragConfig, ReleaseAction, classify_release, drag_rotation, drag_scale,
};
use super::persist;
use super::state::{DeckState, Removal};
use super::tween::{Animator, Ease, Props, TweenSpec};


/// Delivered when a card's exit animation ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwipeCompletion {
    /// Deck position of the card that left.
    pub position: usize,
    pub direction: Direction,
}

/// Owns one deck's state and drives its cards.
pub struct DeckController<S: KeyValueStore> {
    cards: CardSet,
    state: DeckState,
    store: S,
    settings: SwipeSettings,
    animator: Animator<SwipeCompletion>,
    active: ActiveSlot,
    leaving: Option<usize>,
    viewport_width: f32,
}

impl<S: KeyValueStore> DeckController<S> {
    /// Build a controller and initialize it from whatever `store` holds.
    pub fn new(cards: CardSet, store: S, settings: SwipeSettings, viewport_width: f32) -> Self {
        let mut controller = Self {
            cards,
            state: DeckState::default(),
            store,
            settings,
            animator: Animator::new(),
            active: ActiveSlot::default(),
            leaving: None,
            viewport_width: viewport_width.max(0.0),
        };
        controller.initialize();
        controller
    }

    /// Load persisted state, hide every recorded card and render.
    ///
    /// Any running animation or drag is discarded and every card returns to rest.
    pub fn initialize(&mut self) {
        self.animator.clear();
        self.active.release();
        self.leaving = None;
        for card in self.cards.iter_mut() {
            card.visible = false;
            card.transform = Transform::NEUTRAL;
        }

        self.state = persist::load(&self.store, self.cards.len());
        for removal in &self.state.history {
            if let Some(card) = self.cards.get_mut(removal.position) {
                card.visible = false;
            }
        }
        tracing::info!(
            "Deck initialized at card {} of {} with {} swiped",
            self.state.current_index,
            self.cards.len(),
            self.state.history.len()
        );
        self.render();
    }

    /// Show only the card at the cursor and bind it as the draggable card.
    pub fn render(&mut self) {
        let current = self.state.current_index;
        for card in self.cards.iter_mut() {
            card.visible = card.position() == current;
        }

        self.active.release();
        if self.leaving == Some(current) || self.cards.get(current).is_none() {
            return;
        }
        self.active.acquire(current, self.drag_config());
    }

    /// Send the active card off-screen. The swipe is recorded when the exit tween completes.
    ///
    /// Returns false when there is no active card to swipe.
    pub fn swipe(&mut self, direction: Direction) -> bool {
        let Some(binding) = self.active.release() else {
            tracing::debug!("Ignoring {} swipe: no active card", direction.label());
            return false;
        };
        let position = binding.position();
        self.leaving = Some(position);

        let sign = direction.sign();
        let exit = Props::new()
            .x(sign * self.viewport_width * self.settings.exit_distance_factor)
            .rotation(sign * self.settings.exit_rotation_deg);
        self.animator.to(
            position,
            exit,
            TweenSpec::new(self.settings.exit_duration_secs),
            Some(SwipeCompletion {
                position,
                direction,
            }),
        );
        tracing::debug!("Card {position} leaving {}", direction.label());
        true
    }

    /// Feed pointer movement for the active card.
    pub fn drag(&mut self, delta_x: f32, velocity_x: f32) {
        let Some(binding) = self.active.get_mut() else {
            return;
        };
        let position = binding.position();
        if !binding.is_dragging() {
            let start_x = self
                .cards
                .get(position)
                .map(|card| card.transform.x)
                .unwrap_or(0.0);
            binding.begin(start_x);
            self.animator.kill(position, &Props::new().x(0.0));
        }
        let x = binding.move_by(delta_x, velocity_x);
        if let Some(card) = self.cards.get_mut(position) {
            card.transform.x = x;
        }

        let follow = Props::new()
            .rotation(drag_rotation(
                x,
                self.viewport_width,
                self.settings.drag_rotation_deg,
            ))
            .scale(drag_scale(
                x,
                self.viewport_width,
                self.settings.drag_scale_span_factor,
            ));
        self.animator.to(
            position,
            follow,
            TweenSpec::new(self.settings.drag_tween_secs),
            None,
        );
    }

    /// End the current drag: commit a swipe past the threshold, otherwise spring back.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn release(&mut self) -> Option<ReleaseAction> {
        let binding = self.active.get_mut().filter(|binding| binding.is_dragging())?;
        let position = binding.position();
        let end_x = binding.finish();

        let action = classify_release(end_x, self.settings.commit_threshold_px);
        match action {
            ReleaseAction::Commit(direction) => {
                self.swipe(direction);
            }
            ReleaseAction::SnapBack => {
                tracing::trace!("Card {position} released at {end_x:.1}; snapping back");
                self.animator.to(
                    position,
                    Props::neutral(),
                    TweenSpec::new(self.settings.snap_back_secs).ease(Ease::Power2Out),
                    None,
                );
            }
        }
        Some(action)
    }

    /// Restore the most recently swiped card and make it active.
    ///
    /// Returns the restored position, or `None` when history is empty or a
    /// card is still leaving.
    pub fn undo_last_swipe(&mut self) -> Option<usize> {
        if let Some(leaving) = self.leaving {
            tracing::debug!("Undo ignored while card {leaving} is leaving");
            return None;
        }
        let Removal { position } = self.state.history.pop()?;

        if let Some(card) = self.cards.get_mut(position) {
            self.animator.kill_target(position);
            card.transform = Transform {
                opacity: 0.0,
                ..Transform::NEUTRAL
            };
            card.visible = true;
            self.animator.from_to(
                position,
                Props::new().opacity(0.0),
                Props::new().opacity(1.0).scale(1.0),
                TweenSpec::new(self.settings.undo_fade_secs),
                None,
            );
            self.state.current_index = position;
        } else {
            tracing::debug!("Undo popped card {position}, which is not in the deck");
        }
        self.state.last_undone = self.state.current_index;
        tracing::info!("Restored card {position}");

        self.persist();
        self.render();
        Some(position)
    }

    /// Forget all persisted state and reload the deck from defaults.
    pub fn reset(&mut self) {
        if let Err(err) = persist::clear(&mut self.store) {
            tracing::warn!("Failed to clear swipe state: {err}");
        }
        tracing::info!("Swipe state reset");
        self.initialize();
    }

    /// Advance animations by `dt` seconds and apply finished swipes.
    pub fn tick(&mut self, dt: f32) -> Vec<SwipeCompletion> {
        let completions = self.animator.tick(dt, &mut self.cards);
        for completion in &completions {
            self.finish_swipe(*completion);
        }
        completions
    }

    /// Update the width used for drag bounds and exit distance.
    pub fn set_viewport_width(&mut self, width: f32) {
        if !width.is_finite() || width <= 0.0 || width == self.viewport_width {
            return;
        }
        self.viewport_width = width;
        let config = self.drag_config();
        if let Some(binding) = self.active.get_mut() {
            binding.set_config(config);
        }
    }

    fn finish_swipe(&mut self, completion: SwipeCompletion) {
        if self.leaving == Some(completion.position) {
            self.leaving = None;
        }
        let position = self.state.current_index;
        if position != completion.position {
            tracing::warn!(
                "Card {} finished leaving while the cursor was at {position}",
                completion.position
            );
        }
        self.state.history.push(Removal { position });
        if let Some(card) = self.cards.get_mut(completion.position) {
            card.visible = false;
        }
        self.state.current_index = (position + 1).min(self.cards.len());
        tracing::info!(
            "Swiped card {} {}; {} left",
            completion.position,
            completion.direction.label(),
            self.remaining()
        );

        self.persist();
        self.render();
    }

    fn persist(&mut self) {
        if let Err(err) = persist::save(&mut self.store, &self.state) {
            tracing::warn!("Failed to persist swipe state: {err}");
        }
    }

    fn drag_config(&self) -> DragConfig {
        DragConfig::horizontal(
            self.viewport_width,
            self.settings.inertia,
            self.settings.inertia_projection_secs,
        )
    }

    /// Position of the card at the top of the deck.
    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    /// Recorded swipes, oldest first.
    pub fn history(&self) -> &[Removal] {
        &self.state.history
    }

    /// Cursor value written by the most recent undo.
    pub fn last_undone(&self) -> usize {
        self.state.last_undone
    }

    /// Snapshot of the persisted fields.
    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// Number of cards in the deck.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards not yet swiped, including the active one.
    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.state.current_index)
    }

    /// True once the cursor has passed the last card.
    pub fn is_exhausted(&self) -> bool {
        self.state.is_exhausted(self.cards.len())
    }

    /// Every card with its current visibility and transform.
    pub fn cards(&self) -> &CardSet {
        &self.cards
    }

    /// The card at `position`, if the deck has one there.
    pub fn card(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Where the card at `position` sits relative to the cursor.
    pub fn card_phase(&self, position: usize) -> Option<CardPhase> {
        self.cards.get(position)?;
        let current = self.state.current_index;
        Some(if self.leaving == Some(position) {
            CardPhase::Leaving
        } else if position < current {
            CardPhase::Removed
        } else if position == current {
            CardPhase::Active
        } else {
            CardPhase::Pending
        })
    }

    /// Position of the card currently bound for dragging.
    pub fn active_position(&self) -> Option<usize> {
        self.active.position()
    }

    /// Card whose exit tween is still running.
    pub fn leaving_position(&self) -> Option<usize> {
        self.leaving
    }

    /// True while the pointer holds the active card.
    pub fn is_dragging(&self) -> bool {
        self.active.get().is_some_and(|binding| binding.is_dragging())
    }

    /// True while any tween is running or has a completion queued.
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Width used for drag bounds and the exit distance.
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// The backing key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand back the store, e.g. to simulate a reload in tests.
    pub fn into_store(self) -> S {
        self.store
    }
}
