//! Small view-side state that is not part of the deck itself.

use egui::Color32;

use super::ui::style::{self, StatusTone};

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            badge_label: tone.label().into(),
            badge_color: style::status_badge_color(tone),
        }
    }

    /// Shown after an undo brings `position` back onto the deck.
    pub fn restored(position: usize) -> Self {
        Self::new(format!("Restored card {}", position + 1), StatusTone::Info)
    }

    /// Summary of where the cursor is.
    pub fn progress(current_index: usize, card_count: usize) -> Self {
        if card_count == 0 {
            Self::new("This deck has no cards", StatusTone::Warning)
        } else if current_index >= card_count {
            Self::new(format!("Deck finished: all {card_count} cards swiped"), StatusTone::Done)
        } else {
            Self::new(
                format!("Card {} of {card_count}", current_index + 1),
                StatusTone::Info,
            )
        }
    }
}
