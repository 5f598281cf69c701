/// One swiped-away card, newest last in [`DeckState::history`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Removal {
    pub position: usize,
}

/// Cursor and swipe history of a deck; mirrored to the store after every change.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeckState {
    /// Position of the active card, or the card count once the deck is exhausted.
    pub current_index: usize,
    /// LIFO stack of swiped cards that have not been undone.
    pub history: Vec<Removal>,
    /// Position most recently restored by undo. Informational only.
    pub last_undone: usize,
}

impl DeckState {
    pub fn history_positions(&self) -> Vec<usize> {
        self.history.iter().map(|removal| removal.position).collect()
    }

    pub fn is_exhausted(&self, card_count: usize) -> bool {
        self.current_index >= card_count
    }
}
