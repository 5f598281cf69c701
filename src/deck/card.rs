/// Visual transform of a card relative to its resting place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Horizontal offset in points.
    pub x: f32,
    /// Rotation in degrees, clockwise.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Transform {
    pub const NEUTRAL: Transform = Transform {
        x: 0.0,
        rotation: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// True when offset, rotation and scale are at rest. Opacity is ignored.
    pub fn is_neutral(&self) -> bool {
        self.x == 0.0 && self.rotation == 0.0 && self.scale == 1.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// What a card shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardContent {
    pub name: String,
    pub blurb: String,
    pub accent: [u8; 3],
}

/// One card of the deck. Its position never changes after load.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    position: usize,
    pub content: CardContent,
    pub visible: bool,
    pub transform: Transform,
}

impl Card {
    pub fn new(position: usize, content: CardContent) -> Self {
        Self {
            position,
            content,
            visible: false,
            transform: Transform::NEUTRAL,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

/// Where a card sits relative to the deck cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardPhase {
    /// Not reached yet.
    Pending,
    /// Shown and draggable.
    Active,
    /// Playing its exit animation; not yet recorded in history.
    Leaving,
    /// Swiped away and recorded in history.
    Removed,
}

/// Cards ordered by position, looked up the way a document query would be:
/// a missing position is simply `None`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardSet {
    cards: Vec<Card>,
}

impl CardSet {
    /// Build a set from cards in any order. Later duplicates of a position are dropped.
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort_by_key(Card::position);
        cards.dedup_by_key(|card| card.position);
        Self { cards }
    }

    /// A deck of `count` cards with generated labels, handy for tests and demos.
    pub fn numbered(count: usize) -> Self {
        Self::new(
            (0..count)
                .map(|position| {
                    Card::new(
                        position,
                        CardContent {
                            name: format!("Card {}", position + 1),
                            blurb: String::new(),
                            accent: [90, 176, 255],
                        },
                    )
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Card> {
        self.index_of(position).map(|index| &self.cards[index])
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Card> {
        self.index_of(position).map(move |index| &mut self.cards[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }

    /// Positions of every visible card, ascending.
    pub fn visible_positions(&self) -> Vec<usize> {
        self.cards
            .iter()
            .filter(|card| card.visible)
            .map(Card::position)
            .collect()
    }

    fn index_of(&self, position: usize) -> Option<usize> {
        self.cards
            .binary_search_by_key(&position, Card::position)
            .ok()
    }
}
