//! Swipe deck: cards, persisted cursor/history, tweening and dragging.

pub mod card;
pub mod controller;
pub mod drag;
pub mod manifest;
pub mod persist;
pub mod state;
pub mod tween;

pub use card::{Card, CardContent, CardPhase, CardSet, Transform};
pub use controller::{DeckController, SwipeCompletion};
pub use drag::{Direction, ReleaseAction};
pub use manifest::{DeckManifest, ManifestError, load_cards};
pub use state::{DeckState, Removal};
