//! Deck manifests: the cards a deck starts with, each tagged with its position.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::{Card, CardContent, CardSet};
use super::persist::parse_int_prefix;

const DEFAULT_ACCENTS: [[u8; 3]; 4] = [
    [127, 255, 212],
    [167, 217, 255],
    [195, 165, 122],
    [102, 176, 136],
];

/// Errors raised while loading a deck manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read deck {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid deck {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// TOML document listing the deck's cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckManifest {
    #[serde(default)]
    pub cards: Vec<CardEntry>,
}

/// One `[[cards]]` entry. `data_index` is the zero-based position as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardEntry {
    pub data_index: String,
    pub name: String,
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub accent: Option<[u8; 3]>,
}

impl DeckManifest {
    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The deck shipped with the app.
    pub fn builtin() -> Self {
        const FISH: [(&str, &str); 8] = [
            ("Clownfish", "Lives in an anemone. Great sense of humour."),
            ("Blue Tang", "Forgetful, but always up for an adventure."),
            ("Pufferfish", "Puffs up when nervous. Worth the effort."),
            ("Mandarinfish", "Dresses to impress, dances at dusk."),
            ("Anglerfish", "Brings their own light to every date."),
            ("Seahorse", "Old-fashioned. Will carry the kids."),
            ("Moray Eel", "Looks grumpy, secretly a cleaner-shrimp fan."),
            ("Manta Ray", "Glides through life. Huge wingspan."),
        ];
        Self {
            cards: FISH
                .iter()
                .enumerate()
                .map(|(position, (name, blurb))| CardEntry {
                    data_index: position.to_string(),
                    name: (*name).to_string(),
                    blurb: (*blurb).to_string(),
                    accent: None,
                })
                .collect(),
        }
    }

    /// Turn entries into cards. Entries without a usable index are skipped,
    /// and the first entry wins when two share a position.
    pub fn into_cards(self) -> CardSet {
        let mut cards: Vec<Card> = Vec::with_capacity(self.cards.len());
        for entry in self.cards {
            let position = match parse_int_prefix(&entry.data_index)
                .and_then(|value| usize::try_from(value).ok())
            {
                Some(position) => position,
                None => {
                    tracing::warn!(
                        "Skipping card {:?}: data_index {:?} is not a position",
                        entry.name,
                        entry.data_index
                    );
                    continue;
                }
            };
            if cards.iter().any(|card| card.position() == position) {
                tracing::warn!("Skipping card {:?}: position {position} already taken", entry.name);
                continue;
            }
            let accent = entry
                .accent
                .unwrap_or(DEFAULT_ACCENTS[position % DEFAULT_ACCENTS.len()]);
            cards.push(Card::new(
                position,
                CardContent {
                    name: entry.name,
                    blurb: entry.blurb,
                    accent,
                },
            ));
        }
        CardSet::new(cards)
    }
}

/// Load the configured deck, falling back to the built-in deck on any failure.
pub fn load_cards(path: Option<&Path>) -> CardSet {
    let Some(path) = path else {
        return DeckManifest::builtin().into_cards();
    };
    match DeckManifest::from_path(path) {
        Ok(manifest) => {
            let cards = manifest.into_cards();
            tracing::info!("Loaded {} cards from {}", cards.len(), path.display());
            cards
        }
        Err(err) => {
            tracing::warn!("{err}; using the built-in deck");
            DeckManifest::builtin().into_cards()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_deck_is_dense_from_zero() {
        let cards = DeckManifest::builtin().into_cards();
        assert_eq!(cards.len(), 8);
        for (expected, card) in cards.iter().enumerate() {
            assert_eq!(card.position(), expected);
        }
    }

    #[test]
    fn invalid_and_duplicate_indices_are_skipped() {
        let manifest: DeckManifest = toml::from_str(
            r#"
            [[cards]]
            data_index = "1"
            name = "Second"

            [[cards]]
            data_index = "zero"
            name = "Broken"

            [[cards]]
            data_index = "0"
            name = "First"
            accent = [1, 2, 3]

            [[cards]]
            data_index = "1"
            name = "Duplicate"

            [[cards]]
            data_index = "-2"
            name = "Negative"
            "#,
        )
        .unwrap();

        let cards = manifest.into_cards();
        let names: Vec<_> = cards.iter().map(|card| card.content.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(cards.get(0).unwrap().content.accent, [1, 2, 3]);
    }

    #[test]
    fn unreadable_manifest_falls_back_to_builtin() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(load_cards(Some(&missing)).len(), 8);

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[[cards]\n").unwrap();
        assert_eq!(load_cards(Some(&broken)).len(), 8);
    }

    #[test]
    fn manifest_file_is_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reef.toml");
        std::fs::write(
            &path,
            "[[cards]]\ndata_index = \"0\"\nname = \"Goby\"\nblurb = \"Small.\"\n",
        )
        .unwrap();
        let cards = load_cards(Some(&path));
        assert_eq!(cards.len(), 1);
        assert_eq!(cards.get(0).unwrap().content.blurb, "Small.");
    }
}
