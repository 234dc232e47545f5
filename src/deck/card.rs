//! Card entities.

use serde::{Deserialize, Serialize};

/// One addressable unit of output within a deck.
///
/// Cards are created once, in order, at deck construction and identified by
/// a stable 0-based index for the deck's lifetime. All behavior lives on
/// [`Deck`](super::Deck) methods; a card is a plain index record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    index: usize,
}

impl Card {
    pub(crate) fn new(index: usize) -> Self {
        Self { index }
    }

    /// The card's stable 0-based index.
    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.index)
    }
}
