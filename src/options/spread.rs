//! Scalar-vs-sequence broadcasting.
//!
//! Every option value is either uniform (one value for every card) or
//! per-card (a sequence positionally aligned with card indices). The
//! distinction exists only at this boundary: a [`Spread`] is resolved
//! immediately into a deck-sized [`Resolved`] table, and downstream code
//! never re-inspects "is this an array".

use std::ops::Index;

use crate::error::{Error, Result};

/// A raw option value classified as uniform or per-card.
#[derive(Clone, Debug, PartialEq)]
pub enum Spread<T> {
    /// One value applying identically to every card.
    Uniform(T),
    /// One value per card, index-aligned with the deck.
    PerCard(Vec<T>),
}

impl<T: Clone> Spread<T> {
    /// Broadcast into a deck-sized table.
    ///
    /// A `Uniform` value fills every slot; a `PerCard` sequence must have
    /// length exactly `deck_size` or the resolution fails with
    /// [`Error::ArityMismatch`] naming `key`. Broadcasting never pads,
    /// truncates, or cycles.
    pub fn resolve(self, key: &str, deck_size: usize) -> Result<Resolved<T>> {
        match self {
            Spread::Uniform(value) => Ok(Resolved(vec![value; deck_size])),
            Spread::PerCard(values) => {
                if values.len() != deck_size {
                    return Err(Error::ArityMismatch {
                        key: key.to_string(),
                        expected: deck_size,
                        actual: values.len(),
                    });
                }
                Ok(Resolved(values))
            }
        }
    }
}

/// A fully-resolved, per-card-indexed value table for one option key.
///
/// Always exactly deck-sized; indexed by card index through the
/// already-validated range sequence, so lookups never go out of bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved<T>(Vec<T>);

impl<T> Resolved<T> {
    /// Table length (always the deck size it was resolved against).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the table is empty (zero-card deck).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the value for a card index.
    #[must_use]
    pub fn get(&self, card: usize) -> &T {
        &self.0[card]
    }
}

impl<T: Clone> Resolved<T> {
    /// Build a table with the same value in every slot.
    #[must_use]
    pub fn uniform(value: T, len: usize) -> Self {
        Self(vec![value; len])
    }
}

impl<T> Index<usize> for Resolved<T> {
    type Output = T;

    fn index(&self, card: usize) -> &T {
        &self.0[card]
    }
}
