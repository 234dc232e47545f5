//! Crate-wide error type.
//!
//! Every resolution failure is detected eagerly, before any rendering side
//! effect, and carries enough context to name the offending option key and
//! (where applicable) the expected vs. actual cardinality.

/// Errors produced by the resolution engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A physical-length expression did not match a known unit suffix or
    /// parsed to a non-finite number.
    #[error("invalid unit expression `{value}`")]
    InvalidUnit {
        /// The raw expression as given by the caller.
        value: String,
    },

    /// A range expression named a card index outside the deck.
    #[error("card index {index} out of bounds for deck of {deck_size}")]
    RangeOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of cards in the deck.
        deck_size: usize,
    },

    /// A per-card sequence had a length different from the deck size.
    ///
    /// Sequences must match the deck size exactly - broadcasting never
    /// pads, truncates, or cycles.
    #[error("option `{key}` has {actual} values but the deck has {expected} cards")]
    ArityMismatch {
        /// The option key whose value had the wrong length.
        key: String,
        /// Deck size.
        expected: usize,
        /// Length of the supplied sequence.
        actual: usize,
    },

    /// A requested card-type name has no registered preset.
    ///
    /// Distinct from [`Error::UnknownVendor`] and from resolution errors so
    /// callers can fall back to ordinary construction.
    #[error("no preset registered for card type `{name}`")]
    UnknownPreset {
        /// The requested card-type name.
        name: String,
    },

    /// A named vendor has no override bag for the given preset.
    #[error("vendor `{vendor}` has no overrides for preset `{preset}`")]
    UnknownVendor {
        /// The preset the vendor was requested for.
        preset: String,
        /// The unknown vendor name.
        vendor: String,
    },

    /// An option value could not be converted for its kind.
    #[error("option `{key}`: {reason}")]
    InvalidOption {
        /// The option key whose value was rejected.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A layout, preset, or configuration source failed to parse.
    #[error("failed to parse source: {0}")]
    Source(#[from] serde_json::Error),

    /// A source file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The rendering sink reported a failure for one card.
    #[error("render backend error: {0}")]
    Render(String),
}

impl Error {
    /// Build an [`Error::InvalidOption`] for `key`.
    pub fn invalid_option(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
