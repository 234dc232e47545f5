//! Deck: the orchestrator.
//!
//! A `Deck` owns a fixed-size ordered collection of [`Card`]s, a snapshot of
//! the layout registry, and the configuration. Its dimensions are immutable
//! pixels, converted from physical units at construction; width and height
//! already include bleed on both sides (`final = requested + 2 * bleed`).
//!
//! Drawing commands live in [`commands`]: each one resolves its range and
//! option tables eagerly, then drives the rendering sink once per selected
//! card.

pub mod card;
pub mod commands;
pub mod sink;

pub use card::Card;
pub use sink::{ImageParams, NullSink, RenderSink, ShapeParams, TextParams};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::layout::LayoutRegistry;
use crate::options::{OptionBag, OptionValue};
use crate::units;

/// A fixed-size deck of print-ready cards.
///
/// ## Example
///
/// ```
/// use cardpress::Deck;
///
/// let deck = Deck::builder()
///     .cards(12)
///     .width("2.5in")
///     .height("3.5in")
///     .bleed("0.125in")
///     .build()
///     .unwrap();
///
/// // 2.5in at 300 DPI plus 1/8in bleed per side.
/// assert_eq!(deck.width(), 750 + 2 * 38);
/// assert_eq!(deck.size(), 12);
/// ```
#[derive(Clone, Debug)]
pub struct Deck {
    width: i32,
    height: i32,
    dpi: u32,
    bleed: i32,
    cards: Vec<Card>,
    layouts: LayoutRegistry,
    config: Configuration,
}

impl Deck {
    /// Start building a deck.
    #[must_use]
    pub fn builder() -> DeckBuilder {
        DeckBuilder::default()
    }

    /// Build a deck from a construction bag (width, height, dpi, bleed,
    /// cards keys), as produced by preset resolution.
    pub fn from_bag(
        bag: &OptionBag,
        config: Configuration,
        layouts: LayoutRegistry,
    ) -> Result<Self> {
        let mut builder = Self::builder().config(config).layouts(layouts);
        if let Some(v) = bag.get("width") {
            builder = builder.width(v.clone());
        }
        if let Some(v) = bag.get("height") {
            builder = builder.height(v.clone());
        }
        if let Some(v) = bag.get("bleed") {
            builder = builder.bleed(v.clone());
        }
        if let Some(v) = bag.get("dpi") {
            let dpi = v
                .as_int()
                .filter(|&d| d > 0)
                .ok_or_else(|| Error::invalid_option("dpi", "expected a positive integer"))?;
            builder = builder.dpi(dpi as u32);
        }
        if let Some(v) = bag.get("cards") {
            let cards = v
                .as_int()
                .and_then(|c| usize::try_from(c).ok())
                .ok_or_else(|| Error::invalid_option("cards", "expected a card count"))?;
            builder = builder.cards(cards);
        }
        builder.build()
    }

    /// Final card width in pixels, bleed included.
    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Final card height in pixels, bleed included.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Deck DPI.
    #[must_use]
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Bleed per side in pixels.
    #[must_use]
    pub fn bleed(&self) -> i32 {
        self.bleed
    }

    /// Number of cards.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    /// Get a card by index.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<Card> {
        self.cards.get(index).copied()
    }

    /// Iterate over the cards in index order.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// The deck's layout snapshot.
    #[must_use]
    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    /// The deck's configuration.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }
}

/// Builder for [`Deck`].
///
/// Width, height, and bleed accept raw pixels or unit expressions; they are
/// converted once, at `build`, against the deck's DPI.
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    cards: usize,
    width: OptionValue,
    height: OptionValue,
    bleed: OptionValue,
    dpi: Option<u32>,
    config: Configuration,
    layouts: LayoutRegistry,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self {
            cards: 1,
            width: "2.5in".into(),
            height: "3.5in".into(),
            bleed: 0i64.into(),
            dpi: None,
            config: Configuration::default(),
            layouts: LayoutRegistry::new(),
        }
    }
}

impl DeckBuilder {
    /// Set the number of cards.
    #[must_use]
    pub fn cards(mut self, cards: usize) -> Self {
        self.cards = cards;
        self
    }

    /// Set the requested card width (pixels or unit expression).
    #[must_use]
    pub fn width(mut self, width: impl Into<OptionValue>) -> Self {
        self.width = width.into();
        self
    }

    /// Set the requested card height.
    #[must_use]
    pub fn height(mut self, height: impl Into<OptionValue>) -> Self {
        self.height = height.into();
        self
    }

    /// Set the bleed per side.
    #[must_use]
    pub fn bleed(mut self, bleed: impl Into<OptionValue>) -> Self {
        self.bleed = bleed.into();
        self
    }

    /// Set the DPI, overriding the configuration's default.
    #[must_use]
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Attach a configuration.
    #[must_use]
    pub fn config(mut self, config: Configuration) -> Self {
        self.config = config;
        self
    }

    /// Attach a layout registry snapshot.
    #[must_use]
    pub fn layouts(mut self, layouts: LayoutRegistry) -> Self {
        self.layouts = layouts;
        self
    }

    /// Convert units, validate, and construct the deck.
    pub fn build(self) -> Result<Deck> {
        let dpi = self.dpi.unwrap_or_else(|| self.config.dpi());
        if dpi == 0 {
            return Err(Error::invalid_option("dpi", "must be positive"));
        }

        let width = positive("width", &self.width, dpi)?;
        let height = positive("height", &self.height, dpi)?;
        let bleed = units::expect_pixels("bleed", &self.bleed, dpi)?;
        if bleed < 0 {
            return Err(Error::invalid_option("bleed", "must not be negative"));
        }

        Ok(Deck {
            width: width + 2 * bleed,
            height: height + 2 * bleed,
            dpi,
            bleed,
            cards: (0..self.cards).map(Card::new).collect(),
            layouts: self.layouts,
            config: self.config,
        })
    }
}

fn positive(key: &str, value: &OptionValue, dpi: u32) -> Result<i32> {
    let px = units::expect_pixels(key, value, dpi)?;
    if px <= 0 {
        return Err(Error::invalid_option(key, format!("must be positive, got {}", px)));
    }
    Ok(px)
}
