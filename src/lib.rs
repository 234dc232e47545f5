//! # cardpress
//!
//! The per-card option resolution engine of a declarative print-card tool:
//! a script describes a deck of cards through drawing commands whose options
//! may be one value for every card or a per-card sequence, may reference a
//! named layout template, and may use physical units - this crate turns
//! those raw option bags into fully-resolved, per-card scalar parameters
//! and drives an external rendering sink with them.
//!
//! ## Design Principles
//!
//! 1. **Eager, atomic resolution**: Every option table for a command is
//!    resolved (and every error detected) before a single card is rendered.
//!
//! 2. **Pure merging**: Option bags, layout entries, and presets are
//!    immutable; merges return new bags and never touch the caller's data.
//!
//! 3. **Rendering is external**: Backends implement [`RenderSink`] and
//!    receive only fully-resolved scalars. No pixel math lives here.
//!
//! ## Modules
//!
//! - `options`: Raw values, bags, broadcasting, and per-kind resolution
//! - `units`: DPI-aware physical-unit conversion
//! - `range`: Card range expressions and validation
//! - `layout`: Named layout entries with deep-merged sources
//! - `presets`: Standard card-size registry and deck factory
//! - `deck`: The deck orchestrator, cards, drawing commands, and the sink
//! - `config`: Read-only deck configuration (DPI default, palette)
//!
//! ## Example
//!
//! ```
//! use cardpress::{Deck, NullSink, OptionBag};
//!
//! let deck = Deck::builder().cards(3).width("2.5in").height("3.5in").build()?;
//!
//! let mut sink = NullSink;
//! deck.rect(
//!     &mut sink,
//!     &OptionBag::new()
//!         .with("x", "0.125in")
//!         .with("y", "0.125in")
//!         .with("fill", vec!["red", "green", "blue"]),
//! )?;
//! # Ok::<(), cardpress::Error>(())
//! ```

pub mod config;
pub mod deck;
pub mod error;
pub mod layout;
pub mod options;
pub mod presets;
pub mod range;
pub mod units;

// Re-export commonly used types
pub use crate::config::Configuration;
pub use crate::deck::{
    Card, Deck, DeckBuilder, ImageParams, NullSink, RenderSink, ShapeParams, TextParams,
};
pub use crate::error::{Error, Result};
pub use crate::layout::{LayoutRegistry, LayoutSource};
pub use crate::options::{
    BlendMode, Dimension, GeometryArgs, InputFileArgs, OptionBag, OptionValue, PaintArgs,
    PixelBox, Resolved, Spread, TextAlign, TextArgs, TransformArgs,
};
pub use crate::presets::{PresetEntry, PresetRegistry};
pub use crate::range::{CardRange, RangeIndices};
pub use crate::units::{to_pixels, Converted};
