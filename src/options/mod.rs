//! Option system: raw values, bags, broadcasting, and kind resolution.
//!
//! ## Key Types
//!
//! - `OptionValue`: Raw scalar / sequence / map value
//! - `OptionBag`: Immutable key/value bag with pure deep merge
//! - `Spread` / `Resolved`: Scalar-vs-per-card boundary and the deck-sized
//!   table it resolves into
//! - `ResolveContext` / `resolve_key`: The generic precedence + broadcast
//!   algorithm shared by every kind
//! - `GeometryArgs`, `PaintArgs`, `TransformArgs`, `InputFileArgs`,
//!   `TextArgs`: Per-kind specializations used by drawing commands

pub mod bag;
pub mod kinds;
pub mod resolver;
pub mod spread;
pub mod value;

pub use bag::OptionBag;
pub use kinds::{
    BlendMode, Dimension, GeometryArgs, InputFileArgs, PaintArgs, PixelBox, TextAlign, TextArgs,
    TransformArgs,
};
pub use resolver::{resolve_key, ResolveContext};
pub use spread::{Resolved, Spread};
pub use value::OptionValue;
