//! Generic option resolution.
//!
//! One algorithm, uniform across option kinds:
//!
//! 1. Effective raw value per key: explicit opts > layout entry > built-in
//!    default.
//! 2. Scalars broadcast to every card; sequences must match the deck size
//!    exactly.
//! 3. Kind-specific conversion runs per element, eagerly, so any failure
//!    aborts the whole command before a single card is rendered.

use crate::config::Configuration;
use crate::error::Result;
use crate::options::bag::OptionBag;
use crate::options::spread::{Resolved, Spread};
use crate::options::value::OptionValue;

/// Shared inputs for one drawing command's resolution pass.
///
/// Built fresh per call from the immutable deck; nothing here is mutated
/// during resolution.
pub struct ResolveContext<'a> {
    /// Number of cards in the deck (not the range).
    pub deck_size: usize,
    /// Deck DPI for unit conversion.
    pub dpi: u32,
    /// Deck dimensions in pixels, for the `deck` geometry sentinel.
    pub deck_width: i32,
    /// See `deck_width`.
    pub deck_height: i32,
    /// The layout entry named by the call's `layout:` key, if any.
    pub layout: Option<&'a OptionBag>,
    /// Deck configuration (palette, image directory).
    pub config: &'a Configuration,
}

/// Resolve one option key into a deck-sized table.
///
/// `convert` is the kind-specific scalar conversion (unit parsing, palette
/// substitution, ...); it receives the key so its errors can name it.
pub fn resolve_key<T: Clone>(
    ctx: &ResolveContext,
    opts: &OptionBag,
    key: &str,
    default: OptionValue,
    convert: impl Fn(&str, &OptionValue, &ResolveContext) -> Result<T>,
) -> Result<Resolved<T>> {
    let effective = opts
        .get(key)
        .or_else(|| ctx.layout.and_then(|entry| entry.get(key)))
        .unwrap_or(&default);

    let spread = match effective {
        OptionValue::List(items) => {
            let mut converted = Vec::with_capacity(items.len());
            for item in items {
                converted.push(convert(key, item, ctx)?);
            }
            Spread::PerCard(converted)
        }
        scalar => Spread::Uniform(convert(key, scalar, ctx)?),
    };

    spread.resolve(key, ctx.deck_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn ctx<'a>(layout: Option<&'a OptionBag>, config: &'a Configuration) -> ResolveContext<'a> {
        ResolveContext {
            deck_size: 3,
            dpi: 300,
            deck_width: 825,
            deck_height: 1125,
            layout,
            config,
        }
    }

    fn as_int(_key: &str, value: &OptionValue, _ctx: &ResolveContext) -> Result<i64> {
        value
            .as_int()
            .ok_or_else(|| Error::invalid_option(_key, "expected an integer"))
    }

    #[test]
    fn test_scalar_broadcast() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("x", 10i64);
        let table = resolve_key(&ctx(None, &config), &opts, "x", 0i64.into(), as_int).unwrap();
        assert_eq!((table[0], table[1], table[2]), (10, 10, 10));
    }

    #[test]
    fn test_sequence_elementwise() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("x", vec![0i64, 100, 200]);
        let table = resolve_key(&ctx(None, &config), &opts, "x", 0i64.into(), as_int).unwrap();
        assert_eq!((table[0], table[1], table[2]), (0, 100, 200));
    }

    #[test]
    fn test_sequence_wrong_length_fails() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("x", vec![0i64, 100]);
        let err = resolve_key(&ctx(None, &config), &opts, "x", 0i64.into(), as_int).unwrap_err();
        assert!(matches!(err, Error::ArityMismatch { ref key, expected: 3, actual: 2 } if key == "x"));
    }

    #[test]
    fn test_precedence_explicit_over_layout_over_default() {
        let config = Configuration::default();
        let layout = OptionBag::new().with("x", 2i64);

        // Explicit wins.
        let opts = OptionBag::new().with("x", 1i64);
        let table =
            resolve_key(&ctx(Some(&layout), &config), &opts, "x", 3i64.into(), as_int).unwrap();
        assert_eq!(table[0], 1);

        // Layout wins over default.
        let opts = OptionBag::new();
        let table =
            resolve_key(&ctx(Some(&layout), &config), &opts, "x", 3i64.into(), as_int).unwrap();
        assert_eq!(table[0], 2);

        // Default when neither supplies the key.
        let table = resolve_key(&ctx(None, &config), &opts, "x", 3i64.into(), as_int).unwrap();
        assert_eq!(table[0], 3);
    }

    #[test]
    fn test_layout_may_supply_sequence() {
        let config = Configuration::default();
        let layout = OptionBag::new().with("x", vec![7i64, 8, 9]);
        let opts = OptionBag::new();
        let table =
            resolve_key(&ctx(Some(&layout), &config), &opts, "x", 0i64.into(), as_int).unwrap();
        assert_eq!((table[0], table[1], table[2]), (7, 8, 9));
    }

    #[test]
    fn test_conversion_error_aborts() {
        let config = Configuration::default();
        let opts = OptionBag::new().with("x", vec![OptionValue::Int(1), OptionValue::Bool(true)]);
        let err = resolve_key(&ctx(None, &config), &opts, "x", 0i64.into(), as_int).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref key, .. } if key == "x"));
    }
}
