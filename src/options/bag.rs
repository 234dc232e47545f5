//! Option bags and deep merge.
//!
//! An `OptionBag` is the key/value mapping every drawing command, layout
//! entry, and preset carries. Bags are built once and never mutated through
//! a caller's back: merges are pure functions returning new bags.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::value::OptionValue;

/// An immutable-after-build mapping from option key to raw value.
///
/// ## Example
///
/// ```
/// use cardpress::OptionBag;
///
/// let opts = OptionBag::new()
///     .with("x", "1in")
///     .with("fill", "red");
///
/// assert_eq!(opts.get("fill").and_then(|v| v.as_text()), Some("red"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionBag(FxHashMap<String, OptionValue>);

impl OptionBag {
    /// Create a new empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a key, replacing any existing value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a raw value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    /// Check whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of keys in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the bag is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }

    /// Build a bag from a `Map` value, rejecting anything else.
    #[must_use]
    pub fn from_value(value: &OptionValue) -> Option<Self> {
        value.as_map().map(|m| Self(m.clone()))
    }

    /// Deep-merge `overlay` over this bag, returning a new bag.
    ///
    /// Leaf values (scalars and lists) from `overlay` overwrite the value at
    /// the same key; keys absent in `overlay` are retained; nested maps are
    /// merged key-by-key recursively, not replaced wholesale.
    #[must_use]
    pub fn merged_with(&self, overlay: &OptionBag) -> OptionBag {
        let mut out = self.0.clone();
        for (key, value) in &overlay.0 {
            match (out.get(key), value) {
                (Some(OptionValue::Map(_)), OptionValue::Map(_)) => {
                    let base = out.remove(key).unwrap();
                    out.insert(key.clone(), deep_merge_value(&base, value));
                }
                _ => {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        OptionBag(out)
    }
}

impl FromIterator<(String, OptionValue)> for OptionBag {
    fn from_iter<I: IntoIterator<Item = (String, OptionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Recursive value merge: maps merge key-by-key, everything else is
/// overwritten by the overlay.
fn deep_merge_value(base: &OptionValue, overlay: &OptionValue) -> OptionValue {
    match (base, overlay) {
        (OptionValue::Map(b), OptionValue::Map(o)) => {
            let mut out = b.clone();
            for (key, value) in o {
                match out.get(key) {
                    Some(existing) => {
                        let merged = deep_merge_value(existing, value);
                        out.insert(key.clone(), merged);
                    }
                    None => {
                        out.insert(key.clone(), value.clone());
                    }
                }
            }
            OptionValue::Map(out)
        }
        _ => overlay.clone(),
    }
}
