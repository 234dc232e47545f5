//! Raw option values.
//!
//! Drawing commands, layout entries, and presets all traffic in the same
//! value vocabulary: scalars (numbers, booleans, strings), ordered lists
//! (per-card sequences), and nested maps (layout bags). The engine doesn't
//! interpret strings here - color specs, file names, unit expressions, and
//! sentinels are all just `Text` until a kind-specific converter runs.
//!
//! The untagged serde representation means JSON layout/preset sources load
//! straight into `OptionValue` with no intermediate schema.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A raw option value as found in an option bag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Boolean flag (flip_x, hint).
    Bool(bool),
    /// Integer value (pixel coordinates, counts).
    Int(i64),
    /// Floating-point value (angles, scale factors).
    Float(f64),
    /// Text value (unit expression, color spec, file name, sentinel).
    Text(String),
    /// Ordered sequence - a per-card value list when it appears at the top
    /// level of a bag entry.
    List(Vec<OptionValue>),
    /// Nested mapping (layout bags, structured sub-options).
    Map(FxHashMap<String, OptionValue>),
}

impl OptionValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as float, accepting Int values too.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            OptionValue::Float(v) => Some(*v),
            OptionValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as list reference if this is a List value.
    #[must_use]
    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(v) => Some(v),
            _ => None,
        }
    }

    /// Get as map reference if this is a Map value.
    #[must_use]
    pub fn as_map(&self) -> Option<&FxHashMap<String, OptionValue>> {
        match self {
            OptionValue::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Is this a per-card sequence?
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, OptionValue::List(_))
    }
}

// Convenient From implementations
impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Int(v)
    }
}

impl From<i32> for OptionValue {
    fn from(v: i32) -> Self {
        OptionValue::Int(v as i64)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Float(v)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(v)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(v.to_string())
    }
}

impl<T: Into<OptionValue>> From<Vec<T>> for OptionValue {
    fn from(v: Vec<T>) -> Self {
        OptionValue::List(v.into_iter().map(Into::into).collect())
    }
}
