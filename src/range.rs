//! Card range expressions.
//!
//! A drawing command applies to a subset of the deck: everything, one card,
//! or an explicit index list. Resolution validates bounds eagerly and
//! preserves order and duplicates exactly as given - callers may
//! legitimately render the same card twice in one call. An empty result is
//! a valid no-op, not an error.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::options::OptionValue;

/// Resolved card indices for one command invocation.
pub type RangeIndices = SmallVec<[usize; 16]>;

/// The subset of card indices a drawing command targets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardRange {
    /// Every card in the deck, in index order.
    #[default]
    All,
    /// A single card.
    Single(usize),
    /// An explicit ordered index list; order and duplicates preserved.
    Explicit(Vec<usize>),
}

impl CardRange {
    /// Parse a range from a raw option value.
    ///
    /// Accepts the `"all"` sentinel, a single integer, or a list of
    /// integers. Negative integers are out of bounds by definition.
    pub fn from_value(value: &OptionValue) -> Result<Self> {
        match value {
            OptionValue::Text(s) if s == "all" => Ok(CardRange::All),
            OptionValue::Int(i) => Ok(CardRange::Single(index_from(*i)?)),
            OptionValue::List(items) => {
                let mut indices = Vec::with_capacity(items.len());
                for item in items {
                    let i = item.as_int().ok_or_else(|| {
                        Error::invalid_option("range", "expected integer indices")
                    })?;
                    indices.push(index_from(i)?);
                }
                Ok(CardRange::Explicit(indices))
            }
            _ => Err(Error::invalid_option(
                "range",
                "expected \"all\", an index, or an index list",
            )),
        }
    }

    /// Resolve into explicit indices, each validated against `deck_size`.
    pub fn resolve(&self, deck_size: usize) -> Result<RangeIndices> {
        match self {
            CardRange::All => Ok((0..deck_size).collect()),
            CardRange::Single(i) => {
                check_bounds(*i, deck_size)?;
                Ok(std::iter::once(*i).collect())
            }
            CardRange::Explicit(indices) => {
                for &i in indices {
                    check_bounds(i, deck_size)?;
                }
                Ok(indices.iter().copied().collect())
            }
        }
    }
}

impl From<usize> for CardRange {
    fn from(i: usize) -> Self {
        CardRange::Single(i)
    }
}

impl From<Vec<usize>> for CardRange {
    fn from(v: Vec<usize>) -> Self {
        CardRange::Explicit(v)
    }
}

impl From<std::ops::Range<usize>> for CardRange {
    fn from(r: std::ops::Range<usize>) -> Self {
        CardRange::Explicit(r.collect())
    }
}

fn index_from(i: i64) -> Result<usize> {
    usize::try_from(i)
        .map_err(|_| Error::invalid_option("range", format!("negative index {}", i)))
}

fn check_bounds(index: usize, deck_size: usize) -> Result<()> {
    if index >= deck_size {
        return Err(Error::RangeOutOfBounds { index, deck_size });
    }
    Ok(())
}
