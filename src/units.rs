//! Physical-unit conversion.
//!
//! Geometry options may be given as raw pixel integers or as strings of the
//! form `<number><unit>` with unit one of `in`, `cm`, `mm`, `pt`, `pc`, `px`
//! (case-insensitive, optional whitespace). Conversion is DPI-aware:
//! `pixels = round(number / units_per_inch * dpi)`.
//!
//! Strings that are not measures at all (`"native"`, `"deck"`, `"scale"`)
//! pass through unconverted - they are sentinels resolved later by the
//! specific drawing command, not by the unit layer.

use crate::error::{Error, Result};
use crate::options::OptionValue;

/// Units-per-inch for each recognized suffix.
const UNITS_PER_INCH: [(&str, f64); 5] = [
    ("in", 1.0),
    ("cm", 2.54),
    ("mm", 25.4),
    ("pt", 72.0),
    ("pc", 6.0),
];

/// Outcome of a unit conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum Converted {
    /// A concrete pixel count.
    Pixels(i32),
    /// A non-measure string, passed through for kind-specific resolution.
    Sentinel(String),
}

/// Convert a raw option value to pixels at the given DPI.
///
/// Integers (and floats) are already pixels and pass through rounded.
/// Measure strings are converted; other strings come back as
/// [`Converted::Sentinel`]. Anything else is an [`Error::InvalidUnit`].
///
/// Negative measures are accepted here - x/y offsets may legitimately be
/// negative. Callers whose semantics require positive values check the
/// returned pixel count themselves.
pub fn to_pixels(value: &OptionValue, dpi: u32) -> Result<Converted> {
    match value {
        OptionValue::Int(i) => Ok(Converted::Pixels(*i as i32)),
        OptionValue::Float(f) if f.is_finite() => Ok(Converted::Pixels(f.round() as i32)),
        OptionValue::Text(s) => convert_str(s, dpi),
        other => Err(Error::InvalidUnit {
            value: format!("{:?}", other),
        }),
    }
}

/// Convert a value that must come out as a concrete pixel count.
///
/// Like [`to_pixels`], but a sentinel string is rejected with an error
/// naming `key`.
pub fn expect_pixels(key: &str, value: &OptionValue, dpi: u32) -> Result<i32> {
    match to_pixels(value, dpi)? {
        Converted::Pixels(px) => Ok(px),
        Converted::Sentinel(s) => Err(Error::invalid_option(
            key,
            format!("expected a measure, got `{}`", s),
        )),
    }
}

fn convert_str(raw: &str, dpi: u32) -> Result<Converted> {
    let s = raw.trim();

    // Split the leading numeric part from the unit suffix.
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(s.len());
    let (num, suffix) = s.split_at(split);

    if num.is_empty() {
        // No numeric prefix at all: a sentinel like "native" or "deck".
        return Ok(Converted::Sentinel(s.to_string()));
    }

    let number: f64 = num.parse().map_err(|_| Error::InvalidUnit {
        value: raw.to_string(),
    })?;
    if !number.is_finite() {
        return Err(Error::InvalidUnit {
            value: raw.to_string(),
        });
    }

    let suffix = suffix.trim().to_ascii_lowercase();
    if suffix.is_empty() || suffix == "px" {
        // Bare number or explicit pixels: no conversion.
        return Ok(Converted::Pixels(number.round() as i32));
    }

    for (unit, per_inch) in UNITS_PER_INCH {
        if suffix == unit {
            let inches = number / per_inch;
            return Ok(Converted::Pixels((inches * f64::from(dpi)).round() as i32));
        }
    }

    Err(Error::InvalidUnit {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(value: &OptionValue, dpi: u32) -> i32 {
        match to_pixels(value, dpi).unwrap() {
            Converted::Pixels(p) => p,
            Converted::Sentinel(s) => panic!("unexpected sentinel {}", s),
        }
    }

    #[test]
    fn test_integer_passthrough() {
        assert_eq!(px(&OptionValue::Int(825), 300), 825);
        assert_eq!(px(&OptionValue::Int(-10), 300), -10);
    }

    #[test]
    fn test_inches() {
        assert_eq!(px(&"2.5in".into(), 300), 750);
        assert_eq!(px(&"1in".into(), 72), 72);
        assert_eq!(px(&" 0.125 in ".into(), 300), 38);
    }

    #[test]
    fn test_metric() {
        assert_eq!(px(&"2.54cm".into(), 300), 300);
        assert_eq!(px(&"25.4mm".into(), 300), 300);
    }

    #[test]
    fn test_points_and_picas() {
        assert_eq!(px(&"72pt".into(), 300), 300);
        assert_eq!(px(&"6pc".into(), 300), 300);
    }

    #[test]
    fn test_px_and_bare_number() {
        assert_eq!(px(&"42px".into(), 300), 42);
        assert_eq!(px(&"42".into(), 300), 42);
        assert_eq!(px(&"42.6".into(), 300), 43);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(px(&"1IN".into(), 100), 100);
        assert_eq!(px(&"10Mm".into(), 254), 100);
    }

    #[test]
    fn test_negative_measure() {
        assert_eq!(px(&"-0.5in".into(), 300), -150);
    }

    #[test]
    fn test_sentinel_passthrough() {
        assert_eq!(
            to_pixels(&"native".into(), 300).unwrap(),
            Converted::Sentinel("native".to_string())
        );
        assert_eq!(
            to_pixels(&"deck".into(), 300).unwrap(),
            Converted::Sentinel("deck".to_string())
        );
    }

    #[test]
    fn test_unknown_suffix_fails() {
        assert!(matches!(
            to_pixels(&"3.5parsec".into(), 300),
            Err(Error::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_malformed_number_fails() {
        assert!(matches!(
            to_pixels(&"--2in".into(), 300),
            Err(Error::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_non_scalar_fails() {
        assert!(matches!(
            to_pixels(&OptionValue::Bool(true), 300),
            Err(Error::InvalidUnit { .. })
        ));
    }

    #[test]
    fn test_expect_pixels_rejects_sentinel() {
        let err = expect_pixels("width", &"native".into(), 300).unwrap_err();
        assert!(matches!(err, Error::InvalidOption { ref key, .. } if key == "width"));
    }
}
