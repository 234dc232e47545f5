//! Deck configuration.
//!
//! Externally loaded (pre-parsed JSON) and read-only once a deck owns it.
//! The resolver consults it for the default DPI, the custom color palette,
//! and the image search directory.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default DPI when neither the configuration nor the caller supplies one.
pub const DEFAULT_DPI: u32 = 300;

/// Read-only deck configuration.
///
/// ## Example
///
/// ```
/// use cardpress::Configuration;
///
/// let config = Configuration::default()
///     .with_dpi(600)
///     .with_color("brand", "#ff8800")
///     .with_img_dir("art");
///
/// assert_eq!(config.dpi(), 600);
/// assert_eq!(config.resolve_color("brand"), "#ff8800");
/// assert_eq!(config.resolve_color("#123456"), "#123456");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    dpi: u32,
    colors: FxHashMap<String, String>,
    img_dir: PathBuf,
    backend: String,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            colors: FxHashMap::default(),
            img_dir: PathBuf::from("."),
            backend: "memory".to_string(),
        }
    }
}

impl Configuration {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the default DPI.
    #[must_use]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Add a named palette color.
    #[must_use]
    pub fn with_color(mut self, name: impl Into<String>, spec: impl Into<String>) -> Self {
        self.colors.insert(name.into(), spec.into());
        self
    }

    /// Set the image search directory.
    #[must_use]
    pub fn with_img_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.img_dir = dir.into();
        self
    }

    /// Default DPI for decks built without an explicit one.
    #[must_use]
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Image search directory for relative file references.
    #[must_use]
    pub fn img_dir(&self) -> &Path {
        &self.img_dir
    }

    /// Rendering backend hint, opaque to the resolution engine.
    #[must_use]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Substitute a palette name with its color spec.
    ///
    /// Specs that aren't palette names pass through unchanged - the engine
    /// never interprets color strings itself.
    #[must_use]
    pub fn resolve_color<'a>(&'a self, spec: &'a str) -> &'a str {
        self.colors.get(spec).map_or(spec, String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.dpi(), 300);
        assert_eq!(config.img_dir(), Path::new("."));
        assert_eq!(config.backend(), "memory");
    }

    #[test]
    fn test_palette_passthrough() {
        let config = Configuration::default().with_color("accent", "#123456");
        assert_eq!(config.resolve_color("accent"), "#123456");
        assert_eq!(config.resolve_color("red"), "red");
    }

    #[test]
    fn test_from_json() {
        let config: Configuration = serde_json::from_str(
            r##"{"dpi": 150, "colors": {"ink": "#222222"}, "img_dir": "assets"}"##,
        )
        .expect("config");
        assert_eq!(config.dpi(), 150);
        assert_eq!(config.resolve_color("ink"), "#222222");
        assert_eq!(config.img_dir(), Path::new("assets"));
        assert_eq!(config.backend(), "memory");
    }
}
