//! Layout registry: named default option bags.
//!
//! Layout sources are externally parsed (JSON here) mappings from
//! layout-entry name to an option bag. Sources merge left to right: later
//! sources deep-merge over earlier ones per entry name, so a project file
//! can refine a shared base sheet without restating it.
//!
//! Lookup on an absent name is not an error - drawing commands degrade to
//! built-in defaults (and log the miss).

use std::path::Path;

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::options::OptionBag;

/// One parsed layout source: entry name -> option bag.
pub type LayoutSource = FxHashMap<String, OptionBag>;

/// Registry of named layout entries.
///
/// Backed by a persistent map so every deck takes an O(1) snapshot of a
/// shared registry at construction.
///
/// ## Example
///
/// ```
/// use cardpress::{LayoutRegistry, OptionBag};
///
/// let mut registry = LayoutRegistry::new();
/// registry.add_source([
///     ("title".to_string(), OptionBag::new().with("x", "0.25in").with("font_size", 18i64)),
/// ].into_iter().collect());
/// registry.add_source([
///     ("title".to_string(), OptionBag::new().with("font_size", 24i64)),
/// ].into_iter().collect());
///
/// let entry = registry.lookup("title").unwrap();
/// assert_eq!(entry.get("x").and_then(|v| v.as_text()), Some("0.25in"));
/// assert_eq!(entry.get("font_size").and_then(|v| v.as_int()), Some(24));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LayoutRegistry {
    entries: im::HashMap<String, OptionBag>,
}

impl LayoutRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from sources merged in the order given.
    pub fn from_sources(sources: impl IntoIterator<Item = LayoutSource>) -> Self {
        let mut registry = Self::new();
        for source in sources {
            registry.add_source(source);
        }
        registry
    }

    /// Load and merge one or more JSON layout files, in the order given.
    pub fn from_files<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self> {
        let mut registry = Self::new();
        for path in paths {
            let text = std::fs::read_to_string(path)?;
            let source: LayoutSource = serde_json::from_str(&text)?;
            registry.add_source(source);
        }
        Ok(registry)
    }

    /// Merge one source into the registry.
    ///
    /// New entry names are inserted; colliding names deep-merge the new bag
    /// over the existing one (later-source keys win, earlier-only keys are
    /// retained).
    pub fn add_source(&mut self, source: LayoutSource) {
        for (name, bag) in source {
            let merged = match self.entries.get(&name) {
                Some(existing) => existing.merged_with(&bag),
                None => bag,
            };
            self.entries.insert(name, merged);
        }
    }

    /// Look up an entry's default bag by name.
    ///
    /// Absent names yield `None`, never an error.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&OptionBag> {
        self.entries.get(name)
    }

    /// Check whether an entry name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entry names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }
}
