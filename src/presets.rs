//! Preset factory for standard card sizes.
//!
//! The original tool constructed decks through dynamically-dispatched
//! per-size constructors. Here that is an explicit registry: card-type name
//! -> construction defaults (width, height, dpi, bleed), optionally refined
//! by a per-vendor override bag, with a single named entry point
//! [`PresetRegistry::build`]. Tooling can ask [`PresetRegistry::contains`]
//! whether a name resolves without constructing anything.
//!
//! Precedence on build: caller args > vendor overrides > preset base.

use rustc_hash::FxHashMap;

use crate::config::Configuration;
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::layout::LayoutRegistry;
use crate::options::OptionBag;

/// Construction defaults for one card type.
#[derive(Clone, Debug, Default)]
pub struct PresetEntry {
    base: OptionBag,
    vendors: FxHashMap<String, OptionBag>,
}

impl PresetEntry {
    /// Create an entry from its base bag.
    #[must_use]
    pub fn new(base: OptionBag) -> Self {
        Self {
            base,
            vendors: FxHashMap::default(),
        }
    }

    /// Add a vendor override bag (builder pattern).
    #[must_use]
    pub fn with_vendor(mut self, vendor: impl Into<String>, overrides: OptionBag) -> Self {
        self.vendors.insert(vendor.into(), overrides);
        self
    }

    /// The base construction bag.
    #[must_use]
    pub fn base(&self) -> &OptionBag {
        &self.base
    }

    /// A vendor's override bag, if registered.
    #[must_use]
    pub fn vendor(&self, vendor: &str) -> Option<&OptionBag> {
        self.vendors.get(vendor)
    }
}

/// Registry of card-type presets.
///
/// ## Example
///
/// ```
/// use cardpress::PresetRegistry;
///
/// let registry = PresetRegistry::builtin();
/// assert!(registry.contains("poker"));
/// assert!(!registry.contains("hexagon"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PresetRegistry {
    presets: FxHashMap<String, PresetEntry>,
}

impl PresetRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in standard sizes (all at 300 DPI, no bleed), with
    /// representative vendor bleed corrections.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        let tgc = || OptionBag::new().with("bleed", "0.125in");
        let dtc = || OptionBag::new().with("bleed", "0.075in");

        registry.register(
            "poker",
            PresetEntry::new(size("2.5in", "3.5in"))
                .with_vendor("thegamecrafter", tgc())
                .with_vendor("drivethrucards", dtc()),
        );
        registry.register(
            "bridge",
            PresetEntry::new(size("2.25in", "3.5in"))
                .with_vendor("thegamecrafter", tgc())
                .with_vendor("drivethrucards", dtc()),
        );
        registry.register(
            "square",
            PresetEntry::new(size("2.5in", "2.5in")).with_vendor("thegamecrafter", tgc()),
        );
        registry.register(
            "tarot",
            PresetEntry::new(size("2.75in", "4.75in")).with_vendor("thegamecrafter", tgc()),
        );
        registry.register("mini", PresetEntry::new(size("1.25in", "1.75in")));
        registry.register("business", PresetEntry::new(size("3.5in", "2in")));
        registry.register("jumbo", PresetEntry::new(size("3.5in", "5.5in")));

        registry
    }

    /// Register a preset, replacing any existing entry with the same name.
    pub fn register(&mut self, name: impl Into<String>, entry: PresetEntry) {
        self.presets.insert(name.into(), entry);
    }

    /// Does a preset exist for this card-type name?
    ///
    /// Answers without constructing anything - the introspection hook for
    /// "does this name resolve to a valid card type" queries.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Get a preset entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PresetEntry> {
        self.presets.get(name)
    }

    /// Iterate over registered type names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.presets.keys()
    }

    /// Resolve the final construction bag for a type name and caller args.
    ///
    /// The `vendor` key in `args`, when present, selects an override bag;
    /// a vendor unknown for this type is a user error, never silently
    /// ignored.
    pub fn resolve(&self, name: &str, args: &OptionBag) -> Result<OptionBag> {
        let entry = self.get(name).ok_or_else(|| Error::UnknownPreset {
            name: name.to_string(),
        })?;

        let mut bag = entry.base().clone();

        if let Some(vendor) = args.get("vendor").and_then(|v| v.as_text()) {
            let overrides = entry.vendor(vendor).ok_or_else(|| Error::UnknownVendor {
                preset: name.to_string(),
                vendor: vendor.to_string(),
            })?;
            bag = bag.merged_with(overrides);
        }

        Ok(bag.merged_with(args))
    }

    /// Build a deck from a preset: lookup, vendor merge, caller-arg merge,
    /// construction.
    pub fn build(
        &self,
        name: &str,
        args: &OptionBag,
        config: Configuration,
        layouts: LayoutRegistry,
    ) -> Result<Deck> {
        let bag = self.resolve(name, args)?;
        Deck::from_bag(&bag, config, layouts)
    }
}

fn size(width: &str, height: &str) -> OptionBag {
    OptionBag::new()
        .with("width", width)
        .with("height", height)
        .with("dpi", 300i64)
        .with("bleed", 0i64)
}
