//! Sub-tag registry: which tag parsers run inside which parent tag.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::{pending, phase2, phase4, phase6, TagParser};

/// Parsers applied to the `<channel>` element.
pub const CHANNEL: &str = "channel";
/// Parsers applied to every `<item>`.
pub const ITEM: &str = "item";
/// Parsers applied to every surviving `<podcast:liveItem>`.
pub const LIVE_ITEM: &str = "liveItem";
/// Parsers applied inside `<podcast:value>`.
pub const VALUE: &str = "value";

/// Mapping from a parent tag name to the parsers that run inside it.
///
/// Insertion order is execution order, and therefore overlay order: a later
/// parser producing the same field replaces the earlier value. Entries are
/// append-only.
#[derive(Debug, Default)]
pub struct SubTagRegistry {
    entries: HashMap<String, Vec<TagParser>>,
}

impl SubTagRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `parser` to the list for `parent`. Registering twice runs it twice.
    pub fn register(&mut self, parent: impl Into<String>, parser: TagParser) {
        self.entries.entry(parent.into()).or_default().push(parser);
    }

    /// Parsers registered under `parent`, in registration order. Unknown
    /// parents yield an empty slice.
    #[must_use]
    pub fn resolve(&self, parent: &str) -> &[TagParser] {
        self.entries.get(parent).map(Vec::as_slice).unwrap_or(&[])
    }

    #[must_use]
    pub fn has_parent(&self, parent: &str) -> bool {
        self.entries.contains_key(parent)
    }

    /// Every parent tag with at least one registration.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Build the registry used for regular feed parsing.
///
/// | parent     | parsers, in order                         |
/// |------------|-------------------------------------------|
/// | `channel`  | person, medium, images, value, liveItem   |
/// | `item`     | person, value, images, chat               |
/// | `liveItem` | person, value, images, chat               |
/// | `value`    | valueTimeSplit                            |
#[must_use]
pub fn create_default_registry() -> SubTagRegistry {
    let mut registry = SubTagRegistry::new();

    registry.register(CHANNEL, phase2::PERSON);
    registry.register(CHANNEL, phase4::MEDIUM);
    registry.register(CHANNEL, phase4::IMAGES);
    registry.register(CHANNEL, phase4::VALUE);
    registry.register(CHANNEL, phase4::LIVE_ITEM);

    registry.register(ITEM, phase2::PERSON);
    registry.register(ITEM, phase4::VALUE);
    registry.register(ITEM, phase4::IMAGES);
    registry.register(ITEM, pending::CHAT);

    // Live items carry the same optional episode tags as regular items.
    registry.register(LIVE_ITEM, phase2::PERSON);
    registry.register(LIVE_ITEM, phase4::VALUE);
    registry.register(LIVE_ITEM, phase4::IMAGES);
    registry.register(LIVE_ITEM, pending::CHAT);

    registry.register(VALUE, phase6::VALUE_TIME_SPLIT);

    registry
}

static DEFAULT_REGISTRY: LazyLock<SubTagRegistry> = LazyLock::new(create_default_registry);

/// The process-wide default registry, built on first use and read-only after.
pub fn default_registry() -> &'static SubTagRegistry {
    &DEFAULT_REGISTRY
}
