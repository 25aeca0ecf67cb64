//! Phase-aware tag parsers and the protocol that runs them.
//!
//! Every podcast namespace tag is described by a [`TagParser`]: the tag it
//! reads, the vocabulary [`Phase`] it belongs to, a node transform that
//! canonicalizes the raw child shape, a support check that decides whether
//! the tag applies, and an extractor producing a partial [`Fields`] set.
//!
//! # Architecture
//!
//! - [`registry`] - which parsers run inside which parent tag
//! - [`phase2`] - `podcast:person`
//! - [`phase4`] - `podcast:value`, `podcast:medium`, `podcast:images`, `podcast:liveItem`
//! - [`phase6`] - `podcast:valueTimeSplit`
//! - [`pending`] - `podcast:chat`
//!
//! Parsers never depend on one another directly. The value parser extends live
//! items only because the default registry lists it under [`LIVE_ITEM`].

pub mod pending;
pub mod phase2;
pub mod phase4;
pub mod phase6;
pub mod registry;

use std::fmt;

use crate::error::ContractViolation;
use crate::node::{FeedNode, NodeSet};
use crate::types::{Chat, LiveItem, Medium, Person, PodcastImage, Value, ValueTimeSplit};

pub use registry::{
    create_default_registry, default_registry, SubTagRegistry, CHANNEL, ITEM, LIVE_ITEM, VALUE,
};

/// Child element name of a recipient inside value blocks and time splits.
pub const RECIPIENT_TAG: &str = "podcast:valueRecipient";

// ============================================================================
// Descriptors
// ============================================================================

/// Maturity tier of a namespace tag.
///
/// Released phases are numbered; `Pending` covers tags whose definition may
/// still change and sorts after every released phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Released(u32),
    Pending,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Released(n) => write!(f, "{n}"),
            Phase::Pending => f.write_str("pending"),
        }
    }
}

/// Canonicalizes the raw shape of a child lookup.
pub type NodeTransform = for<'a> fn(NodeSet<'a>) -> NodeSet<'a>;
/// Decides whether the canonical node satisfies the tag's semantics.
pub type SupportCheck = fn(&NodeSet<'_>) -> bool;
/// Produces the tag's partial field set. Only called after the support check passed.
pub type Extract = fn(&NodeSet<'_>, &ParseContext<'_>) -> Result<Fields, ContractViolation>;

/// Self-contained description of how one tag is parsed.
///
/// Descriptors are plain `Copy` values built from `const` items and never
/// change after registration.
#[derive(Clone, Copy)]
pub struct TagParser {
    /// Qualified element name looked up in the parent node, e.g. `podcast:value`.
    pub tag: &'static str,
    /// Short name; also the registry key when this tag hosts sub-tags.
    pub name: &'static str,
    pub phase: Phase,
    pub node_transform: NodeTransform,
    pub support_check: SupportCheck,
    pub extract: Extract,
}

impl fmt::Debug for TagParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagParser")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Partial field sets
// ============================================================================

/// The fields a tag parser contributes to its owning record.
///
/// Each field is present only when a parser explicitly produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    pub medium: Option<Medium>,
    pub value: Option<Value>,
    pub value_time_splits: Option<Vec<ValueTimeSplit>>,
    pub podcast_images: Option<Vec<PodcastImage>>,
    pub podcast_people: Option<Vec<Person>>,
    pub podcast_live_items: Option<Vec<LiveItem>>,
    pub chat: Option<Chat>,
}

impl Fields {
    /// Merges `newer` into `self`. Fields `newer` carries win; the rest are kept.
    pub fn overlay(&mut self, newer: Fields) {
        fn take<T>(slot: &mut Option<T>, newer: Option<T>) {
            if newer.is_some() {
                *slot = newer;
            }
        }

        take(&mut self.medium, newer.medium);
        take(&mut self.value, newer.value);
        take(&mut self.value_time_splits, newer.value_time_splits);
        take(&mut self.podcast_images, newer.podcast_images);
        take(&mut self.podcast_people, newer.podcast_people);
        take(&mut self.podcast_live_items, newer.podcast_live_items);
        take(&mut self.chat, newer.chat);
    }

    pub fn is_empty(&self) -> bool {
        *self == Fields::default()
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Which vocabulary phases are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Highest released phase to parse; `None` parses every released phase.
    pub max_phase: Option<u32>,
    pub include_pending: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_phase: None,
            include_pending: true,
        }
    }
}

impl ParseOptions {
    pub fn allows(&self, phase: Phase) -> bool {
        match phase {
            Phase::Released(n) => self.max_phase.map_or(true, |max| n <= max),
            Phase::Pending => self.include_pending,
        }
    }
}

/// Read-only state shared by every parser during one parse pass.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'r> {
    pub registry: &'r SubTagRegistry,
    pub options: ParseOptions,
}

impl<'r> ParseContext<'r> {
    pub fn new(registry: &'r SubTagRegistry, options: ParseOptions) -> Self {
        Self { registry, options }
    }
}

impl Default for ParseContext<'static> {
    fn default() -> Self {
        Self::new(default_registry(), ParseOptions::default())
    }
}

/// Runs one parser against the children of `node` and overlays its output.
///
/// Steps: phase gate, node transform, support check, extract. A failed support
/// check contributes nothing.
///
/// # Errors
///
/// Propagates the extractor's [`ContractViolation`] unchanged.
pub fn use_parser(
    parser: &TagParser,
    node: &FeedNode,
    ctx: &ParseContext<'_>,
    fields: &mut Fields,
) -> Result<(), ContractViolation> {
    if !ctx.options.allows(parser.phase) {
        tracing::trace!(tag = parser.tag, phase = %parser.phase, "Tag phase not enabled, skipping");
        return Ok(());
    }

    let canonical = (parser.node_transform)(node.lookup(parser.tag));
    if !(parser.support_check)(&canonical) {
        return Ok(());
    }

    fields.overlay((parser.extract)(&canonical, ctx)?);
    Ok(())
}

/// Runs every parser registered under `parent` against `node`, in
/// registration order, and returns the merged result.
///
/// # Errors
///
/// Stops at the first [`ContractViolation`].
pub fn apply_sub_tags(
    parent: &str,
    node: &FeedNode,
    ctx: &ParseContext<'_>,
) -> Result<Fields, ContractViolation> {
    let mut fields = Fields::default();
    for parser in ctx.registry.resolve(parent) {
        use_parser(parser, node, ctx, &mut fields)?;
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::identity;

    fn always(_: &NodeSet<'_>) -> bool {
        true
    }

    fn present(set: &NodeSet<'_>) -> bool {
        !set.is_absent()
    }

    fn chat_a(_: &NodeSet<'_>, _: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
        Ok(Fields {
            chat: Some(Chat::Attribute {
                url: "a".to_string(),
            }),
            ..Fields::default()
        })
    }

    fn broken(_: &NodeSet<'_>, _: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
        Err(ContractViolation::UnexpectedShape { tag: "x:broken" })
    }

    const CHAT_A: TagParser = TagParser {
        tag: "x:a",
        name: "a",
        phase: Phase::Released(1),
        node_transform: identity,
        support_check: always,
        extract: chat_a,
    };

    const BROKEN: TagParser = TagParser {
        tag: "x:broken",
        name: "broken",
        phase: Phase::Pending,
        node_transform: identity,
        support_check: present,
        extract: broken,
    };

    #[test]
    fn test_phase_ordering() {
        assert!(Phase::Released(2) < Phase::Released(4));
        assert!(Phase::Released(u32::MAX) < Phase::Pending);
        assert_eq!(Phase::Released(4).to_string(), "4");
        assert_eq!(Phase::Pending.to_string(), "pending");
    }

    #[test]
    fn test_options_gate_phases() {
        let opts = ParseOptions {
            max_phase: Some(4),
            include_pending: false,
        };
        assert!(opts.allows(Phase::Released(0)));
        assert!(opts.allows(Phase::Released(4)));
        assert!(!opts.allows(Phase::Released(6)));
        assert!(!opts.allows(Phase::Pending));
        assert!(ParseOptions::default().allows(Phase::Pending));
    }

    #[test]
    fn test_overlay_keeps_fields_the_newer_set_lacks() {
        let mut fields = Fields {
            medium: Some(Medium::Music),
            ..Fields::default()
        };
        fields.overlay(Fields {
            chat: Some(Chat::Attribute {
                url: "x".to_string(),
            }),
            ..Fields::default()
        });
        assert_eq!(fields.medium, Some(Medium::Music));
        assert!(fields.chat.is_some());
    }

    #[test]
    fn test_failed_support_check_contributes_nothing() {
        let registry = SubTagRegistry::new();
        let ctx = ParseContext::new(&registry, ParseOptions::default());
        let node = FeedNode::new("item");
        let mut fields = Fields::default();
        use_parser(&BROKEN, &node, &ctx, &mut fields).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_contract_violation_propagates() {
        let registry = SubTagRegistry::new();
        let ctx = ParseContext::new(&registry, ParseOptions::default());
        let node = FeedNode::new("item").with_child(FeedNode::new("x:broken"));
        let mut fields = Fields::default();
        let err = use_parser(&BROKEN, &node, &ctx, &mut fields).unwrap_err();
        assert_eq!(err, ContractViolation::UnexpectedShape { tag: "x:broken" });
    }

    #[test]
    fn test_disallowed_phase_is_skipped_before_extraction() {
        let registry = SubTagRegistry::new();
        let ctx = ParseContext::new(
            &registry,
            ParseOptions {
                max_phase: None,
                include_pending: false,
            },
        );
        let node = FeedNode::new("item").with_child(FeedNode::new("x:broken"));
        let mut fields = Fields::default();
        assert!(use_parser(&BROKEN, &node, &ctx, &mut fields).is_ok());
    }

    #[test]
    fn test_apply_sub_tags_unknown_parent_is_empty() {
        let mut registry = SubTagRegistry::new();
        registry.register("known", CHAT_A);
        let ctx = ParseContext::new(&registry, ParseOptions::default());
        let fields = apply_sub_tags("unknown", &FeedNode::new("item"), &ctx).unwrap();
        assert!(fields.is_empty());
        let fields = apply_sub_tags("known", &FeedNode::new("item"), &ctx).unwrap();
        assert!(fields.chat.is_some());
    }
}
