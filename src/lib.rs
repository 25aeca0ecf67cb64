//! # podtag
//!
//! Extracts strongly typed podcast namespace metadata (`podcast:value`,
//! `podcast:liveItem`, `podcast:images`, ...) from RSS feeds.
//!
//! ## Architecture
//!
//! ```text
//! XML → node::parse_document → FeedNode tree → feed::parse_feed → PodcastFeed
//!                                                   │
//!                                     phase::SubTagRegistry (TagParser per tag)
//! ```
//!
//! - [`node`]: read-only element tree, accessors and the XML tree builder
//! - [`extract`]: attribute-level primitives (floats, recipients, srcset, dates, vocabularies)
//! - [`phase`]: tag parser descriptors, the sub-tag registry and the execution protocol
//! - [`item`]: base RSS item fields
//! - [`feed`]: channel/item assembly
//! - [`types`]: output records
//! - [`config`]: optional TOML configuration
//!
//! ## Example
//!
//! ```
//! use podtag::{parse_feed_str, ParseContext};
//!
//! let xml = r#"<rss><channel>
//!   <podcast:medium>music</podcast:medium>
//! </channel></rss>"#;
//! let feed = parse_feed_str(xml, &ParseContext::default()).unwrap();
//! assert_eq!(feed.medium, Some(podtag::types::Medium::Music));
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod item;
pub mod node;
pub mod phase;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::{ContractViolation, ParseError};
pub use feed::{parse_feed, parse_feed_str, parse_item};
pub use node::{FeedNode, NodeSet};
pub use phase::{
    apply_sub_tags, create_default_registry, default_registry, use_parser, Fields, ParseContext,
    ParseOptions, Phase, SubTagRegistry, TagParser,
};
