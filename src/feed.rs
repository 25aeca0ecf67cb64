//! Channel and item assembly on top of the tag parser registry.

use crate::error::{ContractViolation, ParseError};
use crate::item;
use crate::node::{ensure_array, first_if_array, parse_document, FeedNode};
use crate::phase::{apply_sub_tags, ParseContext, CHANNEL, ITEM};
use crate::types::{Episode, PodcastFeed};

/// Parses an XML document into a [`PodcastFeed`].
///
/// # Errors
///
/// Returns tree building errors, [`ParseError::MissingChannel`], or a
/// [`ParseError::Contract`] surfaced by a tag parser.
pub fn parse_feed_str(xml: &str, ctx: &ParseContext<'_>) -> Result<PodcastFeed, ParseError> {
    let root = parse_document(xml)?;
    parse_feed(&root, ctx)
}

/// Assembles a [`PodcastFeed`] from an already built tree.
///
/// The root may be `<rss>` wrapping a `<channel>`, or the `<channel>` itself.
///
/// # Errors
///
/// [`ParseError::MissingChannel`] when no channel is found, or the first
/// [`ContractViolation`] raised by a tag parser.
pub fn parse_feed(root: &FeedNode, ctx: &ParseContext<'_>) -> Result<PodcastFeed, ParseError> {
    let channel = find_channel(root).ok_or(ParseError::MissingChannel)?;
    let fields = apply_sub_tags(CHANNEL, channel, ctx)?;

    let items = ensure_array(channel.lookup("item"))
        .into_iter()
        .map(|node| parse_item(node, ctx))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        items = items.len(),
        live_items = fields.podcast_live_items.as_ref().map_or(0, Vec::len),
        "Parsed channel"
    );

    Ok(PodcastFeed {
        title: item::get_title(channel),
        link: item::get_link(channel),
        description: item::get_description(channel),
        medium: fields.medium,
        podcast_images: fields.podcast_images,
        value: fields.value,
        podcast_people: fields.podcast_people,
        podcast_live_items: fields.podcast_live_items,
        items,
    })
}

/// Builds one [`Episode`] from an `<item>`: base RSS fields plus every parser
/// registered under [`ITEM`].
///
/// # Errors
///
/// Propagates a tag parser's [`ContractViolation`].
pub fn parse_item(node: &FeedNode, ctx: &ParseContext<'_>) -> Result<Episode, ContractViolation> {
    let fields = apply_sub_tags(ITEM, node, ctx)?;

    Ok(Episode {
        guid: item::get_guid(node),
        title: item::get_title(node),
        enclosure: item::get_enclosure(node),
        description: item::get_description(node),
        link: item::get_link(node),
        author: item::get_author(node),
        image: item::get_image(node),
        pub_date: item::get_pub_date(node),
        podcast_people: fields.podcast_people,
        podcast_images: fields.podcast_images,
        value: fields.value,
        chat: fields.chat,
    })
}

fn find_channel(root: &FeedNode) -> Option<&FeedNode> {
    if root.name() == "channel" {
        return Some(root);
    }
    first_if_array(root.lookup("channel")).single()
}
