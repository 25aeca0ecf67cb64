//! Phase 4 of the podcast namespace: value, medium, images, liveItem.

use super::registry::{LIVE_ITEM as LIVE_ITEM_PARENT, VALUE as VALUE_PARENT};
use super::{apply_sub_tags, Fields, ParseContext, Phase, TagParser, RECIPIENT_TAG};
use crate::error::ContractViolation;
use crate::extract::{
    extract_optional_float_attribute, extract_recipients, known_lookup, lookup, parse_srcset,
    pub_date_to_date, valid_recipient,
};
use crate::item;
use crate::node::{ensure_array, first_if_array, get_attribute, get_known_attribute, get_text};
use crate::node::{FeedNode, NodeSet};
use crate::types::{Chat, ContentLink, LiveItem, LiveStatus, Medium, Value};

const CONTENT_LINK_TAG: &str = "podcast:contentLink";

// ============================================================================
// podcast:value
// ============================================================================

/// `<podcast:value>`: payment layer, transport method and recipients.
///
/// Applies when `type` and `method` are set and at least one recipient is
/// valid. Parsers registered under `value` (time splits) are layered in.
pub const VALUE: TagParser = TagParser {
    tag: "podcast:value",
    name: "value",
    phase: Phase::Released(4),
    node_transform: first_if_array,
    support_check: value_supported,
    extract: extract_value,
};

fn value_supported(set: &NodeSet<'_>) -> bool {
    set.single().is_some_and(|node| {
        get_attribute(node, "type").is_some()
            && get_attribute(node, "method").is_some()
            && ensure_array(node.lookup(RECIPIENT_TAG))
                .into_iter()
                .any(valid_recipient)
    })
}

fn extract_value(set: &NodeSet<'_>, ctx: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
    let node = set
        .single()
        .ok_or(ContractViolation::UnexpectedShape { tag: VALUE.tag })?;
    let nested = apply_sub_tags(VALUE_PARENT, node, ctx)?;

    let value = Value {
        value_type: get_known_attribute(node, "type")?.to_string(),
        method: get_known_attribute(node, "method")?.to_string(),
        suggested: extract_optional_float_attribute(node, "suggested"),
        recipients: extract_recipients(&ensure_array(node.lookup(RECIPIENT_TAG))),
        value_time_splits: nested.value_time_splits,
    };

    Ok(Fields {
        value: Some(value),
        ..Fields::default()
    })
}

// ============================================================================
// podcast:medium
// ============================================================================

/// `<podcast:medium>`: the first element whose text is a known medium.
pub const MEDIUM: TagParser = TagParser {
    tag: "podcast:medium",
    name: "medium",
    phase: Phase::Released(4),
    node_transform: first_known_medium,
    support_check: medium_supported,
    extract: extract_medium,
};

fn first_known_medium(set: NodeSet<'_>) -> NodeSet<'_> {
    ensure_array(set)
        .into_iter()
        .find(|n| {
            let text = get_text(n);
            !text.is_empty() && lookup::<Medium>(text).is_some()
        })
        .into()
}

fn medium_supported(set: &NodeSet<'_>) -> bool {
    set.single().is_some_and(|n| !get_text(n).is_empty())
}

fn extract_medium(set: &NodeSet<'_>, _ctx: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
    let node = set
        .single()
        .ok_or(ContractViolation::UnexpectedShape { tag: MEDIUM.tag })?;
    Ok(Fields {
        medium: Some(known_lookup::<Medium>(get_text(node))?),
        ..Fields::default()
    })
}

// ============================================================================
// podcast:images
// ============================================================================

/// `<podcast:images srcset="...">`: the first element carrying a `srcset`.
pub const IMAGES: TagParser = TagParser {
    tag: "podcast:images",
    name: "images",
    phase: Phase::Released(4),
    node_transform: first_with_srcset,
    support_check: images_supported,
    extract: extract_images,
};

fn first_with_srcset(set: NodeSet<'_>) -> NodeSet<'_> {
    ensure_array(set)
        .into_iter()
        .find(|n| get_attribute(n, "srcset").is_some())
        .into()
}

fn images_supported(set: &NodeSet<'_>) -> bool {
    set.single().is_some()
}

fn extract_images(set: &NodeSet<'_>, _ctx: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
    let node = set
        .single()
        .ok_or(ContractViolation::UnexpectedShape { tag: IMAGES.tag })?;
    Ok(Fields {
        podcast_images: Some(parse_srcset(get_known_attribute(node, "srcset")?)),
        ..Fields::default()
    })
}

// ============================================================================
// podcast:liveItem
// ============================================================================

/// `<podcast:liveItem>`: every element with a known `status` and a `start`.
///
/// Elements lacking a guid, title or enclosure are dropped individually.
pub const LIVE_ITEM: TagParser = TagParser {
    tag: "podcast:liveItem",
    name: "liveItem",
    phase: Phase::Released(4),
    node_transform: scheduled_live_items,
    support_check: live_items_supported,
    extract: extract_live_items,
};

fn scheduled_live_items(set: NodeSet<'_>) -> NodeSet<'_> {
    NodeSet::Many(
        ensure_array(set)
            .into_iter()
            .filter(|n| {
                get_attribute(n, "status").is_some_and(|s| lookup::<LiveStatus>(s).is_some())
                    && get_attribute(n, "start").is_some()
            })
            .collect(),
    )
}

fn live_items_supported(set: &NodeSet<'_>) -> bool {
    !set.is_absent()
}

fn extract_live_items(
    set: &NodeSet<'_>,
    ctx: &ParseContext<'_>,
) -> Result<Fields, ContractViolation> {
    let mut items = Vec::new();
    for node in set.to_vec() {
        if let Some(live_item) = live_item(node, ctx)? {
            items.push(live_item);
        }
    }

    Ok(Fields {
        podcast_live_items: Some(items),
        ..Fields::default()
    })
}

fn live_item(
    node: &FeedNode,
    ctx: &ParseContext<'_>,
) -> Result<Option<LiveItem>, ContractViolation> {
    let (Some(guid), Some(title), Some(enclosure)) = (
        item::get_guid(node),
        item::get_title(node),
        item::get_enclosure(node),
    ) else {
        tracing::debug!(
            start = get_attribute(node, "start").unwrap_or_default(),
            "Dropping live item without guid, title or enclosure"
        );
        return Ok(None);
    };

    let mut fields = apply_sub_tags(LIVE_ITEM_PARENT, node, ctx)?;

    // A bare `chat` attribute only fills in when no chat tag was parsed.
    let chat = fields.chat.take().or_else(|| {
        get_attribute(node, "chat").map(|url| Chat::Attribute {
            url: url.to_string(),
        })
    });

    Ok(Some(LiveItem {
        status: known_lookup::<LiveStatus>(get_known_attribute(node, "status")?)?,
        start: pub_date_to_date(get_known_attribute(node, "start")?),
        end: get_attribute(node, "end").map(pub_date_to_date),
        guid,
        title,
        enclosure,
        description: item::get_description(node),
        link: item::get_link(node),
        author: item::get_author(node),
        image: item::get_image(node),
        podcast_people: fields.podcast_people,
        podcast_images: fields.podcast_images,
        value: fields.value,
        chat,
        content_links: content_links(node),
    }))
}

fn content_links(node: &FeedNode) -> Vec<ContentLink> {
    ensure_array(node.lookup(CONTENT_LINK_TAG))
        .into_iter()
        .map(|link| ContentLink {
            url: get_attribute(link, "href").unwrap_or_default().to_string(),
            title: get_text(link).to_string(),
        })
        .collect()
}
