//! Phase 6 of the podcast namespace: valueTimeSplit.

use super::{Fields, ParseContext, Phase, TagParser, RECIPIENT_TAG};
use crate::error::ContractViolation;
use crate::extract::{extract_optional_float_attribute, extract_recipients, lookup};
use crate::node::{ensure_array, first_if_array, get_attribute, FeedNode, NodeSet};
use crate::types::{Medium, RemoteItem, SplitTarget, ValueTimeSplit};

const REMOTE_ITEM_TAG: &str = "podcast:remoteItem";
/// Share of the value a remote item receives when `remotePercentage` is unset.
const DEFAULT_REMOTE_PERCENTAGE: f64 = 100.0;

/// `<podcast:valueTimeSplit>` inside `<podcast:value>`.
///
/// A split needs numeric `startTime` and `duration`, and either a remote item
/// with a `feedGuid` or at least one valid recipient.
pub const VALUE_TIME_SPLIT: TagParser = TagParser {
    tag: "podcast:valueTimeSplit",
    name: "valueTimeSplit",
    phase: Phase::Released(6),
    node_transform: complete_splits,
    support_check: splits_supported,
    extract: extract_splits,
};

fn complete_splits(set: NodeSet<'_>) -> NodeSet<'_> {
    NodeSet::Many(
        ensure_array(set)
            .into_iter()
            .filter(|n| time_split(n).is_some())
            .collect(),
    )
}

fn splits_supported(set: &NodeSet<'_>) -> bool {
    !set.is_absent()
}

fn extract_splits(set: &NodeSet<'_>, _ctx: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
    Ok(Fields {
        value_time_splits: Some(set.to_vec().into_iter().filter_map(time_split).collect()),
        ..Fields::default()
    })
}

fn time_split(node: &FeedNode) -> Option<ValueTimeSplit> {
    let start_time = extract_optional_float_attribute(node, "startTime")?;
    let duration = extract_optional_float_attribute(node, "duration")?;
    let mut remote_percentage = extract_optional_float_attribute(node, "remotePercentage");

    let target = match first_if_array(node.lookup(REMOTE_ITEM_TAG))
        .single()
        .and_then(remote_item)
    {
        Some(remote_item) => {
            remote_percentage.get_or_insert(DEFAULT_REMOTE_PERCENTAGE);
            SplitTarget::RemoteItem { remote_item }
        }
        None => {
            let recipients = extract_recipients(&ensure_array(node.lookup(RECIPIENT_TAG)));
            if recipients.is_empty() {
                return None;
            }
            SplitTarget::Recipients { recipients }
        }
    };

    Some(ValueTimeSplit {
        start_time,
        duration,
        remote_start_time: extract_optional_float_attribute(node, "remoteStartTime"),
        remote_percentage,
        target,
    })
}

fn remote_item(node: &FeedNode) -> Option<RemoteItem> {
    Some(RemoteItem {
        feed_guid: get_attribute(node, "feedGuid")?.to_string(),
        item_guid: get_attribute(node, "itemGuid").map(str::to_string),
        medium: get_attribute(node, "medium").and_then(lookup::<Medium>),
    })
}
