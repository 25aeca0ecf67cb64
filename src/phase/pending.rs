//! Pending podcast namespace tags whose definition may still change.

use super::{Fields, ParseContext, Phase, TagParser};
use crate::error::ContractViolation;
use crate::node::{first_if_array, get_attribute, get_known_attribute, NodeSet};
use crate::types::Chat;

/// `<podcast:chat server="..." protocol="...">`.
pub const CHAT: TagParser = TagParser {
    tag: "podcast:chat",
    name: "chat",
    phase: Phase::Pending,
    node_transform: first_if_array,
    support_check: chat_supported,
    extract: extract_chat,
};

fn chat_supported(set: &NodeSet<'_>) -> bool {
    set.single().is_some_and(|n| {
        get_attribute(n, "server").is_some() && get_attribute(n, "protocol").is_some()
    })
}

fn extract_chat(set: &NodeSet<'_>, _ctx: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
    let node = set
        .single()
        .ok_or(ContractViolation::UnexpectedShape { tag: CHAT.tag })?;

    Ok(Fields {
        chat: Some(Chat::Pending {
            server: get_known_attribute(node, "server")?.to_string(),
            protocol: get_known_attribute(node, "protocol")?.to_string(),
            account_id: get_attribute(node, "accountId").map(str::to_string),
            space: get_attribute(node, "space").map(str::to_string),
        }),
        ..Fields::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FeedNode;
    use crate::phase::use_parser;

    #[test]
    fn test_chat_tag() {
        let item = FeedNode::new("item").with_child(
            FeedNode::new("podcast:chat")
                .with_attr("server", "irc.zeronode.net")
                .with_attr("protocol", "irc")
                .with_attr("accountId", "@jsmith")
                .with_attr("space", "#podcastindex"),
        );
        let mut fields = Fields::default();
        use_parser(&CHAT, &item, &ParseContext::default(), &mut fields).unwrap();
        assert_eq!(
            fields.chat,
            Some(Chat::Pending {
                server: "irc.zeronode.net".to_string(),
                protocol: "irc".to_string(),
                account_id: Some("@jsmith".to_string()),
                space: Some("#podcastindex".to_string()),
            })
        );
    }

    #[test]
    fn test_chat_requires_protocol() {
        let item = FeedNode::new("item")
            .with_child(FeedNode::new("podcast:chat").with_attr("server", "irc.zeronode.net"));
        let mut fields = Fields::default();
        use_parser(&CHAT, &item, &ParseContext::default(), &mut fields).unwrap();
        assert!(fields.chat.is_none());
    }
}
