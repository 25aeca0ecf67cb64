//! Phase 2 of the podcast namespace: person.

use super::{Fields, ParseContext, Phase, TagParser};
use crate::error::ContractViolation;
use crate::node::{get_attribute, get_text, identity, FeedNode, NodeSet};
use crate::types::Person;

const DEFAULT_ROLE: &str = "host";
const DEFAULT_GROUP: &str = "cast";

/// `<podcast:person>`: every element with a non-empty name.
pub const PERSON: TagParser = TagParser {
    tag: "podcast:person",
    name: "person",
    phase: Phase::Released(2),
    node_transform: identity,
    support_check: people_supported,
    extract: extract_people,
};

fn people_supported(set: &NodeSet<'_>) -> bool {
    set.to_vec().into_iter().any(|n| !get_text(n).is_empty())
}

fn extract_people(set: &NodeSet<'_>, _ctx: &ParseContext<'_>) -> Result<Fields, ContractViolation> {
    Ok(Fields {
        podcast_people: Some(set.to_vec().into_iter().filter_map(person).collect()),
        ..Fields::default()
    })
}

fn person(node: &FeedNode) -> Option<Person> {
    let name = get_text(node);
    if name.is_empty() {
        return None;
    }

    Some(Person {
        name: name.to_string(),
        role: get_attribute(node, "role")
            .map_or_else(|| DEFAULT_ROLE.to_string(), str::to_lowercase),
        group: get_attribute(node, "group")
            .map_or_else(|| DEFAULT_GROUP.to_string(), str::to_lowercase),
        img: get_attribute(node, "img").map(str::to_string),
        href: get_attribute(node, "href").map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::use_parser;

    #[test]
    fn test_people_defaults_and_order() {
        let item = FeedNode::new("item")
            .with_child(
                FeedNode::new("podcast:person")
                    .with_attr("role", "Guest")
                    .with_attr("href", "https://example.com/alice")
                    .with_text("Alice"),
            )
            .with_child(FeedNode::new("podcast:person").with_text("   "))
            .with_child(
                FeedNode::new("podcast:person")
                    .with_attr("group", "Writing")
                    .with_attr("img", "https://example.com/bob.jpg")
                    .with_text("Bob"),
            );

        let mut fields = Fields::default();
        use_parser(&PERSON, &item, &ParseContext::default(), &mut fields).unwrap();
        let people = fields.podcast_people.unwrap();

        assert_eq!(
            people,
            vec![
                Person {
                    name: "Alice".to_string(),
                    role: "guest".to_string(),
                    group: "cast".to_string(),
                    img: None,
                    href: Some("https://example.com/alice".to_string()),
                },
                Person {
                    name: "Bob".to_string(),
                    role: "host".to_string(),
                    group: "writing".to_string(),
                    img: Some("https://example.com/bob.jpg".to_string()),
                    href: None,
                },
            ]
        );
    }

    #[test]
    fn test_nameless_people_unsupported() {
        let item = FeedNode::new("item").with_child(FeedNode::new("podcast:person"));
        let mut fields = Fields::default();
        use_parser(&PERSON, &item, &ParseContext::default(), &mut fields).unwrap();
        assert!(fields.podcast_people.is_none());
    }
}
