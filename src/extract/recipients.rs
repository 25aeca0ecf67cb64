use super::float::parse_number;
use crate::node::{get_attribute, FeedNode};
use crate::types::ValueRecipient;

/// Builds a recipient from a `<podcast:valueRecipient>` node.
///
/// Returns `None` when `type`, `address` or `split` is missing, or when
/// `split` is not a finite, non-negative number.
pub fn recipient_from_node(node: &FeedNode) -> Option<ValueRecipient> {
    let recipient_type = get_attribute(node, "type")?;
    let address = get_attribute(node, "address")?;
    let split = get_attribute(node, "split")
        .and_then(parse_number)
        .filter(|s| *s >= 0.0)?;

    Some(ValueRecipient {
        name: get_attribute(node, "name").map(str::to_string),
        custom_key: get_attribute(node, "customKey").map(str::to_string),
        custom_value: get_attribute(node, "customValue").map(str::to_string),
        recipient_type: recipient_type.to_string(),
        address: address.to_string(),
        split,
        fee: get_attribute(node, "fee").is_some_and(|f| f.eq_ignore_ascii_case("true")),
    })
}

pub fn valid_recipient(node: &FeedNode) -> bool {
    recipient_from_node(node).is_some()
}

/// Maps recipient nodes to records, dropping invalid ones.
///
/// Input order is kept and duplicates are not merged.
pub fn extract_recipients(nodes: &[&FeedNode]) -> Vec<ValueRecipient> {
    nodes.iter().filter_map(|n| recipient_from_node(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(name: &str, split: &str) -> FeedNode {
        FeedNode::new("podcast:valueRecipient")
            .with_attr("name", name)
            .with_attr("type", "node")
            .with_attr("address", format!("addr-{name}"))
            .with_attr("split", split)
    }

    #[test]
    fn test_full_recipient() {
        let node = recipient("host", "90")
            .with_attr("customKey", "696969")
            .with_attr("customValue", "abc")
            .with_attr("fee", "TRUE");
        let r = recipient_from_node(&node).unwrap();
        assert_eq!(r.name.as_deref(), Some("host"));
        assert_eq!(r.custom_key.as_deref(), Some("696969"));
        assert_eq!(r.custom_value.as_deref(), Some("abc"));
        assert_eq!(r.recipient_type, "node");
        assert_eq!(r.address, "addr-host");
        assert_eq!(r.split, 90.0);
        assert!(r.fee);
    }

    #[test]
    fn test_fee_defaults_false() {
        let r = recipient_from_node(&recipient("a", "1")).unwrap();
        assert!(!r.fee);
        let r = recipient_from_node(&recipient("a", "1").with_attr("fee", "yes")).unwrap();
        assert!(!r.fee);
    }

    #[test]
    fn test_invalid_recipients_filtered_in_order() {
        let a = recipient("a", "50");
        let negative = recipient("neg", "-1");
        let no_address = FeedNode::new("podcast:valueRecipient")
            .with_attr("type", "node")
            .with_attr("split", "10");
        let not_a_number = recipient("nan", "half");
        let b = recipient("b", "50");
        let a_again = recipient("a", "50");

        let out = extract_recipients(&[&a, &negative, &no_address, &not_a_number, &b, &a_again]);
        let names: Vec<_> = out.iter().map(|r| r.name.as_deref().unwrap()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_zero_split_is_valid() {
        assert!(valid_recipient(&recipient("zero", "0")));
    }
}
