use super::{FeedNode, NodeSet};
use crate::error::ContractViolation;

/// Returns an attribute value, treating an empty value as absent.
pub fn get_attribute<'a>(node: &'a FeedNode, name: &str) -> Option<&'a str> {
    node.attr(name).filter(|v| !v.is_empty())
}

/// Returns an attribute a support check has already proven present.
///
/// # Errors
///
/// Returns [`ContractViolation::MissingAttribute`] if the attribute is absent,
/// which means the caller's support check and extractor have drifted apart.
pub fn get_known_attribute<'a>(
    node: &'a FeedNode,
    name: &str,
) -> Result<&'a str, ContractViolation> {
    get_attribute(node, name).ok_or_else(|| ContractViolation::MissingAttribute {
        tag: node.name().to_string(),
        attribute: name.to_string(),
    })
}

/// Text content with insignificant surrounding whitespace removed.
pub fn get_text(node: &FeedNode) -> &str {
    node.raw_text().trim()
}

/// Normalizes any shape to a sequence: one node becomes a one-element vector,
/// absence becomes an empty one.
pub fn ensure_array(set: NodeSet<'_>) -> Vec<&FeedNode> {
    match set {
        NodeSet::Absent => Vec::new(),
        NodeSet::One(node) => vec![node],
        NodeSet::Many(nodes) => nodes,
    }
}

/// Narrows a structurally repeated but semantically singular tag to its first
/// element.
pub fn first_if_array(set: NodeSet<'_>) -> NodeSet<'_> {
    set.first().into()
}

/// The default node transform.
pub fn identity(set: NodeSet<'_>) -> NodeSet<'_> {
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_attribute_is_absent() {
        let node = FeedNode::new("x").with_attr("href", "");
        assert_eq!(get_attribute(&node, "href"), None);
    }

    #[test]
    fn test_known_attribute_missing_is_contract_violation() {
        let node = FeedNode::new("podcast:value");
        let err = get_known_attribute(&node, "method").unwrap_err();
        assert_eq!(
            err,
            ContractViolation::MissingAttribute {
                tag: "podcast:value".to_string(),
                attribute: "method".to_string(),
            }
        );
    }

    #[test]
    fn test_get_text_trims() {
        let node = FeedNode::new("title").with_text("\n   Hello  \t");
        assert_eq!(get_text(&node), "Hello");
    }

    #[test]
    fn test_ensure_array_shapes() {
        let a = FeedNode::new("a");
        let b = FeedNode::new("b");
        assert!(ensure_array(NodeSet::Absent).is_empty());
        assert_eq!(ensure_array(NodeSet::One(&a)), vec![&a]);
        assert_eq!(ensure_array(NodeSet::Many(vec![&a, &b])), vec![&a, &b]);
    }

    #[test]
    fn test_first_if_array_picks_first() {
        let a = FeedNode::new("a");
        let b = FeedNode::new("b");
        assert_eq!(first_if_array(NodeSet::Many(vec![&a, &b])), NodeSet::One(&a));
        assert_eq!(first_if_array(NodeSet::One(&b)), NodeSet::One(&b));
        assert_eq!(first_if_array(NodeSet::Absent), NodeSet::Absent);
    }
}
