use crate::node::{get_attribute, FeedNode};

/// Parses a numeric attribute value. Non-finite results count as non-numeric.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Reads an optional numeric attribute.
///
/// Absent and non-numeric values both yield `None`; a malformed number is
/// never an error.
pub fn extract_optional_float_attribute(node: &FeedNode, name: &str) -> Option<f64> {
    get_attribute(node, name).and_then(parse_number)
}
