//! Read-only element tree consumed by the tag parsers.
//!
//! - [`FeedNode`] - one element: qualified name, attributes, text, children
//! - [`NodeSet`] - the shape of a child lookup (absent, one, many)
//! - [`accessors`] - attribute/text reads and shape normalization
//! - [`xml`] - builds a [`FeedNode`] tree from an XML document

pub mod accessors;
pub mod xml;

pub use accessors::{
    ensure_array, first_if_array, get_attribute, get_known_attribute, get_text, identity,
};
pub use xml::parse_document;

/// A single element of a parsed feed document.
///
/// Names are kept qualified exactly as written (`podcast:value`), so tag
/// parsers match on the conventional prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<FeedNode>,
}

impl FeedNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter. A repeated name replaces the earlier value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: FeedNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_child(&mut self, child: FeedNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw attribute value, untouched.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Raw text content, untrimmed. Use [`get_text`] for the trimmed form.
    pub fn raw_text(&self) -> &str {
        &self.text
    }

    /// Looks up the children named `tag`.
    ///
    /// A single matching element comes back as [`NodeSet::One`], repeated
    /// elements as [`NodeSet::Many`] in document order.
    pub fn lookup(&self, tag: &str) -> NodeSet<'_> {
        let mut matches: Vec<&FeedNode> = self.children.iter().filter(|c| c.name == tag).collect();
        match matches.len() {
            0 => NodeSet::Absent,
            1 => NodeSet::One(matches.remove(0)),
            _ => NodeSet::Many(matches),
        }
    }
}

/// The shape a child lookup resolves to.
///
/// The same type doubles as the canonical shape a node transform hands to a
/// support check and extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeSet<'a> {
    #[default]
    Absent,
    One(&'a FeedNode),
    Many(Vec<&'a FeedNode>),
}

impl<'a> NodeSet<'a> {
    pub fn is_absent(&self) -> bool {
        match self {
            NodeSet::Absent => true,
            NodeSet::One(_) => false,
            NodeSet::Many(nodes) => nodes.is_empty(),
        }
    }

    /// First node of the set, if any.
    pub fn first(&self) -> Option<&'a FeedNode> {
        match self {
            NodeSet::Absent => None,
            NodeSet::One(node) => Some(*node),
            NodeSet::Many(nodes) => nodes.first().copied(),
        }
    }

    /// The node of a set that a transform has already narrowed to one element.
    pub fn single(&self) -> Option<&'a FeedNode> {
        match self {
            NodeSet::One(node) => Some(*node),
            _ => None,
        }
    }

    pub fn to_vec(&self) -> Vec<&'a FeedNode> {
        match self {
            NodeSet::Absent => Vec::new(),
            NodeSet::One(node) => vec![*node],
            NodeSet::Many(nodes) => nodes.clone(),
        }
    }
}

impl<'a> From<Option<&'a FeedNode>> for NodeSet<'a> {
    fn from(node: Option<&'a FeedNode>) -> Self {
        node.map_or(NodeSet::Absent, NodeSet::One)
    }
}
