use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// A tag parser's support check and its extractor disagree.
///
/// The support check accepted a node, but the extractor could not produce the
/// value it promised. This is a bug in a descriptor, never a property of the
/// input feed, so it is propagated to the caller instead of being turned into
/// an omitted field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// An attribute the support check required is missing.
    #[error("attribute `{attribute}` missing on <{tag}> although the support check passed")]
    MissingAttribute { tag: String, attribute: String },

    /// A text value is not a member of the closed vocabulary it was checked against.
    #[error("`{value}` is not a known {vocabulary} although the support check passed")]
    UnknownVocabulary {
        vocabulary: &'static str,
        value: String,
    },

    /// The node transform produced a shape the extractor does not accept.
    #[error("<{tag}> was handed an unexpected node shape")]
    UnexpectedShape { tag: &'static str },
}

/// Errors that can occur while turning a document into podcast records.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML tokenizing or unescaping failed.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// SEC-003: Element nesting depth exceeds the safety limit.
    #[error("XML nesting depth exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),

    /// The document contains no root element.
    #[error("Document has no root element")]
    EmptyDocument,

    /// Neither the root nor `rss > channel` is a `<channel>` element.
    #[error("Document has no <channel> element")]
    MissingChannel,

    /// A descriptor bug surfaced during extraction.
    #[error(transparent)]
    Contract(#[from] ContractViolation),
}

impl From<quick_xml::Error> for ParseError {
    fn from(err: quick_xml::Error) -> Self {
        ParseError::Xml(err.to_string())
    }
}
