use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::FeedNode;
use crate::error::ParseError;

/// SEC-003: Maximum allowed element nesting depth.
/// Prevents unbounded stack growth from maliciously nested documents.
const MAX_DEPTH: usize = 64;

/// Builds a [`FeedNode`] tree from an XML document.
///
/// Element and attribute names keep their namespace prefix as written.
/// Text and CDATA directly inside an element are concatenated in document
/// order; whitespace is preserved here and trimmed later by
/// [`get_text`](super::get_text).
///
/// # Errors
///
/// - [`ParseError::Xml`] for tokenizing failures
/// - [`ParseError::MaxDepthExceeded`] when nesting exceeds 64 levels
/// - [`ParseError::EmptyDocument`] when no root element exists
///
/// # Security
///
/// SEC-002: `quick-xml` (0.37) never expands `<!ENTITY>` declarations. Text or
/// attribute values referencing an unknown entity (`&nbsp;`, `&xxe;`) are
/// kept verbatim with a warning, so one sloppy element never rejects the
/// whole document.
pub fn parse_document(content: &str) -> Result<FeedNode, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<FeedNode> = Vec::new();
    let mut root: Option<FeedNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(ParseError::MaxDepthExceeded(MAX_DEPTH));
                }
                stack.push(element(&e, &reader));
            }
            Ok(Event::Empty(e)) => {
                let node = element(&e, &reader);
                attach(&mut stack, &mut root, node);
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node);
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(top) = stack.last_mut() {
                    match t.unescape() {
                        Ok(text) => top.push_text(&text),
                        Err(e) => {
                            tracing::warn!(
                                element = %top.name(),
                                error = %e,
                                "Keeping text with unresolved entity verbatim"
                            );
                            top.push_text(&String::from_utf8_lossy(&t));
                        }
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(top) = stack.last_mut() {
                    top.push_text(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    // Unclosed elements at EOF: fold them upward so the caller still gets a tree.
    while let Some(node) = stack.pop() {
        attach(&mut stack, &mut root, node);
    }

    root.ok_or(ParseError::EmptyDocument)
}

fn element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> FeedNode {
    let mut node = FeedNode::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr_result in e.attributes() {
        let attr = match attr_result {
            Ok(attr) => attr,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed attribute");
                continue;
            }
        };
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.decode_and_unescape_value(reader.decoder()) {
            Ok(value) => value.into_owned(),
            Err(e) => {
                tracing::warn!(
                    attribute = %key,
                    error = %e,
                    "Keeping attribute with unresolved entity verbatim"
                );
                String::from_utf8_lossy(&attr.value).into_owned()
            }
        };
        node.set_attr(key, value);
    }
    node
}

fn attach(stack: &mut [FeedNode], root: &mut Option<FeedNode>, node: FeedNode) {
    match stack.last_mut() {
        Some(parent) => parent.push_child(node),
        None => {
            if root.is_none() {
                *root = Some(node);
            }
        }
    }
}
