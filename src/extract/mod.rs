//! Attribute- and value-level extraction primitives shared by the tag parsers.
//!
//! Every function here is pure apart from `tracing` diagnostics. Missing or
//! malformed data is reported as absence (`None`, an empty list, an
//! [`Invalid`](crate::types::Timestamp::Invalid) timestamp); only the
//! `known_*` variants return a [`ContractViolation`](crate::error::ContractViolation).

mod date;
mod float;
mod images;
mod lookup;
mod recipients;

pub use date::pub_date_to_date;
pub use float::{extract_optional_float_attribute, parse_number};
pub use images::{parse_image_descriptor, parse_srcset};
pub use lookup::{known_lookup, lookup, Vocabulary};
pub use recipients::{extract_recipients, recipient_from_node, valid_recipient};
