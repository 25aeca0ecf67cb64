use crate::error::ContractViolation;

/// A closed set of terms a tag's text or attribute must belong to.
pub trait Vocabulary: Sized + Copy + 'static {
    /// Human-readable name used in contract violation messages.
    const NAME: &'static str;
    /// Every accepted spelling, lowercase, paired with its value.
    const TERMS: &'static [(&'static str, Self)];
}

/// Case-insensitive lookup. The input is not trimmed.
pub fn lookup<V: Vocabulary>(text: &str) -> Option<V> {
    V::TERMS
        .iter()
        .find(|(term, _)| term.eq_ignore_ascii_case(text))
        .map(|(_, value)| *value)
}

/// Lookup for text a support check has already proven to be a member.
///
/// # Errors
///
/// Returns [`ContractViolation::UnknownVocabulary`] for non-members.
pub fn known_lookup<V: Vocabulary>(text: &str) -> Result<V, ContractViolation> {
    lookup(text).ok_or_else(|| ContractViolation::UnknownVocabulary {
        vocabulary: V::NAME,
        value: text.to_string(),
    })
}
