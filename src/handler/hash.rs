//! Location fragment codec (`#slide-{index}`, 0-based)

use crate::error::{DeckviewError, Result};

/// Prefix of every slide fragment
pub const FRAGMENT_PREFIX: &str = "#slide-";

/// Encode a slide index as a location fragment
pub fn encode_fragment(index: usize) -> String {
    format!("{}{}", FRAGMENT_PREFIX, index)
}

/// Parse a fragment, validating it against the deck size.
///
/// The leading `#` is optional and surrounding whitespace is ignored.
pub fn parse_fragment(raw: &str, total: usize) -> Result<usize> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let digits = body
        .strip_prefix(&FRAGMENT_PREFIX[1..])
        .ok_or_else(|| DeckviewError::malformed_hash(raw))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DeckviewError::malformed_hash(raw));
    }
    let index: usize = digits
        .parse()
        .map_err(|_| DeckviewError::malformed_hash(raw))?;

    if index >= total {
        return Err(DeckviewError::OutOfBoundsNavigation {
            target: index,
            total,
        });
    }
    Ok(index)
}

/// Parse a fragment, falling back to the first slide on any error
pub fn resolve_fragment(raw: &str, total: usize) -> usize {
    match parse_fragment(raw, total) {
        Ok(index) => index,
        Err(e) => {
            tracing::debug!("{}; using first slide", e);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode() {
        assert_eq!(encode_fragment(0), "#slide-0");
        assert_eq!(encode_fragment(11), "#slide-11");
    }

    #[test]
    fn round_trip_every_index() {
        for i in 0..12 {
            assert_eq!(parse_fragment(&encode_fragment(i), 12).unwrap(), i);
        }
    }

    #[test]
    fn hash_is_optional_and_whitespace_trimmed() {
        assert_eq!(parse_fragment("slide-3", 5).unwrap(), 3);
        assert_eq!(parse_fragment("  #slide-4\n", 5).unwrap(), 4);
    }

    #[test]
    fn malformed_fragments() {
        for raw in ["", "#", "#slide-", "#slide-x", "#slide--1", "#slide-+2", "#page-2", "#slide-2a"] {
            assert!(
                matches!(parse_fragment(raw, 12), Err(DeckviewError::MalformedHash(_))),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn out_of_range_fragment() {
        assert!(matches!(
            parse_fragment("#slide-12", 12),
            Err(DeckviewError::OutOfBoundsNavigation { target: 12, total: 12 })
        ));
    }

    #[test]
    fn huge_number_does_not_panic() {
        assert_eq!(resolve_fragment("#slide-99999999999999999999999", 12), 0);
    }

    #[test]
    fn resolve_falls_back_to_first() {
        assert_eq!(resolve_fragment("#slide-2", 12), 2);
        assert_eq!(resolve_fragment("#slide--3", 12), 0);
        assert_eq!(resolve_fragment("#slide-abc", 12), 0);
        assert_eq!(resolve_fragment("#slide-40", 12), 0);
    }
}
