use std::str::FromStr;

use crate::error::EngineError;

/// Normalizes a keyword or banned word into its lookup key: trimmed,
/// case-folded, internal whitespace collapsed to underscores. Applied
/// identically at write and read time so matching stays deterministic.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// What a filter replies with when its keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Text,
    Sticker,
    Photo,
}

impl ReplyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyKind::Text => "text",
            ReplyKind::Sticker => "sticker",
            ReplyKind::Photo => "photo",
        }
    }
}

impl FromStr for ReplyKind {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ReplyKind::Text),
            "sticker" => Ok(ReplyKind::Sticker),
            "photo" => Ok(ReplyKind::Photo),
            other => Err(EngineError::Validation(format!(
                "unsupported filter type '{other}'"
            ))),
        }
    }
}

/// Picks the keyword that fires for a message. Matching is case-folded
/// substring containment, deliberately not whole-word: a short keyword can
/// match inside an unrelated word. When several keywords match, candidates
/// are ordered lexicographically so the winner is always the same one.
pub fn first_match<'a, I>(keys: I, message_text: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let folded = message_text.to_lowercase();
    let mut candidates: Vec<&str> = keys.into_iter().collect();
    candidates.sort_unstable();
    candidates
        .into_iter()
        .find(|k| !k.is_empty() && folded.contains(*k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_trimmed_folded_and_underscored() {
        assert_eq!(normalize_key("  Hello  World "), "hello_world");
        assert_eq!(normalize_key("SPAM"), "spam");
        assert_eq!(normalize_key("one"), "one");
    }

    #[test]
    fn substring_containment_matches_inside_words() {
        let keys = ["hello"];
        assert_eq!(first_match(keys, "well hello there"), Some("hello"));
        assert_eq!(first_match(keys, "Say HELLOROBOT"), Some("hello"));
        assert_eq!(first_match(keys, "goodbye"), None);
    }

    #[test]
    fn multi_match_winner_is_lexicographically_first() {
        // Same result regardless of retrieval order.
        assert_eq!(first_match(["zebra", "apple"], "apple zebra"), Some("apple"));
        assert_eq!(first_match(["apple", "zebra"], "apple zebra"), Some("apple"));
    }

    #[test]
    fn empty_keys_never_match() {
        assert_eq!(first_match([""], "anything"), None);
    }

    #[test]
    fn reply_kind_round_trips_known_names_only() {
        assert_eq!("sticker".parse::<ReplyKind>().unwrap(), ReplyKind::Sticker);
        assert!("voice".parse::<ReplyKind>().is_err());
    }
}
