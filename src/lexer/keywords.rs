use lazy_static::lazy_static;
use std::collections::HashMap;

use tracing::debug;

use crate::MK_TOKEN;

use super::tokens::{Tag, Token, TokenValue};

lazy_static! {
    /// Aliases accepted for reserved words, keyed by the alternate spelling.
    static ref ALIASES: HashMap<&'static str, Tag> = {
        let mut map = HashMap::new();
        map.insert("FD", Tag::Forward);
        map.insert("BK", Tag::Backward);
        map.insert("RT", Tag::Right);
        map.insert("LT", Tag::Left);
        map.insert("CLS", Tag::Clear);
        map.insert("PU", Tag::PenUp);
        map.insert("PD", Tag::PenDown);
        map
    };

    /// Read-only seed every `KeywordTable` starts from.
    static ref RESERVED_TEMPLATE: HashMap<String, Token> = {
        let mut map = HashMap::new();

        for tag in Tag::RESERVED {
            if let Some(spelling) = tag.spelling() {
                map.insert(String::from(spelling), reserved_token(tag));
            }
        }

        for (alias, tag) in ALIASES.iter() {
            map.insert(String::from(*alias), reserved_token(*tag));
        }

        map
    };
}

fn reserved_token(tag: Tag) -> Token {
    MK_TOKEN!(
        tag,
        TokenValue::Text(String::from(tag.spelling().unwrap_or_default()))
    )
}

/// Maps uppercase spellings to tokens.
///
/// Seeded with every reserved word and alias, then grown by interning each
/// new identifier. A table belongs to exactly one scanner, so identifiers
/// seen in one source never appear in another.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    words: HashMap<String, Token>,
}

impl KeywordTable {
    pub fn new() -> Self {
        KeywordTable {
            words: RESERVED_TEMPLATE.clone(),
        }
    }

    pub fn lookup_or_intern(&mut self, spelling: String) -> Token {
        if let Some(token) = self.words.get(&spelling) {
            return token.clone();
        }

        debug!(spelling = %spelling, "interning identifier");

        let token = MK_TOKEN!(Tag::Id, TokenValue::Text(spelling.clone()));
        self.words.insert(spelling, token.clone());
        token
    }

    pub fn contains(&self, spelling: &str) -> bool {
        self.words.contains_key(spelling)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::KeywordTable;
    use crate::lexer::tokens::{Tag, TokenValue};

    #[test]
    fn test_seeded_with_reserved_words_and_aliases() {
        let table = KeywordTable::new();

        assert_eq!(table.len(), 30);
        assert!(table.contains("FORWARD"));
        assert!(table.contains("FD"));
        assert!(table.contains("MOD"));
        assert!(!table.contains("forward"));
    }

    #[test]
    fn test_alias_shares_canonical_token() {
        let mut table = KeywordTable::new();

        for (alias, canonical) in [
            ("FD", "FORWARD"),
            ("BK", "BACKWARD"),
            ("RT", "RIGHT"),
            ("LT", "LEFT"),
            ("CLS", "CLEAR"),
            ("PU", "PENUP"),
            ("PD", "PENDOWN"),
        ] {
            let alias_token = table.lookup_or_intern(String::from(alias));
            let canonical_token = table.lookup_or_intern(String::from(canonical));

            assert_eq!(alias_token, canonical_token);
            assert_eq!(alias_token.text(), Some(canonical));
            assert!(alias_token.tag.is_reserved_word());
        }
    }

    #[test]
    fn test_interning_grows_table_once() {
        let mut table = KeywordTable::new();
        let before = table.len();

        let first = table.lookup_or_intern(String::from("SIDE"));
        let second = table.lookup_or_intern(String::from("SIDE"));

        assert_eq!(first.tag, Tag::Id);
        assert_eq!(first.value, Some(TokenValue::Text(String::from("SIDE"))));
        assert_eq!(first, second);
        assert_eq!(table.len(), before + 1);
    }

    #[test]
    fn test_tables_do_not_share_identifiers() {
        let mut first = KeywordTable::new();
        first.lookup_or_intern(String::from("SIDE"));

        let second = KeywordTable::new();
        assert!(first.contains("SIDE"));
        assert!(!second.contains("SIDE"));
    }
}
