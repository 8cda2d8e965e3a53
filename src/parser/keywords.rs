//! Reserved word table
//!
//! Built once per lexer, before the first token is scanned, and read-only
//! afterwards. Any letter run that is not an exact (case-sensitive) match is an
//! identifier.

use super::token::TokenKind;
use rustc_hash::FxHashMap;

const RESERVED_WORDS: [(&str, TokenKind); 6] = [
    ("else", TokenKind::Else),
    ("if", TokenKind::If),
    ("int", TokenKind::Int),
    ("return", TokenKind::Return),
    ("void", TokenKind::Void),
    ("while", TokenKind::While),
];

/// Lookup from keyword spelling to keyword token kind
#[derive(Debug, Clone)]
pub struct ReservedWords {
    table: FxHashMap<&'static str, TokenKind>,
}

impl ReservedWords {
    pub fn new() -> Self {
        let mut table = FxHashMap::default();
        table.reserve(RESERVED_WORDS.len());
        for (word, kind) in RESERVED_WORDS {
            table.insert(word, kind);
        }
        Self { table }
    }

    /// Keyword kind for `text`, or [`TokenKind::Ident`]
    pub fn lookup(&self, text: &str) -> TokenKind {
        self.table.get(text).copied().unwrap_or(TokenKind::Ident)
    }

    pub fn is_reserved(&self, text: &str) -> bool {
        self.table.contains_key(text)
    }
}

impl Default for ReservedWords {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_maps_to_its_kind() {
        let words = ReservedWords::new();
        for (word, kind) in RESERVED_WORDS {
            assert_eq!(words.lookup(word), kind);
            assert!(words.is_reserved(word));
        }
    }

    #[test]
    fn test_other_spellings_are_identifiers() {
        let words = ReservedWords::new();
        for text in ["x", "main", "If", "WHILE", "integer", "in", "returns", "voidx", "el"] {
            assert_eq!(words.lookup(text), TokenKind::Ident, "{text}");
        }
    }
}
