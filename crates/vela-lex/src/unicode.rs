//! Identifier-class helpers beyond plain ASCII.
//!
//! The language's identifier grammar is deliberately ASCII-only
//! (`[A-Za-z_$][A-Za-z0-9_$]*`) — no Unicode identifier support is a
//! named non-goal. This module exists so that decision lives in one
//! place and is easy to find, rather than being implicit in
//! `lexer::identifier`'s character classes.

/// Whether `c` may start an identifier. Always false for non-ASCII input.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// Whether `c` may continue an identifier after its first character.
#[inline]
pub fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unicode_identifier_starts() {
        assert!(!is_identifier_start('é'));
        assert!(!is_identifier_start('变'));
    }

    #[test]
    fn accepts_ascii_and_dollar_underscore() {
        assert!(is_identifier_start('a'));
        assert!(is_identifier_start('_'));
        assert!(is_identifier_start('$'));
        assert!(is_identifier_continue('9'));
    }
}
