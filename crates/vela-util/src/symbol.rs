//! String interning.
//!
//! The teacher's interner is a global, thread-safe `DashMap` keyed by hash,
//! built for a concurrent compiler pipeline. Vela's pipeline is single
//! threaded end to end (see the evaluator's concurrency model), so the
//! interner here is a plain session-owned table: one `Interner` is created
//! by the driver and threaded through the lexer, parser, and evaluator by
//! shared reference. No locking, no leaked `'static` strings.

use rustc_hash::FxHashMap;

/// An interned string. Cheap to copy and compare; the backing bytes live
/// in whichever `Interner` produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(&self) -> u32 {
        self.0
    }
}

/// Owns the backing storage for every [`Symbol`] produced from it.
///
/// Strings are deduplicated via a hash map from owned `Box<str>` to index;
/// the canonical copy lives in `strings` and is what `resolve` hands back.
#[derive(Default)]
pub struct Interner {
    strings: Vec<Box<str>>,
    lookup: FxHashMap<Box<str>, u32>,
}

impl Interner {
    pub fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    /// Intern `text`, returning an existing `Symbol` if already seen.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(&index) = self.lookup.get(text) {
            return Symbol::new(index);
        }
        let index = self.strings.len() as u32;
        let boxed: Box<str> = text.into();
        self.strings.push(boxed.clone());
        self.lookup.insert(boxed, index);
        Symbol::new(index)
    }

    /// Resolve a `Symbol` back to its string contents.
    ///
    /// Panics if `symbol` was not produced by this `Interner` — symbols
    /// are never valid across interner instances.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.index() as usize]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_text_returns_the_same_symbol() {
        let mut interner = Interner::new();
        let a = interner.intern("console");
        let b = interner.intern("console");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_gets_distinct_symbols() {
        let mut interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips() {
        let mut interner = Interner::new();
        let sym = interner.intern("hello world");
        assert_eq!(interner.resolve(sym), "hello world");
    }

    #[quickcheck_macros::quickcheck]
    fn resolve_after_intern_always_matches(text: String) -> bool {
        let mut interner = Interner::new();
        let sym = interner.intern(&text);
        interner.resolve(sym) == text
    }
}
