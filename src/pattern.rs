//! A token trie paired with the replacement records its tokens index into,
//! plus the per-scan cursor state that walks a text through it.

use crate::trie::{TokenId, TokenTrie, UnitEq};
use crate::unit::CodeUnit;

/// What to emit for a matched token and how to gate it.
pub(crate) struct Rule<C> {
    pub(crate) replacement: Vec<C>,
    pub(crate) whole_word: bool,
}

/// All patterns sharing one equality predicate, searchable in a single pass.
///
/// The replacer owns two of these: one comparing units exactly and one
/// folding ASCII case.
pub(crate) struct PatternSet<C, M> {
    trie: TokenTrie<C, M>,
    rules: Vec<Rule<C>>,
}

impl<C: CodeUnit, M: UnitEq<C>> PatternSet<C, M> {
    pub(crate) fn new() -> Self {
        Self {
            trie: TokenTrie::new(),
            rules: Vec::new(),
        }
    }

    /// Installs `key`, returning `false` when it already resolves to an
    /// installed pattern under this set's equality. The caller decides
    /// whether that is an error (direct rules) or expected (collapsed
    /// preserve-case renderings).
    pub(crate) fn add(&mut self, key: &[C], replacement: Vec<C>, whole_word: bool) -> bool {
        debug_assert!(!key.is_empty(), "callers reject empty patterns");

        if self.trie.lookup(key).is_some() {
            return false;
        }

        self.trie.insert(key, self.rules.len());
        self.rules.push(Rule {
            replacement,
            whole_word,
        });
        true
    }

    pub(crate) fn rule(&self, id: TokenId) -> &Rule<C> {
        &self.rules[id]
    }

    /// Finds the next acceptable match at or after `ctx`'s cursor and caches
    /// it in `ctx`; clears the cached hit when the rest of the text has none.
    ///
    /// At each position the longest token wins. A whole-word rule whose hit
    /// fails the boundary gate is discarded and the search resumes at the
    /// next position, not past the failed hit.
    pub(crate) fn find(&self, ctx: &mut SearchContext<'_, C>) {
        ctx.hit = None;

        for position in ctx.cursor..ctx.text.len() {
            let Some((end, token)) = self.trie.longest_match(ctx.text, position) else {
                continue;
            };

            if self.rules[token].whole_word && !is_whole_word(ctx.text, position, end) {
                continue;
            }

            ctx.hit = Some(Hit {
                begin: position,
                end,
                token,
            });
            return;
        }
    }
}

/// Both neighbours of `[begin, end)` are text edges or non-alphanumeric.
fn is_whole_word<C: CodeUnit>(text: &[C], begin: usize, end: usize) -> bool {
    let left_ok = begin == 0 || !text[begin - 1].is_ascii_alphanumeric();
    let right_ok = end == text.len() || !text[end].is_ascii_alphanumeric();

    left_ok && right_ok
}

/// A candidate match cached between scan steps.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hit {
    pub(crate) begin: usize,
    pub(crate) end: usize,
    pub(crate) token: TokenId,
}

/// Per-scan state of one pattern set: where the next search starts and the
/// candidate it last produced. Two of these run side by side during a scan.
pub(crate) struct SearchContext<'text, C> {
    pub(crate) text: &'text [C],
    pub(crate) cursor: usize,
    pub(crate) hit: Option<Hit>,
}

impl<'text, C: CodeUnit> SearchContext<'text, C> {
    pub(crate) fn new(text: &'text [C]) -> Self {
        Self {
            text,
            cursor: 0,
            hit: None,
        }
    }

    /// Moves the cursor to `position`, dropping the cached hit if that hit
    /// started before the new cursor and so can no longer be emitted.
    pub(crate) fn advance_cursor_to(&mut self, position: usize) {
        self.cursor = position;
        if let Some(hit) = self.hit {
            if hit.begin < position {
                self.hit = None;
            }
        }
    }

    /// Positional overlap with the other context's hit, treating equal start
    /// positions as overlapping. Both hits must be present.
    pub(crate) fn overlaps(&self, other: &Self) -> bool {
        let a = self.hit.expect("overlap queried without a hit");
        let b = other.hit.expect("overlap queried without a hit");

        (a.begin < b.end && b.begin < a.end) || a.begin == b.begin
    }
}
