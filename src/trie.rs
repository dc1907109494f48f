//! Prefix tree used to find many fixed tokens in one pass over a text.
//!
//! Tokens `auto`, `do`, `double` and `dolphin` build the tree
//!
//! ```text
//! a -> u -> t -> [o]
//! d -> [o] -> u -> b -> l -> [e]
//!          -> l -> p -> h -> i -> [n]
//! ```
//!
//! where brackets mark nodes carrying a token id. A descent keeps going past
//! every marked node it crosses so the longest token wins, e.g. `double`
//! beats `do` in "double garage".
//!
//! Nodes live in a flat arena and refer to their children by index. Child
//! lists keep insertion order and are scanned linearly; fan-out is small in
//! practice.

use std::marker::PhantomData;

use crate::unit::CodeUnit;

/// Index into the rule records of the owning pattern set.
pub(crate) type TokenId = usize;

/// Decides whether a stored pattern unit matches a unit of the searched text.
pub(crate) trait UnitEq<C> {
    fn matches(pattern: C, text: C) -> bool;
}

/// Unit-for-unit equality.
pub(crate) struct ExactEq;

impl<C: CodeUnit> UnitEq<C> for ExactEq {
    #[inline]
    fn matches(pattern: C, text: C) -> bool {
        pattern == text
    }
}

/// ASCII case folding: `A-Z` compare equal to `a-z`, everything else matches
/// only itself.
pub(crate) struct AsciiFoldEq;

impl<C: CodeUnit> UnitEq<C> for AsciiFoldEq {
    #[inline]
    fn matches(pattern: C, text: C) -> bool {
        pattern.to_ascii_lower() == text.to_ascii_lower()
    }
}

struct Node<C> {
    unit: C,
    token: Option<TokenId>,
    children: Vec<usize>,
}

/// Arena-backed token trie parameterized by the search-time equality `M`.
///
/// Insertion always compares units exactly, so the stored keys are the
/// caller's literal spellings; a folding `M` collapses equivalent spellings
/// at search time only. Tokens are never removed.
pub(crate) struct TokenTrie<C, M> {
    nodes: Vec<Node<C>>,
    roots: Vec<usize>,
    matcher: PhantomData<M>,
}

impl<C: CodeUnit, M: UnitEq<C>> TokenTrie<C, M> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            matcher: PhantomData,
        }
    }

    /// Adds `key` spelling for `token`. The caller must have checked for
    /// duplicates with [`lookup`][Self::lookup] first; marking an already
    /// marked node is a bug in the caller.
    pub(crate) fn insert(&mut self, key: &[C], token: TokenId) {
        debug_assert!(!key.is_empty(), "empty keys never match anything");

        // None means the root level.
        let mut parent: Option<usize> = None;
        for (offset, &unit) in key.iter().enumerate() {
            let last = offset + 1 == key.len();

            // Insertion walks by exact equality regardless of `M`.
            let level = match parent {
                Some(id) => &self.nodes[id].children,
                None => &self.roots,
            };
            let existing = level
                .iter()
                .copied()
                .find(|&id| self.nodes[id].unit == unit);

            let id = match existing {
                Some(id) => {
                    if last {
                        let node = &mut self.nodes[id];
                        debug_assert!(node.token.is_none(), "token key inserted twice");
                        node.token = Some(token);
                    }
                    id
                }
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node {
                        unit,
                        token: if last { Some(token) } else { None },
                        children: Vec::new(),
                    });
                    match parent {
                        Some(up) => self.nodes[up].children.push(id),
                        None => self.roots.push(id),
                    }
                    id
                }
            };

            parent = Some(id);
        }
    }

    /// Walks the whole of `key` with the search-time equality and returns the
    /// token marked at exactly its end, if any. This is the duplicate check:
    /// under a folding `M` it reports keys that differ only in case.
    pub(crate) fn lookup(&self, key: &[C]) -> Option<TokenId> {
        let mut level = &self.roots;
        let mut token = None;

        for (offset, &unit) in key.iter().enumerate() {
            let id = level
                .iter()
                .copied()
                .find(|&id| M::matches(self.nodes[id].unit, unit))?;

            if offset + 1 == key.len() {
                token = self.nodes[id].token;
            }
            level = &self.nodes[id].children;
        }

        token
    }

    /// Descends from `text[at..]` and returns the end offset and token id of
    /// the longest token starting there. The descent follows the first child
    /// matching under `M` at each level and keeps updating the best hit past
    /// every marked node it crosses.
    pub(crate) fn longest_match(&self, text: &[C], at: usize) -> Option<(usize, TokenId)> {
        let mut level = &self.roots;
        let mut best = None;

        for (offset, &unit) in text[at..].iter().enumerate() {
            let Some(id) = level
                .iter()
                .copied()
                .find(|&id| M::matches(self.nodes[id].unit, unit))
            else {
                break;
            };

            if let Some(token) = self.nodes[id].token {
                best = Some((at + offset + 1, token));
            }
            level = &self.nodes[id].children;
        }

        best
    }
}
