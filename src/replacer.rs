//! Rule installation and the scan loop that drives both pattern sets over an
//! input.

use std::{error::Error, fmt};

use crate::casing::{self, CaseStyle};
use crate::pattern::{PatternSet, SearchContext};
use crate::sink::Sink;
use crate::trie::{AsciiFoldEq, ExactEq, UnitEq};
use crate::unit::CodeUnit;

/// How the text to find relates to the casing of its occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseMode {
    /// The text to find names words, in any of the nine renderings. Every
    /// occurrence is rewritten into the rendering it was found in.
    Preserve,
    /// The text to find matches under ASCII case folding and is replaced by
    /// the replacement text as written.
    Ignore,
    /// The text to find matches exactly and is replaced by the replacement
    /// text as written.
    Match,
}

impl CaseMode {
    /// Parses the user-facing mode names used by the CLI and rule files.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "preserve" => Some(CaseMode::Preserve),
            "ignore" => Some(CaseMode::Ignore),
            "match" => Some(CaseMode::Match),
            _ => None,
        }
    }
}

/// Installing a rule can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// The text to find is empty.
    EmptyPattern,
    /// Under [`CaseMode::Preserve`] the text to find contained only
    /// delimiters and produced no words.
    PatternWithoutWords,
    /// The text to find is already installed in the target pattern set. For
    /// the case insensitive set this includes spellings differing only in
    /// ASCII case.
    DuplicatePattern,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::EmptyPattern => write!(f, "the text to find is empty"),
            RuleError::PatternWithoutWords => {
                write!(f, "the text to find does not contain any words")
            }
            RuleError::DuplicatePattern => write!(f, "the pattern has already been added"),
        }
    }
}

impl Error for RuleError {}

/// Replaces installed patterns in text, preserving casing style on request.
///
/// Rules are installed up front with [`add_replacement`][Self::add_replacement];
/// scanning borrows the replacer immutably, so any number of scans may share
/// one replacer.
///
/// ```
/// use caseshift::{CaseMode, Replacer};
///
/// let mut replacer: Replacer<u8> = Replacer::new();
/// replacer
///     .add_replacement(b"old name", b"new name", CaseMode::Preserve, false)
///     .unwrap();
///
/// assert_eq!(
///     replacer.find_and_replace_to_vec(b"call oldName, then OLD_NAME"),
///     b"call newName, then NEW_NAME".to_vec(),
/// );
/// ```
pub struct Replacer<C> {
    exact: PatternSet<C, ExactEq>,
    folded: PatternSet<C, AsciiFoldEq>,
}

impl<C: CodeUnit> Replacer<C> {
    pub fn new() -> Self {
        Self {
            exact: PatternSet::new(),
            folded: PatternSet::new(),
        }
    }

    /// Installs one rule.
    ///
    /// Under [`CaseMode::Preserve`] the find and replacement texts are split
    /// into words and every casing rendering of the pair is installed in the
    /// case sensitive set; renderings that collapse into an already installed
    /// key (an all-lowercase single word collapses four of them) are skipped.
    /// The other two modes install the texts as written and report a
    /// duplicate as an error.
    ///
    /// On error the replacer is left exactly as it was before the call.
    pub fn add_replacement(
        &mut self,
        find: &[C],
        replace: &[C],
        mode: CaseMode,
        whole_word: bool,
    ) -> Result<(), RuleError> {
        if find.is_empty() {
            return Err(RuleError::EmptyPattern);
        }

        match mode {
            CaseMode::Preserve => {
                let find_words = casing::split_words(find);
                if find_words.is_empty() {
                    return Err(RuleError::PatternWithoutWords);
                }
                let replace_words = casing::split_words(replace);

                for style in CaseStyle::ALL {
                    let key = casing::render(&find_words, style);
                    let replacement = casing::render(&replace_words, style);
                    if !self.exact.add(&key, replacement, whole_word) {
                        log::debug!("{style:?} rendering collapsed into an installed key");
                    }
                }
                Ok(())
            }
            CaseMode::Ignore => {
                if self.folded.add(find, replace.to_vec(), whole_word) {
                    Ok(())
                } else {
                    Err(RuleError::DuplicatePattern)
                }
            }
            CaseMode::Match => {
                if self.exact.add(find, replace.to_vec(), whole_word) {
                    Ok(())
                } else {
                    Err(RuleError::DuplicatePattern)
                }
            }
        }
    }

    /// Scans `text` once, streaming literal spans and replacements to `sink`.
    ///
    /// Both pattern sets run side by side; the left-most candidate wins each
    /// round, equal start positions go to the case sensitive set, and losing
    /// candidates overlapping the winner are re-searched past it. Output is
    /// emitted strictly left to right and no input position is replaced
    /// twice. Empty input returns without touching the sink.
    pub fn find_and_replace<S: Sink<C>>(&self, text: &[C], sink: &mut S) {
        if text.is_empty() {
            return;
        }

        let mut exact = SearchContext::new(text);
        let mut folded = SearchContext::new(text);
        self.exact.find(&mut exact);
        self.folded.find(&mut folded);

        loop {
            match (exact.hit, folded.hit) {
                (None, None) => break,
                (Some(_), None) => {
                    emit_hit(&self.exact, &mut exact, sink);
                    self.exact.find(&mut exact);
                }
                (None, Some(_)) => {
                    emit_hit(&self.folded, &mut folded, sink);
                    self.folded.find(&mut folded);
                }
                (Some(e), Some(f)) => {
                    let overlapping = exact.overlaps(&folded);
                    if e.begin <= f.begin {
                        emit_hit(&self.exact, &mut exact, sink);
                        self.exact.find(&mut exact);
                        folded.advance_cursor_to(exact.cursor);
                        if overlapping {
                            self.folded.find(&mut folded);
                        }
                    } else {
                        emit_hit(&self.folded, &mut folded, sink);
                        self.folded.find(&mut folded);
                        exact.advance_cursor_to(folded.cursor);
                        if overlapping {
                            self.exact.find(&mut exact);
                        }
                    }
                }
            }
        }

        let tail = exact.cursor.max(folded.cursor);
        if tail < text.len() {
            sink.write(&text[tail..]);
        }
    }

    /// Convenience form collecting the output into a fresh buffer.
    #[must_use]
    pub fn find_and_replace_to_vec(&self, text: &[C]) -> Vec<C> {
        let mut output = Vec::with_capacity(text.len());
        self.find_and_replace(text, &mut output);
        output
    }
}

impl Replacer<char> {
    /// Convenience form for char scans over string slices.
    #[must_use]
    pub fn find_and_replace_str(&self, text: &str) -> String {
        let units: Vec<char> = text.chars().collect();
        let mut output = String::with_capacity(text.len());
        self.find_and_replace(&units, &mut output);
        output
    }
}

impl<C: CodeUnit> Default for Replacer<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes the pending literal span and the hit's replacement, then moves the
/// cursor past the hit.
fn emit_hit<C, M, S>(set: &PatternSet<C, M>, ctx: &mut SearchContext<'_, C>, sink: &mut S)
where
    C: CodeUnit,
    M: UnitEq<C>,
    S: Sink<C>,
{
    let hit = ctx.hit.take().expect("emit called without a hit");
    sink.write(&ctx.text[ctx.cursor..hit.begin]);
    sink.write(&set.rule(hit.token).replacement);
    ctx.cursor = hit.end;
}
