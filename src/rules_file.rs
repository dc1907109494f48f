//! Parser for replacement rule files.
//!
//! The format is line based:
//!
//! ```text
//! # comments and blank lines are ignored
//! case-mode=preserve
//! match-whole-word=true
//! text-to-find=one two three
//! replacement-text=four five six
//!
//! # shorthand forms emit a rule in one line
//! pair=old_name-->new_name
//! another old-->another new
//! ```
//!
//! `case-mode` and `match-whole-word` are sticky until reassigned. A rule is
//! emitted whenever both `text-to-find` and `replacement-text` have been
//! supplied, by whichever syntax. Unknown keys and malformed lines are
//! errors. Find and replacement values undergo C-style escape decoding.

use std::{error::Error, fmt};

use crate::replacer::CaseMode;

const PAIR_ARROW: &str = "-->";

/// One parsed rule, ready to install into a replacer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec {
    pub find: String,
    pub replace: String,
    pub mode: CaseMode,
    pub whole_word: bool,
}

/// Parse failure with the 1-based line it happened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnknownKey(String),
    /// Neither a `key=value` line nor a bare `A-->B` pair.
    MalformedLine,
    InvalidCaseMode(String),
    InvalidBool(String),
    BadEscape(EscapeError),
    /// `text-to-find` never got its `replacement-text`, or the other way
    /// around, before the file ended.
    UnpairedText(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line)?;
        match &self.kind {
            ParseErrorKind::UnknownKey(key) => write!(f, "unknown key `{key}`"),
            ParseErrorKind::MalformedLine => write!(f, "expected `key=value` or `A-->B`"),
            ParseErrorKind::InvalidCaseMode(value) => {
                write!(f, "invalid case mode `{value}`, expected preserve, ignore or match")
            }
            ParseErrorKind::InvalidBool(value) => {
                write!(f, "invalid value `{value}`, expected true or false")
            }
            ParseErrorKind::BadEscape(error) => write!(f, "{error}"),
            ParseErrorKind::UnpairedText(key) => {
                write!(f, "`{key}` has no matching partner before end of file")
            }
        }
    }
}

impl Error for ParseError {}

/// C-style escape decoding can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EscapeError {
    Unknown(char),
    /// The text ends in a lone backslash.
    Trailing,
}

impl fmt::Display for EscapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EscapeError::Unknown(escape) => write!(f, "unknown escape `\\{escape}`"),
            EscapeError::Trailing => write!(f, "trailing backslash"),
        }
    }
}

impl Error for EscapeError {}

/// Decodes the C-style escapes `\n`, `\r`, `\t`, `\\`, `\"` and `\'`.
pub fn decode_escapes(text: &str) -> Result<String, EscapeError> {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some(other) => return Err(EscapeError::Unknown(other)),
            None => return Err(EscapeError::Trailing),
        }
    }

    Ok(result)
}

/// Parses a whole rule file.
pub fn parse(text: &str) -> Result<Vec<RuleSpec>, ParseError> {
    let mut parser = Parser::default();

    for (index, line) in text.lines().enumerate() {
        parser.line(index + 1, line)?;
    }
    parser.finish()
}

// Sticky state plus the halves of the rule under construction. The halves
// remember their line for the unpaired-at-eof report.
#[derive(Default)]
struct Parser {
    rules: Vec<RuleSpec>,
    mode: Option<CaseMode>,
    whole_word: bool,
    find: Option<(String, usize)>,
    replace: Option<(String, usize)>,
}

impl Parser {
    fn line(&mut self, number: usize, line: &str) -> Result<(), ParseError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }

        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "text-to-find" => {
                    let find = decode(value, number)?;
                    self.find = Some((find, number));
                    self.emit();
                    return Ok(());
                }
                "replacement-text" => {
                    let replace = decode(value, number)?;
                    self.replace = Some((replace, number));
                    self.emit();
                    return Ok(());
                }
                "case-mode" => {
                    let value = value.trim();
                    self.mode = Some(CaseMode::from_name(value).ok_or(ParseError {
                        line: number,
                        kind: ParseErrorKind::InvalidCaseMode(value.to_owned()),
                    })?);
                    return Ok(());
                }
                "match-whole-word" => {
                    self.whole_word = match value.trim() {
                        "true" => true,
                        "false" => false,
                        other => {
                            return Err(ParseError {
                                line: number,
                                kind: ParseErrorKind::InvalidBool(other.to_owned()),
                            })
                        }
                    };
                    return Ok(());
                }
                "pair" => return self.pair(number, value),
                key => {
                    // a find text may itself contain `=`; only lines that do
                    // not read as a pair are unknown-key errors
                    if !line.contains(PAIR_ARROW) {
                        return Err(ParseError {
                            line: number,
                            kind: ParseErrorKind::UnknownKey(key.to_owned()),
                        });
                    }
                }
            }
        }

        if line.contains(PAIR_ARROW) {
            return self.pair(number, trimmed);
        }

        Err(ParseError {
            line: number,
            kind: ParseErrorKind::MalformedLine,
        })
    }

    fn pair(&mut self, number: usize, value: &str) -> Result<(), ParseError> {
        let Some((find, replace)) = value.split_once(PAIR_ARROW) else {
            return Err(ParseError {
                line: number,
                kind: ParseErrorKind::MalformedLine,
            });
        };

        self.find = Some((decode(find, number)?, number));
        self.replace = Some((decode(replace, number)?, number));
        self.emit();
        Ok(())
    }

    fn emit(&mut self) {
        if self.find.is_some() && self.replace.is_some() {
            let (find, _) = self.find.take().expect("checked above");
            let (replace, _) = self.replace.take().expect("checked above");
            self.rules.push(RuleSpec {
                find,
                replace,
                mode: self.mode.unwrap_or(CaseMode::Preserve),
                whole_word: self.whole_word,
            });
        }
    }

    fn finish(self) -> Result<Vec<RuleSpec>, ParseError> {
        if let Some((_, line)) = self.find {
            return Err(ParseError {
                line,
                kind: ParseErrorKind::UnpairedText("text-to-find"),
            });
        }
        if let Some((_, line)) = self.replace {
            return Err(ParseError {
                line,
                kind: ParseErrorKind::UnpairedText("replacement-text"),
            });
        }
        Ok(self.rules)
    }
}

fn decode(value: &str, line: usize) -> Result<String, ParseError> {
    decode_escapes(value).map_err(|error| ParseError {
        line,
        kind: ParseErrorKind::BadEscape(error),
    })
}
