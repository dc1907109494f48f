//! Splits patterns into words and projects word lists onto the nine casing
//! renderings the replacer understands.
//!
//! | Example        | Rendering        |
//! |----------------|------------------|
//! | one two three  | normal text      |
//! | oneTwoThree    | camel case       |
//! | OneTwoThree    | pascal case      |
//! | onetwothree    | all lowercase    |
//! | ONETWOTHREE    | all uppercase    |
//! | one_two_three  | lower snake case |
//! | ONE_TWO_THREE  | upper snake case |
//! | one-two-three  | lower kebab case |
//! | ONE-TWO-THREE  | upper kebab case |

use crate::unit::CodeUnit;

/// One of the nine casing projections of a word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStyle {
    /// Words joined by single spaces, each word kept as written.
    Normal,
    /// `oneTwoThree`
    Camel,
    /// `OneTwoThree`
    Pascal,
    /// `onetwothree`
    Lowercase,
    /// `ONETWOTHREE`
    Uppercase,
    /// `one_two_three`
    LowerSnake,
    /// `ONE_TWO_THREE`
    UpperSnake,
    /// `one-two-three`
    LowerKebab,
    /// `ONE-TWO-THREE`
    UpperKebab,
}

impl CaseStyle {
    /// Every rendering, in the order they are installed for a preserve-case
    /// rule.
    pub const ALL: [CaseStyle; 9] = [
        CaseStyle::Normal,
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Lowercase,
        CaseStyle::Uppercase,
        CaseStyle::LowerSnake,
        CaseStyle::UpperSnake,
        CaseStyle::LowerKebab,
        CaseStyle::UpperKebab,
    ];
}

/// Splits `text` into words at spaces, hyphens and underscores (delimiters
/// are dropped) and at every lowercase-to-uppercase transition.
///
/// Digits stay inside whatever word they appear in and never introduce a
/// boundary, so `oneTwo3Four` splits as `[one, Two3, Four]`. Consecutive
/// delimiters produce no empty words.
pub fn split_words<C: CodeUnit>(text: &[C]) -> Vec<Vec<C>> {
    let mut words = Vec::new();
    let mut current: Vec<C> = Vec::new();

    for &unit in text {
        if unit == C::from_ascii(b' ') || unit == C::from_ascii(b'-') || unit == C::from_ascii(b'_')
        {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            // camelCase boundary: previous unit lowercase, this one uppercase
            if let Some(&previous) = current.last() {
                if previous.is_ascii_lowercase() && unit.is_ascii_uppercase() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(unit);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// Renders `words` in `style`. An empty word list renders to the empty
/// string in every style.
pub fn render<C: CodeUnit>(words: &[Vec<C>], style: CaseStyle) -> Vec<C> {
    match style {
        CaseStyle::Normal => joined(words, Some(b' '), Transform::Keep),
        CaseStyle::Camel => capitalized(words, true),
        CaseStyle::Pascal => capitalized(words, false),
        CaseStyle::Lowercase => joined(words, None, Transform::Lower),
        CaseStyle::Uppercase => joined(words, None, Transform::Upper),
        CaseStyle::LowerSnake => joined(words, Some(b'_'), Transform::Lower),
        CaseStyle::UpperSnake => joined(words, Some(b'_'), Transform::Upper),
        CaseStyle::LowerKebab => joined(words, Some(b'-'), Transform::Lower),
        CaseStyle::UpperKebab => joined(words, Some(b'-'), Transform::Upper),
    }
}

enum Transform {
    Keep,
    Lower,
    Upper,
}

fn joined<C: CodeUnit>(words: &[Vec<C>], separator: Option<u8>, transform: Transform) -> Vec<C> {
    let mut result = Vec::new();

    for word in words {
        if let Some(separator) = separator {
            if !result.is_empty() {
                result.push(C::from_ascii(separator));
            }
        }
        for &unit in word {
            result.push(match transform {
                Transform::Keep => unit,
                Transform::Lower => unit.to_ascii_lower(),
                Transform::Upper => unit.to_ascii_upper(),
            });
        }
    }

    result
}

// first unit of each word uppercased, rest lowercased; camel keeps the very
// first word fully lowercase
fn capitalized<C: CodeUnit>(words: &[Vec<C>], first_word_lower: bool) -> Vec<C> {
    let mut result = Vec::new();

    for (index, word) in words.iter().enumerate() {
        for (offset, &unit) in word.iter().enumerate() {
            let upper = offset == 0 && !(first_word_lower && index == 0);
            result.push(if upper {
                unit.to_ascii_upper()
            } else {
                unit.to_ascii_lower()
            });
        }
    }

    result
}
