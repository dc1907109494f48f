//! Bulk find and replace that preserves the casing style of every match.
//!
//! # Table of contents
//! * [Description](#description)
//! * [Case modes](#case-modes)
//! * [Sinks](#sinks)
//! * [Rule files](#rule-files)
//! * [CLI tool](#cli-tool)
//! * [Feature flags](#feature-flags)
//!
//! # Description
//!
//! A [`Replacer`] holds a set of replacement rules and applies all of them in
//! a single pass over a text. A preserve-case rule matches every casing style
//! of its pattern and rewrites each occurrence into the matching style of the
//! replacement, which makes one rule enough to rename an identifier across a
//! source tree:
//!
//! | Example        | Casing           |
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
//!
//! ```
//! use caseshift::{CaseMode, Replacer};
//!
//! let mut replacer: Replacer<u8> = Replacer::new();
//! replacer
//!     .add_replacement(b"point count", b"vertex total", CaseMode::Preserve, false)
//!     .unwrap();
//!
//! let output = replacer.find_and_replace_to_vec(
//!     b"pointCount, POINT_COUNT and point-count" as &[u8],
//! );
//! assert_eq!(output, b"vertexTotal, VERTEX_TOTAL and vertex-total");
//! ```
//!
//! The engine is generic over its code unit (see [`CodeUnit`]): `Replacer<u8>`
//! scans raw byte buffers and is 8-bit clean, `Replacer<char>` scans decoded
//! strings. Case detection and folding are ASCII only either way.
//!
//! # Case modes
//!
//! Each rule carries one of three [`CaseMode`]s. `Preserve` expands the rule
//! into up to nine literal casing renderings. `Match` installs the pattern as
//! written, matched exactly. `Ignore` matches under ASCII case folding and
//! always emits the replacement as written. Sensitive and insensitive rules
//! live in separate pattern sets driven side by side during a scan; the
//! left-most match wins, equal positions go to the case sensitive set, and
//! the longest pattern wins within a set. An optional whole-word flag
//! requires non-alphanumeric neighbours (or text edges) on both sides of a
//! match.
//!
//! # Sinks
//!
//! [`find_and_replace`][Replacer::find_and_replace] streams output spans into
//! any [`Sink`]: a `Vec`, a `String` for char scans, an [`IoSink`] wrapping a
//! writer, or a [`CountingSink`] probe.
//!
//! # Rule files
//!
//! The [`rules_file`] module parses the line-based rule file format shared
//! with the CLI (`text-to-find=`/`replacement-text=` keys, sticky
//! `case-mode=` and `match-whole-word=` state, `pair=A-->B` and bare `A-->B`
//! shorthands, `#` comments).
//!
//! # CLI tool
//!
//! The `caseshift` binary applies rules to files and directory trees,
//! rewriting contents and file names. It is built with the `cli` feature:
//! `cargo run --features=cli -- --help`.
//!
//! # Feature flags
//!
//! Name | Description | Default?
//! ---|---|---
//! `cli` | required to build the CLI tool | no

pub mod casing;
pub mod rules_file;

mod pattern;
mod replacer;
mod sink;
mod trie;
mod unit;

pub use replacer::{CaseMode, Replacer, RuleError};
pub use sink::{CountingSink, IoSink, Sink};
pub use unit::CodeUnit;
