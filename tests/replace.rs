use caseshift::{CaseMode, CountingSink, Replacer};

fn single_rule(find: &str, replace: &str, mode: CaseMode, whole_word: bool) -> Replacer<u8> {
    let mut replacer = Replacer::new();
    replacer
        .add_replacement(find.as_bytes(), replace.as_bytes(), mode, whole_word)
        .unwrap();
    replacer
}

fn apply(replacer: &Replacer<u8>, input: &str) -> String {
    String::from_utf8(replacer.find_and_replace_to_vec(input.as_bytes())).unwrap()
}

#[test]
fn basic_replacement() {
    let replacer = single_rule("one two three", "four five six", CaseMode::Preserve, false);

    assert_eq!(
        apply(&replacer, "This is one two three and another one two three."),
        "This is four five six and another four five six."
    );
}

#[test]
fn no_match_leaves_text_alone() {
    let replacer = single_rule("one two three", "four five six", CaseMode::Preserve, false);

    assert_eq!(apply(&replacer, "This has no matches."), "This has no matches.");
    assert_eq!(apply(&replacer, ""), "");
}

#[test]
fn preserve_case_rewrites_every_rendering() {
    let replacer = single_rule("one two three", "four five six", CaseMode::Preserve, false);

    let cases = [
        ("one two three", "four five six"),
        ("This is oneTwoThree.", "This is fourFiveSix."),
        ("This is OneTwoThree.", "This is FourFiveSix."),
        ("This is onetwothree.", "This is fourfivesix."),
        ("This is ONETWOTHREE.", "This is FOURFIVESIX."),
        ("This is one_two_three.", "This is four_five_six."),
        ("This is ONE_TWO_THREE.", "This is FOUR_FIVE_SIX."),
        ("This is one-two-three.", "This is four-five-six."),
        ("This is ONE-TWO-THREE.", "This is FOUR-FIVE-SIX."),
    ];
    for (input, expected) in cases {
        assert_eq!(apply(&replacer, input), expected);
    }
}

#[test]
fn preserve_case_mixes_renderings_in_one_pass() {
    let replacer = single_rule("one two three", "four five six", CaseMode::Preserve, false);

    assert_eq!(
        apply(&replacer, "oneTwoThree and ONE_TWO_THREE"),
        "fourFiveSix and FOUR_FIVE_SIX"
    );
}

#[test]
fn match_case_requires_the_exact_casing() {
    let replacer = single_rule("CamelCase", "snake_case", CaseMode::Match, false);

    assert_eq!(
        apply(&replacer, "CamelCase and camelcase"),
        "snake_case and camelcase"
    );
}

#[test]
fn ignore_case_matches_any_casing_verbatim_replacement() {
    let replacer = single_rule("foo_bar", "baz_qux", CaseMode::Ignore, false);

    assert_eq!(apply(&replacer, "FOO_bar Foo_Bar"), "baz_qux baz_qux");
    assert_eq!(apply(&replacer, "foo_bar"), "baz_qux");
}

#[test]
fn whole_word_rejects_substrings() {
    let replacer = single_rule("one", "four", CaseMode::Preserve, true);

    assert_eq!(apply(&replacer, "This is one word."), "This is four word.");
    assert_eq!(apply(&replacer, "This is oneword."), "This is oneword.");
}

#[test]
fn whole_word_accepts_non_alphanumeric_neighbours() {
    let replacer = single_rule("one", "ENO", CaseMode::Preserve, true);

    // the underscore after the lowercase rendering is not alphanumeric, so
    // the snake neighbour passes the gate
    assert_eq!(apply(&replacer, "one oneword one_two"), "ENO oneword ENO_two");
}

#[test]
fn multiple_rules_with_different_modes() {
    let mut replacer: Replacer<u8> = Replacer::new();
    replacer
        .add_replacement(b"one", b"four", CaseMode::Preserve, false)
        .unwrap();
    replacer
        .add_replacement(b"two", b"five", CaseMode::Match, false)
        .unwrap();
    replacer
        .add_replacement(b"three", b"six", CaseMode::Ignore, false)
        .unwrap();

    assert_eq!(apply(&replacer, "one two THREE"), "four five six");
    // the case sensitive "two" must not match "TWO"
    assert_eq!(apply(&replacer, "one TWO three"), "four TWO six");
}

#[test]
fn overlapping_rules_in_one_set_leftmost_wins() {
    let mut replacer: Replacer<u8> = Replacer::new();
    replacer
        .add_replacement(b"one two", b"four five", CaseMode::Preserve, false)
        .unwrap();
    replacer
        .add_replacement(b"two three", b"five six", CaseMode::Preserve, false)
        .unwrap();

    assert_eq!(apply(&replacer, "one two three"), "four five three");
}

#[test]
fn overlapping_hits_across_both_sets_leftmost_wins() {
    let mut replacer: Replacer<u8> = Replacer::new();
    replacer
        .add_replacement(b"one two", b"four five", CaseMode::Ignore, false)
        .unwrap();
    replacer
        .add_replacement(b"two three", b"five six", CaseMode::Preserve, false)
        .unwrap();

    // the ignore-case hit starts earlier; consuming it pushes the exact
    // finder past the overlap
    assert_eq!(apply(&replacer, "one two three"), "four five three");
}

#[test]
fn equal_start_positions_go_to_the_case_sensitive_set() {
    let mut replacer: Replacer<u8> = Replacer::new();
    replacer
        .add_replacement(b"value", b"exact", CaseMode::Match, false)
        .unwrap();
    replacer
        .add_replacement(b"value_of", b"folded", CaseMode::Ignore, false)
        .unwrap();

    // both sets match at position 0; the exact set wins even though the
    // folded candidate is longer
    assert_eq!(apply(&replacer, "value_of x"), "exact_of x");
    // where the exact set cannot match, the folded rule still applies
    assert_eq!(apply(&replacer, "VALUE_OF x"), "folded x");
}

#[test]
fn longest_pattern_wins_within_a_set() {
    let mut replacer: Replacer<u8> = Replacer::new();
    replacer
        .add_replacement(b"do", b"X", CaseMode::Match, false)
        .unwrap();
    replacer
        .add_replacement(b"double", b"Y", CaseMode::Match, false)
        .unwrap();

    assert_eq!(apply(&replacer, "a double dose"), "a Y Xse");
}

#[test]
fn replacements_are_never_rescanned() {
    let replacer = single_rule("aa", "b", CaseMode::Match, false);

    assert_eq!(apply(&replacer, "aaaa"), "bb");

    // a replacement containing its own pattern is emitted untouched
    let replacer = single_rule("one", "one one", CaseMode::Match, false);
    assert_eq!(apply(&replacer, "one"), "one one");
}

#[test]
fn digit_bearing_words_render_through() {
    let replacer = single_rule("one two 3 four", "five 6 seven", CaseMode::Preserve, false);
    assert_eq!(apply(&replacer, "text one_two_3_four"), "text five_6_seven");

    let replacer = single_rule("oneTwo3Four", "five 6 seven", CaseMode::Preserve, false);
    assert_eq!(apply(&replacer, "text one_two3_four"), "text five_6_seven");
}

#[test]
fn self_replacement_is_an_identity() {
    let replacer = single_rule("one two", "one two", CaseMode::Preserve, false);

    for input in ["oneTwo", "ONE_TWO", "one-two", "OneTwo onetwo", "x oneTwo y"] {
        assert_eq!(apply(&replacer, input), input);
    }
}

#[test]
fn folding_is_ascii_only() {
    let replacer = single_rule("fuß", "ok", CaseMode::Ignore, false);

    // ASCII letters fold, the non-ASCII bytes must match exactly
    assert_eq!(apply(&replacer, "FUß"), "ok");
    assert_eq!(apply(&replacer, "FUSS"), "FUSS");
}

#[test]
fn arbitrary_bytes_scan_cleanly() {
    let replacer = single_rule("a", "b", CaseMode::Match, false);

    let input = [0xFF, b'a', 0xFE, 0x00, b'a'];
    let output = replacer.find_and_replace_to_vec(&input);
    assert_eq!(output, [0xFF, b'b', 0xFE, 0x00, b'b']);
}

#[test]
fn sink_spans_concatenate_to_the_output() {
    let mut replacer: Replacer<u8> = Replacer::new();
    replacer
        .add_replacement(b"one", b"four", CaseMode::Preserve, false)
        .unwrap();
    replacer
        .add_replacement(b"two", b"FIVE", CaseMode::Ignore, false)
        .unwrap();

    let input = b"one and TWO and one";
    let mut counter = CountingSink::new();
    replacer.find_and_replace(input, &mut counter);

    let collected = replacer.find_and_replace_to_vec(input);
    assert_eq!(counter.units, collected.len());
    assert_eq!(collected, b"four and FIVE and four".to_vec());
}

#[test]
fn char_scan_handles_multibyte_text() {
    let mut replacer: Replacer<char> = Replacer::new();
    let find: Vec<char> = "grün blau".chars().collect();
    let replace: Vec<char> = "rot gelb".chars().collect();
    replacer
        .add_replacement(&find, &replace, CaseMode::Preserve, false)
        .unwrap();

    // case folding is ASCII only, so the lower renderings keep the umlaut
    assert_eq!(
        replacer.find_and_replace_str("märchen: grünBlau und grün-blau"),
        "märchen: rotGelb und rot-gelb"
    );
}
