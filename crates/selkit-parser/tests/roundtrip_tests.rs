//! Round-trip tests: parsing then serializing reproduces the input.
//!
//! Fixed cases cover the tricky spellings; quickcheck properties cover
//! generated selector lists and arbitrary text.

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};
use quickcheck_macros::quickcheck;
use selkit_parser::{Options, process};

/// Lossless parse and serialize.
fn roundtrip(input: &str) -> String {
    let result = process(input, Options::default());
    assert!(result.is_ok(), "failed to parse {input:?}: {:?}", result.error());
    result.result().to_owned()
}

fn lossy(input: &str) -> String {
    process(input, Options::lossy()).result().to_owned()
}

#[test]
fn test_fixed_roundtrips() {
    let cases = [
        "",
        "   ",
        "a",
        "a, b , c",
        "  a  >  b  ",
        "a>b+c~d",
        "a   b\n\tc",
        "div#main.btn.primary",
        "*|*",
        "ns|a |b *|c",
        ".a\\:b",
        "#\\31 23",
        ".\\61 b",
        "[href]",
        "[ data-x ~= \"y\"  i ]",
        "[a='b'I]",
        "[ns|a^=b]",
        "[/* c */a=b]",
        ":not(.a > .b)",
        ":is( h1 , h2 )",
        ":nth-child(2n + 1)",
        "a::before:hover",
        ":foo()",
        "a /* note */ b",
        "& > .child",
        "a(b c)",
        "(x)",
        "\"quoted\"",
        "a,",
        ",",
        ":is(a,)",
        ":not (a)",
        ".café",
    ];
    for input in cases {
        assert_eq!(roundtrip(input), input);
    }
}

/// A syntactically valid selector list built from known-good pieces.
#[derive(Debug, Clone)]
struct SelectorText(String);

const TYPES: &[&str] = &["a", "div", "svg|rect", "*", "*|*", "|p", "h1"];
const SUFFIXES: &[&str] = &[
    ".btn",
    ".x-1",
    ".a\\:b",
    "#main",
    "#\\31 23",
    "[href]",
    "[data-x~=\"y\" i]",
    "[ lang |= en ]",
    "[ns|a^='b']",
    "[a=b I]",
    ":hover",
    "::before",
    ":not(.a)",
    ":nth-child(2n + 1)",
    ":is(a, b)",
];
const COMBINATORS: &[&str] = &[" ", "  ", " > ", ">", "+", " ~ ", "\n"];
const SEPARATORS: &[&str] = &[",", ", ", " ,", " , "];

fn pick(g: &mut Gen, choices: &[&'static str]) -> &'static str {
    g.choose(choices).copied().unwrap_or_default()
}

/// A number in `1..=max`.
fn count(g: &mut Gen, max: usize) -> usize {
    usize::arbitrary(g) % max + 1
}

fn compound(g: &mut Gen) -> String {
    let mut text = String::new();
    if bool::arbitrary(g) {
        text.push_str(pick(g, TYPES));
    }
    let suffixes = if text.is_empty() { count(g, 3) } else { count(g, 3) - 1 };
    for _ in 0..suffixes {
        text.push_str(pick(g, SUFFIXES));
    }
    text
}

impl Arbitrary for SelectorText {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut text = String::new();
        for s in 0..count(g, 3) {
            if s > 0 {
                text.push_str(pick(g, SEPARATORS));
            }
            for c in 0..count(g, 3) {
                if c > 0 {
                    text.push_str(pick(g, COMBINATORS));
                }
                text.push_str(&compound(g));
            }
        }
        Self(text)
    }
}

#[quickcheck]
fn prop_generated_selectors_roundtrip(selector: SelectorText) -> bool {
    let result = process(&selector.0, Options::default());
    result.is_ok() && result.result() == selector.0
}

#[quickcheck]
fn prop_lossy_output_is_stable(selector: SelectorText) -> bool {
    let once = lossy(&selector.0);
    lossy(&once) == once
}

#[quickcheck]
fn prop_lossy_output_has_no_padding(selector: SelectorText) -> bool {
    let once = lossy(&selector.0);
    !once.contains("  ") && !once.starts_with(' ') && !once.ends_with(' ')
}

#[test]
fn test_arbitrary_text_never_panics() {
    fn property(input: String) -> TestResult {
        let result = process(&input, Options::default());
        if result.is_ok() {
            TestResult::from_bool(result.result() == input)
        } else {
            TestResult::discard()
        }
    }

    QuickCheck::new()
        .tests(500)
        .max_tests(5000)
        .quickcheck(property as fn(String) -> TestResult);
}
