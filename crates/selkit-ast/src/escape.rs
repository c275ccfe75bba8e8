//! [§ 4.3.7 Consume an escaped code point](https://www.w3.org/TR/css-syntax-3/#consume-escaped-code-point)
//!
//! Decoding of backslash escapes, and the identifier check the serializer
//! uses to decide whether a raw spelling must be kept.

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';
const MAXIMUM_ALLOWED_CODE_POINT: u32 = 0x0010_FFFF;

/// Decode every backslash escape in `raw`.
///
/// One to six hex digits (plus one optional whitespace character) name a code
/// point; zero, surrogates, and values above U+10FFFF become U+FFFD, as does a
/// backslash at the end of input. Any other escaped character stands for itself.
#[must_use]
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            None => out.push(REPLACEMENT_CHARACTER),
            Some(h) if h.is_ascii_hexdigit() => {
                let mut value: u32 = 0;
                let mut digits = 0;
                while digits < 6 {
                    match chars.peek().and_then(|d| d.to_digit(16)) {
                        Some(d) => {
                            value = value * 16 + d;
                            digits += 1;
                            let _ = chars.next();
                        }
                        None => break,
                    }
                }
                if chars.peek().copied().is_some_and(is_whitespace) {
                    let _ = chars.next();
                }
                out.push(code_point(value));
            }
            Some(other) => {
                out.push(other);
                let _ = chars.next();
            }
        }
    }
    out
}

fn code_point(value: u32) -> char {
    if value == 0 || value > MAXIMUM_ALLOWED_CODE_POINT {
        return REPLACEMENT_CHARACTER;
    }
    char::from_u32(value).unwrap_or(REPLACEMENT_CHARACTER)
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#whitespace)
#[must_use]
pub const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
#[must_use]
pub const fn is_ident_start_code_point(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c >= '\u{80}'
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
#[must_use]
pub const fn is_ident_code_point(c: char) -> bool {
    is_ident_start_code_point(c) || c.is_ascii_digit() || c == '-'
}

/// [§ 4.3.9 Check if three code points would start an ident sequence](https://www.w3.org/TR/css-syntax-3/#would-start-an-identifier)
///
/// Applied to already decoded text: a value is safe to print bare when it is a
/// valid identifier. Anything else (a leading digit, a lone `-`, punctuation)
/// needs its escaped spelling kept.
#[must_use]
pub fn needs_escape(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return true;
    };
    let start_ok = match first {
        '-' => match chars.clone().next() {
            Some('-') => true,
            Some(second) => is_ident_start_code_point(second),
            None => false,
        },
        c => is_ident_start_code_point(c),
    };
    !start_ok || !value.chars().all(is_ident_code_point)
}
