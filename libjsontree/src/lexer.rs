//! Lexical helpers: string literal decoding and bare-token interpretation.
//!
//! There is no separate token stream. The grammar asks these helpers to
//! decode the construct under the cursor and gets back either the decoded
//! payload or the [`ErrorKind`] that stopped it.

use crate::cursor::Cursor;
use crate::error::ErrorKind;

const REPLACEMENT: char = '\u{FFFD}';

/// Classify a byte that does not fit the construct being parsed.
pub(crate) fn unexpected(b: u8) -> ErrorKind {
    if b.is_ascii() {
        ErrorKind::UnexpectedChar(b as char)
    } else {
        ErrorKind::UnexpectedByte(b)
    }
}

/// Decode a double-quoted string literal starting at the cursor.
///
/// Leading whitespace is skipped. On success the closing quote has been
/// consumed.
pub fn read_string(cursor: &mut Cursor<'_>) -> Result<String, ErrorKind> {
    cursor.eat_space();
    match cursor.pop() {
        Some(b'"') => {}
        Some(b) => return Err(unexpected(b)),
        None => return Err(ErrorKind::PrematureEnd),
    }

    let mut buf = Vec::new();
    loop {
        match cursor.pop().ok_or(ErrorKind::PrematureEnd)? {
            b'"' => break,
            b'\\' => read_escape(cursor, &mut buf)?,
            b => buf.push(b),
        }
    }
    String::from_utf8(buf).map_err(|_| ErrorKind::InvalidUtf8)
}

/// Decode the escape following a backslash into `buf`.
fn read_escape(cursor: &mut Cursor<'_>, buf: &mut Vec<u8>) -> Result<(), ErrorKind> {
    let byte = match cursor.pop().ok_or(ErrorKind::PrematureEnd)? {
        b'"' => b'"',
        b'\\' => b'\\',
        b'/' => b'/',
        b'b' => 0x08,
        b'f' => 0x0c,
        b'n' => b'\n',
        b'r' => b'\r',
        b't' => b'\t',
        b'u' => {
            let code = read_hex4(cursor)?;
            return push_code_point(cursor, buf, code);
        }
        _ => return Err(ErrorKind::BadEscape),
    };
    buf.push(byte);
    Ok(())
}

/// Append the char for an escaped code unit, pairing a high surrogate with
/// an immediately following low surrogate escape.
///
/// Lone surrogates become U+FFFD. When a high surrogate is followed by some
/// other escaped code unit, the high half becomes U+FFFD and the follower is
/// decoded on its own.
fn push_code_point(
    cursor: &mut Cursor<'_>,
    buf: &mut Vec<u8>,
    mut code: u32,
) -> Result<(), ErrorKind> {
    loop {
        let ch = match code {
            0xD800..=0xDBFF => match follow_unicode_escape(cursor)? {
                Some(low @ 0xDC00..=0xDFFF) => {
                    let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                    char::from_u32(combined).unwrap_or(REPLACEMENT)
                }
                Some(next) => {
                    push_char(buf, REPLACEMENT);
                    code = next;
                    continue;
                }
                None => REPLACEMENT,
            },
            0xDC00..=0xDFFF => REPLACEMENT,
            _ => char::from_u32(code).unwrap_or(REPLACEMENT),
        };
        push_char(buf, ch);
        return Ok(());
    }
}

/// If the cursor sits on `\u`, consume it with its four hex digits.
fn follow_unicode_escape(cursor: &mut Cursor<'_>) -> Result<Option<u32>, ErrorKind> {
    if cursor.peek() != Some(b'\\') {
        return Ok(None);
    }
    cursor.pop();
    if cursor.peek() != Some(b'u') {
        cursor.putback();
        return Ok(None);
    }
    cursor.pop();
    read_hex4(cursor).map(Some)
}

fn read_hex4(cursor: &mut Cursor<'_>) -> Result<u32, ErrorKind> {
    let mut code = 0;
    for _ in 0..4 {
        let b = cursor.pop().ok_or(ErrorKind::PrematureEnd)?;
        let digit = (b as char).to_digit(16).ok_or(ErrorKind::BadUnicodeEscape)?;
        code = code * 16 + digit;
    }
    Ok(code)
}

fn push_char(buf: &mut Vec<u8>, ch: char) {
    let mut utf8 = [0u8; 4];
    buf.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
}

/// Check a bare token against the JSON number grammar.
fn is_json_number(token: &[u8]) -> bool {
    let mut i = 0;
    let at = |i: usize| token.get(i).copied();

    if at(i) == Some(b'-') {
        i += 1;
    }

    // Integer part
    match at(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(at(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return false,
    }

    // Fractional part
    if at(i) == Some(b'.') {
        i += 1;
        if !matches!(at(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(at(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }

    // Exponent
    if matches!(at(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(at(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(at(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(at(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }

    i == token.len()
}

/// Interpret a bare token as a number.
pub fn parse_number(token: &[u8]) -> Result<f64, ErrorKind> {
    if !is_json_number(token) {
        return Err(ErrorKind::InvalidNumber);
    }
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(ErrorKind::InvalidNumber)
}

/// Interpret a bare token as `true` or `false`.
pub fn parse_boolean(token: &[u8]) -> Result<bool, ErrorKind> {
    match token {
        b"true" => Ok(true),
        b"false" => Ok(false),
        _ => Err(ErrorKind::InvalidLiteral),
    }
}

/// Check that a bare token spells `null`.
pub fn parse_null(token: &[u8]) -> Result<(), ErrorKind> {
    if token == b"null" {
        Ok(())
    } else {
        Err(ErrorKind::InvalidLiteral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(input: &str) -> Result<String, ErrorKind> {
        read_string(&mut Cursor::new(input.as_bytes()))
    }

    /// Builds a backslash-u escape for `hex`.
    fn u(hex: &str) -> String {
        ["\\", "u", hex].concat()
    }

    fn quoted(body: &str) -> String {
        format!("\"{}\"", body)
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(string(r#"  "hello" rest"#).unwrap(), "hello");
        assert_eq!(string(r#""""#).unwrap(), "");
        assert_eq!(string("\"h\u{e9}llo\"").unwrap(), "h\u{e9}llo");
    }

    #[test]
    fn test_simple_escapes() {
        assert_eq!(
            string(r#""\t\r\n\b\f\"\\\/""#).unwrap(),
            "\t\r\n\u{8}\u{c}\"\\/"
        );
    }

    #[test]
    fn test_unicode_escape_bytes() {
        let s = string(&quoted(&format!(r"\t\n{}", u("2665")))).unwrap();
        assert_eq!(s.as_bytes(), &[b'\t', b'\n', 0xE2, 0x99, 0xA5]);
        assert_eq!(string(&quoted(&u("0041"))).unwrap(), "A");
        assert_eq!(string(&quoted(&u("00e9"))).unwrap().as_bytes(), &[0xC3, 0xA9]);
        assert_eq!(string(&quoted(&u("0000"))).unwrap().as_bytes(), &[0x00]);
    }

    #[test]
    fn test_surrogate_pair_combines() {
        let pair = [u("d83d"), u("de00")].concat();
        assert_eq!(string(&quoted(&pair)).unwrap(), "\u{1F600}");
        let clef = [u("D834"), u("DD1E")].concat();
        assert_eq!(string(&quoted(&clef)).unwrap().len(), 4);
    }

    #[test]
    fn test_lone_surrogates_become_replacement() {
        assert_eq!(string(&quoted(&u("d83d"))).unwrap(), "\u{FFFD}");
        assert_eq!(string(&quoted(&format!("{}x", u("de00")))).unwrap(), "\u{FFFD}x");
        assert_eq!(string(&quoted(&format!(r"{}\n", u("d83d")))).unwrap(), "\u{FFFD}\n");
        let high_then_plain = [u("d83d"), u("0041")].concat();
        assert_eq!(string(&quoted(&high_then_plain)).unwrap(), "\u{FFFD}A");
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(string(r#""abc"#), Err(ErrorKind::PrematureEnd));
        assert_eq!(string("\"abc\\"), Err(ErrorKind::PrematureEnd));
        assert_eq!(string(&format!("\"{}", u("12"))), Err(ErrorKind::PrematureEnd));
        assert_eq!(string(r#""\q""#), Err(ErrorKind::BadEscape));
        assert_eq!(string(&quoted(&u("12G4"))), Err(ErrorKind::BadUnicodeEscape));
        assert_eq!(string("x"), Err(ErrorKind::UnexpectedChar('x')));
        assert_eq!(string(""), Err(ErrorKind::PrematureEnd));
    }

    #[test]
    fn test_invalid_utf8_in_string() {
        let mut c = Cursor::new(b"\"\xff\"");
        assert_eq!(read_string(&mut c), Err(ErrorKind::InvalidUtf8));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number(b"0"), Ok(0.0));
        assert_eq!(parse_number(b"-12"), Ok(-12.0));
        assert_eq!(parse_number(b"22.89"), Ok(22.89));
        assert_eq!(parse_number(b"10.5533E-2"), Ok(0.105533));
        assert_eq!(parse_number(b"1e3"), Ok(1000.0));
    }

    #[test]
    fn test_rejected_numbers() {
        let tokens: [&[u8]; 11] = [
            b"", b"-", b"01", b"1.", b".5", b"+1", b"1e", b"inf", b"NaN", b"0x10", b"1 2",
        ];
        for token in tokens {
            assert_eq!(parse_number(token), Err(ErrorKind::InvalidNumber), "{:?}", token);
        }
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_boolean(b"true"), Ok(true));
        assert_eq!(parse_boolean(b"false"), Ok(false));
        assert_eq!(parse_boolean(b"ture"), Err(ErrorKind::InvalidLiteral));
        assert_eq!(parse_null(b"null"), Ok(()));
        assert_eq!(parse_null(b"nil"), Err(ErrorKind::InvalidLiteral));
    }
}
