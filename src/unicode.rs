//! String escaping and escape decoding helpers

/// Quotes and escapes a string the way it appears in source code.
///
/// Control characters are escaped as `\uXXXX`; everything else outside the
/// short escape set is emitted verbatim.
pub fn json_stringify(input: &str) -> String {
    let mut result = String::with_capacity(input.len() + 2);

    result.push('"');
    for c in input.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\u{0008}' => result.push_str("\\b"),
            '\u{000c}' => result.push_str("\\f"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');

    result
}

/// Decodes the escape sequences inside a string literal body.
///
/// Recognizes `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t` and `\uXXXX`,
/// pairing UTF-16 surrogates into astral code points.
pub fn decode_escapes(body: &str) -> std::result::Result<String, String> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{0008}'),
            Some('f') => result.push('\u{000c}'),
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('u') => {
                let unit = decode_hex4(&mut chars)?;
                if (0xd800..0xdc00).contains(&unit) {
                    // High surrogate; a low surrogate escape must follow.
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err("unpaired surrogate in string literal".into());
                    }
                    let low = decode_hex4(&mut chars)?;
                    if !(0xdc00..0xe000).contains(&low) {
                        return Err("unpaired surrogate in string literal".into());
                    }
                    let c = 0x10000 + ((unit - 0xd800) << 10) + (low - 0xdc00);
                    match char::from_u32(c) {
                        Some(c) => result.push(c),
                        None => return Err("invalid code point in string literal".into()),
                    }
                } else if (0xdc00..0xe000).contains(&unit) {
                    return Err("unpaired surrogate in string literal".into());
                } else {
                    match char::from_u32(unit) {
                        Some(c) => result.push(c),
                        None => return Err("invalid code point in string literal".into()),
                    }
                }
            }
            Some(c) => return Err(format!("unrecognized escape sequence `\\{c}'")),
            None => return Err("truncated escape sequence".into()),
        }
    }

    Ok(result)
}

fn decode_hex4(chars: &mut std::str::Chars<'_>) -> std::result::Result<u32, String> {
    let mut value = 0;

    for _ in 0..4 {
        let digit = chars
            .next()
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| String::from("malformed \\u escape sequence"))?;
        value = (value << 4) | digit;
    }

    Ok(value)
}
