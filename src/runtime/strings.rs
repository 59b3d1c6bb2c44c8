//! String prototype words

use super::PrototypeDefinition;
use crate::context::Context;
use crate::value::{ErrorCode, Str, Value, ValueRef};
use std::rc::Rc;

fn uppercase(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Word: length
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
/// - number
///
/// Returns the length of the string.
fn w_length(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let length = string.len();

    ctx.push_str(string);
    ctx.push_int(length as i64);
}

/// Word: space?
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
/// - boolean
///
/// Tests whether the string contains only whitespace characters. Empty
/// strings return false.
fn w_is_space(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result = !string.is_empty() && string.chars().all(char::is_whitespace);

    ctx.push_str(string);
    ctx.push_boolean(result);
}

/// Word: lower-case?
/// Prototype: string
///
/// Tests whether the string contains only lower case characters. Empty
/// strings return false.
fn w_is_lower_case(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result = !string.is_empty() && string.chars().all(char::is_lowercase);

    ctx.push_str(string);
    ctx.push_boolean(result);
}

/// Word: upper-case?
/// Prototype: string
///
/// Tests whether the string contains only upper case characters. Empty
/// strings return false.
fn w_is_upper_case(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result = !string.is_empty() && string.chars().all(char::is_uppercase);

    ctx.push_str(string);
    ctx.push_boolean(result);
}

/// Word: chars
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
/// - array
///
/// Extracts characters from the string and returns them in an array of
/// one-character strings.
fn w_chars(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let output: Vec<ValueRef> = string
        .chars()
        .map(|c| Some(Value::String(Str::from_chars(&[c]))))
        .collect();

    ctx.push_str(string);
    ctx.push_array(output);
}

/// Word: runes
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
/// - array
///
/// Extracts Unicode code points from the string and returns them in an
/// array of numbers.
fn w_runes(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let output: Vec<ValueRef> = string
        .chars()
        .map(|c| Some(Value::Number(crate::value::Number::Int(c as i64))))
        .collect();

    ctx.push_str(string);
    ctx.push_array(output);
}

/// Word: words
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
/// - array
///
/// Extracts white space separated words from the string and returns them
/// in an array of substrings.
fn w_words(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let length = string.len();
    let mut begin = 0;
    let mut end = 0;
    let mut result: Vec<ValueRef> = Vec::new();

    for i in 0..length {
        if string.at(i).is_whitespace() {
            if end > begin {
                result.push(Some(Value::String(Str::substring(
                    Rc::clone(&string),
                    begin,
                    end - begin,
                ))));
            }
            begin = i + 1;
            end = begin;
        } else {
            end += 1;
        }
    }
    if end > begin {
        result.push(Some(Value::String(Str::substring(
            Rc::clone(&string),
            begin,
            end - begin,
        ))));
    }

    ctx.push_str(string);
    ctx.push_array(result);
}

/// Word: lines
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
/// - array
///
/// Extracts lines from the string and returns them in an array. `\n`,
/// `\r` and `\r\n` all terminate a line.
fn w_lines(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let length = string.len();
    let mut begin = 0;
    let mut end = 0;
    let mut result: Vec<ValueRef> = Vec::new();
    let mut i = 0;

    while i < length {
        let c = string.at(i);

        if i + 1 < length && c == '\r' && string.at(i + 1) == '\n' {
            result.push(Some(Value::String(Str::substring(
                Rc::clone(&string),
                begin,
                end - begin,
            ))));
            i += 1;
            begin = i + 1;
            end = begin;
        } else if c == '\n' || c == '\r' {
            result.push(Some(Value::String(Str::substring(
                Rc::clone(&string),
                begin,
                end - begin,
            ))));
            begin = i + 1;
            end = begin;
        } else {
            end += 1;
        }
        i += 1;
    }
    if end > begin {
        result.push(Some(Value::String(Str::substring(
            Rc::clone(&string),
            begin,
            end - begin,
        ))));
    }

    ctx.push_str(string);
    ctx.push_array(result);
}

/// Word: reverse
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
///
/// Reverses the string.
fn w_reverse(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result: Vec<char> = (0..string.len()).rev().map(|i| string.at(i)).collect();

    ctx.push_str(Str::from_chars(&result));
}

/// Word: upper-case
/// Prototype: string
///
/// Converts the string into upper case.
fn w_upper_case(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result: Vec<char> = string.chars().map(uppercase).collect();

    ctx.push_str(Str::from_chars(&result));
}

/// Word: lower-case
/// Prototype: string
///
/// Converts the string into lower case.
fn w_lower_case(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result: Vec<char> = string.chars().map(lowercase).collect();

    ctx.push_str(Str::from_chars(&result));
}

/// Word: swap-case
/// Prototype: string
///
/// Turns lower case characters in the string into upper case and vice
/// versa.
fn w_swap_case(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result: Vec<char> = string
        .chars()
        .map(|c| {
            if c.is_lowercase() {
                uppercase(c)
            } else {
                lowercase(c)
            }
        })
        .collect();

    ctx.push_str(Str::from_chars(&result));
}

/// Word: capitalize
/// Prototype: string
///
/// Converts the first character of the string into upper case and the
/// remaining characters into lower case.
fn w_capitalize(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let result: Vec<char> = string
        .chars()
        .enumerate()
        .map(|(i, c)| if i == 0 { uppercase(c) } else { lowercase(c) })
        .collect();

    ctx.push_str(Str::from_chars(&result));
}

/// Word: trim
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - string
///
/// Strips whitespace from the beginning and the end of the string.
fn w_trim(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let length = string.len();
    let mut i = 0;
    let mut j = length;

    while i < length && string.at(i).is_whitespace() {
        i += 1;
    }
    while j > i && string.at(j - 1).is_whitespace() {
        j -= 1;
    }
    if i != 0 || j != length {
        let trimmed = Str::substring(string, i, j - i);

        ctx.push_str(trimmed);
    } else {
        ctx.push_str(string);
    }
}

/// Word: trim-left
/// Prototype: string
///
/// Strips whitespace from the beginning of the string.
fn w_trim_left(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let length = string.len();
    let mut i = 0;

    while i < length && string.at(i).is_whitespace() {
        i += 1;
    }
    if i != 0 {
        let trimmed = Str::substring(string, i, length - i);

        ctx.push_str(trimmed);
    } else {
        ctx.push_str(string);
    }
}

/// Word: trim-right
/// Prototype: string
///
/// Strips whitespace from the end of the string.
fn w_trim_right(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let length = string.len();
    let mut i = length;

    while i > 0 && string.at(i - 1).is_whitespace() {
        i -= 1;
    }
    if i != length {
        let trimmed = Str::substring(string, 0, i);

        ctx.push_str(trimmed);
    } else {
        ctx.push_str(string);
    }
}

/// Word: >number
/// Prototype: string
///
/// Takes:
/// - string
///
/// Gives:
/// - number
///
/// Converts the string into a number, or gives a value error when the
/// string does not conform to number syntax.
fn w_to_number(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let text = string.to_string();

    if crate::value::Number::is_valid(&text) {
        ctx.push_number(&text);
    } else {
        ctx.set_error(ErrorCode::Value, "Could not convert string to number.");
    }
}

/// Word: +
/// Prototype: string
///
/// Takes:
/// - string
/// - string
///
/// Gives:
/// - string
///
/// Concatenates the contents of the two strings and returns the result.
/// The concatenation is lazy: both operands are shared, not copied.
fn w_concat(ctx: &mut Context) {
    let Some(a) = ctx.pop_string() else { return };
    let Some(b) = ctx.pop_string() else { return };

    if a.is_empty() {
        ctx.push_str(b);
    } else if b.is_empty() {
        ctx.push_str(a);
    } else {
        ctx.push_str(Str::concat(b, a));
    }
}

/// Word: *
/// Prototype: string
///
/// Takes:
/// - number
/// - string
///
/// Gives:
/// - string
///
/// Repeats the string given number of times.
fn w_repeat(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let Some(number) = ctx.pop_number() else {
        return;
    };
    let mut count = number.as_int();

    if count < 0 {
        count = -count;
    }

    let mut result: Vec<char> = Vec::with_capacity(string.len() * count as usize);

    for _ in 0..count {
        result.extend(string.chars());
    }
    ctx.push_str(Str::from_chars(&result));
}

/// Word: @
/// Prototype: string
///
/// Takes:
/// - number
/// - string
///
/// Gives:
/// - string
/// - string
///
/// Retrieves a character at given index. Negative indices count
/// backwards from the end of the string. An index out of bounds gives a
/// range error.
fn w_get(ctx: &mut Context) {
    let Some(string) = ctx.pop_string() else {
        return;
    };
    let Some(number) = ctx.pop_number() else {
        return;
    };
    let length = string.len();
    let mut index = number.as_int();

    if index < 0 {
        index += length as i64;
    }

    ctx.push_str(Rc::clone(&string));

    if index < 0 || index >= length as i64 {
        ctx.set_error(ErrorCode::Range, "String index out of bounds.");
        return;
    }

    let c = string.at(index as usize);

    ctx.push_str(Str::from_chars(&[c]));
}

pub(crate) fn string_prototype() -> PrototypeDefinition {
    vec![
        ("length", w_length as crate::value::NativeWord),
        ("chars", w_chars),
        ("runes", w_runes),
        ("words", w_words),
        ("lines", w_lines),
        // Tests.
        ("space?", w_is_space),
        ("lower-case?", w_is_lower_case),
        ("upper-case?", w_is_upper_case),
        // Conversions.
        ("reverse", w_reverse),
        ("upper-case", w_upper_case),
        ("lower-case", w_lower_case),
        ("swap-case", w_swap_case),
        ("capitalize", w_capitalize),
        ("trim", w_trim),
        ("trim-left", w_trim_left),
        ("trim-right", w_trim_right),
        (">number", w_to_number),
        ("+", w_concat),
        ("*", w_repeat),
        ("@", w_get),
    ]
}

#[cfg(test)]
mod tests {
    use crate::runtime::Runtime;
    use crate::value::{ErrorCode, Number, Value};

    fn run(source: &str) -> crate::context::Context {
        let runtime = Runtime::new();
        let mut ctx = runtime.new_context();
        let quote = ctx.compile(source).expect("source should compile");

        ctx.call(&quote);
        ctx
    }

    fn popped_string(ctx: &mut crate::context::Context) -> String {
        ctx.pop_string().expect("expected a string").to_string()
    }

    #[test]
    fn test_length() {
        let mut ctx = run("\"Hello\" length");
        assert_eq!(ctx.pop_number(), Some(Number::Int(5)));
        assert_eq!(popped_string(&mut ctx), "Hello");
    }

    #[test]
    fn test_length_counts_code_points() {
        let mut ctx = run("\"päivää\" length");
        assert_eq!(ctx.pop_number(), Some(Number::Int(6)));
    }

    #[test]
    fn test_chars() {
        let mut ctx = run("\"abc\" chars");
        match ctx.pop() {
            Some(Some(Value::Array(elements))) => {
                assert_eq!(elements.len(), 3);
                assert!(matches!(
                    &elements[0],
                    Some(Value::String(s)) if s.to_string() == "a"
                ));
            }
            other => panic!("expected array, got {other:?}"),
        }
        assert_eq!(popped_string(&mut ctx), "abc");
    }

    #[test]
    fn test_runes() {
        let mut ctx = run("\"aä\" runes");
        match ctx.pop() {
            Some(Some(Value::Array(elements))) => {
                assert_eq!(elements[0], Some(Value::Number(Number::Int(97))));
                assert_eq!(elements[1], Some(Value::Number(Number::Int(228))));
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_words() {
        let mut ctx = run("\"  foo  bar baz \" words");
        match ctx.pop() {
            Some(Some(Value::Array(elements))) => {
                let words: Vec<String> = elements
                    .iter()
                    .map(|e| crate::value::to_string(e))
                    .collect();
                assert_eq!(words, vec!["foo", "bar", "baz"]);
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_lines_with_mixed_endings() {
        let mut ctx = run("\"a\\nb\\r\\nc\\rd\" lines");
        match ctx.pop() {
            Some(Some(Value::Array(elements))) => {
                let lines: Vec<String> = elements
                    .iter()
                    .map(|e| crate::value::to_string(e))
                    .collect();
                assert_eq!(lines, vec!["a", "b", "c", "d"]);
            }
            other => panic!("expected array, got {other:?}"),
        }
    }

    #[test]
    fn test_space_predicate() {
        assert_eq!(run("\" \\t \" space?").pop_boolean(), Some(true));
        assert_eq!(run("\" x \" space?").pop_boolean(), Some(false));
        assert_eq!(run("\"\" space?").pop_boolean(), Some(false));
    }

    #[test]
    fn test_case_predicates() {
        assert_eq!(run("\"abc\" lower-case?").pop_boolean(), Some(true));
        assert_eq!(run("\"aBc\" lower-case?").pop_boolean(), Some(false));
        assert_eq!(run("\"ABC\" upper-case?").pop_boolean(), Some(true));
    }

    #[test]
    fn test_reverse() {
        let mut ctx = run("\"abc\" reverse");
        assert_eq!(popped_string(&mut ctx), "cba");
    }

    #[test]
    fn test_case_conversions() {
        let mut ctx = run("\"hello\" upper-case");
        assert_eq!(popped_string(&mut ctx), "HELLO");

        let mut ctx = run("\"HeLLo\" swap-case");
        assert_eq!(popped_string(&mut ctx), "hEllO");

        let mut ctx = run("\"hELLO\" capitalize");
        assert_eq!(popped_string(&mut ctx), "Hello");
    }

    #[test]
    fn test_trim() {
        let mut ctx = run("\"  hello  \" trim");
        assert_eq!(popped_string(&mut ctx), "hello");
    }

    #[test]
    fn test_trim_left_and_right() {
        let mut ctx = run("\"  hi  \" trim-left");
        assert_eq!(popped_string(&mut ctx), "hi  ");

        let mut ctx = run("\"  hi  \" trim-right");
        assert_eq!(popped_string(&mut ctx), "  hi");
    }

    #[test]
    fn test_trim_of_trimmed_string_is_shared() {
        let mut ctx = run("\"hi\" trim");
        assert_eq!(popped_string(&mut ctx), "hi");
    }

    #[test]
    fn test_to_number() {
        let mut ctx = run("\"42\" >number");
        assert_eq!(ctx.pop_number(), Some(Number::Int(42)));

        let ctx = run("\"4x2\" >number");
        assert_eq!(ctx.error().unwrap().code(), ErrorCode::Value);
    }

    #[test]
    fn test_concat() {
        let mut ctx = run("\"abc\" \"def\" +");
        assert_eq!(popped_string(&mut ctx), "abcdef");
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_concat_with_empty_operand() {
        let mut ctx = run("\"\" \"x\" +");
        assert_eq!(popped_string(&mut ctx), "x");
    }

    #[test]
    fn test_repeat() {
        let mut ctx = run("3 \"ab\" *");
        assert_eq!(popped_string(&mut ctx), "ababab");
    }

    #[test]
    fn test_get() {
        let mut ctx = run("1 \"abc\" @");
        assert_eq!(popped_string(&mut ctx), "b");
        assert_eq!(popped_string(&mut ctx), "abc");
    }

    #[test]
    fn test_get_negative_index() {
        let mut ctx = run("-1 \"abc\" @");
        assert_eq!(popped_string(&mut ctx), "c");
    }

    #[test]
    fn test_get_out_of_bounds() {
        let ctx = run("7 \"abc\" @");
        assert_eq!(ctx.error().unwrap().code(), ErrorCode::Range);
    }

    #[test]
    fn test_concat_then_trim_composes() {
        // Trimming a lazy concatenation exercises substring-over-concat
        let mut ctx = run("\"  ab\" \"cd  \" + trim");
        assert_eq!(popped_string(&mut ctx), "abcd");
    }
}
