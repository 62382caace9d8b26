//! YAML emission
//!
//! Block style throughout. Scalars follow their key or dash after one space; collections
//! start on the next line, indented two spaces deeper than their parent:
//!
//!     foo: "Hello world!"
//!     empty: {}
//!     bar:
//!       data:
//!         - "Here comes the sun"
//!         -
//!           type: "blob"
//!
//! Strings are always double-quoted. Keys made of ASCII letters only are written bare.

use super::Value;

/// Render `value` as YAML with no trailing newline.
pub fn to_string(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Null => write_scalar(out, indent, "null"),
        Value::True => write_scalar(out, indent, "true"),
        Value::False => write_scalar(out, indent, "false"),
        Value::Number(lexical) => write_scalar(out, indent, lexical),
        Value::String(s) => {
            separate(out, indent);
            write_quoted(out, s);
        }
        Value::Object(object) if object.is_empty() => write_scalar(out, indent, "{}"),
        Value::Array(items) if items.is_empty() => write_scalar(out, indent, "[]"),
        Value::Object(object) => {
            for (i, (key, item)) in object.iter().enumerate() {
                start_line(out, indent, i);
                if is_bare_key(key) {
                    out.push_str(key);
                } else {
                    write_quoted(out, key);
                }
                out.push(':');
                write_value(out, item, indent + 1);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                start_line(out, indent, i);
                out.push('-');
                write_value(out, item, indent + 1);
            }
        }
    }
}

fn write_scalar(out: &mut String, indent: usize, text: &str) {
    separate(out, indent);
    out.push_str(text);
}

/// A nested scalar follows its key or dash after a space.
fn separate(out: &mut String, indent: usize) {
    if indent > 0 {
        out.push(' ');
    }
}

/// Break before the entry of a collection at `indent`, unless it opens the document.
fn start_line(out: &mut String, indent: usize, index: usize) {
    if index > 0 || indent > 0 {
        out.push('\n');
    }
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphabetic())
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{0B}' => out.push_str("\\v"),
            '\u{0C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\u{1B}' => out.push_str("\\e"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{85}' => out.push_str("\\N"),
            '\u{A0}' => out.push_str("\\_"),
            '\u{2028}' => out.push_str("\\L"),
            '\u{2029}' => out.push_str("\\P"),
            c if is_printable(c) => out.push(c),
            c => write_code_point(out, c),
        }
    }
    out.push('"');
}

/// The YAML 1.2 printable character set
fn is_printable(c: char) -> bool {
    matches!(
        u32::from(c),
        0x09 | 0x0A | 0x0D | 0x20..=0x7E | 0x85 | 0xA0..=0xD7FF | 0x10000..=0x10FFFF
    ) || matches!(u32::from(c), 0xE000..=0xFFFD if c != '\u{FEFF}')
}

fn write_code_point(out: &mut String, c: char) {
    let code = u32::from(c);
    let escaped = if code < 0x100 {
        format!("\\x{:02X}", code)
    } else if code < 0x10000 {
        format!("\\u{:04X}", code)
    } else {
        format!("\\U{:08X}", code)
    };
    out.push_str(&escaped);
}
