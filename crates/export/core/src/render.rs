//! Lua table-literal renderer.
//!
//! Output depends only on the tree: map entries in insertion order, sequence
//! elements in order, four spaces per nesting level.

use std::fmt::Write;

use crate::value::{Map, Value};

const INDENT: &str = "    ";

const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Renders `value` as a Lua expression. `level` is the nesting depth of the
/// line the expression starts on; continuation lines are indented from it.
pub fn render(value: &Value, level: usize) -> String {
    let mut out = String::new();
    write_value(&mut out, value, level);
    out
}

fn write_value(out: &mut String, value: &Value, level: usize) {
    match value {
        Value::Null => out.push_str("nil"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => write_float(out, *f),
        Value::String(s) => write_string(out, s),
        Value::Sequence(items) => write_sequence(out, items, level),
        Value::Map(map) => write_map(out, map, level),
    }
}

fn write_map(out: &mut String, map: &Map, level: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (key, value) in map {
        push_indent(out, level + 1);
        write_key(out, key);
        out.push_str(" = ");
        write_value(out, value, level + 1);
        out.push_str(",\n");
    }
    push_indent(out, level);
    out.push('}');
}

fn write_sequence(out: &mut String, items: &[Value], level: usize) {
    if items.is_empty() {
        out.push_str("{}");
        return;
    }

    if items.iter().all(Value::is_scalar) {
        out.push('{');
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_value(out, item, level);
        }
        out.push('}');
        return;
    }

    out.push_str("{\n");
    for item in items {
        push_indent(out, level + 1);
        write_value(out, item, level + 1);
        out.push_str(",\n");
    }
    push_indent(out, level);
    out.push('}');
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        out.push('[');
        write_string(out, key);
        out.push(']');
    }
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("(0/0)");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "math.huge" } else { "-math.huge" });
    } else if f == 0.0 {
        out.push('0');
    } else {
        let _ = write!(out, "{f}");
    }
}

fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Always three digits: Lua reads up to three after the backslash.
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str(INDENT);
    }
}

/// Bare Lua name: `[A-Za-z_][A-Za-z0-9_]*` and not reserved.
pub fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !LUA_KEYWORDS.contains(&key)
}
