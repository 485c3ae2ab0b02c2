//! Canonical text layout for level files.
//!
//! The game's own tooling writes levels in a fixed shape: tab indentation,
//! one object per line, `", "` and `": "` separators inside values, and
//! non-ASCII characters escaped. Keeping that shape means generated files diff
//! cleanly against hand-authored ones.
use serde_json::Value;

use crate::format::{GameMode, LevelFile};
use crate::level::object::LevelObject;

/// Render `file` in canonical layout.
pub fn encode(file: &LevelFile) -> String {
    let objects = file
        .objects
        .iter()
        .map(encode_object)
        .collect::<Vec<_>>()
        .join(",\n")
        .replace('\n', "\n\t\t");

    let mut out = String::new();
    out.push_str("{\n");
    push_member(&mut out, 1, "name", &string(&file.name), true);
    push_member(&mut out, 1, "description", &string(&file.description), true);

    out.push_str("\t\"settings\": {\n");
    push_member(&mut out, 2, "colorbg", &color(file.settings.colorbg), true);
    push_member(&mut out, 2, "colorground", &color(file.settings.colorground), true);
    push_member(&mut out, 2, "gamemode", &string(gamemode_name(file.settings.gamemode)), true);
    push_member(&mut out, 2, "platformer", &file.settings.platformer.to_string(), false);
    out.push_str("\t},\n");

    out.push_str("\t\"objects\": [\n\t\t");
    out.push_str(&objects);
    out.push_str("\n\t],\n");

    out.push_str("\t\"completion\": {\n");
    push_member(&mut out, 2, "percentage", &file.completion.percentage.to_string(), true);
    let coins = file
        .completion
        .coins
        .iter()
        .map(bool::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    push_member(&mut out, 2, "coins", &format!("[{coins}]"), false);
    out.push_str("\t},\n");

    push_member(&mut out, 1, "deleted", &file.deleted.to_string(), false);
    out.push('}');
    out
}

fn push_member(out: &mut String, depth: usize, key: &str, value: &str, comma: bool) {
    for _ in 0..depth {
        out.push('\t');
    }
    out.push_str(&format!("\"{key}\": {value}"));
    if comma {
        out.push(',');
    }
    out.push('\n');
}

fn gamemode_name(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Cube => "cube",
        GameMode::Ship => "ship",
        GameMode::Ball => "ball",
        GameMode::Wave => "wave",
    }
}

fn color(rgb: [u8; 3]) -> String {
    format!("[{}, {}, {}]", rgb[0], rgb[1], rgb[2])
}

fn encode_object(object: &LevelObject) -> String {
    let data = object
        .data
        .iter()
        .map(|(k, v)| format!("{}: {}", string(k), value(v)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{\"type\": {}, \"data\": {{{data}}}}}", string(&object.kind))
}

fn value(v: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, v);
    out
}

fn write_value(out: &mut String, v: &Value) {
    match v {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (k, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_string(out, k);
                out.push_str(": ");
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

fn string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_string(&mut out, s);
    out
}

/// Quote `s`, escaping everything outside printable ASCII as `\uXXXX`
/// (UTF-16 code units, so astral characters become surrogate pairs).
fn write_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out.push('"');
}
