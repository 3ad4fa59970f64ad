//! Canonical hashing of serializable artifact data.
//!
//! Reproducibility is verified by hashing serialized layouts, trait sets, and
//! drawing-command streams. Hashes are computed over a canonical JSON form
//! (lexicographically sorted object keys, no whitespace, fixed number
//! formatting) so the digest is independent of struct field order or
//! serializer quirks.

use serde::Serialize;

/// Canonical BLAKE3 hash of any serializable value.
///
/// Returns a 64-character lowercase hex string.
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    let canonical = canonicalize_value(&value);
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

/// Canonical JSON text for a serde_json value.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    canonicalize_value(value)
}

fn canonicalize_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_number(n),
        serde_json::Value::String(s) => format_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_value).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut keys: Vec<&String> = obj.keys().collect();
            keys.sort();
            let pairs: Vec<String> = keys
                .iter()
                .map(|k| format!("{}:{}", format_string(k), canonicalize_value(&obj[*k])))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    if let Some(f) = n.as_f64() {
        if f.is_nan() || f.is_infinite() {
            return "null".to_string();
        }
        if f == 0.0 {
            return "0".to_string();
        }
        if f.fract() == 0.0 && f.abs() < 1e15 {
            return format!("{}", f as i64);
        }
        let s = format!("{f}");
        if s.contains('.') && !s.contains('e') && !s.contains('E') {
            return s.trim_end_matches('0').trim_end_matches('.').to_string();
        }
        return s;
    }
    "null".to_string()
}

fn format_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
