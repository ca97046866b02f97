//! Parsing and writing store text
//!
//! Two syntaxes are understood:
//!
//! - a JSON document whose top level is an object
//! - line-oriented `key=value` or `key: value` pairs, where blank lines and
//!   lines starting with `#` are ignored
//!
//! [`StoreFormat::Auto`] picks between them by looking at the outer
//! characters of the trimmed text.

use crate::error::{KvError, Result};
use crate::store::{Store, value_to_string};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Syntax of a store text block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StoreFormat {
    /// Detect JSON by its outer brackets, otherwise read as KV lines
    #[default]
    Auto,
    Json,
    Kv,
}

impl FromStr for StoreFormat {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(Self::Auto),
            "json" => Ok(Self::Json),
            "kv" => Ok(Self::Kv),
            other => Err(KvError::Format(format!("unknown format: {}", other))),
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Json => "json",
            Self::Kv => "kv",
        })
    }
}

/// Heuristic used by [`StoreFormat::Auto`].
///
/// Text that looks like JSON but does not parse is reported as a JSON error;
/// it is never retried as KV lines.
pub fn looks_like_json(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'))
}

/// Parse raw text into a [`Store`].
///
/// The text is trimmed first and empty text always yields an empty store.
///
/// # Errors
///
/// Returns [`KvError::Format`] if the JSON is invalid or not an object, or if
/// a KV line has no `=`/`:` separator before any `#`.
///
/// # Example
///
/// ```
/// use kvtools_store_plugin::{StoreFormat, parse};
///
/// let store = parse("speaker=Tom\nlang: de", StoreFormat::Auto).unwrap();
/// assert_eq!(store.get_string("lang").as_deref(), Some("de"));
/// ```
pub fn parse(raw: &str, format: StoreFormat) -> Result<Store> {
    let text = raw.trim();
    if text.is_empty() {
        return Ok(Store::new());
    }

    match format {
        StoreFormat::Auto if looks_like_json(text) => parse_json(text),
        StoreFormat::Auto => parse_kv(text),
        StoreFormat::Json => parse_json(text),
        StoreFormat::Kv => parse_kv(text),
    }
}

fn parse_json(text: &str) -> Result<Store> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(Store::from(map)),
        Ok(_) => Err(KvError::Format("JSON error: JSON is not an object".to_string())),
        Err(e) => Err(KvError::Format(format!("JSON error: {}", e))),
    }
}

/// Characters that end a line. `\r\n` produces an extra blank line, which
/// is skipped like any other.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

fn parse_kv(text: &str) -> Result<Store> {
    let mut store = Store::new();
    for line in text.split(LINE_BREAKS) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = split_kv_line(line)
            .ok_or_else(|| KvError::Format(format!("not a valid KV line: {}", line)))?;
        store.insert(key, value);
    }
    Ok(store)
}

/// Split a trimmed line at the first `=` or `:`.
///
/// The key may not contain `=`, `:` or `#`, so a `#` before the separator
/// makes the line invalid.
fn split_kv_line(line: &str) -> Option<(&str, &str)> {
    let at = line.find(['=', ':', '#'])?;
    if at == 0 || line[at..].starts_with('#') {
        return None;
    }
    Some((line[..at].trim(), line[at + 1..].trim()))
}

/// Write a store back to text.
///
/// `Json` emits an object, indented by two spaces when `pretty` is set.
/// `Kv` emits one `key=value` line per entry in insertion order; nested
/// objects and arrays are written as compact JSON.
///
/// # Errors
///
/// Returns [`KvError::Format`] for [`StoreFormat::Auto`], which has no
/// written form.
pub fn dump(store: &Store, format: StoreFormat, pretty: bool) -> Result<String> {
    match format {
        StoreFormat::Json => {
            let written = if pretty {
                serde_json::to_string_pretty(store.as_map())
            } else {
                serde_json::to_string(store.as_map())
            };
            written.map_err(|e| KvError::Format(format!("JSON error: {}", e)))
        }
        StoreFormat::Kv => Ok(store
            .iter()
            .map(|(key, value)| format!("{}={}", key, value_to_string(value)))
            .collect::<Vec<_>>()
            .join("\n")),
        StoreFormat::Auto => Err(KvError::Format(format!(
            "unknown format to write: {}",
            format
        ))),
    }
}
