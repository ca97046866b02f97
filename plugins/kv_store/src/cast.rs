//! Casting stored values to typed primitives

use crate::error::{KvError, Result};
use crate::store::{Store, value_to_string};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Strings that read as `true` when cast to [`ValueType::Bool`]
pub const TRUE_WORDS: [&str; 5] = ["1", "true", "yes", "y", "on"];

/// Target type of a cast
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValueType {
    #[default]
    String,
    Int,
    Float,
    Bool,
}

impl ValueType {
    /// Read a type name coming from the host.
    ///
    /// Saved graphs may carry names this version does not know; those read
    /// as [`ValueType::String`].
    pub fn from_host(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for ValueType {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(Self::String),
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" => Ok(Self::Bool),
            other => Err(KvError::Format(format!("unknown type: {}", other))),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        })
    }
}

/// Result of a successful cast
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    String(String),
    Int(i128),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => f.write_str(&format_float(*x)),
            Self::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
        }
    }
}

/// Cast a stored value.
///
/// An absent value casts to `""` as a string and to `false` as a bool.
///
/// # Errors
///
/// Returns [`KvError::Cast`] when an int or float is requested and the
/// value is not numeric. `string` and `bool` never fail. Integers are
/// read as `i128`; anything wider is a cast error.
pub fn cast(value: Option<&Value>, as_type: ValueType) -> Result<TypedValue> {
    let cast_error = || KvError::Cast {
        value: value.map(value_to_string).unwrap_or_default(),
        target: as_type,
    };

    match as_type {
        ValueType::String => Ok(TypedValue::String(
            value.map(value_to_string).unwrap_or_default(),
        )),
        ValueType::Bool => Ok(TypedValue::Bool(is_truthy(
            &value.map(value_to_string).unwrap_or_default(),
        ))),
        ValueType::Int => match value {
            Some(Value::String(s)) => parse_int(s).map(TypedValue::Int).ok_or_else(cast_error),
            Some(Value::Bool(b)) => Ok(TypedValue::Int(i128::from(*b))),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .or_else(|| n.as_f64().and_then(truncate_to_int))
                .map(TypedValue::Int)
                .ok_or_else(cast_error),
            _ => Err(cast_error()),
        },
        ValueType::Float => match value {
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map(TypedValue::Float)
                .map_err(|_| cast_error()),
            Some(Value::Bool(b)) => Ok(TypedValue::Float(if *b { 1.0 } else { 0.0 })),
            Some(Value::Number(n)) => n.as_f64().map(TypedValue::Float).ok_or_else(cast_error),
            _ => Err(cast_error()),
        },
    }
}

/// Cast a plain string; see [`cast`].
pub fn cast_str(value: &str, as_type: ValueType) -> Result<TypedValue> {
    cast(Some(&Value::String(value.to_string())), as_type)
}

/// Look up `key` and cast it, always producing a string.
///
/// A missing key uses `default` (`""` when `None`). When the value cannot be
/// cast to a number the cast is retried with `default`, and if that fails as
/// well the raw default is returned, so this never fails. Booleans come out
/// as `"true"`/`"false"`.
///
/// # Example
///
/// ```
/// use kvtools_store_plugin::{Store, ValueType, get};
///
/// let mut store = Store::new();
/// store.insert("k", "abc");
/// assert_eq!(get(&store, "k", Some("7"), ValueType::Int), "7");
/// ```
pub fn get(store: &Store, key: &str, default: Option<&str>, as_type: ValueType) -> String {
    let default = default.unwrap_or("");
    let fallback = Value::String(default.to_string());
    let value = store.get(key.trim()).unwrap_or(&fallback);

    match cast(Some(value), as_type) {
        Ok(typed) => typed.to_string(),
        Err(e) => {
            log::debug!("{}; falling back to default {:?}", e, default);
            cast_str(default, as_type)
                .map(|typed| typed.to_string())
                .unwrap_or_else(|_| default.to_string())
        }
    }
}

fn is_truthy(s: &str) -> bool {
    let s = s.trim().to_lowercase();
    TRUE_WORDS.contains(&s.as_str())
}

fn parse_int(s: &str) -> Option<i128> {
    s.trim().parse::<i128>().ok()
}

fn truncate_to_int(x: f64) -> Option<i128> {
    let t = x.trunc();
    (t.is_finite() && t >= i128::MIN as f64 && t < i128::MAX as f64).then_some(t as i128)
}

/// Format a float so that it always reads as a float: `3.0`, `0.25`,
/// `1e+16`, `1.5e-05`, `inf`, `nan`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let abs = x.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", x);
        if let Some((mantissa, exponent)) = sci.split_once('e') {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
        }
        return sci;
    }

    let plain = x.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}
