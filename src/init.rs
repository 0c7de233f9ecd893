//! Headers initializer.
use std::collections::{BTreeMap, HashMap};

use bytes::{BufMut, Bytes, BytesMut};

#[cfg(feature = "json")]
use crate::error::InitError;

/// Source of initial header pairs.
///
/// ```rust
/// use fetch_headers::{Headers, Init};
///
/// let headers = Headers::try_from(Init::from([("accept", "text/html"), ("x-id", "1")])).unwrap();
/// assert_eq!(headers.get("Accept").unwrap().unwrap(), "text/html");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Init {
    /// No initial header.
    #[default]
    Empty,
    /// Ordered sequence of name and value pairs.
    Pairs(Vec<(InitValue, InitValue)>),
    /// Name to value record.
    Record(Vec<(String, InitValue)>),
}

/// Loosely typed initializer item, stringified before validation.
#[derive(Clone, Debug, PartialEq)]
pub enum InitValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Raw bytes, passed through without decoding.
    Bytes(Bytes),
    /// Items are joined with `","`.
    Seq(Vec<InitValue>),
}

impl Init {
    /// Resolve into stringified name and value pairs, in order.
    pub fn into_pairs(self) -> Vec<(Bytes, Bytes)> {
        match self {
            Init::Empty => Vec::new(),
            Init::Pairs(pairs) => pairs
                .into_iter()
                .map(|(name, value)| (name.into_bytes(), value.into_bytes()))
                .collect(),
            Init::Record(record) => record
                .into_iter()
                .map(|(name, value)| (Bytes::from(name), value.into_bytes()))
                .collect(),
        }
    }
}

impl InitValue {
    /// Stringify the value.
    ///
    /// A top level `Null` is `"null"`, a `Null` inside a sequence is empty.
    pub fn into_bytes(self) -> Bytes {
        match self {
            InitValue::Str(string) => Bytes::from(string),
            InitValue::Bytes(bytes) => bytes,
            value => {
                let mut buf = BytesMut::new();
                value.write(&mut buf, false);
                buf.freeze()
            }
        }
    }

    fn write(&self, buf: &mut BytesMut, nested: bool) {
        match self {
            InitValue::Null if nested => {}
            InitValue::Null => buf.put_slice(b"null"),
            InitValue::Bool(true) => buf.put_slice(b"true"),
            InitValue::Bool(false) => buf.put_slice(b"false"),
            InitValue::Int(int) => buf.put_slice(itoa::Buffer::new().format(*int).as_bytes()),
            InitValue::Float(float) => buf.put_slice(format_float(*float).as_bytes()),
            InitValue::Str(string) => buf.put_slice(string.as_bytes()),
            InitValue::Bytes(bytes) => buf.put_slice(bytes),
            InitValue::Seq(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        buf.put_u8(b',');
                    }
                    item.write(buf, true);
                }
            }
        }
    }
}

/// ECMAScript `Number::toString`.
fn format_float(float: f64) -> String {
    // outside of this range exponent notation is used
    const MAX_DECIMAL: f64 = 1e21;
    const MIN_DECIMAL: f64 = 1e-6;

    if float.is_nan() {
        return "NaN".to_owned();
    }
    if float.is_infinite() {
        return if float > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if float == 0.0 {
        return "0".to_owned();
    }

    let abs = float.abs();
    if (MIN_DECIMAL..MAX_DECIMAL).contains(&abs) {
        // shortest round-trip digits, never in exponent form
        return format!("{float}");
    }

    // `{:e}` yields `1e21` or `1.5e-7`, exponent sign is always explicit
    let exp = format!("{float:e}");
    match exp.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => exp,
    }
}

// ===== Conversions =====

impl From<&str> for InitValue {
    #[inline]
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for InitValue {
    #[inline]
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<bool> for InitValue {
    #[inline]
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for InitValue {
    #[inline]
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for InitValue {
    #[inline]
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for InitValue {
    #[inline]
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<Bytes> for InitValue {
    #[inline]
    fn from(v: Bytes) -> Self {
        Self::Bytes(v)
    }
}

impl From<f64> for InitValue {
    #[inline]
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<T: Into<InitValue>> From<Option<T>> for InitValue {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<InitValue>> From<Vec<T>> for InitValue {
    #[inline]
    fn from(v: Vec<T>) -> Self {
        Self::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<InitValue>, const N: usize> From<[T; N]> for InitValue {
    #[inline]
    fn from(v: [T; N]) -> Self {
        Self::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<InitValue>, V: Into<InitValue>> From<Vec<(K, V)>> for Init {
    #[inline]
    fn from(v: Vec<(K, V)>) -> Self {
        Self::Pairs(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<InitValue>, V: Into<InitValue>, const N: usize> From<[(K, V); N]> for Init {
    #[inline]
    fn from(v: [(K, V); N]) -> Self {
        Self::Pairs(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<InitValue>> From<BTreeMap<K, V>> for Init {
    #[inline]
    fn from(v: BTreeMap<K, V>) -> Self {
        Self::Record(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<InitValue>, S> From<HashMap<K, V, S>> for Init {
    #[inline]
    fn from(v: HashMap<K, V, S>) -> Self {
        Self::Record(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<T: Into<Init>> From<Option<T>> for Init {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Empty, Into::into)
    }
}

// ===== JSON =====

#[cfg(feature = "json")]
impl From<serde_json::Value> for InitValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;

        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(int), _) => Self::Int(int),
                (None, Some(uint)) => Self::Str(itoa::Buffer::new().format(uint).to_owned()),
                (None, None) => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::Seq(items.into_iter().map(Into::into).collect()),
            Value::Object(_) => Self::Str("[object Object]".to_owned()),
        }
    }
}

/// `null` is empty, an array must only contain arrays of exactly two items, an object is a
/// record.
#[cfg(feature = "json")]
impl TryFrom<serde_json::Value> for Init {
    type Error = InitError;

    fn try_from(v: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        match v {
            Value::Null => Ok(Self::Empty),
            Value::Array(items) => {
                let mut pairs = Vec::with_capacity(items.len());
                for item in items {
                    let Value::Array(pair) = item else {
                        return Err(InitError::NotPair);
                    };
                    let [name, value] = match <[Value; 2]>::try_from(pair) {
                        Ok(pair) => pair,
                        Err(pair) => return Err(InitError::PairLength(pair.len())),
                    };
                    pairs.push((name.into(), value.into()));
                }
                Ok(Self::Pairs(pairs))
            }
            Value::Object(map) => Ok(Self::Record(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            )),
            Value::Bool(_) | Value::Number(_) | Value::String(_) => Err(InitError::Shape),
        }
    }
}
