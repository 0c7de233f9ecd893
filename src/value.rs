use bytes::{BufMut, Bytes, BytesMut};

use crate::error::HeaderError;
use crate::matches;

/// HTTP Header Value.
///
/// Leading and trailing SP / HTAB are stripped at construction time. Any other byte except NUL,
/// CR and LF is accepted as is.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HeaderValue {
    bytes: Bytes,
}

impl HeaderValue {
    /// Empty header value.
    pub const EMPTY: HeaderValue = HeaderValue::from_static(b"");

    /// Parse header value from static bytes.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header value or has leading or trailing whitespace.
    #[inline]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        match bytes {
            [b' ' | b'\t', ..] | [.., b' ' | b'\t'] => HeaderError::Invalid.panic_const(),
            _ => {}
        }
        match validate_header_value(bytes) {
            Ok(()) => Self {
                bytes: Bytes::from_static(bytes),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Parse header value by copying from slice of bytes.
    ///
    /// ```rust
    /// use fetch_headers::HeaderValue;
    ///
    /// let value = HeaderValue::from_slice(" \ttext/html\t ").unwrap();
    /// assert_eq!(value, "text/html");
    /// assert!(HeaderValue::from_slice("a\r\nb").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns error if the input contains NUL, CR or LF.
    #[inline]
    pub fn from_slice<A: AsRef<[u8]>>(value: A) -> Result<Self, HeaderError> {
        let bytes = matches::trim_whitespace(value.as_ref());
        match validate_header_value(bytes) {
            Ok(()) => Ok(Self {
                bytes: Bytes::copy_from_slice(bytes),
            }),
            Err(err) => Err(err),
        }
    }

    /// Join values with `", "`.
    ///
    /// Returns [`None`] if `values` is empty.
    pub(crate) fn combine<'a, I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a HeaderValue>,
    {
        let mut values = values.into_iter();
        let first = values.next()?;
        let Some(second) = values.next() else {
            return Some(first.clone());
        };

        let mut bytes = BytesMut::with_capacity(first.len() + 2 + second.len());
        bytes.put_slice(first.as_bytes());
        for value in std::iter::once(second).chain(values) {
            bytes.put_slice(b", ");
            bytes.put_slice(value.as_bytes());
        }

        Some(Self {
            bytes: bytes.freeze(),
        })
    }

    /// Returns header value as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the length of header value in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if header value is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns header value as `str`.
    ///
    /// # Errors
    ///
    /// Returns error if header value is not a valid UTF-8.
    #[inline]
    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.bytes)
    }
}

// ===== Parsing =====

const fn validate_header_value(mut bytes: &[u8]) -> Result<(), HeaderError> {
    let mut error = false;
    while let [byte, rest @ ..] = bytes {
        error |= !matches::is_header_value(*byte);
        bytes = rest;
    }
    if !error { Ok(()) } else { Err(HeaderError::Invalid) }
}

// ===== Traits =====

impl AsRef<[u8]> for HeaderValue {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Non UTF-8 bytes are replaced with `U+FFFD`, use [`as_bytes`][HeaderValue::as_bytes] for the
/// exact bytes.
impl std::fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&String::from_utf8_lossy(&self.bytes), f)
    }
}

impl std::fmt::Debug for HeaderValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderValue").field(&String::from_utf8_lossy(&self.bytes)).finish()
    }
}

impl std::str::FromStr for HeaderValue {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s)
    }
}

impl PartialEq<[u8]> for HeaderValue {
    #[inline]
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes.as_ref() == other
    }
}

impl PartialEq<str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.bytes.as_ref() == other.as_bytes()
    }
}

impl PartialEq<&str> for HeaderValue {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.bytes.as_ref() == other.as_bytes()
    }
}

impl PartialEq<String> for HeaderValue {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self.bytes.as_ref() == other.as_bytes()
    }
}

impl From<HeaderValue> for Bytes {
    #[inline]
    fn from(value: HeaderValue) -> Self {
        value.bytes
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HeaderValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // same representation as `Display`
        serializer.serialize_str(&String::from_utf8_lossy(&self.bytes))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_value() {
        assert_eq!(HeaderValue::from_slice("  a  b\t").unwrap(), "a  b");
        assert_eq!(HeaderValue::from_slice("\t\t").unwrap(), "");
        assert_eq!(HeaderValue::from_slice("").unwrap(), "");
        assert_eq!(HeaderValue::from_slice("\u{1F980}").unwrap(), "\u{1F980}");
        assert_eq!(HeaderValue::from_slice("(\"{}\")").unwrap(), "(\"{}\")");
        assert_eq!(HeaderValue::from_static(b"text/plain"), "text/plain");

        assert_eq!(HeaderValue::from_slice("a\0b"), Err(HeaderError::Invalid));
        assert_eq!(HeaderValue::from_slice("a\rb"), Err(HeaderError::Invalid));
        assert_eq!(HeaderValue::from_slice("a\nb"), Err(HeaderError::Invalid));
        assert_eq!(HeaderValue::from_slice("a\r\n"), Err(HeaderError::Invalid));
    }

    #[test]
    fn non_utf8_value() {
        let value = HeaderValue::from_slice(b" caf\xE9 ").unwrap();
        assert_eq!(value.as_bytes(), b"caf\xE9");
        assert!(value.to_str().is_err());
        assert_eq!(value.to_string(), "caf\u{FFFD}");
    }

    #[test]
    fn combine() {
        let a = HeaderValue::from_static(b"1");
        let b = HeaderValue::from_static(b"2");
        let empty = HeaderValue::from_static(b"");

        assert!(HeaderValue::combine(std::iter::empty()).is_none());
        assert_eq!(HeaderValue::combine([&a]).unwrap(), "1");
        assert_eq!(HeaderValue::combine([&a, &b, &a]).unwrap(), "1, 2, 1");
        assert_eq!(HeaderValue::combine([&a, &empty]).unwrap(), "1, ");
    }
}
