use bytes::Bytes;

use crate::error::HeaderError;
use crate::matches;

/// HTTP Header name.
///
/// # Case Normalization
///
/// Input is normalized to lowercase at construction time. [`from_static`][HeaderName::from_static]
/// will panic at compile time when name contains uppercase character.
///
/// Header names are compared, ordered and hashed by their lowercase bytes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeaderName {
    /// is valid lowercase ASCII token
    bytes: Bytes,
}

impl HeaderName {
    /// Parse header name from static bytes.
    ///
    /// The input must not contains ASCII uppercase characters.
    ///
    /// # Panics
    ///
    /// Panics if the input is not a valid header name or contains ASCII uppercase characters.
    #[inline]
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        match validate_header_name_lowercase(bytes) {
            Ok(()) => Self {
                bytes: Bytes::from_static(bytes),
            },
            Err(err) => err.panic_const(),
        }
    }

    /// Parse header name by copying from slice of bytes.
    ///
    /// Input name is normalized to lowercase.
    ///
    /// ```rust
    /// use fetch_headers::HeaderName;
    ///
    /// let name = HeaderName::from_slice("Content-Type").unwrap();
    /// assert_eq!(name.as_str(), "content-type");
    /// assert!(HeaderName::from_slice("").is_err());
    /// assert!(HeaderName::from_slice("foo bar").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns error if the input is empty or contains byte outside of `token`.
    #[inline]
    pub fn from_slice<A: AsRef<[u8]>>(name: A) -> Result<Self, HeaderError> {
        let bytes = name.as_ref();
        if bytes.is_empty() {
            return Err(HeaderError::Empty);
        }
        // avoid copy when the input is already normalized
        if bytes.iter().all(|&b| matches::is_token_lowercase(b)) {
            return Ok(Self {
                bytes: Bytes::copy_from_slice(bytes),
            });
        }
        copy_to_header_name(bytes)
    }

    /// Extracts a string slice of the header name.
    ///
    /// The returned string will always in ASCII lowercase.
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: validated as ASCII token at construction
        unsafe { std::str::from_utf8_unchecked(&self.bytes) }
    }

    /// Returns header name as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Checks that two header name are an ASCII case-insensitive match.
    #[inline]
    pub fn eq_ignore_ascii_case(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

// ===== Parser =====

/// token       = 1*tchar
/// field-name  = token
const fn validate_header_name_lowercase(mut bytes: &[u8]) -> Result<(), HeaderError> {
    use HeaderError as E;

    if bytes.is_empty() {
        return Err(E::Empty);
    }

    while let [byte, rest @ ..] = bytes {
        if matches::is_token_lowercase(*byte) {
            bytes = rest;
        } else {
            return Err(E::Invalid)
        }
    }

    Ok(())
}

fn copy_to_header_name(bytes: &[u8]) -> Result<HeaderName, HeaderError> {
    use HeaderError as E;

    let mut name = vec![0; bytes.len()];

    for (output, input) in name.iter_mut().zip(bytes) {
        *output = matches::HEADER_NAME[*input as usize];

        // Any invalid character will have it MSB set
        if *output & 128 == 128 {
            return Err(E::Invalid);
        }
    }

    Ok(HeaderName {
        bytes: name.into(),
    })
}

// ===== Traits =====

impl AsRef<[u8]> for HeaderName {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::str::FromStr for HeaderName {
    type Err = HeaderError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s)
    }
}

impl std::fmt::Display for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_str(), f)
    }
}

impl std::fmt::Debug for HeaderName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("HeaderName").field(&self.as_str()).finish()
    }
}

impl PartialEq<str> for HeaderName {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HeaderName {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HeaderName {
    #[inline]
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ===== Macros =====

macro_rules! standard_header {
    (
        $(#[$mod_doc:meta])*
        mod $mod_name:ident;

        $(
            $(#[$doc:meta])*
            $vis:vis const $id:ident: $t:ty = $name:literal;
        )*
    ) => {
        $(#[$mod_doc])*
        pub mod $mod_name {
            use super::*;

            $(
                $(#[$doc])*
                $vis const $id: $t = HeaderName::from_static($name.as_bytes());
            )*
        }
    };
}

// ===== Standard Headers =====

// https://fetch.spec.whatwg.org/#terminology-headers

standard_header! {
    /// HTTP Standard Headers referred by the fetch guard policy.
    mod standard;

    // ===== CORS-safelisted =====

    /// Informs the server about the types of data that can be sent back.
    pub const ACCEPT: HeaderName = "accept";

    /// The natural language and locale that the client prefers.
    pub const ACCEPT_LANGUAGE: HeaderName = "accept-language";

    /// Describes the human language(s) intended for the audience.
    pub const CONTENT_LANGUAGE: HeaderName = "content-language";

    /// Indicates the media type of the resource.
    pub const CONTENT_TYPE: HeaderName = "content-type";

    /// Indicates the part of a document that the server should return.
    pub const RANGE: HeaderName = "range";

    // ===== Forbidden Request =====

    /// Advertises a client's supported character encodings.
    pub const ACCEPT_CHARSET: HeaderName = "accept-charset";

    /// The encoding algorithm, usually a compression algorithm, that can be used on the resource
    /// sent back.
    pub const ACCEPT_ENCODING: HeaderName = "accept-encoding";

    /// Used when issuing a preflight request to let the server know which HTTP headers will be
    /// used when the actual request is made.
    pub const ACCESS_CONTROL_REQUEST_HEADERS: HeaderName = "access-control-request-headers";

    /// Used when issuing a preflight request to let the server know which HTTP method will be used
    /// when the actual request is made.
    pub const ACCESS_CONTROL_REQUEST_METHOD: HeaderName = "access-control-request-method";

    /// Controls whether the network connection stays open after the current transaction finishes.
    pub const CONNECTION: HeaderName = "connection";

    /// The size of the resource, in decimal number of bytes.
    pub const CONTENT_LENGTH: HeaderName = "content-length";

    /// Contains stored HTTP cookies previously sent by the server.
    pub const COOKIE: HeaderName = "cookie";

    /// Obsolete cookie header.
    pub const COOKIE2: HeaderName = "cookie2";

    /// Contains the date and time at which the message was originated.
    pub const DATE: HeaderName = "date";

    /// Request tracking preference.
    pub const DNT: HeaderName = "dnt";

    /// Indicates expectations that need to be fulfilled by the server to properly handle the
    /// request.
    pub const EXPECT: HeaderName = "expect";

    /// Specifies the domain name of the server and (optionally) the TCP port number on which the
    /// server is listening.
    pub const HOST: HeaderName = "host";

    /// Controls how long a persistent connection should stay open.
    pub const KEEP_ALIVE: HeaderName = "keep-alive";

    /// Indicates where a fetch originates from.
    pub const ORIGIN: HeaderName = "origin";

    /// The address of the previous web page from which a link to the currently requested page was
    /// followed.
    pub const REFERER: HeaderName = "referer";

    /// Specifies the transfer encodings the user agent is willing to accept.
    pub const TE: HeaderName = "te";

    /// Allows the sender to include additional fields at the end of chunked message.
    pub const TRAILER: HeaderName = "trailer";

    /// Specifies the form of encoding used to safely transfer the resource to the user.
    pub const TRANSFER_ENCODING: HeaderName = "transfer-encoding";

    /// Used to upgrade an already established connection to a different protocol.
    pub const UPGRADE: HeaderName = "upgrade";

    /// Added by proxies, both forward and reverse proxies, and can appear in the request headers
    /// and the response headers.
    pub const VIA: HeaderName = "via";

    // ===== Method Override =====

    /// Non-standard method override.
    pub const X_HTTP_METHOD: HeaderName = "x-http-method";

    /// Non-standard method override.
    pub const X_HTTP_METHOD_OVERRIDE: HeaderName = "x-http-method-override";

    /// Non-standard method override.
    pub const X_METHOD_OVERRIDE: HeaderName = "x-method-override";

    // ===== Forbidden Response =====

    /// Send cookies from the server to the user-agent.
    pub const SET_COOKIE: HeaderName = "set-cookie";

    /// Obsolete cookie header.
    pub const SET_COOKIE2: HeaderName = "set-cookie2";
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_name() {
        let name = HeaderName::from_slice("X-Custom-Header").unwrap();
        assert_eq!(name.as_str(), "x-custom-header");
        assert_eq!(name, "x-custom-header");
        assert!(name.eq_ignore_ascii_case("X-CUSTOM-header"));

        let name = HeaderName::from_slice(b"!#$%&'*+-.^_`|~09").unwrap();
        assert_eq!(name.as_str(), "!#$%&'*+-.^_`|~09");

        assert_eq!(HeaderName::from_slice(""), Err(HeaderError::Empty));
        assert_eq!(HeaderName::from_slice("a b"), Err(HeaderError::Invalid));
        assert_eq!(HeaderName::from_slice("a:"), Err(HeaderError::Invalid));
        assert_eq!(HeaderName::from_slice("a\r\n"), Err(HeaderError::Invalid));
        assert_eq!(HeaderName::from_slice("\u{e9}"), Err(HeaderError::Invalid));
        assert_eq!(HeaderName::from_slice("(a)"), Err(HeaderError::Invalid));
    }

    #[test]
    fn header_name_ordering() {
        let a = HeaderName::from_slice("A").unwrap();
        let abc = HeaderName::from_slice("abc").unwrap();
        let b = HeaderName::from_slice("b").unwrap();
        assert!(a < abc);
        assert!(abc < b);
        assert_eq!(standard::SET_COOKIE, HeaderName::from_slice("Set-Cookie").unwrap());
    }
}
