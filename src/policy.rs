//! Forbidden and safelisted header tables.
use crate::{HeaderName, HeaderValue, matches, standard::*};

/// Header name tables consulted by [`Guard`][crate::Guard].
///
/// The owner of [`Headers`][crate::Headers], a request or a response, supplies the tables
/// appropriate to its role. [`Fetch`] implements the tables of the fetch standard.
pub trait Policy: Send + Sync {
    /// Returns `true` if the pair must not be modified under request guard.
    fn is_forbidden_request(&self, name: &HeaderName, value: &HeaderValue) -> bool;

    /// Returns `true` if the name must not be modified under response guard.
    fn is_forbidden_response(&self, name: &HeaderName) -> bool;

    /// Returns `true` if the name can be modified under request-no-cors guard.
    fn is_no_cors_safelisted_name(&self, name: &HeaderName) -> bool;

    /// Returns `true` if the pair can be stored under request-no-cors guard.
    fn is_no_cors_safelisted(&self, name: &HeaderName, value: &HeaderValue) -> bool;

    /// Returns `true` if the name is removed after each mutation under request-no-cors guard.
    fn is_privileged_no_cors(&self, name: &HeaderName) -> bool;
}

/// Fetch standard header tables.
///
/// <https://fetch.spec.whatwg.org/#forbidden-request-header>
#[derive(Clone, Copy, Debug, Default)]
pub struct Fetch;

/// Maximum combined value length of a CORS-safelisted request-header.
const MAX_SAFELISTED_LEN: usize = 128;

const FORBIDDEN_REQUEST: [HeaderName; 21] = [
    ACCEPT_CHARSET,
    ACCEPT_ENCODING,
    ACCESS_CONTROL_REQUEST_HEADERS,
    ACCESS_CONTROL_REQUEST_METHOD,
    CONNECTION,
    CONTENT_LENGTH,
    COOKIE,
    COOKIE2,
    DATE,
    DNT,
    EXPECT,
    HOST,
    KEEP_ALIVE,
    ORIGIN,
    REFERER,
    SET_COOKIE,
    TE,
    TRAILER,
    TRANSFER_ENCODING,
    UPGRADE,
    VIA,
];

const METHOD_OVERRIDE: [HeaderName; 3] = [X_HTTP_METHOD, X_HTTP_METHOD_OVERRIDE, X_METHOD_OVERRIDE];

const FORBIDDEN_RESPONSE: [HeaderName; 2] = [SET_COOKIE, SET_COOKIE2];

const NO_CORS_SAFELISTED: [HeaderName; 4] = [ACCEPT, ACCEPT_LANGUAGE, CONTENT_LANGUAGE, CONTENT_TYPE];

impl Policy for Fetch {
    fn is_forbidden_request(&self, name: &HeaderName, value: &HeaderValue) -> bool {
        if FORBIDDEN_REQUEST.contains(name) {
            return true;
        }

        let bytes = name.as_bytes();
        if bytes.starts_with(b"proxy-") || bytes.starts_with(b"sec-") {
            return true;
        }

        METHOD_OVERRIDE.contains(name)
            && value
                .as_bytes()
                .split(|&b| b == b',')
                .any(|method| is_forbidden_method(matches::trim_whitespace(method)))
    }

    fn is_forbidden_response(&self, name: &HeaderName) -> bool {
        FORBIDDEN_RESPONSE.contains(name)
    }

    fn is_no_cors_safelisted_name(&self, name: &HeaderName) -> bool {
        NO_CORS_SAFELISTED.contains(name)
    }

    fn is_no_cors_safelisted(&self, name: &HeaderName, value: &HeaderValue) -> bool {
        self.is_no_cors_safelisted_name(name) && is_cors_safelisted(name, value)
    }

    fn is_privileged_no_cors(&self, name: &HeaderName) -> bool {
        *name == RANGE
    }
}

/// <https://fetch.spec.whatwg.org/#cors-safelisted-request-header>
fn is_cors_safelisted(name: &HeaderName, value: &HeaderValue) -> bool {
    let bytes = value.as_bytes();

    if bytes.len() > MAX_SAFELISTED_LEN {
        return false;
    }

    if *name == ACCEPT {
        !bytes.iter().any(|&b| matches::is_cors_unsafe(b))
    } else if *name == ACCEPT_LANGUAGE || *name == CONTENT_LANGUAGE {
        bytes.iter().all(|&b| matches::is_cors_language(b))
    } else if *name == CONTENT_TYPE {
        if bytes.iter().any(|&b| matches::is_cors_unsafe(b)) {
            return false;
        }
        matches!(
            mime_essence(bytes).as_deref(),
            Some(b"application/x-www-form-urlencoded" | b"multipart/form-data" | b"text/plain")
        )
    } else {
        false
    }
}

/// Lowercase `type/subtype` of a MIME type, parameters are ignored.
fn mime_essence(bytes: &[u8]) -> Option<Vec<u8>> {
    let essence = match bytes.iter().position(|&b| b == b';') {
        Some(semi) => &bytes[..semi],
        None => bytes,
    };
    let essence = matches::trim_whitespace(essence);

    let slash = essence.iter().position(|&b| b == b'/')?;
    let (kind, subtype) = (&essence[..slash], &essence[slash + 1..]);

    let valid = |part: &[u8]| !part.is_empty() && part.iter().all(|&b| matches::is_token(b));
    if !valid(kind) || !valid(subtype) {
        return None;
    }

    Some(essence.to_ascii_lowercase())
}

const FORBIDDEN_METHODS: [&[u8]; 3] = [b"CONNECT", b"TRACE", b"TRACK"];

fn is_forbidden_method(method: &[u8]) -> bool {
    FORBIDDEN_METHODS
        .iter()
        .any(|forbidden| method.eq_ignore_ascii_case(forbidden))
}

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> HeaderName {
        HeaderName::from_slice(s).unwrap()
    }

    fn value(s: &str) -> HeaderValue {
        HeaderValue::from_slice(s).unwrap()
    }

    #[test]
    fn forbidden_request() {
        let empty = value("");
        for n in ["Host", "cookie", "Set-Cookie", "proxy-authorization", "Sec-Fetch-Mode", "via"] {
            assert!(Fetch.is_forbidden_request(&name(n), &empty), "{n}");
        }
        for n in ["accept", "x-custom", "authorization", "proxy", "secret"] {
            assert!(!Fetch.is_forbidden_request(&name(n), &empty), "{n}");
        }

        let n = name("X-HTTP-Method-Override");
        assert!(Fetch.is_forbidden_request(&n, &value("GET, trace")));
        assert!(Fetch.is_forbidden_request(&n, &value("connect")));
        assert!(!Fetch.is_forbidden_request(&n, &value("GET, POST")));
        assert!(!Fetch.is_forbidden_request(&n, &empty));
    }

    #[test]
    fn standard_tables() {
        let empty = value("");
        for n in FORBIDDEN_REQUEST {
            let upper = name(&n.as_str().to_ascii_uppercase());
            assert!(Fetch.is_forbidden_request(&upper, &empty), "{}", n.as_str());
        }
        for n in NO_CORS_SAFELISTED {
            assert!(Fetch.is_no_cors_safelisted_name(&n), "{}", n.as_str());
            assert!(!Fetch.is_forbidden_request(&n, &empty), "{}", n.as_str());
        }
        assert!(Fetch.is_forbidden_response(&SET_COOKIE2));
        assert!(!Fetch.is_forbidden_request(&SET_COOKIE2, &empty));
        assert!(Fetch.is_privileged_no_cors(&name("Range")));
        assert!(!Fetch.is_no_cors_safelisted_name(&RANGE));
    }

    #[test]
    fn forbidden_response() {
        assert!(Fetch.is_forbidden_response(&name("set-cookie")));
        assert!(Fetch.is_forbidden_response(&name("Set-Cookie2")));
        assert!(!Fetch.is_forbidden_response(&name("cookie")));
    }

    #[test]
    fn no_cors_safelist() {
        assert!(Fetch.is_no_cors_safelisted(&name("accept"), &value("text/html, */*")));
        assert!(!Fetch.is_no_cors_safelisted(&name("accept"), &value("text/html\"")));
        assert!(Fetch.is_no_cors_safelisted(&name("accept-language"), &value("en-US;q=0.9, *")));
        assert!(!Fetch.is_no_cors_safelisted(&name("content-language"), &value("en/US")));
        assert!(Fetch.is_no_cors_safelisted(&name("content-type"), &value("Text/Plain; charset=utf-8")));
        assert!(Fetch.is_no_cors_safelisted(&name("content-type"), &value("multipart/form-data")));
        assert!(!Fetch.is_no_cors_safelisted(&name("content-type"), &value("application/json")));
        assert!(!Fetch.is_no_cors_safelisted(&name("content-type"), &value("text")));
        assert!(!Fetch.is_no_cors_safelisted(&name("x-custom"), &value("a")));
        assert!(!Fetch.is_no_cors_safelisted(&name("accept"), &value(&"a".repeat(129))));

        assert!(Fetch.is_privileged_no_cors(&name("Range")));
        assert!(!Fetch.is_privileged_no_cors(&name("accept")));
    }
}
