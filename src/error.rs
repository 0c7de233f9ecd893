//! Error types that can occur during header related operation.

/// An error that can occur when validating header name or header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderError {
    /// Bytes is empty.
    Empty,
    /// Bytes contains invalid character.
    Invalid,
}

impl HeaderError {
    pub(crate) const fn message(&self) -> &'static str {
        match self {
            Self::Empty => "cannot be empty",
            Self::Invalid => "contains invalid byte",
        }
    }

    pub(crate) const fn panic_const(self) -> ! {
        panic!("{}",self.message())
    }
}

impl std::error::Error for HeaderError {}
impl std::fmt::Display for HeaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

// ===== Headers Error =====

/// An error returned from [`Headers`] operation.
///
/// All variants are reported as `TypeError` by a web runtime. Use [`is_validation`] and
/// [`is_guard`] to distinguish malformed input from mutation of immutable headers.
///
/// Mutating a forbidden header name under [`Guard::Request`], [`Guard::RequestNoCors`] or
/// [`Guard::Response`] is not an error, it is silently ignored.
///
/// [`Headers`]: crate::Headers
/// [`Guard::Request`]: crate::Guard::Request
/// [`Guard::RequestNoCors`]: crate::Guard::RequestNoCors
/// [`Guard::Response`]: crate::Guard::Response
/// [`is_validation`]: Error::is_validation
/// [`is_guard`]: Error::is_guard
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("invalid header name: {0}")]
    InvalidName(HeaderError),
    #[error("invalid header value: {0}")]
    InvalidValue(HeaderError),
    #[error("invalid headers init: {0}")]
    InvalidInit(InitError),
    #[error("headers are immutable")]
    Immutable,
}

impl Error {
    /// Returns `true` if the error is caused by malformed input.
    #[inline]
    pub const fn is_validation(&self) -> bool {
        !self.is_guard()
    }

    /// Returns `true` if the error is caused by mutating immutable headers.
    #[inline]
    pub const fn is_guard(&self) -> bool {
        matches!(self, Self::Immutable)
    }
}

/// Shape error of headers initializer.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum InitError {
    #[error("header pair must contain exactly two items, found {0}")]
    PairLength(usize),
    #[error("expected a sequence of header pairs")]
    NotPair,
    #[error("expected a sequence or a record")]
    Shape,
}

impl From<InitError> for Error {
    #[inline]
    fn from(v: InitError) -> Self {
        Self::InvalidInit(v)
    }
}
