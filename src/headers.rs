use bytes::Bytes;

use crate::{
    Entries, Error, Fetch, Guard, HeaderList, HeaderName, HeaderValue, Init, Keys, Policy, Values,
    guard::{Decision, Mutation},
    log::{debug, warning},
    name::standard::SET_COOKIE,
};

/// HTTP Headers container.
///
/// Names are validated and normalized to lowercase, values are validated and stripped of
/// surrounding whitespace. Multiple values of the same name are stored separately and combined
/// with `", "` on read.
///
/// Mutation is restricted by [`Guard`], which is assigned by the owner of the headers.
///
/// ```rust
/// use fetch_headers::Headers;
///
/// let mut headers = Headers::new();
/// headers.append("Accept", "text/html").unwrap();
/// headers.append("accept", "*/*").unwrap();
/// headers.set("X-Id", "1").unwrap();
///
/// assert_eq!(headers.get("ACCEPT").unwrap().unwrap(), "text/html, */*");
///
/// let names: Vec<_> = headers.keys().map(|name| name.to_string()).collect();
/// assert_eq!(names, ["accept", "x-id"]);
/// ```
#[derive(Clone)]
pub struct Headers {
    list: HeaderList,
    guard: Guard,
    policy: &'static dyn Policy,
}

impl Default for Headers {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Headers {
    /// Type tag used by the object to string conversion.
    pub const TAG: &'static str = "Headers";

    /// Create new empty [`Headers`] with [`Guard::None`].
    ///
    /// This function does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self::with_policy(Guard::None, &Fetch)
    }

    /// Create new empty [`Headers`] with given guard and [`Fetch`] policy.
    ///
    /// This is the construction hook for the owner of the headers, such as a request or a
    /// response. The guard can not be changed by the mutation API afterwards.
    #[inline]
    pub const fn with_guard(guard: Guard) -> Self {
        Self::with_policy(guard, &Fetch)
    }

    /// Create new empty [`Headers`] with given guard and forbidden name tables.
    #[inline]
    pub const fn with_policy(guard: Guard, policy: &'static dyn Policy) -> Self {
        Self {
            list: HeaderList::new(),
            guard,
            policy,
        }
    }

    /// Replace the guard, consuming the headers.
    ///
    /// This is the owner-only hook. A request or a response keeps its headers private, fills
    /// them, then assigns the final guard once, for example [`Guard::Immutable`]. Code that only
    /// receives `&mut Headers` goes through the mutation API, which never changes the guard.
    ///
    /// The guard is not checked here: any guard, including [`Guard::None`], can be assigned.
    /// Do not hand out owned headers whose guard must hold.
    #[inline]
    pub fn into_guarded(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    /// Returns the current guard.
    #[inline]
    pub const fn guard(&self) -> Guard {
        self.guard
    }

    /// Returns the underlying header list.
    #[inline]
    pub const fn list(&self) -> &HeaderList {
        &self.list
    }

    /// Returns the number of stored fields, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if headers has no field.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Append every pair of `init`, in order.
    ///
    /// Pairs are subject to validation and the current guard. Processing stops at the first
    /// error, pairs before it stay appended.
    ///
    /// # Errors
    ///
    /// Returns error if a pair contains invalid name or value, or headers is immutable.
    pub fn fill<I: Into<Init>>(&mut self, init: I) -> Result<(), Error> {
        for (name, value) in init.into().into_pairs() {
            self.append(name, value)?;
        }
        Ok(())
    }
}

// ===== Lookup =====

impl Headers {
    /// Returns all values of the given header name joined with `", "`.
    ///
    /// Returns `Ok(None)` if no value is present.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is not a valid header name.
    #[inline]
    pub fn get<N: AsRef<[u8]>>(&self, name: N) -> Result<Option<HeaderValue>, Error> {
        let name = validate_name(name)?;
        Ok(self.list.get(&name))
    }

    /// Returns `true` if headers contains a value for the given header name.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is not a valid header name.
    #[inline]
    pub fn has<N: AsRef<[u8]>>(&self, name: N) -> Result<bool, Error> {
        let name = validate_name(name)?;
        Ok(self.list.contains(&name))
    }

    /// Returns every stored value of the given header name without combining them.
    ///
    /// # Errors
    ///
    /// Returns error if `name` is not a valid header name.
    pub fn get_all<N: AsRef<[u8]>>(&self, name: N) -> Result<Vec<HeaderValue>, Error> {
        let name = validate_name(name)?;
        Ok(self.list.get_all(&name).cloned().collect())
    }

    /// Returns every `set-cookie` value as a separate item, in list order.
    pub fn get_set_cookie(&self) -> Vec<HeaderValue> {
        self.list.get_all(&SET_COOKIE).cloned().collect()
    }
}

// ===== Mutation =====

impl Headers {
    /// Append a header value, keeping existing values of the same name.
    ///
    /// Mutation of a name not permitted by the guard is silently ignored.
    ///
    /// # Errors
    ///
    /// Returns error if the name or value is invalid, or the headers is immutable.
    pub fn append<N, V>(&mut self, name: N, value: V) -> Result<(), Error>
    where
        N: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let name = validate_name(name)?;
        let value = validate_value(value)?;

        if self.check(Mutation::Append(&value), &name)? {
            self.list.append(name, value);
            self.remove_privileged_no_cors();
        }

        Ok(())
    }

    /// Set a header value, replacing all existing values of the same name.
    ///
    /// Mutation of a name not permitted by the guard is silently ignored.
    ///
    /// # Errors
    ///
    /// Returns error if the name or value is invalid, or the headers is immutable.
    pub fn set<N, V>(&mut self, name: N, value: V) -> Result<(), Error>
    where
        N: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let name = validate_name(name)?;
        let value = validate_value(value)?;

        if self.check(Mutation::Set(&value), &name)? {
            self.list.set(name, value);
            self.remove_privileged_no_cors();
        }

        Ok(())
    }

    /// Removes all values of the given header name.
    ///
    /// Removing an absent name, or a name not permitted by the guard, does nothing.
    ///
    /// # Errors
    ///
    /// Returns error if the name is invalid, or the headers is immutable.
    pub fn delete<N: AsRef<[u8]>>(&mut self, name: N) -> Result<(), Error> {
        let name = validate_name(name)?;

        if self.check(Mutation::Delete, &name)? && self.list.delete(&name) {
            self.remove_privileged_no_cors();
        }

        Ok(())
    }

    fn check(&self, mutation: Mutation<'_>, name: &HeaderName) -> Result<bool, Error> {
        match self.guard.decide(mutation, name, &self.list, self.policy) {
            Decision::Allow => Ok(true),
            Decision::Drop => {
                debug!("ignoring {mutation:?} of {name} under {} guard", self.guard);
                Ok(false)
            }
            Decision::Throw => {
                warning!("rejecting {mutation:?} of {name} under {} guard", self.guard);
                Err(Error::Immutable)
            }
        }
    }

    fn remove_privileged_no_cors(&mut self) {
        if self.guard == Guard::RequestNoCors {
            let policy = self.policy;
            self.list.retain(|field| !policy.is_privileged_no_cors(field.name()));
        }
    }
}

fn validate_name<N: AsRef<[u8]>>(name: N) -> Result<HeaderName, Error> {
    HeaderName::from_slice(name).map_err(Error::InvalidName)
}

fn validate_value<V: AsRef<[u8]>>(value: V) -> Result<HeaderValue, Error> {
    HeaderValue::from_slice(value).map_err(Error::InvalidValue)
}

// ===== Iteration =====

impl Headers {
    /// Returns an iterator over header pairs, sorted by name with values combined.
    ///
    /// The pairs are captured at this call. Mutating the headers while iterating does not affect
    /// the returned iterator.
    #[inline]
    pub fn entries(&self) -> Entries {
        Entries::new(self.list.sort_and_combine())
    }

    /// Returns an iterator over sorted header names.
    #[inline]
    pub fn keys(&self) -> Keys {
        Keys::new(self.entries())
    }

    /// Returns an iterator over combined header values, in name order.
    #[inline]
    pub fn values(&self) -> Values {
        Values::new(self.entries())
    }

    /// Calls `f` with each value, name and the headers itself.
    ///
    /// Pairs are captured before the first call, so `f` may mutate the headers without affecting
    /// which pairs are visited.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(HeaderValue, HeaderName, &mut Headers),
    {
        for (name, value) in self.entries() {
            f(value, name, self);
        }
    }

    /// Like [`for_each`][Headers::for_each], with `this` passed as the receiver of `f`.
    pub fn for_each_with<T, F>(&mut self, this: &mut T, mut f: F)
    where
        T: ?Sized,
        F: FnMut(&mut T, HeaderValue, HeaderName, &mut Headers),
    {
        for (name, value) in self.entries() {
            f(this, value, name, self);
        }
    }

    /// Like [`for_each`][Headers::for_each], stopping at the first error returned by `f`.
    ///
    /// # Errors
    ///
    /// Returns the first error returned by `f`.
    pub fn try_for_each<F, E>(&mut self, mut f: F) -> Result<(), E>
    where
        F: FnMut(HeaderValue, HeaderName, &mut Headers) -> Result<(), E>,
    {
        for (name, value) in self.entries() {
            f(value, name, self)?;
        }
        Ok(())
    }
}

// ===== Traits =====

impl TryFrom<Init> for Headers {
    type Error = Error;

    /// Construct with [`Guard::None`] and append every pair of `init`.
    fn try_from(init: Init) -> Result<Self, Self::Error> {
        let mut headers = Headers::new();
        headers.fill(init)?;
        Ok(headers)
    }
}

impl From<&Headers> for Init {
    fn from(headers: &Headers) -> Self {
        Init::Pairs(
            headers
                .entries()
                .map(|(name, value)| (name.as_str().into(), Bytes::from(value).into()))
                .collect(),
        )
    }
}

#[cfg(feature = "json")]
impl TryFrom<serde_json::Value> for Headers {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        Headers::try_from(Init::try_from(value)?)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Headers {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (name, value) in entries {
            map.serialize_entry(&name, &value)?;
        }
        map.end()
    }
}

impl std::fmt::Display for Headers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[object {}]", Self::TAG)
    }
}

impl std::fmt::Debug for Headers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Headers")
            .field("guard", &self.guard)
            .field("list", &self.list)
            .finish()
    }
}
