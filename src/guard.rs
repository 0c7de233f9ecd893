use crate::{HeaderList, HeaderName, HeaderValue, Policy};

/// Headers mutability mode.
///
/// Guard is assigned by the owner of [`Headers`][crate::Headers] and cannot be changed through
/// the mutation API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Guard {
    /// All mutation permitted.
    #[default]
    None,
    /// All mutation rejected with [`Error::Immutable`][crate::Error::Immutable].
    Immutable,
    /// Mutation of forbidden request-header is ignored.
    Request,
    /// Only CORS-safelisted request-header can be mutated, others are ignored.
    RequestNoCors,
    /// Mutation of forbidden response-header name is ignored.
    Response,
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Mutation fails with an error.
    Throw,
    /// Mutation is silently ignored.
    Drop,
    /// Mutation proceeds.
    Allow,
}

/// Mutation operation checked by [`Guard::decide`].
#[derive(Clone, Copy, Debug)]
pub enum Mutation<'a> {
    Append(&'a HeaderValue),
    Set(&'a HeaderValue),
    Delete,
}

impl Guard {
    /// Returns the decision for a mutation of `name`.
    ///
    /// `list` is the current header list, used to compute the would-be combined value of an
    /// append under [`Guard::RequestNoCors`].
    pub fn decide(
        self,
        mutation: Mutation<'_>,
        name: &HeaderName,
        list: &HeaderList,
        policy: &dyn Policy,
    ) -> Decision {
        let allow = match self {
            Guard::None => true,
            Guard::Immutable => return Decision::Throw,
            Guard::Request => match mutation {
                Mutation::Append(value) | Mutation::Set(value) => {
                    !policy.is_forbidden_request(name, value)
                }
                Mutation::Delete => !policy.is_forbidden_request(name, &HeaderValue::EMPTY),
            },
            Guard::RequestNoCors => match mutation {
                Mutation::Append(value) => {
                    let combined = match list.get(name) {
                        Some(current) => HeaderValue::combine([&current, value]),
                        None => Some(value.clone()),
                    };
                    combined.is_some_and(|combined| policy.is_no_cors_safelisted(name, &combined))
                }
                Mutation::Set(value) => policy.is_no_cors_safelisted(name, value),
                Mutation::Delete => {
                    policy.is_no_cors_safelisted_name(name) || policy.is_privileged_no_cors(name)
                }
            },
            Guard::Response => !policy.is_forbidden_response(name),
        };

        if allow { Decision::Allow } else { Decision::Drop }
    }
}

impl std::fmt::Display for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Guard::None => "none",
            Guard::Immutable => "immutable",
            Guard::Request => "request",
            Guard::RequestNoCors => "request-no-cors",
            Guard::Response => "response",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Fetch;

    fn name(s: &str) -> HeaderName {
        HeaderName::from_slice(s).unwrap()
    }

    fn value(s: &str) -> HeaderValue {
        HeaderValue::from_slice(s).unwrap()
    }

    #[test]
    fn decision_table() {
        let list = HeaderList::new();
        let v = value("v");
        let host = name("host");
        let cookie = name("set-cookie");
        let custom = name("x-custom");

        for mutation in [Mutation::Append(&v), Mutation::Set(&v), Mutation::Delete] {
            assert_eq!(Guard::None.decide(mutation, &host, &list, &Fetch), Decision::Allow);
            assert_eq!(Guard::Immutable.decide(mutation, &custom, &list, &Fetch), Decision::Throw);

            assert_eq!(Guard::Request.decide(mutation, &host, &list, &Fetch), Decision::Drop);
            assert_eq!(Guard::Request.decide(mutation, &custom, &list, &Fetch), Decision::Allow);

            assert_eq!(Guard::Response.decide(mutation, &cookie, &list, &Fetch), Decision::Drop);
            assert_eq!(Guard::Response.decide(mutation, &host, &list, &Fetch), Decision::Allow);

            assert_eq!(Guard::RequestNoCors.decide(mutation, &custom, &list, &Fetch), Decision::Drop);
        }
    }

    #[test]
    fn no_cors_append_checks_combined_value() {
        let mut list = HeaderList::new();
        let accept = name("accept");
        let long = value(&"a".repeat(100));

        let decision = Guard::RequestNoCors.decide(Mutation::Append(&long), &accept, &list, &Fetch);
        assert_eq!(decision, Decision::Allow);

        list.append(accept.clone(), long.clone());

        let decision = Guard::RequestNoCors.decide(Mutation::Append(&long), &accept, &list, &Fetch);
        assert_eq!(decision, Decision::Drop);

        let decision = Guard::RequestNoCors.decide(Mutation::Set(&long), &accept, &list, &Fetch);
        assert_eq!(decision, Decision::Allow);

        let decision = Guard::RequestNoCors.decide(Mutation::Delete, &name("range"), &list, &Fetch);
        assert_eq!(decision, Decision::Allow);
    }
}
