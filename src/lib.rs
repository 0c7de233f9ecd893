//! HTTP Headers Container.
//!
//! An ordered multimap of HTTP header fields with case-insensitive names, values combined on
//! read, mutation restricted by a [`Guard`] and sorted snapshot iteration.
#![warn(missing_debug_implementations)]

mod log;
mod matches;

mod error;
mod name;
mod value;
mod list;
mod guard;
mod policy;
mod init;
mod headers;
mod iter;

pub use error::{Error, HeaderError, InitError};
pub use name::{HeaderName, standard};
pub use value::HeaderValue;
pub use list::{HeaderField, HeaderList};
pub use guard::{Decision, Guard, Mutation};
pub use policy::{Fetch, Policy};
pub use init::{Init, InitValue};
pub use headers::Headers;
pub use iter::{Entries, Keys, Values};
