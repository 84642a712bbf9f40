//! Cache module for storing API responses to disk
//!
//! Responses are keyed by endpoint and query parameters and kept in a single
//! JSON file. Entries never expire; a miss triggers a live call whose decoded
//! body is stored and the whole file rewritten.

mod dispatcher;
mod key;
mod store;

pub use dispatcher::{
    CachedClient, FetchError, HttpTransport, Params, Transport, TransportError,
};
pub use key::construct_key;
pub use store::{CacheError, CacheMap, CacheStore, CACHE_FILENAME};

#[cfg(test)]
pub(crate) use dispatcher::tests::{serve_locally, FakeTransport};
