//! Homework-review API access.
//!
//! This module defines the [`HttpFetch`] capability the client is built on,
//! the payload types ([`ApiResponse`], [`HomeworkRecord`]) and the two steps
//! that turn a poll into typed data: [`ApiClient::poll`] and
//! [`validate::validate`].
//!
//! ## For contributors — swapping the transport
//!
//! The client never talks to `reqwest` directly.  It only needs something
//! that implements [`HttpFetch`]; [`ReqwestFetch`] is the production one and
//! the tests use an in-memory fake.  To add another transport:
//!
//! 1. Define a struct holding whatever the transport needs.
//! 2. Implement [`HttpFetch`] for it.
//! 3. Construct it in `main.rs` and hand it to [`ApiClient::new`].

mod client;
mod homework;
pub mod validate;

pub use client::{ApiClient, ReqwestFetch};
pub use homework::{ApiResponse, HomeworkRecord};

use crate::error::TransportError;

/// Status code and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can perform a GET request.
///
/// ```ignore
/// pub struct MyFetch;
///
/// impl HttpFetch for MyFetch {
///     fn get(&self, url: &str, headers: &[(&str, String)], query: &[(&str, String)])
///         -> Result<HttpResponse, TransportError>
///     {
///         // Perform the request; only network-level failures are errors.
///         todo!()
///     }
/// }
/// ```
pub trait HttpFetch {
    /// Issue a GET to `url` with the given headers and query parameters.
    ///
    /// A response with any status code is `Ok`; interpreting the status is
    /// the caller's job.  Implementations must fail in bounded time.
    fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
        query: &[(&str, String)],
    ) -> Result<HttpResponse, TransportError>;
}
