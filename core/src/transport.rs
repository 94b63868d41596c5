//! Transport capability seam.
//!
//! # Design
//! The core never opens sockets itself; it drives a [`Connection`] through
//! the narrow contract below. One connection represents exactly one
//! request/response exchange and is owned by exactly one
//! [`crate::ExecutedRequest`]. A blocking adapter over `ureq` lives in
//! [`ureq`]; tests substitute scripted in-memory implementations.

pub mod ureq;

use std::io::Read;
use std::time::Duration;

use crate::error::TransportError;
use crate::method::Method;

/// Opens connections.
///
/// `open` must yield a fresh handle per call: the retry loop relies on never
/// reusing a half-configured connection.
pub trait Transport {
    type Conn: Connection;

    fn open(&self, url: &str) -> Result<Self::Conn, TransportError>;
}

/// One open request/response exchange.
///
/// Configuration calls happen before any stream is requested. `write_body`
/// covers the whole output sequence (enable output, write the bytes, flush
/// and close the write side) since streaming request bodies are out of
/// scope.
pub trait Connection {
    fn set_method(&mut self, method: Method) -> Result<(), TransportError>;

    /// Connect-phase timeout. Read timeouts are transport-defined.
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError>;

    /// Hint that a locally cached response may satisfy the request.
    fn set_use_cache(&mut self, use_cache: bool) -> Result<(), TransportError>;

    /// Append a header. Repeated names accumulate; nothing is replaced.
    fn set_header(&mut self, name: &str, value: &str) -> Result<(), TransportError>;

    /// Append a `Cache-Control` request directive, e.g. `only-if-cached`.
    fn add_cache_control(&mut self, directive: &str) -> Result<(), TransportError>;

    fn write_body(&mut self, body: &[u8]) -> Result<(), TransportError>;

    /// The success response stream. Fails for non-2xx exchanges.
    fn input_stream(&mut self) -> Result<Box<dyn Read>, TransportError>;

    /// The error response stream. Fails when the exchange succeeded.
    fn error_stream(&mut self) -> Result<Box<dyn Read>, TransportError>;

    /// Release the connection. Called at most once by its owner.
    fn disconnect(&mut self);
}
