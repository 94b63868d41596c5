//! Error types for the request pipeline.
//!
//! # Design
//! Each stage keeps a typed cause: transport-level faults, execution
//! failures, and response-read failures are distinct types, so callers can
//! tell "the URL never parsed" from "every attempt failed" from "the read
//! broke." Causes travel through `#[source]` rather than being flattened
//! into strings.

use std::io;

use thiserror::Error;

/// Fault reported by a transport implementation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection rejected a configuration call or the exchange violated
    /// the protocol (unsupported method/body combination, bad status, ...).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An I/O failure while opening, writing, or reading.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Why `execute` could not produce an [`crate::ExecutedRequest`].
#[derive(Debug, Error)]
pub enum RequestError {
    /// The composed URL failed to parse. Reported before any attempt is
    /// made and never retried.
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Every attempt failed. The fault of the last attempt is preserved.
    #[error("request failed after {attempts} attempt(s): {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: TransportError,
    },
}

/// Why reading from an executed request failed.
#[derive(Debug, Error)]
pub enum ResponseError {
    /// The connection was already closed; no further reads are possible.
    #[error("connection already closed")]
    Closed,

    /// Neither response stream could be opened.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Reading from an open stream failed.
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    /// The image codec rejected the content.
    #[error("image decode failed: {0}")]
    Decode(String),
}
