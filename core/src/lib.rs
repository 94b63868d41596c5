//! Declarative, blocking HTTP request core.
//!
//! # Overview
//! A caller describes a request as an immutable [`Request`] value (URL,
//! method, query parameters, form fields, headers, body, cache policy,
//! timeout, attempt count) and executes it against a pluggable
//! [`Transport`], receiving an [`ExecutedRequest`] from which the response
//! can be read as a raw stream, text, or a decoded image.
//!
//! # Design
//! - `Request` is immutable and [`execute`](crate::execute::execute) is a
//!   pure function of it, so retried attempts are referentially transparent.
//! - The transport and the image codec are trait seams; the core never opens
//!   sockets itself. A blocking `ureq` adapter ships in
//!   [`transport::ureq`].
//! - Every attempt runs on a fresh connection; exhaustion preserves the last
//!   fault as a typed [`RequestError`] instead of a silent absent result.
//! - All network I/O blocks the calling thread; there is no internal task or
//!   thread creation.

pub mod codec;
pub mod error;
pub mod execute;
pub mod method;
pub mod params;
pub mod request;
pub mod response;
pub mod transport;

pub use codec::ImageDecoder;
pub use error::{RequestError, ResponseError, TransportError};
pub use execute::execute;
pub use method::Method;
pub use request::{Request, RequestBuilder, DEFAULT_TIMEOUT};
pub use response::ExecutedRequest;
pub use transport::{Connection, Transport};
