//! Request execution: URL composition and the bounded retry loop.
//!
//! # Design
//! `execute` is a pure function of an immutable [`Request`]. Each attempt
//! opens a fresh connection and runs the full configuration sequence; a
//! half-configured connection is disconnected and never reused. The fault of
//! the last attempt survives into [`RequestError::Exhausted`] instead of
//! being swallowed.

use tracing::{debug, warn};
use url::Url;

use crate::error::{RequestError, TransportError};
use crate::request::Request;
use crate::response::ExecutedRequest;
use crate::transport::{Connection, Transport};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const ONLY_IF_CACHED: &str = "only-if-cached";

/// Execute `request` against `transport`.
///
/// Makes up to `request.attempts()` attempts; the first success stops the
/// loop. A malformed URL fails immediately without consuming any attempt.
/// Each attempt restarts the nominal timeout window; there is no shared
/// deadline across retries.
pub fn execute<T: Transport>(
    transport: &T,
    request: &Request,
) -> Result<ExecutedRequest<T::Conn>, RequestError> {
    let url = request.full_url();
    if let Err(source) = Url::parse(&url) {
        return Err(RequestError::InvalidUrl { url, source });
    }

    let attempts = request.attempts();
    let mut attempt = 0;
    loop {
        attempt += 1;
        debug!(%url, method = %request.method(), attempt, attempts, "opening connection");
        match attempt_once(transport, request, &url) {
            Ok(conn) => return Ok(ExecutedRequest::new(conn)),
            Err(error) if attempt < attempts => {
                warn!(%url, attempt, attempts, %error, "attempt failed, retrying");
            }
            Err(error) => {
                warn!(%url, attempt, attempts, %error, "attempt failed, giving up");
                return Err(RequestError::Exhausted {
                    attempts,
                    source: error,
                });
            }
        }
    }
}

/// One full open + configure + write sequence on a fresh connection.
///
/// On failure the connection is disconnected before the error propagates,
/// so no half-configured handle leaks.
fn attempt_once<T: Transport>(
    transport: &T,
    request: &Request,
    url: &str,
) -> Result<T::Conn, TransportError> {
    let mut conn = transport.open(url)?;
    match configure(&mut conn, request) {
        Ok(()) => Ok(conn),
        Err(error) => {
            conn.disconnect();
            Err(error)
        }
    }
}

/// Apply the whole request configuration in the contract's order: cache
/// flag, method, timeout, headers, form override, body, cache-control
/// directive.
fn configure<C: Connection>(conn: &mut C, request: &Request) -> Result<(), TransportError> {
    conn.set_use_cache(request.use_cache())?;
    conn.set_method(request.method())?;
    conn.set_timeout(request.timeout())?;
    for (name, value) in request.headers() {
        conn.set_header(name, value)?;
    }
    if request.form_overrides_body() {
        conn.set_header("Content-Type", FORM_CONTENT_TYPE)?;
    }
    if let Some(body) = request.effective_body() {
        conn.write_body(body.as_bytes())?;
    }
    if request.force_cache() {
        conn.add_cache_control(ONLY_IF_CACHED)?;
    }
    Ok(())
}
