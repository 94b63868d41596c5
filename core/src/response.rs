//! Response access for an executed request.

use std::fmt;
use std::io::Read;

use tracing::debug;

use crate::codec::ImageDecoder;
use crate::error::ResponseError;
use crate::transport::Connection;

/// A successfully executed request wrapping one live connection.
///
/// At most one connection is live per value. `close` (or dropping the value)
/// releases it exactly once; reads after close fail with
/// [`ResponseError::Closed`] instead of panicking.
pub struct ExecutedRequest<C: Connection> {
    conn: Option<C>,
}

impl<C: Connection> ExecutedRequest<C> {
    pub(crate) fn new(conn: C) -> Self {
        Self { conn: Some(conn) }
    }

    /// The response stream.
    ///
    /// Prefers the success stream; for non-2xx exchanges falls back to the
    /// error stream, so callers always get something readable while the
    /// connection lives. Fails only when both streams are unavailable (the
    /// first fault is the reported cause) or after `close`.
    pub fn raw_stream(&mut self) -> Result<Box<dyn Read>, ResponseError> {
        let conn = self.conn.as_mut().ok_or(ResponseError::Closed)?;
        match conn.input_stream() {
            Ok(stream) => Ok(stream),
            Err(first) => match conn.error_stream() {
                Ok(stream) => {
                    debug!(%first, "success stream unavailable, using error stream");
                    Ok(stream)
                }
                Err(_) => Err(ResponseError::Transport(first)),
            },
        }
    }

    /// The full response decoded as UTF-8 (lossily).
    ///
    /// Line terminators are removed: lines are concatenated with no
    /// separator, so multi-line bodies lose their breaks. Use
    /// [`Self::raw_stream`] for byte-exact content.
    pub fn text(&mut self) -> Result<String, ResponseError> {
        let mut stream = self.raw_stream()?;
        let mut raw = Vec::new();
        stream.read_to_end(&mut raw)?;
        let text = String::from_utf8_lossy(&raw);
        Ok(text.lines().collect())
    }

    /// Decode the response as an image using `decoder`.
    pub fn image<D: ImageDecoder>(&mut self, decoder: &D) -> Result<D::Image, ResponseError> {
        let mut stream = self.raw_stream()?;
        decoder
            .decode(&mut stream)
            .map_err(|error| ResponseError::Decode(error.to_string()))
    }

    /// Whether the connection is still open.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Disconnect and release the connection.
    ///
    /// Idempotent: only the first call reaches the transport.
    pub fn close(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            conn.disconnect();
        }
    }
}

impl<C: Connection> Drop for ExecutedRequest<C> {
    fn drop(&mut self) {
        self.close();
    }
}

// Connections are not required to be `Debug`, so report only the lifecycle
// state.
impl<C: Connection> fmt::Debug for ExecutedRequest<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutedRequest")
            .field("open", &self.is_open())
            .finish()
    }
}
