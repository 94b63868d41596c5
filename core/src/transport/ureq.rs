//! Blocking transport adapter over `ureq`.
//!
//! # Design
//! `ureq` issues a request in one shot, while the [`Connection`] contract
//! configures a handle incrementally. The adapter bridges the two by
//! accumulating configuration and deferring the wire exchange until the
//! first stream is requested, then buffering the whole response body. 2xx
//! bodies feed `input_stream`; everything else feeds `error_stream`,
//! mirroring the success/error stream split of classic connection APIs.
//!
//! The use-cache flag is recorded but inert; the adapter keeps no local
//! cache. Cache-control directives go out as request `Cache-Control`
//! headers, which is what they mean on the wire anyway.

use std::io::{Cursor, Read};
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use crate::error::TransportError;
use crate::method::Method;
use crate::transport::{Connection, Transport};

/// Opens [`UreqConnection`]s. Stateless: one agent is built per exchange so
/// each connection carries its own timeout configuration.
#[derive(Debug, Default, Clone, Copy)]
pub struct UreqTransport;

/// One deferred exchange over `ureq`.
pub struct UreqConnection {
    url: String,
    method: Method,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    use_cache: bool,
    exchange: Option<Exchange>,
}

/// The buffered result of the wire exchange.
struct Exchange {
    status: u16,
    body: Vec<u8>,
}

impl Transport for UreqTransport {
    type Conn = UreqConnection;

    fn open(&self, url: &str) -> Result<UreqConnection, TransportError> {
        Ok(UreqConnection {
            url: url.to_string(),
            method: Method::Get,
            timeout: None,
            headers: Vec::new(),
            body: None,
            use_cache: false,
            exchange: None,
        })
    }
}

/// Apply accumulated headers to a request builder in either body state.
fn apply_headers<Any>(
    mut builder: ureq::RequestBuilder<Any>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<Any> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn map_ureq_error(error: ureq::Error) -> TransportError {
    match error {
        ureq::Error::Io(io) => TransportError::Io(io),
        other => TransportError::Protocol(other.to_string()),
    }
}

impl UreqConnection {
    /// Perform the exchange if it has not happened yet. After a successful
    /// return `self.exchange` is populated until `disconnect`.
    fn ensure_sent(&mut self) -> Result<(), TransportError> {
        if self.exchange.is_none() {
            self.exchange = Some(self.perform()?);
        }
        Ok(())
    }

    /// One wire exchange with the accumulated configuration.
    fn perform(&self) -> Result<Exchange, TransportError> {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(self.timeout)
            .build()
            .new_agent();

        let result = match (self.method, self.body.as_deref()) {
            (Method::Post, body) => apply_headers(agent.post(&self.url), &self.headers)
                .send(body.unwrap_or_default()),
            (Method::Put, body) => apply_headers(agent.put(&self.url), &self.headers)
                .send(body.unwrap_or_default()),
            (method, Some(_)) => {
                return Err(TransportError::Protocol(format!(
                    "request body not supported for {method}"
                )));
            }
            (Method::Get, None) => apply_headers(agent.get(&self.url), &self.headers).call(),
            (Method::Delete, None) => {
                apply_headers(agent.delete(&self.url), &self.headers).call()
            }
            (Method::Head, None) => apply_headers(agent.head(&self.url), &self.headers).call(),
        };

        let mut response = result.map_err(map_ureq_error)?;
        let status = response.status().as_u16();
        let body = response.body_mut().read_to_vec().map_err(map_ureq_error)?;
        debug!(
            url = %self.url,
            status,
            bytes = body.len(),
            use_cache = self.use_cache,
            "exchange complete"
        );
        Ok(Exchange { status, body })
    }
}

impl Connection for UreqConnection {
    fn set_method(&mut self, method: Method) -> Result<(), TransportError> {
        self.method = method;
        Ok(())
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), TransportError> {
        self.timeout = Some(timeout);
        Ok(())
    }

    fn set_use_cache(&mut self, use_cache: bool) -> Result<(), TransportError> {
        self.use_cache = use_cache;
        Ok(())
    }

    fn set_header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        self.headers.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn add_cache_control(&mut self, directive: &str) -> Result<(), TransportError> {
        self.headers
            .push(("Cache-Control".to_string(), directive.to_string()));
        Ok(())
    }

    fn write_body(&mut self, body: &[u8]) -> Result<(), TransportError> {
        self.body = Some(body.to_vec());
        Ok(())
    }

    fn input_stream(&mut self) -> Result<Box<dyn Read>, TransportError> {
        self.ensure_sent()?;
        let Some(exchange) = &self.exchange else {
            return Err(TransportError::Protocol("connection released".to_string()));
        };
        if (200..300).contains(&exchange.status) {
            Ok(Box::new(Cursor::new(exchange.body.clone())))
        } else {
            Err(TransportError::Protocol(format!(
                "http status {}",
                exchange.status
            )))
        }
    }

    fn error_stream(&mut self) -> Result<Box<dyn Read>, TransportError> {
        self.ensure_sent()?;
        let Some(exchange) = &self.exchange else {
            return Err(TransportError::Protocol("connection released".to_string()));
        };
        if (200..300).contains(&exchange.status) {
            Err(TransportError::Protocol(
                "no error stream for a successful exchange".to_string(),
            ))
        } else {
            Ok(Box::new(Cursor::new(exchange.body.clone())))
        }
    }

    fn disconnect(&mut self) {
        // Buffered exchange; dropping the buffer is the whole teardown.
        self.exchange = None;
    }
}
