//! End-to-end behavior over real HTTP: the `ureq` transport driving the
//! live mock server.
//!
//! # Design
//! Starts the mock server on a random port (current-thread tokio runtime on
//! a background thread), then exercises the full pipeline over the wire
//! through `UreqTransport`: URL composition, form encoding, headers, cache
//! directives, error streams, text and image reads.

use std::io::Read;
use std::net::SocketAddr;

use fetch_core::transport::ureq::UreqTransport;
use fetch_core::{ImageDecoder, Method, Request, ResponseError};
use mock_server::Echo;

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn parse_echo(text: &str) -> Echo {
    serde_json::from_str(text).expect("echo response should be JSON")
}

#[test]
fn get_sends_encoded_query_params() {
    let addr = start_server();
    let mut executed = Request::builder(format!("http://{addr}/echo"))
        .query_param("q", "a b")
        .query_param("tag", "x&y")
        .send(&UreqTransport)
        .unwrap();

    let echo = parse_echo(&executed.text().unwrap());
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.query.as_deref(), Some("q=a+b&tag=x%26y"));
    assert!(echo.body.is_empty());
}

#[test]
fn post_form_sends_encoded_body_and_content_type() {
    let addr = start_server();
    let mut executed = Request::builder(format!("http://{addr}/echo"))
        .method(Method::Post)
        .body("ignored by the form override")
        .form_field("x", "1")
        .form_field("y", "2")
        .send(&UreqTransport)
        .unwrap();

    let echo = parse_echo(&executed.text().unwrap());
    assert_eq!(echo.method, "POST");
    assert_eq!(echo.body, "x=1&y=2");
    assert!(echo.headers.contains(&(
        "content-type".to_string(),
        "application/x-www-form-urlencoded".to_string()
    )));
}

#[test]
fn custom_headers_and_cache_directive_reach_the_wire() {
    let addr = start_server();
    let mut executed = Request::builder(format!("http://{addr}/echo"))
        .header("X-Token", "abc")
        .use_cache(true)
        .force_cache(true)
        .send(&UreqTransport)
        .unwrap();

    let echo = parse_echo(&executed.text().unwrap());
    assert!(echo
        .headers
        .contains(&("x-token".to_string(), "abc".to_string())));
    assert!(echo
        .headers
        .contains(&("cache-control".to_string(), "only-if-cached".to_string())));
}

#[test]
fn non_2xx_responses_read_the_error_body() {
    let addr = start_server();
    let mut executed = Request::builder(format!("http://{addr}/status/404"))
        .send(&UreqTransport)
        .unwrap();

    assert_eq!(executed.text().unwrap(), "status 404");
}

#[test]
fn multi_line_bodies_lose_their_separators() {
    let addr = start_server();
    let mut executed = Request::builder(format!("http://{addr}/lines"))
        .send(&UreqTransport)
        .unwrap();

    assert_eq!(executed.text().unwrap(), "firstsecondthird");
}

/// Accepts anything starting with the PNG signature and reports the byte
/// count, standing in for a real codec.
struct PngSignatureDecoder;

impl ImageDecoder for PngSignatureDecoder {
    type Image = usize;
    type Error = String;

    fn decode(&self, reader: &mut dyn Read) -> Result<usize, String> {
        let mut raw = Vec::new();
        reader
            .read_to_end(&mut raw)
            .map_err(|error| error.to_string())?;
        if raw.starts_with(&[0x89, b'P', b'N', b'G']) {
            Ok(raw.len())
        } else {
            Err("missing png signature".to_string())
        }
    }
}

#[test]
fn image_bytes_feed_the_codec() {
    let addr = start_server();
    let mut executed = Request::builder(format!("http://{addr}/image"))
        .send(&UreqTransport)
        .unwrap();

    let size = executed.image(&PngSignatureDecoder).unwrap();
    assert_eq!(size, mock_server::PIXEL_PNG.len());
}

#[test]
fn unreachable_server_fails_at_read_time() {
    // Bind then drop to get a port with nothing listening. The ureq adapter
    // defers the exchange until the first read, so execution succeeds and
    // the connection failure surfaces as a typed response error.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut executed = Request::builder(format!("http://{addr}/echo"))
        .send(&UreqTransport)
        .unwrap();

    let error = executed.text().unwrap_err();
    assert!(matches!(error, ResponseError::Transport(_)));
}
