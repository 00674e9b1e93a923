//! In-process test client.
//!
//! Drives a [`Router`] without a server or sockets: requests are built
//! with a fluent API and dispatched synchronously, so tests stay plain
//! `#[test]` functions.
//!
//! # Example
//!
//! ```
//! use trellis_core::testing::TestClient;
//! use trellis_core::{Request, RequestContext, Response, Router};
//!
//! let mut router = Router::new();
//! router
//!     .get("/ping", |_ctx: &RequestContext, _req: &mut Request| async {
//!         Response::ok().body_text("pong")
//!     })
//!     .unwrap();
//!
//! let client = TestClient::new(router);
//! let response = client.get("/ping").send();
//! assert_eq!(response.status().as_u16(), 200);
//! assert_eq!(response.text(), "pong");
//! ```

use crate::request::{Body, Method, Request};
use crate::response::{Response, ResponseBody, StatusCode};
use crate::router::Router;

/// Test client for exercising a router in-process.
pub struct TestClient {
    router: Router,
}

impl TestClient {
    /// Creates a client around a fully-registered router.
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Creates a GET request builder.
    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Get, path)
    }

    /// Creates a HEAD request builder.
    #[must_use]
    pub fn head(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Head, path)
    }

    /// Creates an OPTIONS request builder.
    #[must_use]
    pub fn options(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Options, path)
    }

    /// Creates a POST request builder.
    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Post, path)
    }

    /// Creates a PUT request builder.
    #[must_use]
    pub fn put(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Put, path)
    }

    /// Creates a PATCH request builder.
    #[must_use]
    pub fn patch(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Patch, path)
    }

    /// Creates a DELETE request builder.
    #[must_use]
    pub fn delete(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::Delete, path)
    }

    /// Creates a request builder with an explicit method.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: Body::Empty,
        }
    }
}

/// Builder for one test request.
pub struct RequestBuilder<'a> {
    client: &'a TestClient,
    method: Method,
    path: String,
    headers: Vec<(String, Vec<u8>)>,
    body: Body,
}

impl RequestBuilder<'_> {
    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Body::Bytes(body.into());
        self
    }

    /// Dispatches the request and returns the response.
    ///
    /// The dispatch future is driven to completion on the calling
    /// thread.
    pub fn send(self) -> TestResponse {
        let mut request = Request::new(self.method, self.path);
        for (name, value) in self.headers {
            request.headers_mut().insert(name, value);
        }
        request.set_body(self.body);

        let response = futures_executor::block_on(self.client.router.dispatch(&mut request));
        TestResponse::new(response)
    }
}

/// A response captured for assertions.
pub struct TestResponse {
    status: StatusCode,
    headers: Vec<(String, Vec<u8>)>,
    body: Vec<u8>,
}

impl TestResponse {
    fn new(response: Response) -> Self {
        let (status, headers, body) = response.into_parts();
        let body = match body {
            ResponseBody::Empty => Vec::new(),
            ResponseBody::Bytes(bytes) => bytes,
        };
        Self {
            status,
            headers,
            body,
        }
    }

    /// The response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// First header with the given name, case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_slice())
    }

    /// The body as UTF-8 text (lossy).
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The raw body bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }
}
