//! Lightweight radix-tree HTTP request router.
//!
//! trellis maps `(method, path)` pairs to handlers through one
//! compressed-prefix tree per HTTP method:
//!
//! - **Edge compression** — shared literal prefixes are stored once and
//!   split on demand
//! - **Named parameters** — `/users/:id` captures one path segment
//! - **Wildcard tails** — `/files/*path` captures the remaining path,
//!   slashes included
//! - **Conflict detection** — ambiguous registrations are rejected at
//!   startup with the full offending route
//!
//! # Quick Start
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut router = Router::new();
//! router
//!     .get("/users/:id", |_ctx: &RequestContext, req: &mut Request| {
//!         let id = PathParams::from_request(req)
//!             .and_then(|p| p.by_name("id"))
//!             .unwrap_or_default()
//!             .to_string();
//!         async move { Response::ok().body_text(id) }
//!     })
//!     .unwrap();
//!
//! let mut req = Request::new(Method::Get, "/users/42");
//! let response = futures_executor::block_on(router.dispatch(&mut req));
//! assert_eq!(response.status().as_u16(), 200);
//! ```
//!
//! # Crate Structure
//!
//! - [`trellis_core`] — Request/Response types, the router, middleware
//! - [`trellis_tree`] — the underlying route tree, usable on its own

#![forbid(unsafe_code)]

// Re-export crates
pub use trellis_core as core;
pub use trellis_tree as tree;

// Re-export commonly used types
pub use trellis_core::{
    AddResponseHeader, Body, BoxFuture, Handler, Headers, InsertError, LogConfig, LogLevel,
    Method, Middleware, MiddlewareStack, PathParams, Request, RequestContext, Response,
    ResponseBody, RouteError, Router, StatusCode, Wrapped,
};
pub use trellis_tree::{Params, RouteMatch, Tree};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Handler, Method, MiddlewareStack, PathParams, Request, RequestContext, Response,
        RouteError, Router, StatusCode,
    };
}

/// Testing utilities module.
pub mod testing {
    pub use trellis_core::testing::{RequestBuilder, TestClient, TestResponse};
}
