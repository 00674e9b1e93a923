//! The router: one route tree per HTTP method.
//!
//! Registration mutates the trees and happens single-threaded during
//! startup; after that the router is read-only and [`Router::dispatch`]
//! may run concurrently from any number of tasks.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use trellis_tree::Tree;

use crate::context::RequestContext;
use crate::error::RouteError;
use crate::logging::{LogConfig, LogLevel, Logger};
use crate::middleware::Handler;
use crate::params::PathParams;
use crate::request::{Method, Request};
use crate::response::Response;

const LOG_TARGET: &str = "trellis_core::router";

/// Methods in dump order.
const METHODS: [Method; 7] = [
    Method::Get,
    Method::Head,
    Method::Options,
    Method::Post,
    Method::Put,
    Method::Patch,
    Method::Delete,
];

/// An HTTP request router.
///
/// Maps `(method, path)` pairs to handlers through one compressed
/// route tree per method, created lazily on first registration.
///
/// # Example
///
/// ```
/// use trellis_core::{Method, PathParams, Request, RequestContext, Response, Router};
///
/// let mut router = Router::new();
/// router
///     .get("/users/:id", |_ctx: &RequestContext, req: &mut Request| {
///         let id = PathParams::from_request(req)
///             .and_then(|p| p.by_name("id"))
///             .unwrap_or_default()
///             .to_string();
///         async move { Response::ok().body_text(id) }
///     })
///     .unwrap();
///
/// let mut req = Request::new(Method::Get, "/users/42");
/// let response = futures_executor::block_on(router.dispatch(&mut req));
/// assert_eq!(response.status().as_u16(), 200);
/// ```
pub struct Router {
    trees: HashMap<Method, Tree<Arc<dyn Handler>>>,
    routes: usize,
    logger: Logger,
    next_request_id: AtomicU64,
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
            routes: 0,
            logger: Logger::new(LogConfig::default(), LOG_TARGET),
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Replaces the logging configuration.
    #[must_use]
    pub fn with_logging(mut self, config: LogConfig) -> Self {
        self.logger = Logger::new(config, LOG_TARGET);
        self
    }

    /// Registers `handler` for `method` and `path`.
    ///
    /// The path must begin with `/` and may contain `:name` parameter
    /// segments and one terminal `*name` wildcard.
    ///
    /// # Errors
    ///
    /// Fails when the path is malformed or conflicts with an earlier
    /// registration; the error message names the offending route.
    pub fn handle<H>(&mut self, method: Method, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.trees
            .entry(method)
            .or_default()
            .insert(path, Arc::new(handler))
            .map_err(|source| RouteError::new(method, source))?;
        self.routes += 1;
        Ok(())
    }

    /// Registers a GET route.
    pub fn get<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.handle(Method::Get, path, handler)
    }

    /// Registers a HEAD route.
    pub fn head<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.handle(Method::Head, path, handler)
    }

    /// Registers an OPTIONS route.
    pub fn options<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.handle(Method::Options, path, handler)
    }

    /// Registers a POST route.
    pub fn post<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.handle(Method::Post, path, handler)
    }

    /// Registers a PUT route.
    pub fn put<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.handle(Method::Put, path, handler)
    }

    /// Registers a PATCH route.
    pub fn patch<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.handle(Method::Patch, path, handler)
    }

    /// Registers a DELETE route.
    pub fn delete<H>(&mut self, path: &str, handler: H) -> Result<(), RouteError>
    where
        H: Handler + 'static,
    {
        self.handle(Method::Delete, path, handler)
    }

    /// Number of registered routes across all methods.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes
    }

    /// Dispatches a request to its handler.
    ///
    /// Selects the tree for the request's method and walks it with the
    /// request path. On a match, the captured parameters are attached
    /// to the request and the handler is invoked; any miss produces a
    /// 404 response.
    pub async fn dispatch(&self, req: &mut Request) -> Response {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        let ctx = RequestContext::new(request_id);

        let Some(tree) = self.trees.get(&req.method()) else {
            self.log_miss(req, request_id);
            return Response::not_found();
        };

        let matched = match tree.find(req.path()) {
            Some(hit) => (Arc::clone(hit.value), PathParams::from_captures(&hit.params)),
            None => {
                self.log_miss(req, request_id);
                return Response::not_found();
            }
        };

        let (handler, params) = matched;
        if self.logger.enabled(LogLevel::Debug) {
            self.logger.log(
                LogLevel::Debug,
                &format!(
                    "{} {} matched ({} params)",
                    req.method(),
                    req.path(),
                    params.len()
                ),
                Some(request_id),
            );
        }
        if !params.is_empty() {
            params.attach(req);
        }

        handler.call(&ctx, req).await
    }

    fn log_miss(&self, req: &Request, request_id: u64) {
        self.logger.log(
            LogLevel::Debug,
            &format!("{} {} did not match", req.method(), req.path()),
            Some(request_id),
        );
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("methods", &self.trees.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Router {
    /// Renders every method's tree dump, for diagnostics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for method in METHODS {
            if let Some(tree) = self.trees.get(&method) {
                writeln!(f, "{method}")?;
                write!(f, "{tree}")?;
            }
        }
        Ok(())
    }
}
