//! Core types for the trellis router.
//!
//! This crate provides everything around the route tree:
//! - [`Request`] and [`Response`] types
//! - The [`Router`] mapping `(method, path)` to handlers
//! - [`Handler`] and [`MiddlewareStack`] for composing request flows
//! - [`PathParams`] carrying captured path parameters per request
//! - Structured logging and an in-process [`testing`] client
//!
//! # Design Principles
//!
//! - Build once, then read-only: registration happens during startup;
//!   dispatch never mutates the router and needs no synchronization
//! - Handlers are async but the router itself never suspends
//! - All types are `Send + Sync`

#![forbid(unsafe_code)]

mod context;
mod error;
pub mod logging;
mod middleware;
mod params;
mod request;
mod response;
mod router;
pub mod testing;

pub use context::RequestContext;
pub use error::RouteError;
pub use middleware::{
    AddResponseHeader, BoxFuture, Handler, Middleware, MiddlewareStack, Wrapped,
};
pub use params::PathParams;
pub use request::{Body, Headers, Method, Request};
pub use response::{Response, ResponseBody, StatusCode};
pub use router::Router;

pub use logging::{LogConfig, LogLevel, Logger};

// Re-export the tree's registration error so callers can match on the
// conflict kind without naming the tree crate.
pub use trellis_tree::InsertError;
