//! Compressed-prefix route tree.
//!
//! This crate provides the matching core of the trellis router: an
//! edge-compressed tree that maps URL paths to values while capturing
//! named parameters.
//!
//! # Features
//!
//! - Radix-style edge compression with on-demand node splitting
//! - `:name` parameter segments and terminal `*name` wildcards
//! - Conflict detection at registration time with full-route diagnostics
//! - O(path length) lookup, no allocation beyond the capture list
//!
//! The tree is generic over the stored value, so it carries handlers for
//! the router without depending on any HTTP types.

#![forbid(unsafe_code)]

mod error;
mod label;
mod r#match;
mod tree;

pub use error::InsertError;
pub use r#match::{Params, RouteMatch};
pub use tree::Tree;
