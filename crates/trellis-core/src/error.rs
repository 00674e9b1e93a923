//! Registration errors.

use std::error::Error;
use std::fmt;

use trellis_tree::InsertError;

use crate::request::Method;

/// A route could not be registered.
///
/// Wraps the tree's [`InsertError`] with the HTTP method whose tree
/// rejected the route. Registration happens during startup, so callers
/// normally propagate this straight out of their setup code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteError {
    method: Method,
    source: InsertError,
}

impl RouteError {
    pub(crate) fn new(method: Method, source: InsertError) -> Self {
        Self { method, source }
    }

    /// The method whose tree rejected the registration.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// The route that triggered the error.
    #[must_use]
    pub fn route(&self) -> &str {
        self.source.route()
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.method, self.source)
    }
}

impl Error for RouteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
