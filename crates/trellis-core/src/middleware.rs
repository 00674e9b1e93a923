//! Handlers and middleware composition.
//!
//! A [`Handler`] turns a request into a response, possibly suspending
//! along the way. A [`Middleware`] is a function from handler to
//! handler; a [`MiddlewareStack`] composes a list of them around a
//! terminal handler so that the first middleware pushed is the
//! outermost at execution time.
//!
//! Stacks have value semantics: [`MiddlewareStack::append`] and
//! [`MiddlewareStack::extend`] build new stacks and leave the original
//! untouched, so a shared base stack can be specialized per route
//! group.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::context::RequestContext;
use crate::request::Request;
use crate::response::Response;

/// A boxed future, as returned by handler calls.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A handler that processes requests into responses.
///
/// Implemented automatically for async functions of the shape
/// `async fn(&RequestContext, &mut Request) -> Response`. The returned
/// future must be `'static`: a handler that needs request data across
/// an await point clones it out first.
pub trait Handler: Send + Sync {
    /// Process a request and return a response.
    fn call<'a>(&'a self, ctx: &'a RequestContext, req: &'a mut Request)
        -> BoxFuture<'a, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(&RequestContext, &mut Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call<'a>(
        &'a self,
        ctx: &'a RequestContext,
        req: &'a mut Request,
    ) -> BoxFuture<'a, Response> {
        let fut = self(ctx, req);
        Box::pin(fut)
    }
}

/// A middleware: a function that wraps a handler in another handler.
///
/// Middleware run their work around the inner handler's `call`, so a
/// single function covers both request- and response-side concerns.
pub type Middleware = Arc<dyn Fn(Arc<dyn Handler>) -> Arc<dyn Handler> + Send + Sync>;

/// A handler produced by composing a [`MiddlewareStack`] around a
/// terminal handler.
pub struct Wrapped {
    inner: Arc<dyn Handler>,
}

impl Handler for Wrapped {
    fn call<'a>(
        &'a self,
        ctx: &'a RequestContext,
        req: &'a mut Request,
    ) -> BoxFuture<'a, Response> {
        self.inner.call(ctx, req)
    }
}

/// An immutable list of middleware composed around terminal handlers.
///
/// # Example
///
/// ```
/// use trellis_core::{AddResponseHeader, MiddlewareStack, Request, RequestContext, Response};
///
/// let stack = MiddlewareStack::new()
///     .append(AddResponseHeader::new("x-outer", b"1".to_vec()).into_middleware())
///     .append(AddResponseHeader::new("x-inner", b"2".to_vec()).into_middleware());
///
/// let handler = stack.wrap_handler(|_ctx: &RequestContext, _req: &mut Request| async {
///     Response::ok()
/// });
/// # let _ = handler;
/// ```
#[derive(Clone, Default)]
pub struct MiddlewareStack {
    middleware: Vec<Middleware>,
}

impl MiddlewareStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
        }
    }

    /// Number of middleware in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Returns a new stack with `middleware` added at the end (the
    /// innermost position). The original stack is unchanged.
    #[must_use]
    pub fn append(&self, middleware: Middleware) -> Self {
        let mut extended = self.middleware.clone();
        extended.push(middleware);
        Self {
            middleware: extended,
        }
    }

    /// Returns a new stack holding this stack's middleware followed by
    /// all of `other`'s. Neither input is changed.
    #[must_use]
    pub fn extend(&self, other: &MiddlewareStack) -> Self {
        let mut extended = self.middleware.clone();
        extended.extend(other.middleware.iter().cloned());
        Self {
            middleware: extended,
        }
    }

    /// Composes the stack around `handler`.
    ///
    /// Middleware are applied in reverse order, so the first one in the
    /// stack ends up outermost and sees the request first.
    #[must_use]
    pub fn wrap(&self, handler: Arc<dyn Handler>) -> Wrapped {
        let mut wrapped = handler;
        for middleware in self.middleware.iter().rev() {
            wrapped = middleware(wrapped);
        }
        Wrapped { inner: wrapped }
    }

    /// Shorthand composing the stack around a plain handler value.
    #[must_use]
    pub fn wrap_handler<H: Handler + 'static>(&self, handler: H) -> Wrapped {
        self.wrap(Arc::new(handler))
    }
}

/// Middleware that adds a fixed header to every response.
#[derive(Debug, Clone)]
pub struct AddResponseHeader {
    name: String,
    value: Vec<u8>,
}

impl AddResponseHeader {
    /// Creates the middleware with the header to add.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Converts into a [`Middleware`] for use in a stack.
    #[must_use]
    pub fn into_middleware(self) -> Middleware {
        Arc::new(move |next| {
            Arc::new(AddResponseHeaderHandler {
                name: self.name.clone(),
                value: self.value.clone(),
                next,
            })
        })
    }
}

struct AddResponseHeaderHandler {
    name: String,
    value: Vec<u8>,
    next: Arc<dyn Handler>,
}

impl Handler for AddResponseHeaderHandler {
    fn call<'a>(
        &'a self,
        ctx: &'a RequestContext,
        req: &'a mut Request,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let response = self.next.call(ctx, req).await;
            response.header(self.name.clone(), self.value.clone())
        })
    }
}
