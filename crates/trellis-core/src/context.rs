//! Per-request context.

/// Request-scoped identity threaded through every handler call.
///
/// The dispatcher creates one context per request and passes it by
/// reference to middleware and the terminal handler. Its request id is
/// what the logging module stamps on every entry emitted while the
/// request is in flight.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    request_id: u64,
}

impl RequestContext {
    /// Creates a context for a new request.
    #[must_use]
    pub fn new(request_id: u64) -> Self {
        Self { request_id }
    }

    /// Unique identifier of the request, for tracing.
    #[must_use]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }
}
