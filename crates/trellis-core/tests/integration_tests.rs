//! Full-stack dispatch tests: registration, lookup, parameter capture
//! and middleware composition through the in-process test client.

use std::sync::{Arc, Mutex};

use trellis_core::testing::TestClient;
use trellis_core::{
    BoxFuture, Handler, Method, MiddlewareStack, PathParams, Request, RequestContext, Response,
    Router,
};

// =============================================================================
// Helpers
// =============================================================================

/// Handler that answers with a fixed body.
fn text_handler(body: &'static str) -> impl Handler + 'static {
    move |_ctx: &RequestContext, _req: &mut Request| async move { Response::ok().body_text(body) }
}

/// Handler that echoes the named path parameter.
fn param_handler(name: &'static str) -> impl Handler + 'static {
    move |_ctx: &RequestContext, req: &mut Request| {
        let value = PathParams::from_request(req)
            .and_then(|params| params.by_name(name))
            .unwrap_or("<missing>")
            .to_string();
        async move { Response::ok().body_text(value) }
    }
}

fn api_router() -> Router {
    let mut router = Router::new();
    router.get("/api/v1/foo/bar", text_handler("foo bar")).unwrap();
    router.get("/login", text_handler("login")).unwrap();
    router.get("/api/v1/users", text_handler("users")).unwrap();
    router.get("/logout", text_handler("logout")).unwrap();
    router.get("/api/v1/users/:id", param_handler("id")).unwrap();
    router
        .get("/api/v1/users/:id/sites", param_handler("id"))
        .unwrap();
    router
        .get("/api/v1/users/:id/sites/*url", param_handler("url"))
        .unwrap();
    router
        .get("/api/v1/usecases/:type/:id", param_handler("type"))
        .unwrap();
    router
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn static_routes_resolve() {
    let client = TestClient::new(api_router());
    assert_eq!(client.get("/login").send().text(), "login");
    assert_eq!(client.get("/logout").send().text(), "logout");
    assert_eq!(client.get("/api/v1/users").send().text(), "users");
    assert_eq!(client.get("/api/v1/foo/bar").send().text(), "foo bar");
}

#[test]
fn parameter_routes_see_their_bindings() {
    let client = TestClient::new(api_router());
    assert_eq!(client.get("/api/v1/users/42").send().text(), "42");
    assert_eq!(client.get("/api/v1/users/42/sites").send().text(), "42");
    assert_eq!(
        client.get("/api/v1/users/42/sites/a/b/c").send().text(),
        "a/b/c"
    );
    assert_eq!(client.get("/api/v1/usecases/report/7").send().text(), "report");
}

#[test]
fn wildcard_requests_also_carry_outer_parameters() {
    let mut router = Router::new();
    router
        .get(
            "/api/v1/users/:id/sites/*url",
            |_ctx: &RequestContext, req: &mut Request| {
                let params = PathParams::from_request(req).cloned().unwrap_or_default();
                async move {
                    let id = params.by_name("id").unwrap_or("<missing>");
                    let url = params.by_name("url").unwrap_or("<missing>");
                    Response::ok().body_text(format!("{id}|{url}"))
                }
            },
        )
        .unwrap();

    let client = TestClient::new(router);
    let response = client.get("/api/v1/users/42/sites/a/b/c").send();
    assert_eq!(response.text(), "42|a/b/c");
}

#[test]
fn unmatched_requests_get_404() {
    let client = TestClient::new(api_router());
    assert_eq!(client.get("/foo/bar").send().status().as_u16(), 404);
    assert_eq!(client.get("/api").send().status().as_u16(), 404);
    // A method with no tree at all is also a plain 404.
    assert_eq!(client.post("/login").send().status().as_u16(), 404);
}

#[test]
fn static_route_has_no_parameter_bag() {
    let mut router = Router::new();
    router
        .get("/plain", |_ctx: &RequestContext, req: &mut Request| {
            let attached = PathParams::from_request(req).is_some();
            async move { Response::ok().body_text(if attached { "yes" } else { "no" }) }
        })
        .unwrap();

    let client = TestClient::new(router);
    assert_eq!(client.get("/plain").send().text(), "no");
}

#[test]
fn same_path_dispatches_by_method() {
    let mut router = Router::new();
    router.get("/items", text_handler("list")).unwrap();
    router.post("/items", text_handler("create")).unwrap();
    router.delete("/items", text_handler("clear")).unwrap();

    let client = TestClient::new(router);
    assert_eq!(client.get("/items").send().text(), "list");
    assert_eq!(client.post("/items").send().text(), "create");
    assert_eq!(client.delete("/items").send().text(), "clear");
    assert_eq!(client.put("/items").send().status().as_u16(), 404);
}

// =============================================================================
// Registration Errors
// =============================================================================

#[test]
fn conflicting_registration_surfaces_the_route() {
    let mut router = api_router();
    let err = router
        .get("/api/v1/users/:id", param_handler("id"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "GET: handler for route '/api/v1/users/:id' already exists"
    );
}

#[test]
fn router_keeps_serving_after_a_rejected_registration() {
    let mut router = api_router();
    assert!(router.get("/login", text_handler("again")).is_err());

    let client = TestClient::new(router);
    assert_eq!(client.get("/login").send().text(), "login");
}

// =============================================================================
// Middleware
// =============================================================================

/// Wrapper that records its tag around the inner call.
struct Tagged {
    tag: &'static str,
    log: Arc<Mutex<Vec<&'static str>>>,
    next: Arc<dyn Handler>,
}

impl Handler for Tagged {
    fn call<'a>(
        &'a self,
        ctx: &'a RequestContext,
        req: &'a mut Request,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            self.log.lock().unwrap().push(self.tag);
            self.next.call(ctx, req).await
        })
    }
}

#[test]
fn middleware_wrapped_routes_run_outermost_first() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let tag = |tag: &'static str| {
        let log = Arc::clone(&log);
        Arc::new(move |next: Arc<dyn Handler>| {
            Arc::new(Tagged {
                tag,
                log: Arc::clone(&log),
                next,
            }) as Arc<dyn Handler>
        }) as trellis_core::Middleware
    };

    let stack = MiddlewareStack::new().append(tag("first")).append(tag("second"));

    let mut router = Router::new();
    router
        .handle(
            Method::Get,
            "/wrapped",
            stack.wrap_handler(text_handler("done")),
        )
        .unwrap();

    let client = TestClient::new(router);
    let response = client.get("/wrapped").send();

    assert_eq!(response.text(), "done");
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}
