//! Getting Started Example
//!
//! Registers a small route table, then exercises it through the
//! in-process test client.
//!
//! Run with: cargo run --example getting_started -p trellis

use trellis::testing::TestClient;
use trellis::{
    AddResponseHeader, MiddlewareStack, PathParams, Request, RequestContext, Response, Router,
};

/// Handler for GET /
fn hello(_ctx: &RequestContext, _req: &mut Request) -> std::future::Ready<Response> {
    std::future::ready(Response::ok().body_text("Hello, World!"))
}

/// Handler for GET /users/:id
fn show_user(_ctx: &RequestContext, req: &mut Request) -> std::future::Ready<Response> {
    let id = PathParams::from_request(req)
        .and_then(|params| params.by_name("id"))
        .unwrap_or("<unknown>");
    std::future::ready(Response::ok().body_text(format!("user {id}")))
}

/// Handler for GET /files/*path
fn show_file(_ctx: &RequestContext, req: &mut Request) -> std::future::Ready<Response> {
    let path = PathParams::from_request(req)
        .and_then(|params| params.by_name("path"))
        .unwrap_or("<unknown>");
    std::future::ready(Response::ok().body_text(format!("file {path}")))
}

fn main() {
    println!("trellis - Getting Started\n");

    // === Basic routing ===
    println!("1. Static, parameter and wildcard routes:");
    let mut router = Router::new();
    router.get("/", hello).unwrap();
    router.get("/users/:id", show_user).unwrap();
    router.get("/files/*path", show_file).unwrap();
    println!("   Routes: {}", router.route_count());

    let client = TestClient::new(router);

    let response = client.get("/").send();
    println!("   GET / -> {} ({})", response.status().as_u16(), response.text());
    assert_eq!(response.text(), "Hello, World!");

    let response = client.get("/users/42").send();
    println!("   GET /users/42 -> {} ({})", response.status().as_u16(), response.text());
    assert_eq!(response.text(), "user 42");

    let response = client.get("/files/a/b/c.txt").send();
    println!(
        "   GET /files/a/b/c.txt -> {} ({})",
        response.status().as_u16(),
        response.text()
    );
    assert_eq!(response.text(), "file a/b/c.txt");

    // === Middleware ===
    println!("\n2. A middleware stack around a handler:");
    let stack = MiddlewareStack::new()
        .append(AddResponseHeader::new("x-served-by", b"trellis".to_vec()).into_middleware());

    let mut router = Router::new();
    router
        .handle(trellis::Method::Get, "/", stack.wrap_handler(hello))
        .unwrap();

    let client = TestClient::new(router);
    let response = client.get("/").send();
    println!(
        "   GET / -> {} (x-served-by: {})",
        response.status().as_u16(),
        String::from_utf8_lossy(response.header("x-served-by").unwrap_or_default())
    );
    assert_eq!(response.header("x-served-by"), Some(b"trellis".as_slice()));

    // === 404 for unknown routes ===
    println!("\n3. 404 for unknown routes:");
    let mut router = Router::new();
    router.get("/", hello).unwrap();

    let client = TestClient::new(router);
    let response = client.get("/nonexistent").send();
    println!("   GET /nonexistent -> {}", response.status().as_u16());
    assert_eq!(response.status().as_u16(), 404);

    println!("\nAll examples ran successfully!");
}
