//! Tests de integración para el servidor de la biblioteca
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero, en el mismo
//! proceso, y le habla HTTP crudo por TCP.

use library_server::config::Config;
use library_server::server::Server;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;

/// Levanta un servidor y retorna su dirección
fn start_server(config: Config) -> SocketAddr {
    let server = Server::bind(config).expect("bind");
    let addr = server.local_addr().expect("local_addr");

    thread::spawn(move || {
        let _ = server.run();
    });

    addr
}

/// Respuesta ya separada en status, headers y body
struct HttpReply {
    status: u16,
    head: String,
    body: String,
}

/// Helper: envía un request HTTP y retorna la response completa
fn send(addr: SocketAddr, method: &str, path: &str, body: Option<&str>) -> HttpReply {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    let request = match body {
        Some(body) => format!(
            "{} {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            method,
            path,
            body.len(),
            body
        ),
        None => format!("{} {} HTTP/1.1\r\nHost: localhost\r\n\r\n", method, path),
    };

    stream.write_all(request.as_bytes()).expect("write");
    stream.flush().unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).expect("read");

    let (head, body) = response
        .split_once("\r\n\r\n")
        .map(|(head, body)| (head.to_string(), body.to_string()))
        .unwrap_or((response.clone(), String::new()));

    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .unwrap_or(0);

    HttpReply { status, head, body }
}

fn get(addr: SocketAddr, path: &str) -> HttpReply {
    send(addr, "GET", path, None)
}

fn post(addr: SocketAddr, path: &str, body: &str) -> HttpReply {
    send(addr, "POST", path, Some(body))
}

fn json(reply: &HttpReply) -> serde_json::Value {
    serde_json::from_str(&reply.body).unwrap_or_else(|e| panic!("invalid JSON {:?}: {}", reply.body, e))
}

#[test]
fn test_full_book_lifecycle() {
    let addr = start_server(Config::ephemeral());

    let created = post(addr, "/api/books", r#"{"id":1,"title":"Dune","author":"Herbert"}"#);
    assert_eq!(created.status, 201);
    assert_eq!(created.body, r#"{"success":true}"#);

    let books = get(addr, "/api/books");
    assert_eq!(books.status, 200);
    assert_eq!(
        books.body,
        r#"[{"id":1,"title":"Dune","author":"Herbert","available":true}]"#
    );

    let issued = post(addr, "/api/issue", r#"{"bookId":1,"studentName":"Alice","days":14}"#);
    assert_eq!(issued.status, 200);
    assert_eq!(issued.body, r#"{"success":true}"#);

    assert_eq!(json(&get(addr, "/api/books"))[0]["available"], false);

    let loans = json(&get(addr, "/api/students"));
    assert_eq!(loans.as_array().unwrap().len(), 1);
    assert_eq!(loans[0]["bookId"], 1);
    assert_eq!(loans[0]["name"], "Alice");
    assert_eq!(loans[0]["bookTitle"], "Dune");

    let returned = post(addr, "/api/return", r#"{"bookId":1}"#);
    assert_eq!(returned.status, 200);
    assert_eq!(returned.body, r#"{"success":true}"#);

    assert_eq!(json(&get(addr, "/api/books"))[0]["available"], true);
    assert_eq!(get(addr, "/api/students").body, "[]");
}

#[test]
fn test_issue_failures_leave_state_unchanged() {
    let addr = start_server(Config::ephemeral());
    post(addr, "/api/books", r#"{"id":7,"title":"Emma","author":"Austen"}"#);
    post(addr, "/api/issue", r#"{"bookId":7,"studentName":"Alice","days":7}"#);

    let books_before = get(addr, "/api/books").body;
    let loans_before = get(addr, "/api/students").body;

    let missing = post(addr, "/api/issue", r#"{"bookId":99,"studentName":"Bob","days":7}"#);
    assert_eq!(missing.status, 404);

    let taken = post(addr, "/api/issue", r#"{"bookId":7,"studentName":"Bob","days":7}"#);
    assert_eq!(taken.status, 409);
    assert_eq!(json(&taken)["success"], false);

    assert_eq!(get(addr, "/api/books").body, books_before);
    assert_eq!(get(addr, "/api/students").body, loans_before);
}

#[test]
fn test_return_unknown_book_is_404() {
    let addr = start_server(Config::ephemeral());
    post(addr, "/api/books", r#"{"id":3,"title":"Ulysses","author":"Joyce"}"#);

    let reply = post(addr, "/api/return", r#"{"bookId":3}"#);
    assert_eq!(reply.status, 404);
    assert_eq!(json(&reply)["success"], false);
    assert_eq!(json(&get(addr, "/api/books"))[0]["available"], true);
}

#[test]
fn test_delete_book_twice() {
    let addr = start_server(Config::ephemeral());
    post(addr, "/api/books", r#"{"id":4,"title":"Beloved","author":"Morrison"}"#);

    assert_eq!(send(addr, "DELETE", "/api/books/4", None).status, 200);
    assert_eq!(get(addr, "/api/books").body, "[]");
    assert_eq!(send(addr, "DELETE", "/api/books/4", None).status, 404);
}

#[test]
fn test_add_book_validation() {
    let addr = start_server(Config::ephemeral());

    assert_eq!(post(addr, "/api/books", r#"{"id":0,"title":"X","author":"Y"}"#).status, 400);
    assert_eq!(post(addr, "/api/books", r#"{"title":"X","author":"Y"}"#).status, 400);
    assert_eq!(post(addr, "/api/books", "not json").status, 400);
    assert_eq!(send(addr, "POST", "/api/books", None).status, 400);
    assert_eq!(get(addr, "/api/books").body, "[]");
}

#[test]
fn test_login_and_reset_password() {
    let addr = start_server(Config::ephemeral());

    assert_eq!(post(addr, "/api/login", r#"{"username":"admin","password":"admin"}"#).status, 200);
    assert_eq!(post(addr, "/api/login", r#"{"username":"admin","password":"ADMIN"}"#).status, 401);
    assert_eq!(post(addr, "/api/login", r#"{"username":"admin"}"#).status, 400);

    let denied = post(
        addr,
        "/api/reset-password",
        r#"{"oldPassword":"wrong","newUsername":"root","newPassword":"s3cret"}"#,
    );
    assert_eq!(denied.status, 401);

    let reset = post(
        addr,
        "/api/reset-password",
        r#"{"oldPassword":"admin","newUsername":"root","newPassword":"s3cret"}"#,
    );
    assert_eq!(reset.status, 200);

    assert_eq!(post(addr, "/api/login", r#"{"username":"admin","password":"admin"}"#).status, 401);
    assert_eq!(post(addr, "/api/login", r#"{"username":"root","password":"s3cret"}"#).status, 200);

    assert_eq!(post(addr, "/api/reset-password", r#"{"oldPassword":"s3cret"}"#).status, 400);
}

#[test]
fn test_configured_admin_credentials() {
    let mut config = Config::ephemeral();
    config.admin_user = "librarian".to_string();
    config.admin_password = "shelves".to_string();
    let addr = start_server(config);

    assert_eq!(post(addr, "/api/login", r#"{"username":"admin","password":"admin"}"#).status, 401);
    assert_eq!(post(addr, "/api/login", r#"{"username":"librarian","password":"shelves"}"#).status, 200);
}

#[test]
fn test_cors_headers() {
    let addr = start_server(Config::ephemeral());

    let preflight = send(addr, "OPTIONS", "/api/books", None);
    assert_eq!(preflight.status, 200);
    assert!(preflight.body.is_empty());
    assert!(preflight.head.contains("Access-Control-Allow-Origin: *"));
    assert!(preflight.head.contains("Access-Control-Allow-Methods: GET, POST, DELETE, OPTIONS"));
    assert!(preflight.head.contains("Access-Control-Allow-Headers: Content-Type"));
    assert!(preflight.head.contains("Content-Length: 0"));

    let books = get(addr, "/api/books");
    assert!(books.head.contains("Content-Type: application/json"));
    assert!(books.head.contains("Access-Control-Allow-Origin: *"));
}

#[test]
fn test_unknown_route_is_plain_404() {
    let addr = start_server(Config::ephemeral());

    for (method, path) in [("GET", "/"), ("GET", "/api/unknown"), ("PUT", "/api/books"), ("GET", "/api/books/1")] {
        let reply = send(addr, method, path, None);
        assert_eq!(reply.status, 404, "{} {}", method, path);
        assert_eq!(reply.body, "Not Found");
        assert!(reply.head.contains("Content-Type: text/plain"));
    }
}

#[test]
fn test_bad_request_does_not_stop_server() {
    let addr = start_server(Config::ephemeral());

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.write_all(b"complete garbage\r\n\r\n").unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert!(response.starts_with("HTTP/1.1 400 Bad Request"));

    // Conexión que se cierra sin mandar nada
    drop(TcpStream::connect(addr).unwrap());

    assert_eq!(get(addr, "/api/books").status, 200);
}

#[test]
fn test_sequential_mode() {
    let mut config = Config::ephemeral();
    config.sequential = true;
    let addr = start_server(config);

    for id in 1..=5 {
        let body = format!(r#"{{"id":{},"title":"Book {}","author":"Anon"}}"#, id, id);
        assert_eq!(post(addr, "/api/books", &body).status, 201);
    }

    let ids: Vec<i64> = json(&get(addr, "/api/books"))
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);
}

#[test]
fn test_concurrent_issue_has_single_winner() {
    let addr = start_server(Config::ephemeral());
    post(addr, "/api/books", r#"{"id":1,"title":"Dune","author":"Herbert"}"#);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let body = format!(r#"{{"bookId":1,"studentName":"Student {}","days":14}}"#, i);
                post(addr, "/api/issue", &body).status
            })
        })
        .collect();

    let statuses: Vec<u16> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(statuses.iter().filter(|&&s| s == 200).count(), 1);
    assert_eq!(statuses.iter().filter(|&&s| s == 409).count(), 7);

    assert_eq!(json(&get(addr, "/api/students")).as_array().unwrap().len(), 1);
}
