//! Delivery endpoint over real HTTP.
//!
//! Each test binds a listener on an ephemeral loopback port and speaks raw
//! HTTP/1.1 to it.

use std::{
    io::{Read, Write},
    net::{SocketAddr, TcpStream},
    sync::Arc,
    time::{Duration, Instant},
};

use termfolio_core::{DeliveryGateway, Mailbox, Secret};
use termfolio_server::DeliveryListener;

const SECRET: &str = "s3cret";

fn listener() -> (DeliveryListener, Arc<Mailbox>) {
    let mailbox = Arc::new(Mailbox::new());
    let gateway = DeliveryGateway::new(Arc::clone(&mailbox), Secret::new(SECRET).unwrap());
    let listener = DeliveryListener::spawn("127.0.0.1:0", gateway).unwrap();
    (listener, mailbox)
}

/// Send one request and return `(status, body)`.
fn request(addr: SocketAddr, method: &str, target: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    write!(stream, "{method} {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).unwrap();
    let raw = String::from_utf8(raw).unwrap();

    let (head, body) = raw.split_once("\r\n\r\n").unwrap();
    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    (status, body.to_string())
}

fn latest(addr: SocketAddr, secret: &str) -> (u16, String) {
    request(addr, "GET", &format!("/messages/latest?secret={secret}"))
}

#[test]
fn messages_are_delivered_oldest_first() {
    let (listener, mailbox) = listener();
    mailbox.submit("alice", "hello").unwrap();
    mailbox.submit("bob", "world").unwrap();
    let addr = listener.local_addr();

    let (status, first) = latest(addr, SECRET);
    assert_eq!(status, 200);
    assert!(first.starts_with("alice---hello---"), "{first}");

    let (status, second) = latest(addr, SECRET);
    assert_eq!(status, 200);
    assert!(second.starts_with("bob---world---"), "{second}");

    assert_eq!(latest(addr, SECRET), (204, String::new()));
    listener.shutdown();
}

#[test]
fn wrong_secret_is_rejected_without_consuming() {
    let (listener, mailbox) = listener();
    mailbox.submit("alice", "hello").unwrap();
    let addr = listener.local_addr();

    assert_eq!(latest(addr, "guess").0, 401);
    assert_eq!(request(addr, "GET", "/messages/latest").0, 401);
    assert_eq!(mailbox.len(), 1);
    listener.shutdown();
}

#[test]
fn unknown_routes_and_methods() {
    let (listener, mailbox) = listener();
    mailbox.submit("alice", "hello").unwrap();
    let addr = listener.local_addr();

    assert_eq!(request(addr, "GET", "/").0, 404);
    assert_eq!(request(addr, "POST", &format!("/messages/latest?secret={SECRET}")).0, 405);
    assert_eq!(mailbox.len(), 1);
    listener.shutdown();
}

#[test]
fn shutdown_returns_promptly() {
    let (listener, _mailbox) = listener();
    let addr = listener.local_addr();
    assert_eq!(latest(addr, SECRET).0, 204);

    let started = Instant::now();
    listener.shutdown();

    assert!(started.elapsed() < Duration::from_secs(5));
}
