//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single static body for every GET and records the raw request
//! heads it receives, so tests can inspect headers or assert that nothing was
//! sent at all.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum Reply {
    /// Full response with the given status line.
    Status(&'static str),
    /// 200 whose `Content-Length` claims `extra` more bytes than are sent
    /// before the connection closes.
    Truncated { extra: usize },
    /// Accept the request and never answer.
    Silent,
}

pub struct DocServer {
    /// Base URL, e.g. "http://127.0.0.1:12345/".
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl DocServer {
    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Serve `body` with `200 OK`.
pub fn start(body: impl Into<Vec<u8>>) -> DocServer {
    start_with(Reply::Status("200 OK"), body)
}

/// Serve `body` with the given reply behavior. The server runs until the
/// process exits.
pub fn start_with(reply: Reply, body: impl Into<Vec<u8>>) -> DocServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body.into());
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &body, reply, &seen));
        }
    });
    DocServer {
        url: format!("http://127.0.0.1:{}/", port),
        requests,
    }
}

/// A URL on a local port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/config", port)
}

fn handle(mut stream: TcpStream, body: &[u8], reply: Reply, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let head = match read_head(&mut stream) {
        Some(head) => head,
        None => return,
    };
    seen.lock().unwrap().push(head);

    match reply {
        Reply::Status(status) => {
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(body);
        }
        Reply::Truncated { extra } => {
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len() + extra
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.write_all(body);
        }
        Reply::Silent => thread::sleep(Duration::from_secs(5)),
    }
}

/// Read until the blank line ending the request head.
fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8(buf).ok()
}
