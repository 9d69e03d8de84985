//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one fixed response for every GET, regardless of path; the path only
//! matters to the client's filename resolution. Can lie about Content-Length
//! or go silent to simulate a hung server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ResponseSpec {
    /// Status line tail, e.g. "200 OK" or "404 Not Found".
    pub status: &'static str,
    /// Content-Type header; None omits the header entirely.
    pub content_type: Option<&'static str>,
    /// Body bytes actually sent.
    pub body: Vec<u8>,
    /// Declared Content-Length; None declares the real body length.
    pub declared_length: Option<u64>,
    /// Omit Content-Length entirely (body is delimited by connection close).
    pub omit_length: bool,
}

impl ResponseSpec {
    /// A well-behaved image response.
    pub fn image(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: "200 OK",
            content_type: Some(content_type),
            body,
            declared_length: None,
            omit_length: false,
        }
    }
}

/// Starts a server in a background thread. Returns the base URL
/// (e.g. "http://127.0.0.1:12345/"). The server runs until the process exits.
pub fn start(spec: ResponseSpec) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let spec = Arc::new(spec);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let spec = Arc::clone(&spec);
            thread::spawn(move || handle(stream, &spec));
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

/// Starts a server that accepts connections and never responds, for timeout tests.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for mut stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                thread::sleep(Duration::from_secs(30));
            });
        }
    });
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: std::net::TcpStream, spec: &ResponseSpec) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }

    let content_type = spec
        .content_type
        .map(|ct| format!("Content-Type: {}\r\n", ct))
        .unwrap_or_default();
    let content_length = if spec.omit_length {
        String::new()
    } else {
        let declared = spec.declared_length.unwrap_or(spec.body.len() as u64);
        format!("Content-Length: {}\r\n", declared)
    };
    let header = format!(
        "HTTP/1.1 {}\r\n{}{}Connection: close\r\n\r\n",
        spec.status, content_type, content_length
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(&spec.body);
}
