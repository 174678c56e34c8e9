//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::thread;

/// Mock backend that answers each HTTP method with a scripted status code
/// (200 for unscripted methods) and records the methods it saw.
///
/// The prober is a blocking client, so the backend is a plain thread, not
/// a tokio task.
pub struct MethodBackend {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<String>>>,
}

impl MethodBackend {
    pub fn start(responses: &[(&str, u16)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");
        let responses: HashMap<String, u16> = responses
            .iter()
            .map(|(m, s)| (m.to_string(), *s))
            .collect();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_writer = Arc::clone(&seen);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 2048];
                let n = stream.read(&mut buf).unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]);
                let method = head.split_whitespace().next().unwrap_or("").to_string();
                let status = responses.get(&method).copied().unwrap_or(200);
                seen_writer.lock().unwrap().push(method);

                let reason = match status {
                    200 => "OK",
                    204 => "No Content",
                    404 => "Not Found",
                    405 => "Method Not Allowed",
                    500 => "Internal Server Error",
                    503 => "Service Unavailable",
                    _ => "OK",
                };
                let response = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { addr, seen }
    }

    pub fn url(&self, path: &str) -> url::Url {
        url::Url::parse(&format!("http://{}{}", self.addr, path)).expect("mock backend url")
    }

    /// Methods observed so far, in arrival order.
    #[allow(dead_code)]
    pub fn seen_methods(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

/// An address nothing listens on (bound then dropped).
#[allow(dead_code)]
pub fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe addr");
    listener.local_addr().expect("probe addr")
}
