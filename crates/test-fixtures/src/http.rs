//! A local OpenAI-compatible `/v1/embeddings` endpoint for provider tests.
//!
//! Serves seeded unit vectors (see [`seeded_unit_vector`]) one connection at
//! a time on an ephemeral port. The server thread lives until the test
//! process exits.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::{json, Value};

use crate::providers::seeded_unit_vector;

pub struct EmbeddingStub {
    addr: SocketAddr,
    requests: Arc<AtomicUsize>,
}

impl EmbeddingStub {
    /// Answer every request with one vector per input.
    pub fn start(dims: usize) -> Self {
        Self::spawn(dims, None)
    }

    /// Answer `status` to any request whose input contains `marker`.
    pub fn rejecting(dims: usize, marker: &str, status: u16) -> Self {
        Self::spawn(dims, Some((marker.to_string(), status)))
    }

    pub fn endpoint(&self) -> String {
        format!("http://{}/v1/embeddings", self.addr)
    }

    /// Requests received so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn spawn(dims: usize, rule: Option<(String, u16)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind embedding stub");
        let addr = listener.local_addr().expect("stub address");
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);
                let _ = serve(stream, dims, rule.as_ref());
            }
        });

        Self { addr, requests }
    }
}

fn serve(mut stream: TcpStream, dims: usize, rule: Option<&(String, u16)>) -> io::Result<()> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    let body = read_body(&mut stream)?;
    let inputs: Vec<String> = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v.get("input").cloned())
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    let (status, payload) = match rule {
        Some((marker, status)) if inputs.iter().any(|t| t.contains(marker.as_str())) => (
            *status,
            json!({ "error": { "message": format!("input contains {marker}") } }),
        ),
        _ => {
            let data: Vec<Value> = inputs
                .iter()
                .enumerate()
                .map(|(i, t)| json!({ "embedding": seeded_unit_vector(t, dims), "index": i }))
                .collect();
            (200, json!({ "data": data }))
        }
    };

    let payload = payload.to_string();
    write!(
        stream,
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
        reason_phrase(status),
        payload.len()
    )?;
    stream.flush()
}

fn read_body(stream: &mut TcpStream) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = end + 4;
            while buf.len() < start + len {
                let n = stream.read(&mut chunk)?;
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let stop = (start + len).min(buf.len());
            return Ok(buf[start..stop].to_vec());
        }
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        413 => "Payload Too Large",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
