//! Minimal HTTP/1.1 server answering tally POSTs for integration tests.
//!
//! Serves canned per-mesa JSON bodies, records which mesa codes were asked
//! for, and tracks how many requests were in flight at once.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Canned reply for one mesa code.
#[derive(Debug, Clone)]
pub enum MesaReply {
    /// 200 with an `ACTA` attachment carrying this base64 payload.
    Acta(String),
    /// 200 with attachments but no `ACTA` entry.
    NoActa,
    /// 200 with an `ACTA` entry whose payload is empty.
    EmptyActa,
    /// This HTTP status, empty body.
    Status(u16),
}

/// Handle to a running server.
pub struct MesaServer {
    pub url: String,
    hits: Arc<Mutex<Vec<u32>>>,
    peak: Arc<AtomicUsize>,
}

impl MesaServer {
    /// Mesa codes requested so far, in arrival order.
    pub fn hits(&self) -> Vec<u32> {
        self.hits.lock().unwrap().clone()
    }

    /// Highest number of simultaneous requests observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Starts a server in background threads answering from `replies`; mesa codes
/// with no entry get a 404. Each request is held for `delay` before the reply
/// is written. The server runs until the process exits.
pub fn start(replies: HashMap<u32, MesaReply>, delay: Duration) -> MesaServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let peak = Arc::new(AtomicUsize::new(0));
    let replies = Arc::new(replies);

    {
        let hits = Arc::clone(&hits);
        let peak = Arc::clone(&peak);
        let in_flight = Arc::new(AtomicUsize::new(0));
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let hits = Arc::clone(&hits);
                let peak = Arc::clone(&peak);
                let in_flight = Arc::clone(&in_flight);
                let replies = Arc::clone(&replies);
                thread::spawn(move || {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    handle(stream, &replies, &hits, delay);
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                });
            }
        });
    }

    MesaServer {
        url: format!("http://127.0.0.1:{}/", port),
        hits,
        peak,
    }
}

fn handle(
    mut stream: TcpStream,
    replies: &HashMap<u32, MesaReply>,
    hits: &Mutex<Vec<u32>>,
    delay: Duration,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let Some(body) = read_request_body(&mut stream) else {
        return;
    };
    let mesa = serde_json::from_slice::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("codigoMesa")?.as_u64());
    let Some(mesa) = mesa.map(|m| m as u32) else {
        write_status(&mut stream, 400);
        return;
    };

    hits.lock().unwrap().push(mesa);
    thread::sleep(delay);

    let body = match replies.get(&mesa) {
        Some(MesaReply::Acta(valor)) => format!(
            r#"{{"adjunto":[{{"tipo":"OTHER","valor":"x"}},{{"tipo":"ACTA","valor":"{valor}"}}]}}"#
        ),
        Some(MesaReply::NoActa) => r#"{"adjunto":[{"tipo":"OTHER","valor":"x"}]}"#.to_string(),
        Some(MesaReply::EmptyActa) => r#"{"adjunto":[{"tipo":"ACTA","valor":""}]}"#.to_string(),
        Some(MesaReply::Status(code)) => {
            write_status(&mut stream, *code);
            return;
        }
        None => {
            write_status(&mut stream, 404);
            return;
        }
    };
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn write_status(stream: &mut TcpStream, code: u16) {
    let response = format!(
        "HTTP/1.1 {} Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        code
    );
    let _ = stream.write_all(response.as_bytes());
}

/// Reads headers plus a `Content-Length` body; returns the body bytes.
fn read_request_body(stream: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        match stream.read(&mut chunk) {
            Ok(0) => return None,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos;
                }
                if buf.len() > 64 * 1024 {
                    return None;
                }
            }
            Err(_) => return None,
        }
    };

    let headers = std::str::from_utf8(&buf[..header_end]).ok()?;
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.trim().eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        match stream.read(&mut chunk) {
            Ok(0) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(_) => return None,
        }
    }
    Some(buf[body_start..body_start + content_length].to_vec())
}
