//! Local stand-in for the Gemini HTTP API.
//!
//! Serves a scripted sequence of replies and records every request's
//! URL and body so tests can assert on model selection, prompt
//! wrapping, and attempt counts.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// One scripted reply, served in order; the last reply repeats once the
/// script is exhausted.
#[derive(Debug, Clone)]
pub enum StubReply {
    /// 200 with a single candidate carrying this text.
    Text(&'static str),
    /// 200 with an empty candidate list.
    EmptyCandidates,
    /// An error status with a raw body.
    Status { code: u16, body: &'static str },
}

/// A recorded request: URL path and raw body.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
}

pub struct GeminiStub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl GeminiStub {
    pub fn spawn(replies: Vec<StubReply>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start gemini stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            let mut served = 0usize;
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                recorded.lock().unwrap().push(RecordedRequest {
                    url: request.url().to_string(),
                    body,
                });

                let reply = replies
                    .get(served.min(replies.len().saturating_sub(1)))
                    .cloned()
                    .unwrap_or(StubReply::Status {
                        code: 500,
                        body: "stub exhausted",
                    });
                served += 1;

                let _ = match reply {
                    StubReply::Text(text) => {
                        let payload = serde_json::json!({
                            "candidates": [{
                                "content": { "parts": [{ "text": text }] }
                            }]
                        });
                        request.respond(json_response(payload.to_string(), 200))
                    }
                    StubReply::EmptyCandidates => {
                        let payload = serde_json::json!({ "candidates": [] });
                        request.respond(json_response(payload.to_string(), 200))
                    }
                    StubReply::Status { code, body } => request
                        .respond(tiny_http::Response::from_string(body).with_status_code(code)),
                };
            }
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn json_response(body: String, code: u16) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .expect("build header");
    tiny_http::Response::from_string(body)
        .with_status_code(code)
        .with_header(header)
}

impl Drop for GeminiStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
