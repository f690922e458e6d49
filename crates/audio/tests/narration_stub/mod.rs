//! Local stand-in for the Minimax TTS and object-storage endpoints.
//!
//! One server covers both stages of the pipeline, routed by URL prefix,
//! and records every request's URL, headers, and body bytes.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Behavior of each stage, fixed at spawn time.
#[derive(Debug, Clone, Copy)]
pub struct StubBehavior {
    /// Status returned by `/v1/text_to_speech`.
    pub tts_status: u16,
    /// Status returned by the storage object write.
    pub storage_status: u16,
}

impl Default for StubBehavior {
    fn default() -> Self {
        Self {
            tts_status: 200,
            storage_status: 200,
        }
    }
}

/// A recorded request: URL path, lowercased header pairs, raw body.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Audio bytes served by the TTS stage.
pub const FAKE_AUDIO: &[u8] = b"ID3\x04fake-mp3-payload";

pub struct NarrationStub {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl NarrationStub {
    pub fn spawn(behavior: StubBehavior) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start narration stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            let mut request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let mut body = Vec::new();
            let _ = std::io::Read::read_to_end(request.as_reader(), &mut body);
            let url = request.url().to_string();
            let headers = request
                .headers()
                .iter()
                .map(|h| {
                    (
                        h.field.as_str().as_str().to_ascii_lowercase(),
                        h.value.as_str().to_string(),
                    )
                })
                .collect();
            recorded.lock().unwrap().push(RecordedRequest {
                url: url.clone(),
                headers,
                body,
            });

            let _ = if url.starts_with("/v1/text_to_speech") {
                if behavior.tts_status == 200 {
                    request.respond(tiny_http::Response::from_data(FAKE_AUDIO.to_vec()))
                } else {
                    request.respond(
                        tiny_http::Response::from_string("tts failed")
                            .with_status_code(behavior.tts_status),
                    )
                }
            } else if url.starts_with("/storage/v1/object/") {
                if behavior.storage_status == 200 {
                    request.respond(tiny_http::Response::from_string(r#"{"Key":"ok"}"#))
                } else {
                    request.respond(
                        tiny_http::Response::from_string("upload rejected")
                            .with_status_code(behavior.storage_status),
                    )
                }
            } else {
                request.respond(tiny_http::Response::from_string("not found").with_status_code(404))
            };
        });

        Self {
            base_url,
            requests,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }
}

impl Drop for NarrationStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
