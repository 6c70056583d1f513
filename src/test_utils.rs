//! Test utilities and fixtures for history-enricher tests.
//!
//! Provides model factories, history/response builders, and a tiny HTTP
//! stub server so the real `reqwest` clients can be exercised without
//! touching the network.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{StubResponse, StubServer};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let server = StubServer::start(vec![StubResponse::json(200, "{}")]).await;
//!     let url = server.url("/v1/tracks");
//!     // ... point a client at `url`
//! }
//! ```

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use crate::model::{PlayEvent, TrackMetadata};

/// Creates a TrackMetadata for `track_id` with sensible defaults.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let meta = TrackMetadata {
///     popularity: 99,
///     ..mock_track_metadata("id1")
/// };
/// ```
pub fn mock_track_metadata(track_id: &str) -> TrackMetadata {
    TrackMetadata {
        artist_name: "Test Artist".to_string(),
        artist_id: "artist-1".to_string(),
        album_name: "Test Album".to_string(),
        album_id: "album-1".to_string(),
        track_name: format!("Track {}", track_id),
        track_id: track_id.to_string(),
        release_date: "2020-01-31".to_string(),
        release_date_precision: "day".to_string(),
        duration_ms: 180_000,
        popularity: 50,
        explicit: false,
    }
}

pub fn play_event(timestamp: &str, track_id: &str) -> PlayEvent {
    PlayEvent {
        timestamp: timestamp.to_string(),
        track_id: track_id.to_string(),
    }
}

/// Build a history export with the given (timestamp, track ID) rows.
pub fn history_csv(rows: &[(&str, &str)]) -> String {
    let mut csv = String::from("ts,username,platform,ms_played,spotify_track_uri\n");
    for (timestamp, track_id) in rows {
        csv.push_str(&format!(
            "\"{}\", \"user\", \"web player\", \"1000\", \"{}\"\n",
            timestamp, track_id
        ));
    }
    csv
}

/// Build a `/v1/tracks` response body for the given IDs.
pub fn tracks_json(ids: &[&str]) -> String {
    let tracks: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("Track {}", id),
                "duration_ms": 180000,
                "popularity": 50,
                "explicit": false,
                "artists": [{"id": "artist-1", "name": "Test Artist"}],
                "album": {
                    "id": "album-1",
                    "name": "Test Album",
                    "release_date": "2020-01-31",
                    "release_date_precision": "day"
                }
            })
        })
        .collect();
    serde_json::json!({ "tracks": tracks }).to_string()
}

/// Canned HTTP response served by [`StubServer`].
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
    /// Content-Length to announce instead of the real body length
    pub declared_length: Option<usize>,
}

impl StubResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
            declared_length: None,
        }
    }

    /// Announce more body than is sent, so the client sees the connection
    /// close mid-body.
    pub fn cut_short(mut self) -> Self {
        self.declared_length = Some(self.body.len() + 1024);
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn to_http(&self) -> String {
        let mut out = format!("HTTP/1.1 {} Stub\r\n", self.status);
        for (name, value) in &self.headers {
            out.push_str(&format!("{}: {}\r\n", name, value));
        }
        out.push_str(&format!(
            "Content-Length: {}\r\nConnection: close\r\n\r\n",
            self.declared_length.unwrap_or(self.body.len())
        ));
        out.push_str(&self.body);
        out
    }
}

/// Minimal HTTP/1.1 server on a random local port.
///
/// Serves `responses` in order, one per connection (the last one repeats),
/// and records each raw request. Shuts down with the test runtime.
pub struct StubServer {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(responses: Vec<StubResponse>) -> Self {
        assert!(!responses.is_empty(), "stub server needs a response");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let addr = listener.local_addr().expect("Stub server has no address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            let mut served = 0;
            while let Ok((mut socket, _)) = listener.accept().await {
                let request = read_request(&mut socket).await;
                recorded.lock().unwrap().push(request);

                let response = &responses[served.min(responses.len() - 1)];
                served += 1;
                let _ = socket.write_all(response.to_http().as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    /// Absolute URL for `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Raw requests received so far (request line, headers, body).
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Read one request: headers, then as much body as Content-Length announces.
async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(head_end) = find_subslice(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + body_len {
                break;
            }
        }

        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
