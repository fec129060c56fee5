#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{Extension, Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};

/// How the mocked translation service answers.
pub enum Behaviour {
    /// Looks the quoted title up in the map; unknown titles are echoed back.
    Translate(HashMap<String, String>),
    /// Fails the first `failures` calls with a 503, then translates.
    Flaky {
        failures: usize,
        map: HashMap<String, String>,
    },
    /// Always answers with this status.
    Fail(StatusCode),
    /// Answers 200 with a body that is not a chat completion.
    Garbage,
}

struct MockState {
    behaviour: Behaviour,
    calls: Arc<AtomicUsize>,
}

pub struct MockService {
    pub url: String,
    pub calls: Arc<AtomicUsize>,
}

impl MockService {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn translations(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub async fn start_mock(behaviour: Behaviour) -> MockService {
    let calls = Arc::new(AtomicUsize::new(0));
    let state = Arc::new(MockState {
        behaviour,
        calls: Arc::clone(&calls),
    });

    let app = Router::new()
        .route("/v1/chat/completions", post(chat))
        .layer(Extension(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockService {
        url: format!("http://{}/v1/chat/completions", addr),
        calls,
    }
}

/// An endpoint nobody listens on.
pub async fn dead_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/chat/completions", addr)
}

/// An endpoint that accepts connections and never answers.
pub async fn hung_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{}/v1/chat/completions", addr)
}

async fn chat(
    Extension(state): Extension<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let call = state.calls.fetch_add(1, Ordering::SeqCst);

    let content = body["messages"][0]["content"].as_str().unwrap_or_default();
    let source = content.split('\'').nth(1).unwrap_or_default().to_string();

    match &state.behaviour {
        Behaviour::Translate(map) => reply(map, &source),
        Behaviour::Flaky { failures, map } => {
            if call < *failures {
                (StatusCode::SERVICE_UNAVAILABLE, "busy".to_string())
            } else {
                reply(map, &source)
            }
        }
        Behaviour::Fail(status) => (*status, "down".to_string()),
        Behaviour::Garbage => (StatusCode::OK, "<html>not json</html>".to_string()),
    }
}

fn reply(map: &HashMap<String, String>, source: &str) -> (StatusCode, String) {
    let text = map.get(source).cloned().unwrap_or_else(|| source.to_string());
    let body = json!({
        "choices": [
            { "message": { "role": "assistant", "content": format!(" \"{}\" ", text) } }
        ]
    });
    (StatusCode::OK, body.to_string())
}
