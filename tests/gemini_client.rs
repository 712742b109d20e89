use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use veritas_rs::llm::{GeminiClient, Llm};
use veritas_rs::types::Verdict;
use veritas_rs::{FactCheckClient, LlmError};

#[derive(Default)]
struct Seen {
    call: Option<String>,
    api_key: Option<String>,
    body: Option<Value>,
}

struct Mock {
    status: StatusCode,
    reply: &'static str,
    seen: Mutex<Seen>,
}

async fn generate(
    State(mock): State<Arc<Mock>>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let mut seen = mock.seen.lock().unwrap();
    seen.call = Some(call);
    seen.api_key = headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()).map(String::from);
    seen.body = Some(body);
    (mock.status, mock.reply.to_string())
}

async fn spawn_mock(status: StatusCode, reply: &'static str) -> (String, Arc<Mock>) {
    let mock = Arc::new(Mock { status, reply, seen: Mutex::new(Seen::default()) });
    let app = Router::new()
        .route("/v1beta/models/:call", post(generate))
        .with_state(mock.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), mock)
}

fn client(base_url: String) -> GeminiClient {
    GeminiClient::new("test-key".into(), "gemini-2.5-flash".into(), Some(base_url), 10, 5_000).unwrap()
}

const GROUNDED_REPLY: &str = r#"{
  "candidates": [{
    "content": { "role": "model", "parts": [{ "text": "VERDICT: TRUE\nEdison patented a practical bulb in 1880." }] },
    "groundingMetadata": {
      "webSearchQueries": ["edison light bulb"],
      "groundingChunks": [
        { "web": { "uri": "https://history.example/edison", "title": "history.example" } }
      ]
    }
  }]
}"#;

#[tokio::test]
async fn sends_grounded_request_and_reads_reply() {
    let (base, mock) = spawn_mock(StatusCode::OK, GROUNDED_REPLY).await;
    let reply = client(base).generate_grounded("Is it true?").await.unwrap();

    assert_eq!(reply.text, "VERDICT: TRUE\nEdison patented a practical bulb in 1880.");
    assert_eq!(reply.sources.len(), 1);
    assert_eq!(reply.sources[0].uri(), "https://history.example/edison");

    let seen = mock.seen.lock().unwrap();
    assert_eq!(seen.call.as_deref(), Some("gemini-2.5-flash:generateContent"));
    assert_eq!(seen.api_key.as_deref(), Some("test-key"));
    let body = seen.body.as_ref().unwrap();
    assert_eq!(body["contents"][0]["parts"][0]["text"], "Is it true?");
    assert!(body["tools"][0].get("google_search").is_some());
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (base, _) = spawn_mock(StatusCode::TOO_MANY_REQUESTS, r#"{"error":{"code":429}}"#).await;
    let err = client(base).generate_grounded("x").await.unwrap_err();
    match err {
        LlmError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("429"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let err = client(format!("http://{addr}")).generate_grounded("x").await.unwrap_err();
    assert!(matches!(err, LlmError::Transport(_)));
}

#[tokio::test]
async fn end_to_end_check_through_http() {
    let (base, mock) = spawn_mock(StatusCode::OK, GROUNDED_REPLY).await;
    let checker = FactCheckClient::new(Arc::new(client(base)));
    let res = checker.check("Thomas Edison invented the light bulb.").await.unwrap();
    assert_eq!(res.verdict, Verdict::True);
    assert_eq!(res.explanation, "Edison patented a practical bulb in 1880.");

    let seen = mock.seen.lock().unwrap();
    let prompt = seen.body.as_ref().unwrap()["contents"][0]["parts"][0]["text"].as_str().unwrap().to_string();
    assert!(prompt.ends_with("Statement: \"Thomas Edison invented the light bulb.\""));
}

#[tokio::test]
async fn garbage_body_fails_the_check() {
    let (base, _) = spawn_mock(StatusCode::OK, "not json at all").await;
    let err = FactCheckClient::new(Arc::new(client(base))).check("x").await.unwrap_err();
    assert!(matches!(err.inner(), LlmError::InvalidResponse(_)));
}
