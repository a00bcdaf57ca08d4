//! Tests for the HTTP surface.

use std::sync::Arc;

use axum::http::HeaderMap;
use reqwest::{header, redirect::Policy, StatusCode};
use serde_json::Value;
use tempfile::TempDir;

use super::*;
use crate::session::{Session, SessionError, SessionStore, SESSION_COOKIE};

struct FailingProvider;

impl SessionProvider for FailingProvider {
    fn current_session(&self, _: &HeaderMap) -> Result<Option<Session>, SessionError> {
        Err(SessionError::Io {
            path: "session.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
        })
    }
}

/// Start the app on a random port, returning its base URL.
async fn spawn(provider: Arc<dyn SessionProvider>) -> String {
    let (listener, addr) = bind("127.0.0.1:0".parse().unwrap()).await.unwrap();
    let state = AppState::new(provider, GateConfig::default());
    tokio::spawn(async move {
        serve(listener, state, std::future::pending::<()>()).await.ok();
    });
    format!("http://{}", addr)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

fn store() -> (TempDir, Arc<SessionStore>) {
    let tmp = TempDir::new().unwrap();
    let store = SessionStore::new(tmp.path()).unwrap();
    (tmp, Arc::new(store))
}

#[tokio::test]
async fn test_login_without_session_renders_sign_in() {
    let (_tmp, store) = store();
    let base = spawn(store).await;

    let resp = client()
        .get(format!("{}/login?callbackurl=/app/prompts", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::LOCATION).is_none());

    let body = resp.text().await.unwrap();
    assert!(body.contains("Welcome!"));
    assert!(body.contains("/api/auth/signin/google?callbackUrl=%2Fapp%2Fprompts"));
    assert!(body.contains("/privacy_policy.pdf"));
}

#[tokio::test]
async fn test_login_with_session_redirects() {
    let (_tmp, store) = store();
    let (_, token) = store.create_session("ada").unwrap();
    let base = spawn(store).await;

    let resp = client()
        .get(format!("{}/login", base))
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/app");
    assert!(resp.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_stale_cookie_renders_sign_in() {
    let (_tmp, store) = store();
    store.create_session("ada").unwrap();
    let base = spawn(store).await;

    let resp = client()
        .get(format!("{}/login", base))
        .header(header::COOKIE, format!("{}=stale", SESSION_COOKIE))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_session_failure_is_server_error() {
    let base = spawn(Arc::new(FailingProvider)).await;

    let resp = client().get(format!("{}/login", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_home_requires_session() {
    let (_tmp, store) = store();
    let (_, token) = store.create_session("ada").unwrap();
    let base = spawn(store).await;

    let resp = client().get(format!("{}/app", base)).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/login?callbackurl=%2Fapp");

    let resp = client()
        .get(format!("{}/app", base))
        .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Signed in as ada"));
}

#[tokio::test]
async fn test_engines_endpoint() {
    let (_tmp, store) = store();
    let base = spawn(store).await;

    let body: Value = client()
        .get(format!("{}/api/engines?type=json", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["google", "openai"]);
    assert_eq!(body["openai"]["name"], "OpenAI");

    let body: Value = client()
        .get(format!("{}/api/engines?type=audio", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({}));
}

#[tokio::test]
async fn test_options_endpoint() {
    let (_tmp, store) = store();
    let base = spawn(store).await;

    let body: Value = client()
        .post(format!("{}/api/options", base))
        .json(&serde_json::json!({
            "type": "text",
            "llm_client": "openai",
            "model": "gpt-3.5-turbo"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["options"]["max_tokens"]["default"], 500.0);
    assert_eq!(body["defaults"]["temperature"], 0.5);
    assert_eq!(body["defaults"].as_object().unwrap().len(), 5);

    let body: Value = client()
        .post(format!("{}/api/options", base))
        .json(&serde_json::json!({
            "type": "json",
            "llm_client": "openai",
            "model": "gpt-3.5-turbo"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["options"], serde_json::json!({}));
    assert_eq!(body["defaults"], serde_json::json!({}));
}
