#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
};
use chrono::Utc;
use donation_auth_server::{
    api::router,
    config::AuthConfig,
    profiles::{InMemoryProfileStore, ProfileStore},
    state::AppState,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};

pub const AUDIENCE: &str = "api://expected";
pub const DOMAIN: &str = "tenant.example";

pub fn auth_config() -> AuthConfig {
    AuthConfig::new(AUDIENCE, DOMAIN)
}

/// Router over a fresh in-memory profile store.
pub fn create_test_app() -> (axum::Router, Arc<InMemoryProfileStore>) {
    let store = Arc::new(InMemoryProfileStore::new());
    (create_app_with(store.clone()), store)
}

pub fn create_app_with(profiles: Arc<dyn ProfileStore>) -> axum::Router {
    router(AppState::new(auth_config(), profiles))
}

/// Claims the server accepts for the next hour.
pub fn valid_claims(subject: &str) -> Value {
    let now = Utc::now().timestamp();
    json!({
        "iss": format!("https://{DOMAIN}/"),
        "sub": subject,
        "aud": AUDIENCE,
        "exp": now + 3600,
        "iat": now,
        "email": "donor@example.org",
        "name": "Dana Donor",
        "picture": "https://cdn.example/dana.png",
    })
}

pub fn sign(claims: &Value) -> String {
    let header = Header {
        kid: Some("integration-key".to_string()),
        ..Header::new(Algorithm::HS256)
    };
    encode(&header, claims, &EncodingKey::from_secret(b"integration-secret"))
        .expect("Failed to sign test token")
}

pub fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
