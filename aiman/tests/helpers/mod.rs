#![allow(dead_code)]

use aiman::credential::TokenCredential;
use aiman::types::HostUrl;
use aiman::AimanClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "t0k3n";

/// Wrap a payload the way the service wraps every successful response.
pub fn envelope(data: Value) -> Value {
    json!({"messageContent": {"data": data}})
}

pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(data))
}

pub fn host_of(server: &MockServer) -> HostUrl {
    HostUrl::try_from(server.uri()).unwrap()
}

/// A client holding [TOKEN], which does not expire.
pub fn token_client(server: &MockServer) -> AimanClient {
    AimanClient::build(host_of(server))
        .connect_with_token(TOKEN, None)
        .unwrap()
}

/// A client whose token expired a while ago.
pub fn expired_client(server: &MockServer, auto_refresh: bool) -> AimanClient {
    let credential = TokenCredential::with_token(host_of(server), "old", Some(1))
        .with_refresh_token("r3fr3sh");
    AimanClient::build(host_of(server))
        .auto_refresh(auto_refresh)
        .connect_with_credential(credential)
        .unwrap()
}

/// Respond to a password login with `token`, valid for an hour.
pub async fn mount_authenticate(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/authenticate"))
        .respond_with(ok(json!({"accessToken": token, "expiresIn": 3600})))
        .mount(server)
        .await;
}

pub fn datasource_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "summary": "",
        "categories": [],
        "tags": ["docs"],
        "assocContexts": [],
        "media": [],
        "status": 1,
        "mediaCount": 0,
        "ownerId": 7
    })
}

pub async fn request_bodies(server: &MockServer, method_name: &str, url_path: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == method_name && r.url.path() == url_path)
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}
