//! Shared setup for tests against a mock Subsonic server.

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::{Value, json};
use subsonic_api::{ClientConfig, Credentials, RequestMethod, SubsonicClient};

pub const USER: &str = "alice";
pub const PASSWORD: &str = "sesame";
pub const CLIENT_NAME: &str = "test-suite";

/// A client pointed at `server`, with token auth and the given method.
pub fn client(server: &ServerGuard, method: RequestMethod) -> SubsonicClient {
    let credentials = Credentials::new(USER, PASSWORD, CLIENT_NAME).insecure();
    let config = ClientConfig::new(server.url(), credentials).method(method);
    SubsonicClient::new(config).expect("client builds")
}

/// `{"subsonic-response": {"status": "ok", ...payload}}`
pub fn ok(payload: Value) -> String {
    let mut envelope = json!({"status": "ok", "version": "1.16.1", "openSubsonic": true});
    if let (Some(env), Value::Object(extra)) = (envelope.as_object_mut(), payload) {
        env.extend(extra);
    }
    json!({ "subsonic-response": envelope }).to_string()
}

pub fn failed(code: i64, message: &str) -> String {
    json!({
        "subsonic-response": {
            "status": "failed",
            "version": "1.16.1",
            "error": {"code": code, "message": message}
        }
    })
    .to_string()
}

/// A POST endpoint answering with `body`, matching only requests whose form
/// body carries every `(key, value)` in `params`.
pub fn post(server: &mut Server, endpoint: &str, params: &[(&str, &str)], body: String) -> Mock {
    let matchers = params
        .iter()
        .map(|(k, v)| Matcher::UrlEncoded((*k).into(), (*v).into()))
        .collect();
    server
        .mock("POST", format!("/rest/{endpoint}").as_str())
        .match_body(Matcher::AllOf(matchers))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
}
