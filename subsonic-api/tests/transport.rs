//! Request building, authentication and envelope handling against a mock
//! server.

mod helpers;

use helpers::{CLIENT_NAME, PASSWORD, USER, client, failed, ok, post};
use mockito::{Matcher, Server};
use serde_json::json;
use subsonic_api::{
    ClientConfig, Credentials, ErrorCode, RequestMethod, SubsonicClient, SubsonicError,
};

#[test]
fn post_sends_auth_as_form_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/rest/ping")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("u".into(), USER.into()),
            Matcher::UrlEncoded("v".into(), "1.16.1".into()),
            Matcher::UrlEncoded("c".into(), CLIENT_NAME.into()),
            Matcher::UrlEncoded("f".into(), "json".into()),
            Matcher::Regex("(^|&)t=[0-9a-f]{32}(&|$)".into()),
            Matcher::Regex("(^|&)s=[0-9a-f]{32}(&|$)".into()),
        ]))
        .with_status(200)
        .with_body(ok(json!({})))
        .create();

    client(&server, RequestMethod::Post).ping().unwrap();
    mock.assert();
}

#[test]
fn get_sends_plaintext_password_in_query() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/ping")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("u".into(), USER.into()),
            Matcher::UrlEncoded("p".into(), PASSWORD.into()),
            Matcher::UrlEncoded("f".into(), "json".into()),
        ]))
        .with_status(200)
        .with_body(ok(json!({})))
        .create();

    let credentials = Credentials::new(USER, PASSWORD, CLIENT_NAME)
        .insecure()
        .plaintext();
    let config = ClientConfig::new(server.url(), credentials).method(RequestMethod::Get);
    SubsonicClient::new(config).unwrap().ping().unwrap();
    mock.assert();
}

#[test]
fn list_parameters_repeat_their_key() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/rest/scrobble")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("id=1&id=2".into()),
            Matcher::UrlEncoded("submission".into(), "false".into()),
            Matcher::UrlEncoded("time".into(), "1704164645000".into()),
        ]))
        .with_status(200)
        .with_body(ok(json!({})))
        .create();

    let time = "2024-01-02T03:04:05Z".parse().unwrap();
    client(&server, RequestMethod::Post)
        .scrobble(&["1", "2"], Some(time), false)
        .unwrap();
    mock.assert();
}

#[test]
fn failed_envelope_becomes_api_error() {
    let mut server = Server::new();
    let _mock = post(&mut server, "ping", &[], failed(40, "Wrong username or password"))
        .create();

    let err = client(&server, RequestMethod::Post).ping().unwrap_err();
    match err {
        SubsonicError::Api { code, message } => {
            assert_eq!(code, ErrorCode::WrongCredentials);
            assert_eq!(message, "Wrong username or password");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unlisted_error_code_is_unknown() {
    let mut server = Server::new();
    let _mock = post(&mut server, "ping", &[], failed(99, "???")).create();

    let err = client(&server, RequestMethod::Post).ping().unwrap_err();
    assert_eq!(err.api_code(), Some(ErrorCode::Unknown(99)));
}

#[test]
fn response_without_root_key_is_malformed() {
    let mut server = Server::new();
    let _mock = post(&mut server, "ping", &[], json!({"status": "ok"}).to_string()).create();

    let err = client(&server, RequestMethod::Post).ping().unwrap_err();
    assert!(matches!(err, SubsonicError::MalformedResponse(_)));
}

#[test]
fn invalid_rating_never_reaches_the_server() {
    let mut server = Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let client = client(&server, RequestMethod::Post);
    let err = client.set_rating("s1", 6).unwrap_err();
    assert!(matches!(err, SubsonicError::InvalidArgument(_)));
    let err = client.set_rating("s1", 0).unwrap_err();
    assert!(matches!(err, SubsonicError::InvalidArgument(_)));
    mock.assert();
}

#[test]
fn invalid_gain_never_reaches_the_server() {
    let mut server = Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let client = client(&server, RequestMethod::Post);
    assert!(matches!(
        client.jukebox_set_gain(1.5),
        Err(SubsonicError::InvalidArgument(_))
    ));
    assert!(matches!(
        client.jukebox_set_gain(f32::NAN),
        Err(SubsonicError::InvalidArgument(_))
    ));
    mock.assert();
}

#[test]
fn rating_bounds_are_accepted() {
    let mut server = Server::new();
    let lowest = post(&mut server, "setRating", &[("id", "s1"), ("rating", "1")], ok(json!({})))
        .expect(1)
        .create();
    let highest = post(&mut server, "setRating", &[("id", "s1"), ("rating", "5")], ok(json!({})))
        .expect(1)
        .create();

    let client = client(&server, RequestMethod::Post);
    client.set_rating("s1", 1).unwrap();
    client.set_rating("s1", 5).unwrap();
    lowest.assert();
    highest.assert();
}

#[test]
fn gain_bounds_are_accepted() {
    let mut server = Server::new();
    let status = |gain: f32| {
        ok(json!({"jukeboxStatus": {"currentIndex": -1, "playing": false, "gain": gain}}))
    };
    let silent = post(
        &mut server,
        "jukeboxControl",
        &[("action", "setGain"), ("gain", "0")],
        status(0.0),
    )
    .expect(1)
    .create();
    let full = post(
        &mut server,
        "jukeboxControl",
        &[("action", "setGain"), ("gain", "1")],
        status(1.0),
    )
    .expect(1)
    .create();

    let client = client(&server, RequestMethod::Post);
    client.jukebox_set_gain(0.0).unwrap();
    client.jukebox_set_gain(1.0).unwrap();
    silent.assert();
    full.assert();
}

#[test]
fn remove_rating_sends_zero() {
    let mut server = Server::new();
    let mock = post(&mut server, "setRating", &[("id", "s1"), ("rating", "0")], ok(json!({})))
        .create();

    client(&server, RequestMethod::Post).remove_rating("s1").unwrap();
    mock.assert();
}

#[test]
fn stream_url_is_signed_without_a_request() {
    let mut server = Server::new();
    let mock = server.mock("POST", Matcher::Any).expect(0).create();

    let client = client(&server, RequestMethod::Post);
    let url = client.stream_url("s1", Some(128), Some("opus"));
    assert!(url.starts_with(&format!("{}/rest/stream?", server.url())));
    assert!(url.contains("id=s1"));
    assert!(url.contains("maxBitRate=128"));
    assert!(url.contains("format=opus"));
    assert!(url.contains("&t="));
    mock.assert();
}

#[test]
fn server_extensions_are_listed() {
    let mut server = Server::new();
    let _mock = post(
        &mut server,
        "getOpenSubsonicExtensions",
        &[],
        ok(json!({"openSubsonicExtensions": [{"name": "formPost", "versions": [1]}]})),
    )
    .create();

    let extensions = client(&server, RequestMethod::Post)
        .get_open_subsonic_extensions()
        .unwrap();
    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].name, "formPost");
    assert_eq!(extensions[0].versions, [1]);
}
