use chrono::{Local, TimeZone};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentinel_token::api::{FetchError, TokenFetcher};
use sentinel_token::auth::Credentials;
use sentinel_token::ui::Reporter;

const SAMPLE_JWT: &str = "a.eyJleHAiOjE3MDAwMDAwMDAsImp0aSI6ImFiYzEyMyJ9.sig";

fn credentials() -> Credentials {
    Credentials::from_command_line("cb145961-client".to_string(), "top-secret".to_string())
        .unwrap()
}

fn fetcher(server: &MockServer) -> TokenFetcher {
    TokenFetcher::new().with_token_url(format!("{}/oauth/token", server.uri()))
}

fn output(reporter: Reporter<Vec<u8>>) -> String {
    String::from_utf8(reporter.into_inner()).unwrap()
}

async fn mount(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_sends_client_credentials_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=cb145961-client"))
        .and(body_string_contains("client_secret=top-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": SAMPLE_JWT,
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut reporter = Reporter::new(Vec::new());
    let token = fetcher(&server).fetch(&credentials(), &mut reporter).await;

    assert_eq!(token.as_deref(), Some(SAMPLE_JWT));
}

#[tokio::test]
async fn test_successful_fetch_report() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "access_token": SAMPLE_JWT })),
    )
    .await;

    let mut reporter = Reporter::new(Vec::new());
    let token = fetcher(&server).fetch(&credentials(), &mut reporter).await;
    reporter.access_token(token.as_deref());

    let expires = Local
        .timestamp_opt(1_700_000_000, 0)
        .unwrap()
        .format("%H:%M:%S")
        .to_string();
    let expected = format!(
        "[-] Requesting token for Client ID: cb145...\n\
         [-] Token Received!\n\
         [-] Token Unique ID (jti): abc123\n\
         [-] Token Expires at:      {} (Local Time)\n\
         \n\
         ACCESS TOKEN:\n\
         {}\n",
        expires, SAMPLE_JWT
    );
    assert_eq!(output(reporter), expected);
}

#[tokio::test]
async fn test_unauthorized_returns_none() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid_client"}"#),
    )
    .await;

    let mut reporter = Reporter::new(Vec::new());
    let token = fetcher(&server).fetch(&credentials(), &mut reporter).await;
    reporter.access_token(token.as_deref());

    assert!(token.is_none());
    let text = output(reporter);
    assert!(text.contains("[!] Error: 401 Unauthorized for url: "), "{text}");
    assert!(text.contains(r#"[!] Response: {"error":"invalid_client"}"#), "{text}");
    assert!(!text.contains("Token Received"));
    assert!(text.ends_with("\nACCESS TOKEN:\nNone\n"));
}

#[tokio::test]
async fn test_request_token_status_error_keeps_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(500).set_body_string("upstream down")).await;

    let err = fetcher(&server)
        .request_token(&credentials())
        .await
        .unwrap_err();

    match &err {
        FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(err.response_body(), Some("upstream down"));
}

#[tokio::test]
async fn test_empty_error_body_is_not_printed() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(403)).await;

    let mut reporter = Reporter::new(Vec::new());
    let token = fetcher(&server).fetch(&credentials(), &mut reporter).await;

    assert!(token.is_none());
    let text = output(reporter);
    assert!(text.contains("[!] Error: 403 Forbidden"));
    assert!(!text.contains("[!] Response:"));
}

#[tokio::test]
async fn test_missing_access_token() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })),
    )
    .await;

    let mut reporter = Reporter::new(Vec::new());
    let token = fetcher(&server).fetch(&credentials(), &mut reporter).await;

    assert!(token.is_none());
    assert!(output(reporter).contains("[!] Response contained no access_token"));
}

#[tokio::test]
async fn test_non_json_success_body() {
    let server = MockServer::start().await;
    mount(&server, ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

    let mut reporter = Reporter::new(Vec::new());
    let token = fetcher(&server).fetch(&credentials(), &mut reporter).await;

    assert!(token.is_none());
    let text = output(reporter);
    assert!(text.contains("[!] Error: token response is not valid JSON"));
    assert!(text.contains("[!] Response: <html>oops</html>"));
}

#[tokio::test]
async fn test_opaque_token_is_still_returned() {
    let server = MockServer::start().await;
    mount(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "access_token": "opaque-token" })),
    )
    .await;

    let mut reporter = Reporter::new(Vec::new());
    let token = fetcher(&server).fetch(&credentials(), &mut reporter).await;

    assert_eq!(token.as_deref(), Some("opaque-token"));
    let text = output(reporter);
    assert!(text.contains("Could not decode token: token has no payload segment"));
    assert!(text.contains("[-] Token Unique ID (jti): None"));
    assert!(text.contains("[-] Token Expires at:      unknown (Local Time)"));
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Port 1 is reserved and closed on test machines
    let fetcher = TokenFetcher::new().with_token_url("http://127.0.0.1:1/oauth/token");

    let err = fetcher.request_token(&credentials()).await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
    assert_eq!(err.response_body(), None);
}
