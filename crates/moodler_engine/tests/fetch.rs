use moodler_core::SessionCredential;
use moodler_engine::{FetchSettings, HttpClient, RedirectMode, ReqwestClient};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(token: &str) -> ReqwestClient {
    let credential = SessionCredential::new(token).unwrap();
    ReqwestClient::new(&credential, FetchSettings::default()).unwrap()
}

fn url(server: &MockServer, path: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), path)).unwrap()
}

#[tokio::test]
async fn session_cookie_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/course/view.php"))
        .and(header("cookie", "MoodleSession=tok123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = client("tok123")
        .get(&url(&server, "/course/view.php?id=1"), RedirectMode::Follow)
        .await
        .expect("fetch ok");
    assert_eq!(response.status, 200);
    assert_eq!(response.reason, "OK");
    assert!(response.content_type().unwrap().starts_with("text/html"));
    assert_eq!(response.body, b"<html>ok</html>");
}

#[tokio::test]
async fn manual_mode_returns_redirect_with_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mod/resource/view.php"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/files/notes.pdf"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/notes.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client("tok");
    let link = url(&server, "/mod/resource/view.php?id=3");

    let manual = client.get(&link, RedirectMode::Manual).await.unwrap();
    assert!(manual.is_redirect());
    assert_eq!(manual.status, 303);
    assert_eq!(manual.location(), Some("/files/notes.pdf"));

    let followed = client.get(&link, RedirectMode::Follow).await.unwrap();
    assert_eq!(followed.status, 200);
    assert_eq!(followed.url.path(), "/files/notes.pdf");
    assert_eq!(followed.body, b"%PDF");
}

#[tokio::test]
async fn error_statuses_are_responses_not_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = client("tok")
        .get(&url(&server, "/missing"), RedirectMode::Follow)
        .await
        .unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.reason, "Not Found");
    assert_eq!(response.location(), None);
}

#[test]
fn credential_that_cannot_be_a_header_is_rejected() {
    let credential = SessionCredential::new("bad\ntoken").unwrap();
    let err = ReqwestClient::new(&credential, FetchSettings::default()).unwrap_err();
    assert_eq!(err.kind, moodler_engine::FailureKind::InvalidCredential);
}
