use listing_monitor::infrastructure::notify::{NotifyError, Notifier, PushoverNotifier};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn pushover_posts_form_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/messages.json"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("token=app-token"))
        .and(body_string_contains("user=user-key"))
        .and(body_string_contains("title=Listing+Count+Update"))
        .and(body_string_contains("message=Listings+changed+from+5+to+9"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":1}"#))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = format!("{}/1/messages.json", server.uri());
    let notifier = PushoverNotifier::with_endpoint(endpoint, "app-token", "user-key").unwrap();

    notifier
        .send(
            "Listing Count Update",
            "Listings changed from 5 to 9 at https://shop.test/a",
        )
        .await
        .expect("send ok");
}

#[tokio::test]
async fn pushover_rejected_credentials_are_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/messages.json"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"status":0}"#))
        .mount(&server)
        .await;

    let endpoint = format!("{}/1/messages.json", server.uri());
    let notifier = PushoverNotifier::with_endpoint(endpoint, "bad-token", "user-key").unwrap();

    let err = notifier.send("title", "body").await.unwrap_err();
    assert!(matches!(err, NotifyError::Status(400)));
}
