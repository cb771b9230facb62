use std::sync::Arc;
use std::time::Duration;
use virtual_tryon::app::{App, AppServices};
use virtual_tryon::fal::{FalClient, MockTryOnClient};
use virtual_tryon::router::RouterResponse;
use virtual_tryon::settings::{FileSettingsStore, MockSettingsStore, SettingsStore};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 1x1 PNG
const TEST_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0x99, 0x63, 0xF8,
    0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2, 0x25, 0x00, 0xBC, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn write_test_photo(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("me.png");
    std::fs::write(&path, TEST_PNG).unwrap();
    path
}

#[tokio::test]
async fn test_full_workflow_with_mocks() {
    let dir = tempfile::tempdir().unwrap();
    let photo_path = write_test_photo(&dir);

    let tryon = MockTryOnClient::new().with_image_url("https://fal.media/tryon.jpeg".to_string());
    let app = App::with_services(AppServices {
        settings: Arc::new(MockSettingsStore::new().with_api_key("fal-key".to_string())),
        tryon: Arc::new(tryon.clone()),
        fallback_api_key: None,
    });

    app.set_photo(&photo_path).await.unwrap();

    let response = app
        .try_on("https://shop.test/jacket.jpg?width=800")
        .await
        .unwrap();

    assert_eq!(
        response,
        RouterResponse::Generated {
            image_url: "https://fal.media/tryon.jpeg".to_string(),
        }
    );

    // The generation request carries the data-URI photo first and the
    // query-stripped product URL second.
    let request = tryon.last_request().unwrap();
    assert!(request.image_urls[0].starts_with("data:image/png;base64,"));
    assert_eq!(request.image_urls[1], "https://shop.test/jacket.jpg");
}

#[tokio::test]
async fn test_try_on_without_photo_requests_upload() {
    let tryon = MockTryOnClient::new();
    let app = App::with_services(AppServices {
        settings: Arc::new(MockSettingsStore::new().with_api_key("fal-key".to_string())),
        tryon: Arc::new(tryon.clone()),
        fallback_api_key: None,
    });

    let response = app.try_on("https://shop.test/jacket.jpg").await.unwrap();

    assert!(matches!(
        response,
        RouterResponse::UploadPromptRequired { .. }
    ));
    assert_eq!(tryon.get_call_count(), 0);
}

#[tokio::test]
async fn test_end_to_end_against_queue_server() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(serde_json::json!({
            "num_images": 1,
            "output_format": "jpeg"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "request_id": "req-e2e"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/requests/req-e2e/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "IN_PROGRESS"
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/requests/req-e2e/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "COMPLETED"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/requests/req-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "images": [{ "url": "https://fal.media/e2e.jpeg" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let photo_path = write_test_photo(&dir);
    let settings_path = dir.path().join("settings.json");

    let app = App::with_services(AppServices {
        settings: Arc::new(FileSettingsStore::new(&settings_path)),
        tryon: Arc::new(
            FalClient::new()
                .with_queue_url(server.uri())
                .with_poll_interval(Duration::from_millis(5)),
        ),
        fallback_api_key: None,
    });

    app.set_api_key("fal-key-e2e").await.unwrap();
    app.set_photo(&photo_path).await.unwrap();

    let response = app.try_on("https://shop.test/jacket.jpg").await.unwrap();

    assert_eq!(
        response,
        RouterResponse::Generated {
            image_url: "https://fal.media/e2e.jpeg".to_string(),
        }
    );
}

#[tokio::test]
async fn test_remote_balance_error_reaches_the_caller() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(402).set_body_string("payment required"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let photo_path = write_test_photo(&dir);

    let app = App::with_services(AppServices {
        settings: Arc::new(MockSettingsStore::new().with_api_key("fal-key".to_string())),
        tryon: Arc::new(
            FalClient::new()
                .with_queue_url(server.uri())
                .with_poll_interval(Duration::from_millis(5)),
        ),
        fallback_api_key: None,
    });

    app.set_photo(&photo_path).await.unwrap();
    let response = app.try_on("https://shop.test/jacket.jpg").await.unwrap();

    match response {
        RouterResponse::Failed { error } => assert!(error.contains("insufficient balance")),
        other => panic!("Expected Failed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_settings_survive_across_app_instances() {
    let dir = tempfile::tempdir().unwrap();
    let photo_path = write_test_photo(&dir);
    let settings_path = dir.path().join("settings.json");

    let settings = Arc::new(FileSettingsStore::new(&settings_path));
    let first = App::with_services(AppServices {
        settings,
        tryon: Arc::new(MockTryOnClient::new()),
        fallback_api_key: None,
    });
    first.set_api_key("fal-key").await.unwrap();
    first.set_photo(&photo_path).await.unwrap();

    let reopened = FileSettingsStore::new(&settings_path);
    assert_eq!(
        reopened.api_key().await.unwrap().as_deref(),
        Some("fal-key")
    );
    let photo = reopened.user_photo().await.unwrap().unwrap();
    assert_eq!(photo.name, "me.png");
    assert!(photo.data.starts_with("data:image/png;base64,"));

    let second = App::with_services(AppServices {
        settings: Arc::new(reopened),
        tryon: Arc::new(
            MockTryOnClient::new().with_image_url("https://fal.media/again.jpeg".to_string()),
        ),
        fallback_api_key: None,
    });
    let response = second.try_on("https://shop.test/jacket.jpg").await.unwrap();
    assert_eq!(
        response,
        RouterResponse::Generated {
            image_url: "https://fal.media/again.jpeg".to_string(),
        }
    );
}
