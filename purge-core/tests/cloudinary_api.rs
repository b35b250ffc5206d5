//! CloudinaryClient tests against a wiremock Admin API.

use purge_core::{CloudinaryClient, CloudinaryConfig, MediaApi, MediaError, ResourceScope};
use serde_json::json;
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CloudinaryClient {
    let config = CloudinaryConfig::new("demo".into(), "key".into(), "secret".into())
        .with_api_base_url(server.uri());
    CloudinaryClient::new(config).unwrap()
}

#[tokio::test]
async fn delete_resources_sends_ids_with_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1_1/demo/resources/image/upload"))
        .and(basic_auth("key", "secret"))
        .and(query_param("public_ids[]", "a"))
        .and(query_param("public_ids[]", "b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deleted": { "a": "deleted", "b": "deleted" },
            "partial": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .delete_resources(&["a".to_string(), "b".to_string()], ResourceScope::UPLOADED_IMAGES)
        .await
        .unwrap();

    assert_eq!(result["deleted"]["b"], "deleted");
}

#[tokio::test]
async fn delete_by_prefix_passes_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1_1/demo/resources/image/upload"))
        .and(query_param("prefix", "socios/2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "deleted": { "socios/2024/acta": "deleted" },
            "partial": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .delete_resources_by_prefix("socios/2024")
        .await
        .unwrap();

    assert_eq!(result["partial"], false);
}

#[tokio::test]
async fn delete_folder_targets_folder_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1_1/demo/folders/socios/2024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": ["socios/2024"] })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).delete_folder("socios/2024").await.unwrap();

    assert_eq!(result, json!({ "deleted": ["socios/2024"] }));
}

#[tokio::test]
async fn api_errors_carry_remote_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1_1/demo/folders/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "message": "Can't find folder with path missing" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_folder("missing").await.unwrap_err();

    match err {
        MediaError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Can't find folder with path missing");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_reason() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_folder("any").await.unwrap_err();

    assert!(matches!(err, MediaError::Api { status: 502, ref message } if message == "Bad Gateway"));
}

#[tokio::test]
async fn unreadable_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let err = client_for(&server).delete_folder("any").await.unwrap_err();

    assert!(matches!(err, MediaError::Decode(_)));
}
