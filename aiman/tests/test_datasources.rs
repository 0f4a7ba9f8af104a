mod helpers;

use aiman::errors::AimanError;
use aiman::models::Datasource;
use aiman::reqwest::Method;
use aiman::routes::Route;
use aiman::types::DatasourceId;
use camino::Utf8PathBuf;
use helpers::*;
use rstest::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_datasource(server: &MockServer, id: i64, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/datasources/{}", id)))
        .respond_with(ok(json!({"datasource": datasource_json(id, name)})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_list_datasources_fetches_each() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasources"))
        .respond_with(ok(json!({"datasources": [{"id": 3}, {"id": 5}]})))
        .expect(1)
        .mount(&server)
        .await;
    mount_datasource(&server, 3, "manuals").await;
    mount_datasource(&server, 5, "papers").await;

    let datasources = token_client(&server).list_datasources().await.unwrap();
    let found: Vec<(i64, &str)> = datasources
        .iter()
        .map(|ds| (*ds.id, ds.name.as_str()))
        .collect();
    assert_eq!(found, vec![(3, "manuals"), (5, "papers")]);
    assert_eq!(datasources[0].tags, vec!["docs"]);
    assert_eq!(datasources[0].owner_id, 7);
}

#[tokio::test]
async fn test_create_datasource() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/datasources"))
        .and(body_partial_json(json!({
            "name": "manuals",
            "summary": "product manuals",
            "tags": ["docs"],
            "categories": [],
            "assocContexts": [],
            "media": []
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(envelope(json!({"datasource": datasource_json(9, "manuals")}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let id = token_client(&server)
        .create_datasource(
            "manuals",
            "product manuals",
            Some(vec!["docs".to_string()]),
            None,
        )
        .await
        .unwrap();
    assert_eq!(id, DatasourceId(9));
}

#[tokio::test]
async fn test_create_datasource_without_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/datasources"))
        .respond_with(ok(json!({"created": true})))
        .mount(&server)
        .await;

    let result = token_client(&server)
        .create_datasource("manuals", "", None, None)
        .await;
    assert!(matches!(result, Err(AimanError::UnexpectedResponse(_))));
}

#[tokio::test]
async fn test_create_datasource_requires_name() {
    let server = MockServer::start().await;
    let result = token_client(&server)
        .create_datasource(" ", "", None, None)
        .await;
    assert!(matches!(result, Err(AimanError::Validation(_))));
}

#[rstest]
#[case(200)]
#[case(204)]
#[case(404)]
#[case(500)]
#[tokio::test]
async fn test_delete_returns_status_unchecked(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/datasources/42"))
        .respond_with(ResponseTemplate::new(status).set_body_string("not json"))
        .expect(1)
        .mount(&server)
        .await;

    let actual = token_client(&server)
        .delete_datasource(DatasourceId(42))
        .await
        .unwrap();
    assert_eq!(actual, status);
}

#[tokio::test]
async fn test_update_datasource() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/datasources/3"))
        .and(body_partial_json(json!({"name": "renamed", "tags": ["docs"]})))
        .respond_with(ok(datasource_json(3, "renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let datasource = Datasource {
        id: DatasourceId(3),
        name: "renamed".to_string(),
        tags: vec!["docs".to_string()],
        ..Default::default()
    };
    let updated = token_client(&server)
        .update_datasource(&datasource)
        .await
        .unwrap();
    assert_eq!(updated.name, "renamed");
    let body = &request_bodies(&server, "PUT", "/api/v1/datasources/3").await[0];
    assert!(body.get("id").is_none());
}

#[tokio::test]
async fn test_add_documents() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();
    let file = Utf8PathBuf::from_path_buf(tmp.path().join("table.csv")).unwrap();
    fs_err::write(file.as_std_path(), b"a,b\n").unwrap();

    let mut existing = datasource_json(3, "manuals");
    existing["media"] = json!([{"name": "old.pdf", "base64": "AA==", "mimeType": "application/pdf", "id": 11}]);
    Mock::given(method("GET"))
        .and(path("/api/v1/datasources/3"))
        .respond_with(ok(json!({"datasource": existing})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/datasources/3"))
        .respond_with(ok(json!({"datasource": datasource_json(3, "manuals")})))
        .expect(1)
        .mount(&server)
        .await;

    token_client(&server)
        .add_documents(
            DatasourceId(3),
            [file.as_str(), "https://example.org/faq"],
        )
        .await
        .unwrap();

    let body = &request_bodies(&server, "PUT", "/api/v1/datasources/3").await[0];
    let media = body["media"].as_array().unwrap();
    assert_eq!(media.len(), 3);
    assert_eq!(media[0]["name"], "old.pdf");
    assert_eq!(media[0]["id"], 11);
    assert_eq!(media[1]["name"], "table.csv");
    assert_eq!(media[1]["mime_type"], "application/csv");
    assert_eq!(media[2]["name"], "https://example.org/faq");
}

#[rstest]
#[case(200)]
#[case(201)]
#[case(202)]
#[tokio::test]
async fn test_envelope_unwrapped_on_success(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models"))
        .respond_with(ResponseTemplate::new(status).set_body_json(envelope(json!({"x": 1}))))
        .mount(&server)
        .await;

    let data = token_client(&server)
        .dispatcher()
        .send(Method::GET, &Route::Models, None)
        .await
        .unwrap();
    assert_eq!(data, json!({"x": 1}));
}

#[rstest]
#[case(204)]
#[case(400)]
#[case(404)]
#[case(500)]
#[tokio::test]
async fn test_other_status_is_error(#[case] status: u16) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(&server)
        .await;

    match token_client(&server).list_models().await {
        Err(AimanError::Http { status: actual, .. }) => assert_eq!(actual.as_u16(), status),
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    assert!(matches!(
        token_client(&server).list_models().await,
        Err(AimanError::Envelope(_))
    ));
}

#[tokio::test]
async fn test_unserializable_body_is_not_sent() {
    let server = MockServer::start().await;
    let body: std::collections::BTreeMap<(i32, i32), i32> = [((1, 2), 3)].into_iter().collect();

    let result = token_client(&server)
        .dispatcher()
        .send_json::<_, serde_json::Value>(Method::POST, &Route::Datasources, Some(&body))
        .await;
    match result {
        Err(err @ AimanError::Body(_)) => {
            assert!(err.to_string().starts_with("could not serialize request body"))
        }
        other => panic!("expected body error, got {:?}", other),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_null_fields_from_service() {
    let server = MockServer::start().await;
    let mut datasource = datasource_json(3, "manuals");
    datasource["media"] = json!(null);
    datasource["summary"] = json!(null);
    datasource["ownerId"] = json!(null);
    Mock::given(method("GET"))
        .and(path("/api/v1/datasources/3"))
        .respond_with(ok(json!({"datasource": datasource})))
        .mount(&server)
        .await;

    let ds = token_client(&server)
        .get_datasource(DatasourceId(3))
        .await
        .unwrap();
    assert_eq!(ds.name, "manuals");
    assert!(ds.media.is_empty());
    assert_eq!(ds.summary, "");
    assert_eq!(ds.owner_id, -1);
}
