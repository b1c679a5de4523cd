use farmdesk::core::crops::{CropDraft, CropService};
use farmdesk::{ApperHttpClient, FarmError};
use httpmock::prelude::*;
use serde_json::json;

fn service(server: &MockServer) -> CropService<ApperHttpClient> {
    CropService::new(ApperHttpClient::new(server.base_url(), "proj-1", "pk-1"))
}

#[tokio::test]
async fn create_then_get_by_id_round_trips_normalized_fields() {
    let server = MockServer::start();

    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/tables/crop_c/records")
            .json_body(json!({
                "records": [{
                    "Name": "Wheat",
                    "name_c": "Wheat",
                    "quantity_c": 12.5,
                    "status_c": "planted"
                }]
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "success": true,
                "results": [{"success": true, "data": {
                    "Id": 31, "Name": "Wheat", "name_c": "Wheat",
                    "quantity_c": 12.5, "status_c": "planted"
                }}]
            }));
    });

    let get_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/tables/crop_c/records/31/query");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": true, "data": {
                "Id": 31, "Name": "Wheat", "name_c": "Wheat",
                "quantity_c": 12.5, "status_c": "planted"
            }}));
    });

    let crops = service(&server);

    let created = crops
        .create(CropDraft {
            name: Some("Wheat".to_string()),
            quantity: Some("12.5".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let id = created.id().unwrap();

    let fetched = crops.get_by_id(id).await.unwrap();

    create_mock.assert();
    get_mock.assert();
    assert_eq!(fetched.get_str("name_c"), Some("Wheat"));
    assert_eq!(fetched.get_f64("quantity_c"), Some(12.5));
    assert_eq!(fetched.get_str("status_c"), Some("planted"));
}

#[tokio::test]
async fn get_all_returns_empty_when_store_is_down() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/tables/crop_c/query");
        then.status(500).body("boom");
    });

    let crops = service(&server);
    assert!(crops.get_all().await.is_empty());
}

#[tokio::test]
async fn get_by_id_returns_none_when_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/tables/crop_c/records/404/query");
        then.status(404)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": false, "message": "Record does not exist"}));
    });

    let crops = service(&server);
    assert!(crops.get_by_id(404).await.is_none());
}

#[tokio::test]
async fn create_rejection_surfaces_the_store_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/tables/crop_c/records");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": false, "message": "name_c is required"}));
    });

    let crops = service(&server);
    let err = crops.create(CropDraft::default()).await.unwrap_err();

    assert!(matches!(err, FarmError::CreationFailed { .. }));
    assert_eq!(err.to_string(), "name_c is required");
}

#[tokio::test]
async fn delete_returns_true_on_success() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/v1/tables/crop_c/records")
            .json_body(json!({"RecordIds": [12]}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"success": true}));
    });

    let crops = service(&server);
    assert!(crops.delete(12).await.unwrap());
    delete_mock.assert();
}
