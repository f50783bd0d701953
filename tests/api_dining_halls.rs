mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use serial_test::serial;

#[actix_rt::test]
#[serial]
async fn create_dining_hall_returns_links() {
    let app = common::setup_empty_api_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/dining_halls")
        .set_json(json!({ "name": "John Jay" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "John Jay");
    assert_eq!(body["message"], "Dining hall added");
    assert_eq!(body["_links"]["self"]["href"], "/api/v1/dining_halls/1");
    assert_eq!(body["_links"]["self"]["method"], "GET");
    assert_eq!(body["_links"]["delete"]["method"], "DELETE");
    assert_eq!(
        body["_links"]["create_station"]["href"],
        "/api/v1/dining_halls/1/stations"
    );
    assert_eq!(body["_links"]["create_station"]["method"], "POST");
}

#[actix_rt::test]
#[serial]
async fn create_dining_hall_validates_body() {
    let (app, _fixtures) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/dining_halls")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Name is required");

    let req = test::TestRequest::post()
        .uri("/api/v1/dining_halls")
        .set_json(json!({ "name": "John Jay" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
#[serial]
async fn create_dining_hall_rejects_unstorable_names() {
    let (app, _fixtures) = common::setup_api_app().await;

    let cases = [
        ("x".repeat(300), "Name must be at most 255 characters"),
        ("a\u{0}b".to_string(), "Name must not contain NUL characters"),
    ];
    for (name, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/dining_halls")
            .set_json(json!({ "name": name }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], message);
    }
}

#[actix_rt::test]
#[serial]
async fn list_dining_halls_filters_by_name() {
    let (app, _fixtures) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/dining_halls?name=ferris")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let halls = body.as_array().expect("array");
    assert_eq!(halls.len(), 1);
    assert_eq!(halls[0]["name"], "Ferris Booth Commons");
    assert!(halls[0].get("message").is_none());
    assert_eq!(halls[0]["_links"]["self"]["href"], "/api/v1/dining_halls/2");
}

#[actix_rt::test]
#[serial]
async fn get_missing_dining_hall_is_404() {
    let (app, _fixtures) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/dining_halls/42")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Dining hall not found" }));
}

#[actix_rt::test]
#[serial]
async fn update_dining_hall_renames() {
    let (app, fixtures) = common::setup_api_app().await;
    let uri = format!("/api/v1/dining_halls/{}", fixtures.dining_hall_ids[0]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "name": "John Jay Dining Hall" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "John Jay Dining Hall");
    assert_eq!(body["message"], "Dining hall updated");

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No fields to update");
}

#[actix_rt::test]
#[serial]
async fn delete_dining_hall_restricts_and_confirms() {
    let (app, fixtures) = common::setup_api_app().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/dining_halls/{}", fixtures.dining_hall_ids[0]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri("/api/v1/dining_halls")
        .set_json(json!({ "name": "Hewitt" }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().expect("id");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/dining_halls/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["message"], "Dining hall deleted");
    let rels: Vec<_> = body["_links"]
        .as_object()
        .expect("links")
        .keys()
        .cloned()
        .collect();
    assert_eq!(rels, vec!["collection", "create"]);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/dining_halls/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
