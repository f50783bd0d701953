mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use serial_test::serial;

#[actix_rt::test]
#[serial]
async fn john_jay_scenario_over_http() {
    let app = common::setup_empty_api_app().await;

    let req = test::TestRequest::post()
        .uri("/api/v1/dining_halls")
        .set_json(json!({ "name": "John Jay" }))
        .to_request();
    let hall: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(hall["id"], 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/dining_halls/1/stations")
        .set_json(json!({ "name": "Grill" }))
        .to_request();
    let station: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(station["id"], 1);

    let req = test::TestRequest::post()
        .uri("/api/v1/dishes")
        .set_json(json!({ "name": "Burger", "dining_hall_id": 1, "station_id": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let dish: Value = test::read_body_json(resp).await;
    assert_eq!(dish["id"], 1);
    assert_eq!(dish["message"], "Dish created");
    assert_eq!(dish["description"], Value::Null);
    assert_eq!(dish["_links"]["station"]["href"], "/api/v1/dining_halls/1/stations/1");
    assert_eq!(dish["_links"]["dining_hall"]["href"], "/api/v1/dining_halls/1");

    let req = test::TestRequest::get()
        .uri("/api/v1/dishes?dining_hall_id=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let dishes = body.as_array().expect("array");
    assert_eq!(dishes.len(), 1);
    assert_eq!(dishes[0]["name"], "Burger");
    assert_eq!(dishes[0]["_links"]["self"]["href"], "/api/v1/dishes/1");
}

#[actix_rt::test]
#[serial]
async fn create_dish_maps_errors() {
    let (app, fixtures) = common::setup_api_app().await;
    let john_jay = fixtures.dining_hall_ids[0];

    let cases = [
        (json!({ "name": "Soup" }), StatusCode::BAD_REQUEST),
        (
            json!({ "name": "Soup", "dining_hall_id": john_jay, "station_id": fixtures.station_ids[2] }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "name": "Burger", "dining_hall_id": john_jay, "station_id": fixtures.station_ids[0] }),
            StatusCode::CONFLICT,
        ),
    ];
    for (body, expected) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/dishes")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected, "body {}", body);
        let err: Value = test::read_body_json(resp).await;
        assert!(err["error"].is_string());
    }
}

#[actix_rt::test]
#[serial]
async fn list_dishes_caps_at_default_limit() {
    let (app, fixtures) = common::setup_api_app().await;

    for n in 0..12 {
        let req = test::TestRequest::post()
            .uri("/api/v1/dishes")
            .set_json(json!({
                "name": format!("Sandwich {n}"),
                "dining_hall_id": fixtures.dining_hall_ids[1],
                "station_id": fixtures.station_ids[2],
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/api/v1/dishes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().expect("array").len(), 10);

    let req = test::TestRequest::get()
        .uri("/api/v1/dishes?limit=100&description=spicy")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let dishes = body.as_array().expect("array");
    assert_eq!(dishes.len(), 1);
    assert_eq!(dishes[0]["name"], "Penne Arrabbiata");
}

#[actix_rt::test]
#[serial]
async fn update_and_delete_dish() {
    let (app, fixtures) = common::setup_api_app().await;
    let penne = fixtures.dish_ids[1];

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/dishes/{penne}"))
        .set_json(json!({ "description": "Now with basil" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Dish updated");
    assert_eq!(body["name"], "Penne Arrabbiata");
    assert_eq!(body["description"], "Now with basil");

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/dishes/{penne}"))
        .set_json(json!({ "description": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["name"], "Penne Arrabbiata");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/dishes/{penne}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["description"], Value::Null);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/dishes/{penne}"))
        .set_json(json!({ "description": "nul\u{0}here" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/dishes/{penne}"))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/dishes/{penne}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], penne);
    assert_eq!(body["message"], "Dish deleted");
    assert_eq!(body["_links"]["collection"]["href"], "/api/v1/dishes");
    assert_eq!(body["_links"]["create"]["method"], "POST");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/dishes/{penne}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Dish not found");
}
