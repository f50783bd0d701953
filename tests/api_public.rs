mod common;

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use campus_dishes::api;
use serde_json::Value;
use serial_test::serial;

#[actix_rt::test]
async fn landing_paths_redirect_to_docs() {
    let app = test::init_service(App::new().configure(api::configure_root)).await;

    for path in ["/", "/api/v1", "/api/v1/"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND, "path {}", path);
        assert_eq!(
            resp.headers().get(header::LOCATION).expect("location"),
            "/apidocs"
        );
    }
}

#[actix_rt::test]
#[serial]
async fn apidocs_serves_the_openapi_document() {
    let app = common::setup_empty_api_app().await;

    let req = test::TestRequest::get().uri("/apidocs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let doc: Value = test::read_body_json(resp).await;
    assert_eq!(doc["info"]["title"], "Dish Management Service");
    for path in [
        "/api/v1/dining_halls",
        "/api/v1/dining_halls/{id}",
        "/api/v1/dining_halls/{id}/stations",
        "/api/v1/dining_halls/{id}/stations/{station_id}",
        "/api/v1/stations",
        "/api/v1/stations/{id}",
        "/api/v1/dishes",
        "/api/v1/dishes/{id}",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing {}", path);
    }
}

#[actix_rt::test]
#[serial]
async fn malformed_requests_get_json_errors() {
    let app = common::setup_empty_api_app().await;

    let requests = [
        test::TestRequest::post()
            .uri("/api/v1/dining_halls")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{not json")
            .to_request(),
        test::TestRequest::get()
            .uri("/api/v1/dishes?limit=lots")
            .to_request(),
        test::TestRequest::get()
            .uri("/api/v1/dishes/abc")
            .to_request(),
    ];
    for req in requests {
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}
