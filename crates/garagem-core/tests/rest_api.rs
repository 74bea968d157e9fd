//! Integration tests for the car repository against an in-process stub API.
//!
//! The stub reproduces the backend's wire quirks: a bare array on the list
//! endpoint, the `{ id, value }` envelope on single-item GET, and a PATCH
//! body that is a loose field map.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use garagem_core::models::licence_display_label;
use garagem_core::repository::{CarRepository, RestCarRepository};
use garagem_core::{CarDetail, Error};

fn stub_app() -> Router {
    Router::new()
        .route("/car", get(list_cars).post(create_car))
        .route(
            "/car/{id}",
            get(get_car).patch(update_car).delete(delete_car),
        )
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn stub_repository() -> RestCarRepository {
    let base_url = serve(stub_app()).await;
    RestCarRepository::from_base_url(base_url).unwrap()
}

async fn list_cars() -> Json<Value> {
    Json(json!([
        { "id": "x", "imageUrl": "u", "name": "Fit", "licence": "XYZ" },
        { "id": "abc", "imageUrl": "u2", "name": "Civic", "licence": "ABC123" },
    ]))
}

async fn get_car(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id != "abc" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": "abc",
        "value": {
            "imageUrl": "u",
            "year": "2020",
            "name": "Civic",
            "licence": "ABC123",
            "place": { "lat": 1.0, "long": 2.0 },
        },
    })))
}

async fn create_car(Json(body): Json<Value>) -> StatusCode {
    if body["name"] == "explode" {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let has_required_fields = body["id"].is_string()
        && body["imageUrl"].is_string()
        && body["year"].is_string()
        && body["licence"].is_string()
        && body["place"]["lat"].is_f64()
        && body["place"]["long"].is_f64();
    if has_required_fields {
        StatusCode::CREATED
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

async fn update_car(Path(id): Path<String>, Json(body): Json<Value>) -> StatusCode {
    if id == "missing" {
        return StatusCode::NOT_FOUND;
    }
    // The PATCH contract is a loose map, but it must carry the nested place.
    if body["place"]["lat"].is_f64() && body["imageUrl"].is_string() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn delete_car(Path(id): Path<String>) -> StatusCode {
    if id == "boom" {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::NO_CONTENT
    }
}

fn sample_detail() -> CarDetail {
    CarDetail {
        id: "abc".to_string(),
        image_url: "u".to_string(),
        year: "2020".to_string(),
        name: "Civic".to_string(),
        licence: "ABC123".to_string(),
        latitude: 1.0,
        longitude: 2.0,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn list_maps_summary_dtos_to_display_models() {
    let repo = stub_repository().await;

    let cars = repo.get_cars().await.unwrap();
    assert_eq!(cars.len(), 2);
    assert_eq!(cars[0].id, "x");
    assert_eq!(cars[0].name, "Fit");
    assert_eq!(cars[0].licence, "XYZ");
    assert_eq!(licence_display_label(&cars[0].licence), "Placa: XYZ");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_flattens_envelope_into_detail() {
    let repo = stub_repository().await;

    let detail = repo.get_car_by_id("abc").await.unwrap();
    assert_eq!(detail, sample_detail());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_car_is_not_found() {
    let repo = stub_repository().await;

    let error = repo.get_car_by_id("nope").await.unwrap_err();
    assert!(matches!(error, Error::NotFound(id) if id == "nope"));
}

#[tokio::test(flavor = "multi_thread")]
async fn add_car_posts_the_full_dto() {
    let repo = stub_repository().await;

    repo.add_car(&sample_detail()).await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn add_car_failure_is_a_result_not_a_panic() {
    let repo = stub_repository().await;

    let mut detail = sample_detail();
    detail.name = "explode".to_string();

    let error = repo.add_car(&detail).await.unwrap_err();
    assert!(error.to_string().contains("Failed to add car"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_car_sends_the_field_map() {
    let repo = stub_repository().await;

    repo.update_car(&sample_detail()).await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn update_unknown_car_fails_with_generic_message() {
    let repo = stub_repository().await;

    let mut detail = sample_detail();
    detail.id = "missing".to_string();

    let error = repo.update_car(&detail).await.unwrap_err();
    assert!(error.to_string().contains("Failed to update car"));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_succeeds_on_2xx() {
    let repo = stub_repository().await;

    repo.delete_car("abc").await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_failure_embeds_the_status_code() {
    let repo = stub_repository().await;

    let error = repo.delete_car("boom").await.unwrap_err();
    assert!(error.to_string().contains("500"), "message: {error}");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_list_body_is_a_failure_result() {
    let app = Router::new().route("/car", get(|| async { "not json" }));
    let base_url = serve(app).await;
    let repo = RestCarRepository::from_base_url(base_url).unwrap();

    assert!(repo.get_cars().await.is_err());
}
