use aerobook_api::{app, AppState};
use aerobook_service::{seed, Services};
use aerobook_store::MemoryStore;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> (Router, Services) {
    let store = Arc::new(MemoryStore::new());
    let services = Services::new(&store.repositories());
    (app(AppState { services: services.clone() }), services)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Creates Luton, Gatwick, an airline and a flight between them; returns the flight JSON.
async fn create_flight(app: &Router) -> Value {
    let (_, origin) = send(app, "POST", "/v1/airports", Some(json!({"code": "LUT", "name": "Luton", "location": "UK"}))).await;
    let (_, destination) = send(app, "POST", "/v1/airports", Some(json!({"code": "LGW", "name": "Gatwick", "location": "UK"}))).await;
    let (_, airline) = send(app, "POST", "/v1/airlines", Some(json!({"name": "Test-airline", "code": "TA"}))).await;

    let (status, flight) = send(
        app,
        "POST",
        "/v1/flights",
        Some(json!({
            "flight_number": "MH370",
            "departure_time": "2024-10-10T06:30:00Z",
            "arrival_time": "2024-10-10T09:45:00Z",
            "origin_id": origin["id"],
            "destination_id": destination["id"],
            "airline_id": airline["id"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    flight
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = test_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_airline_crud() {
    let (app, _) = test_app();

    let (status, airline) = send(&app, "POST", "/v1/airlines", Some(json!({"name": "Iberia", "code": "IB"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/v1/airlines/{}", airline["id"].as_str().unwrap());

    let (status, list) = send(&app, "GET", "/v1/airlines", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({"name": "Iberia", "code": "I2"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["code"], "I2");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().starts_with("Airline not found with ID"));
}

#[tokio::test]
async fn test_error_status_mapping() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "POST", "/v1/airlines", Some(json!({"name": "", "code": "IB"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "One or more of the following fields are empty: name");

    send(&app, "POST", "/v1/airlines", Some(json!({"name": "Iberia", "code": "IB"}))).await;
    let (status, body) = send(&app, "POST", "/v1/airlines", Some(json!({"name": "Iberia", "code": "XX"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Airline already exists with name: Iberia");
}

#[tokio::test]
async fn test_flight_validation_over_http() {
    let (app, _) = test_app();
    let flight = create_flight(&app).await;

    let mut payload = flight.clone();
    payload["arrival_time"] = json!("2024-10-10T05:00:00Z");
    let (status, body) = send(&app, "POST", "/v1/flights", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Flights can't have an arrival time which is earlier than the departure time."
    );

    let mut payload = flight;
    payload.as_object_mut().unwrap().remove("departure_time");
    let (status, body) = send(&app, "POST", "/v1/flights", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All flights need a departure time.");
}

#[tokio::test]
async fn test_booking_flow() {
    let (app, _) = test_app();
    let flight = create_flight(&app).await;
    let flight_id = flight["id"].as_str().unwrap();

    let (status, seat) = send(
        &app,
        "POST",
        &format!("/v1/flights/{}/seats", flight_id),
        Some(json!({"seat_number": "1A", "seat_class": "Business"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(seat["is_available"], true);

    let (_, passenger) = send(
        &app,
        "POST",
        "/v1/passengers",
        Some(json!({"name": "Edgar Afonso", "passport_number": "PASS123"})),
    )
    .await;
    assert_eq!(passenger["passport_number"], "PASS123");

    let (status, booking) = send(
        &app,
        "POST",
        "/v1/bookings",
        Some(json!({"flight_id": flight_id, "status": "ON TIME"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let booking_uri = format!("/v1/bookings/{}", booking["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        "PUT",
        &format!("{}/passengers/{}", booking_uri, passenger["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, details) = send(
        &app,
        "PUT",
        &format!("{}/seats/{}", booking_uri, seat["id"].as_str().unwrap()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["status"], "ON TIME");
    assert_eq!(details["passengers"].as_array().unwrap().len(), 1);
    assert_eq!(details["seats"][0]["is_available"], false);

    let (status, payment) = send(
        &app,
        "POST",
        "/v1/payments",
        Some(json!({"booking_id": booking["id"], "amount": 25000})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["status"], "PENDING");
    assert_eq!(payment["currency"], "USD");

    let (status, paid) = send(
        &app,
        "PUT",
        &format!("/v1/payments/{}/status", payment["id"].as_str().unwrap()),
        Some(json!({"status": "COMPLETED"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["status"], "COMPLETED");

    let (status, found) = send(&app, "GET", &format!("{}/payment", booking_uri), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["id"], payment["id"]);

    // A paid booking can't be removed.
    let (status, _) = send(&app, "DELETE", &booking_uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_flight_crew_assignment() {
    let (app, _) = test_app();
    let flight = create_flight(&app).await;
    let flight_uri = format!("/v1/flights/{}", flight["id"].as_str().unwrap());

    let (status, member) = send(&app, "POST", "/v1/crew", Some(json!({"name": "Amelia", "role": "Pilot"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let member_id = member["id"].as_str().unwrap();

    let (status, assigned) = send(&app, "PUT", &format!("{}/crew/{}", flight_uri, member_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned["flight_id"], flight["id"]);

    let (_, crew) = send(&app, "GET", &format!("{}/crew", flight_uri), None).await;
    assert_eq!(crew.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("{}/crew/{}", flight_uri, member_id), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &format!("{}/crew/{}", flight_uri, member_id), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_seeded_data_is_served() {
    let (app, services) = test_app();
    assert!(seed::load_sample_data(&services).await.unwrap());

    let (status, airlines) = send(&app, "GET", "/v1/airlines", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = airlines
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["British Airways", "Iberia"]);

    let (_, bookings) = send(&app, "GET", "/v1/bookings", None).await;
    assert_eq!(bookings.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_requests_get_json_error_bodies() {
    let (app, _) = test_app();

    let (status, body) = send_raw(&app, "POST", "/v1/airlines", "{\"name\": \"Iberia\",").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Well-formed JSON of the wrong shape
    let (status, body) = send_raw(&app, "POST", "/v1/airlines", "{\"name\": 7}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let uri = format!("/v1/payments/{}/status", uuid::Uuid::new_v4());
    let (status, body) = send(&app, "PUT", &uri, Some(json!({"status": "SETTLED"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "GET", "/v1/airlines/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
