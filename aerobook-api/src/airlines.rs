use aerobook_core::{Airline, Flight, NewAirline};
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{Json, Path};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/airlines", get(list_airlines).post(create_airline))
        .route(
            "/v1/airlines/{id}",
            get(get_airline).put(update_airline).delete(delete_airline),
        )
        .route("/v1/airlines/{id}/flights", get(list_flights))
}

async fn list_airlines(State(state): State<AppState>) -> Result<Json<Vec<Airline>>, AppError> {
    Ok(Json(state.services.airlines.retrieve_all().await?))
}

async fn create_airline(
    State(state): State<AppState>,
    Json(req): Json<NewAirline>,
) -> Result<(StatusCode, Json<Airline>), AppError> {
    let airline = state.services.airlines.create_airline(req).await?;
    Ok((StatusCode::CREATED, Json(airline)))
}

async fn get_airline(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Airline>, AppError> {
    Ok(Json(state.services.airlines.retrieve_by_id(id).await?))
}

async fn update_airline(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewAirline>,
) -> Result<Json<Airline>, AppError> {
    Ok(Json(state.services.airlines.update_airline(id, req).await?))
}

async fn delete_airline(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.airlines.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_flights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.services.airlines.flights_of(id).await?))
}
