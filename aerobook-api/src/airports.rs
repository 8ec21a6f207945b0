use aerobook_core::{Airport, Flight, NewAirport};
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
        .route("/v1/airports", get(list_airports).post(create_airport))
        .route(
            "/v1/airports/{id}",
            get(get_airport).put(update_airport).delete(delete_airport),
        )
        .route("/v1/airports/{id}/departures", get(list_departures))
        .route("/v1/airports/{id}/arrivals", get(list_arrivals))
}

async fn list_airports(State(state): State<AppState>) -> Result<Json<Vec<Airport>>, AppError> {
    Ok(Json(state.services.airports.retrieve_all().await?))
}

async fn create_airport(
    State(state): State<AppState>,
    Json(req): Json<NewAirport>,
) -> Result<(StatusCode, Json<Airport>), AppError> {
    let airport = state.services.airports.create_airport(req).await?;
    Ok((StatusCode::CREATED, Json(airport)))
}

async fn get_airport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Airport>, AppError> {
    Ok(Json(state.services.airports.retrieve_by_id(id).await?))
}

async fn update_airport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewAirport>,
) -> Result<Json<Airport>, AppError> {
    Ok(Json(state.services.airports.update_airport(id, req).await?))
}

async fn delete_airport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.airports.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_departures(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.services.airports.departures_of(id).await?))
}

async fn list_arrivals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.services.airports.arrivals_of(id).await?))
}
