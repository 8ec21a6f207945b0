//! Seat inventory, nested under flights for listing and creation.

use aerobook_core::{NewSeat, Seat};
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
        .route("/v1/flights/{id}/seats", get(list_seats).post(create_seat))
        .route(
            "/v1/seats/{id}",
            get(get_seat).put(update_seat).delete(delete_seat),
        )
}

async fn list_seats(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<Vec<Seat>>, AppError> {
    Ok(Json(state.services.seats.list_for_flight(flight_id).await?))
}

async fn create_seat(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
    Json(req): Json<NewSeat>,
) -> Result<(StatusCode, Json<Seat>), AppError> {
    let seat = state.services.seats.create_seat(flight_id, req).await?;
    Ok((StatusCode::CREATED, Json(seat)))
}

async fn get_seat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Seat>, AppError> {
    Ok(Json(state.services.seats.retrieve_by_id(id).await?))
}

async fn update_seat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewSeat>,
) -> Result<Json<Seat>, AppError> {
    Ok(Json(state.services.seats.update_seat(id, req).await?))
}

async fn delete_seat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.seats.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
