use aerobook_core::{Booking, NewPassenger, Passenger};
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
        .route("/v1/passengers", get(list_passengers).post(create_passenger))
        .route(
            "/v1/passengers/{id}",
            get(get_passenger).put(update_passenger).delete(delete_passenger),
        )
        .route("/v1/passengers/{id}/bookings", get(list_bookings))
}

async fn list_passengers(State(state): State<AppState>) -> Result<Json<Vec<Passenger>>, AppError> {
    Ok(Json(state.services.passengers.retrieve_all().await?))
}

async fn create_passenger(
    State(state): State<AppState>,
    Json(req): Json<NewPassenger>,
) -> Result<(StatusCode, Json<Passenger>), AppError> {
    let passenger = state.services.passengers.create_passenger(req).await?;
    Ok((StatusCode::CREATED, Json(passenger)))
}

async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Passenger>, AppError> {
    Ok(Json(state.services.passengers.retrieve_by_id(id).await?))
}

async fn update_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewPassenger>,
) -> Result<Json<Passenger>, AppError> {
    Ok(Json(state.services.passengers.update_passenger(id, req).await?))
}

async fn delete_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.passengers.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_bookings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.services.passengers.bookings_of(id).await?))
}
