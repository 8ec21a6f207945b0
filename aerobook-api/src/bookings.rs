use aerobook_core::{Booking, BookingDetails, NewBooking, Payment, Ticket};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{Json, Path};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings", get(list_bookings).post(create_booking))
        .route("/v1/bookings/{id}", get(get_booking).delete(delete_booking))
        .route("/v1/bookings/{id}/status", put(update_status))
        .route(
            "/v1/bookings/{id}/passengers/{passenger_id}",
            put(add_passenger).delete(remove_passenger),
        )
        .route(
            "/v1/bookings/{id}/seats/{seat_id}",
            put(reserve_seat).delete(release_seat),
        )
        .route("/v1/bookings/{id}/payment", get(get_payment))
        .route("/v1/bookings/{id}/ticket", get(get_ticket))
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.services.bookings.retrieve_all().await?))
}

async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.services.bookings.create_booking(req).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingDetails>, AppError> {
    Ok(Json(state.services.bookings.retrieve_by_id(id).await?))
}

async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.bookings.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(state.services.bookings.update_status(id, req.status).await?))
}

async fn add_passenger(
    State(state): State<AppState>,
    Path((id, passenger_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookingDetails>, AppError> {
    Ok(Json(state.services.bookings.add_passenger(id, passenger_id).await?))
}

async fn remove_passenger(
    State(state): State<AppState>,
    Path((id, passenger_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookingDetails>, AppError> {
    Ok(Json(state.services.bookings.remove_passenger(id, passenger_id).await?))
}

async fn reserve_seat(
    State(state): State<AppState>,
    Path((id, seat_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookingDetails>, AppError> {
    Ok(Json(state.services.bookings.reserve_seat(id, seat_id).await?))
}

async fn release_seat(
    State(state): State<AppState>,
    Path((id, seat_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BookingDetails>, AppError> {
    Ok(Json(state.services.bookings.release_seat(id, seat_id).await?))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(state.services.payments.retrieve_for_booking(id).await?))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ticket>, AppError> {
    Ok(Json(state.services.tickets.retrieve_for_booking(id).await?))
}
