use aerobook_core::{NewPayment, Payment, PaymentStatus};
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
pub struct UpdatePaymentStatusRequest {
    pub status: PaymentStatus,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/payments", get(list_payments).post(create_payment))
        .route("/v1/payments/{id}", get(get_payment).delete(delete_payment))
        .route("/v1/payments/{id}/status", put(update_status))
}

async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<Payment>>, AppError> {
    Ok(Json(state.services.payments.retrieve_all().await?))
}

async fn create_payment(
    State(state): State<AppState>,
    Json(req): Json<NewPayment>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    let payment = state.services.payments.create_payment(req).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(state.services.payments.retrieve_by_id(id).await?))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(state.services.payments.update_status(id, req.status).await?))
}

async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.payments.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
