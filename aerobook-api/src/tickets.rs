use aerobook_core::{NewTicket, Ticket};
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
pub struct UpdatePriceRequest {
    /// Minor units of the ticket's currency.
    pub price: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", get(list_tickets).post(create_ticket))
        .route("/v1/tickets/{id}", get(get_ticket).delete(delete_ticket))
        .route("/v1/tickets/{id}/price", put(update_price))
}

async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, AppError> {
    Ok(Json(state.services.tickets.retrieve_all().await?))
}

async fn create_ticket(
    State(state): State<AppState>,
    Json(req): Json<NewTicket>,
) -> Result<(StatusCode, Json<Ticket>), AppError> {
    let ticket = state.services.tickets.create_ticket(req).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Ticket>, AppError> {
    Ok(Json(state.services.tickets.retrieve_by_id(id).await?))
}

async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePriceRequest>,
) -> Result<Json<Ticket>, AppError> {
    Ok(Json(state.services.tickets.update_price(id, req.price).await?))
}

async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.tickets.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
