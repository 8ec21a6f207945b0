use aerobook_core::{CrewMember, Flight, NewFlight};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Router,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{Json, Path};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/flights", get(list_flights).post(create_flight))
        .route(
            "/v1/flights/{id}",
            get(get_flight).put(update_flight).delete(delete_flight),
        )
        .route("/v1/flights/{id}/crew", get(list_crew))
        .route(
            "/v1/flights/{id}/crew/{crew_id}",
            put(assign_crew_member).delete(unassign_crew_member),
        )
}

async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>, AppError> {
    Ok(Json(state.services.flights.retrieve_all().await?))
}

async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<NewFlight>,
) -> Result<(StatusCode, Json<Flight>), AppError> {
    let flight = state.services.flights.create_flight(req).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(state.services.flights.retrieve_by_id(id).await?))
}

async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewFlight>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(state.services.flights.update_flight(id, req).await?))
}

async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.flights.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_crew(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<CrewMember>>, AppError> {
    Ok(Json(state.services.flights.crew_of(id).await?))
}

async fn assign_crew_member(
    State(state): State<AppState>,
    Path((id, crew_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CrewMember>, AppError> {
    Ok(Json(state.services.flights.assign_crew_member(id, crew_id).await?))
}

async fn unassign_crew_member(
    State(state): State<AppState>,
    Path((id, crew_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<CrewMember>, AppError> {
    Ok(Json(state.services.flights.unassign_crew_member(id, crew_id).await?))
}
