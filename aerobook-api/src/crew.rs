use aerobook_core::{CrewMember, NewCrewMember};
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
        .route("/v1/crew", get(list_crew).post(create_crew_member))
        .route(
            "/v1/crew/{id}",
            get(get_crew_member).put(update_crew_member).delete(delete_crew_member),
        )
}

async fn list_crew(State(state): State<AppState>) -> Result<Json<Vec<CrewMember>>, AppError> {
    Ok(Json(state.services.crew.retrieve_all().await?))
}

async fn create_crew_member(
    State(state): State<AppState>,
    Json(req): Json<NewCrewMember>,
) -> Result<(StatusCode, Json<CrewMember>), AppError> {
    let member = state.services.crew.create_crew_member(req).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

async fn get_crew_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CrewMember>, AppError> {
    Ok(Json(state.services.crew.retrieve_by_id(id).await?))
}

async fn update_crew_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewCrewMember>,
) -> Result<Json<CrewMember>, AppError> {
    Ok(Json(state.services.crew.update_crew_member(id, req).await?))
}

async fn delete_crew_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.services.crew.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
