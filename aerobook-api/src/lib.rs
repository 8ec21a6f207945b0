use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airlines;
pub mod airports;
pub mod bookings;
pub mod crew;
pub mod error;
pub mod extract;
pub mod flights;
pub mod health;
pub mod passengers;
pub mod payments;
pub mod seats;
pub mod state;
pub mod tickets;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .merge(health::routes())
        .merge(airlines::routes())
        .merge(airports::routes())
        .merge(flights::routes())
        .merge(seats::routes())
        .merge(crew::routes())
        .merge(passengers::routes())
        .merge(bookings::routes())
        .merge(payments::routes())
        .merge(tickets::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
