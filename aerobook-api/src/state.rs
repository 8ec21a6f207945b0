use aerobook_service::Services;

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}
