pub mod app_config;
pub mod database;
pub mod memory_repo;

pub mod airline_repo;
pub mod airport_repo;
pub mod booking_repo;
pub mod crew_repo;
pub mod flight_repo;
pub mod passenger_repo;
pub mod payment_repo;
pub mod seat_repo;
pub mod ticket_repo;

pub use database::DbClient;
pub use memory_repo::MemoryStore;
