use aerobook_core::{RepoError, Repositories};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::app_config::DatabaseConfig;
use crate::{
    airline_repo::PgAirlineRepository, airport_repo::PgAirportRepository,
    booking_repo::PgBookingRepository, crew_repo::PgCrewMemberRepository,
    flight_repo::PgFlightRepository, passenger_repo::PgPassengerRepository,
    payment_repo::PgPaymentRepository, seat_repo::PgSeatRepository,
    ticket_repo::PgTicketRepository,
};

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    /// PostgreSQL-backed repositories sharing this client's pool.
    pub fn repositories(&self) -> Repositories {
        Repositories {
            airlines: Arc::new(PgAirlineRepository::new(self.pool.clone())),
            airports: Arc::new(PgAirportRepository::new(self.pool.clone())),
            flights: Arc::new(PgFlightRepository::new(self.pool.clone())),
            crew: Arc::new(PgCrewMemberRepository::new(self.pool.clone())),
            seats: Arc::new(PgSeatRepository::new(self.pool.clone())),
            passengers: Arc::new(PgPassengerRepository::new(self.pool.clone())),
            bookings: Arc::new(PgBookingRepository::new(self.pool.clone())),
            payments: Arc::new(PgPaymentRepository::new(self.pool.clone())),
            tickets: Arc::new(PgTicketRepository::new(self.pool.clone())),
        }
    }
}

/// Translates sqlx failures into the storage-agnostic `RepoError`.
pub(crate) fn map_db_err(err: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &err {
        match db.kind() {
            sqlx::error::ErrorKind::UniqueViolation => {
                return RepoError::UniqueViolation(db.message().to_string());
            }
            sqlx::error::ErrorKind::ForeignKeyViolation => {
                return RepoError::ForeignKeyViolation(db.message().to_string());
            }
            _ => {}
        }
    }
    RepoError::Storage(err.to_string())
}
