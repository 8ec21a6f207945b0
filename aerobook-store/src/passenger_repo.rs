use aerobook_core::repository::PassengerRepository;
use aerobook_core::{Passenger, RepoResult};
use aerobook_shared::Masked;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgPassengerRepository {
    pool: PgPool,
}

impl PgPassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    id: Uuid,
    name: String,
    passport_number: String,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            id: row.id,
            name: row.name,
            passport_number: Masked(row.passport_number),
        }
    }
}

#[async_trait]
impl PassengerRepository for PgPassengerRepository {
    async fn save(&self, passenger: &Passenger) -> RepoResult<Passenger> {
        let row = sqlx::query_as::<_, PassengerRow>(
            r#"
            INSERT INTO passengers (id, name, passport_number)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, passport_number = EXCLUDED.passport_number
            RETURNING id, name, passport_number
            "#,
        )
        .bind(passenger.id)
        .bind(&passenger.name)
        .bind(passenger.passport_number.expose())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<Passenger>> {
        let rows = sqlx::query_as::<_, PassengerRow>(
            "SELECT id, name, passport_number FROM passengers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Passenger>> {
        let row = sqlx::query_as::<_, PassengerRow>(
            "SELECT id, name, passport_number FROM passengers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(Passenger::from))
    }

    async fn find_by_passport(&self, passport_number: &str) -> RepoResult<Option<Passenger>> {
        let row = sqlx::query_as::<_, PassengerRow>(
            "SELECT id, name, passport_number FROM passengers WHERE passport_number = $1",
        )
        .bind(passport_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(Passenger::from))
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Vec<Passenger>> {
        let rows = sqlx::query_as::<_, PassengerRow>(
            r#"
            SELECT p.id, p.name, p.passport_number
            FROM passengers p
            JOIN booking_passengers bp ON bp.passenger_id = p.id
            WHERE bp.booking_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        // booking_passengers rows go with it (ON DELETE CASCADE)
        sqlx::query("DELETE FROM passengers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
