use aerobook_core::repository::BookingRepository;
use aerobook_core::{Booking, RepoResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    flight_id: Uuid,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: row.id,
            flight_id: row.flight_id,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn save(&self, booking: &Booking) -> RepoResult<Booking> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (id, flight_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET flight_id = EXCLUDED.flight_id, status = EXCLUDED.status
            RETURNING id, flight_id, status, created_at
            "#,
        )
        .bind(booking.id)
        .bind(booking.flight_id)
        .bind(&booking.status)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, flight_id, status, created_at FROM bookings ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            "SELECT id, flight_id, status, created_at FROM bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(Booking::from))
    }

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT id, flight_id, status, created_at FROM bookings WHERE flight_id = $1 ORDER BY created_at",
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn find_by_passenger(&self, passenger_id: Uuid) -> RepoResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT b.id, b.flight_id, b.status, b.created_at
            FROM bookings b
            JOIN booking_passengers bp ON bp.booking_id = b.id
            WHERE bp.passenger_id = $1
            ORDER BY b.created_at
            "#,
        )
        .bind(passenger_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn add_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO booking_passengers (booking_id, passenger_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(booking_id)
        .bind(passenger_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(())
    }

    async fn remove_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            "DELETE FROM booking_passengers WHERE booking_id = $1 AND passenger_id = $2",
        )
        .bind(booking_id)
        .bind(passenger_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_err)?;

        sqlx::query("UPDATE seats SET is_available = TRUE, booking_id = NULL WHERE booking_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        // booking_passengers rows go with it (ON DELETE CASCADE)
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_err)?;

        tx.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
