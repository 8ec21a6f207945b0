use aerobook_core::repository::SeatRepository;
use aerobook_core::{RepoResult, Seat};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgSeatRepository {
    pool: PgPool,
}

impl PgSeatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SeatRow {
    id: Uuid,
    flight_id: Uuid,
    seat_number: String,
    seat_class: String,
    is_available: bool,
    booking_id: Option<Uuid>,
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Seat {
            id: row.id,
            flight_id: row.flight_id,
            seat_number: row.seat_number,
            seat_class: row.seat_class,
            is_available: row.is_available,
            booking_id: row.booking_id,
        }
    }
}

const SELECT_SEAT: &str =
    "SELECT id, flight_id, seat_number, seat_class, is_available, booking_id FROM seats";

#[async_trait]
impl SeatRepository for PgSeatRepository {
    async fn save(&self, seat: &Seat) -> RepoResult<Seat> {
        let row = sqlx::query_as::<_, SeatRow>(
            r#"
            INSERT INTO seats (id, flight_id, seat_number, seat_class, is_available, booking_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                seat_number = EXCLUDED.seat_number,
                seat_class = EXCLUDED.seat_class,
                is_available = EXCLUDED.is_available,
                booking_id = EXCLUDED.booking_id
            RETURNING id, flight_id, seat_number, seat_class, is_available, booking_id
            "#,
        )
        .bind(seat.id)
        .bind(seat.flight_id)
        .bind(&seat.seat_number)
        .bind(&seat.seat_class)
        .bind(seat.is_available)
        .bind(seat.booking_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Seat>> {
        let row = sqlx::query_as::<_, SeatRow>(&format!("{SELECT_SEAT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Seat::from))
    }

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>> {
        let rows = sqlx::query_as::<_, SeatRow>(&format!(
            "{SELECT_SEAT} WHERE flight_id = $1 ORDER BY seat_number"
        ))
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Seat::from).collect())
    }

    async fn find_by_flight_and_number(
        &self,
        flight_id: Uuid,
        seat_number: &str,
    ) -> RepoResult<Option<Seat>> {
        let row = sqlx::query_as::<_, SeatRow>(&format!(
            "{SELECT_SEAT} WHERE flight_id = $1 AND seat_number = $2"
        ))
        .bind(flight_id)
        .bind(seat_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(Seat::from))
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Vec<Seat>> {
        let rows = sqlx::query_as::<_, SeatRow>(&format!(
            "{SELECT_SEAT} WHERE booking_id = $1 ORDER BY seat_number"
        ))
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Seat::from).collect())
    }

    async fn reserve(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>> {
        let row = sqlx::query_as::<_, SeatRow>(
            r#"
            UPDATE seats SET is_available = FALSE, booking_id = $2
            WHERE id = $1 AND (is_available OR booking_id = $2)
            RETURNING id, flight_id, seat_number, seat_class, is_available, booking_id
            "#,
        )
        .bind(seat_id)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(Seat::from))
    }

    async fn release(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>> {
        let row = sqlx::query_as::<_, SeatRow>(
            r#"
            UPDATE seats SET is_available = TRUE, booking_id = NULL
            WHERE id = $1 AND booking_id = $2
            RETURNING id, flight_id, seat_number, seat_class, is_available, booking_id
            "#,
        )
        .bind(seat_id)
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(Seat::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM seats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
