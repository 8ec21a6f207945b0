use aerobook_core::repository::TicketRepository;
use aerobook_core::{RepoResult, Ticket};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgTicketRepository {
    pool: PgPool,
}

impl PgTicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TicketRow {
    id: Uuid,
    booking_id: Uuid,
    price: i64,
    currency: String,
    issued_at: DateTime<Utc>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            booking_id: row.booking_id,
            price: row.price,
            currency: row.currency,
            issued_at: row.issued_at,
        }
    }
}

const SELECT_TICKET: &str = "SELECT id, booking_id, price, currency, issued_at FROM tickets";

#[async_trait]
impl TicketRepository for PgTicketRepository {
    async fn save(&self, ticket: &Ticket) -> RepoResult<Ticket> {
        let row = sqlx::query_as::<_, TicketRow>(
            r#"
            INSERT INTO tickets (id, booking_id, price, currency, issued_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET price = EXCLUDED.price, currency = EXCLUDED.currency
            RETURNING id, booking_id, price, currency, issued_at
            "#,
        )
        .bind(ticket.id)
        .bind(ticket.booking_id)
        .bind(ticket.price)
        .bind(&ticket.currency)
        .bind(ticket.issued_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<Ticket>> {
        let rows = sqlx::query_as::<_, TicketRow>(&format!("{SELECT_TICKET} ORDER BY issued_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(&format!("{SELECT_TICKET} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Ticket::from))
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Ticket>> {
        let row = sqlx::query_as::<_, TicketRow>(&format!("{SELECT_TICKET} WHERE booking_id = $1"))
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Ticket::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
