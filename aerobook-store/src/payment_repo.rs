use aerobook_core::repository::PaymentRepository;
use aerobook_core::{Payment, PaymentStatus, RepoError, RepoResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    booking_id: Uuid,
    amount: i64,
    currency: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = RepoError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<PaymentStatus>()
            .map_err(RepoError::Storage)?;

        Ok(Payment {
            id: row.id,
            booking_id: row.booking_id,
            amount: row.amount,
            currency: row.currency,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_PAYMENT: &str =
    "SELECT id, booking_id, amount, currency, status, created_at, updated_at FROM payments";

#[async_trait]
impl PaymentRepository for PgPaymentRepository {
    async fn save(&self, payment: &Payment) -> RepoResult<Payment> {
        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO payments (id, booking_id, amount, currency, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                amount = EXCLUDED.amount,
                currency = EXCLUDED.currency,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            RETURNING id, booking_id, amount, currency, status, created_at, updated_at
            "#,
        )
        .bind(payment.id)
        .bind(payment.booking_id)
        .bind(payment.amount)
        .bind(&payment.currency)
        .bind(payment.status.as_str())
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        row.try_into()
    }

    async fn find_all(&self) -> RepoResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(&format!("{SELECT_PAYMENT} ORDER BY created_at"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(Payment::try_from).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!("{SELECT_PAYMENT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        row.map(Payment::try_from).transpose()
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!("{SELECT_PAYMENT} WHERE booking_id = $1"))
            .bind(booking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        row.map(Payment::try_from).transpose()
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
