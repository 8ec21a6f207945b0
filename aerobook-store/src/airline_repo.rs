use aerobook_core::repository::AirlineRepository;
use aerobook_core::{Airline, RepoResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgAirlineRepository {
    pool: PgPool,
}

impl PgAirlineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AirlineRow {
    id: Uuid,
    name: String,
    code: String,
}

impl From<AirlineRow> for Airline {
    fn from(row: AirlineRow) -> Self {
        Airline { id: row.id, name: row.name, code: row.code }
    }
}

#[async_trait]
impl AirlineRepository for PgAirlineRepository {
    async fn save(&self, airline: &Airline) -> RepoResult<Airline> {
        let row = sqlx::query_as::<_, AirlineRow>(
            r#"
            INSERT INTO airlines (id, name, code)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, code = EXCLUDED.code
            RETURNING id, name, code
            "#,
        )
        .bind(airline.id)
        .bind(&airline.name)
        .bind(&airline.code)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<Airline>> {
        let rows = sqlx::query_as::<_, AirlineRow>("SELECT id, name, code FROM airlines ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Airline::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Airline>> {
        let row = sqlx::query_as::<_, AirlineRow>("SELECT id, name, code FROM airlines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Airline::from))
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Airline>> {
        let row = sqlx::query_as::<_, AirlineRow>("SELECT id, name, code FROM airlines WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Airline::from))
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Airline>> {
        let row = sqlx::query_as::<_, AirlineRow>("SELECT id, name, code FROM airlines WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Airline::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM airlines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
