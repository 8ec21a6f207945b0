use aerobook_core::repository::AirportRepository;
use aerobook_core::{Airport, RepoResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgAirportRepository {
    pool: PgPool,
}

impl PgAirportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AirportRow {
    id: Uuid,
    code: String,
    name: String,
    location: String,
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Self {
        Airport {
            id: row.id,
            code: row.code,
            name: row.name,
            location: row.location,
        }
    }
}

const SELECT_AIRPORT: &str = "SELECT id, code, name, location FROM airports";

#[async_trait]
impl AirportRepository for PgAirportRepository {
    async fn save(&self, airport: &Airport) -> RepoResult<Airport> {
        let row = sqlx::query_as::<_, AirportRow>(
            r#"
            INSERT INTO airports (id, code, name, location)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET code = EXCLUDED.code, name = EXCLUDED.name, location = EXCLUDED.location
            RETURNING id, code, name, location
            "#,
        )
        .bind(airport.id)
        .bind(&airport.code)
        .bind(&airport.name)
        .bind(&airport.location)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<Airport>> {
        let rows = sqlx::query_as::<_, AirportRow>(&format!("{SELECT_AIRPORT} ORDER BY code"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Airport::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Airport>> {
        let row = sqlx::query_as::<_, AirportRow>(&format!("{SELECT_AIRPORT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Airport::from))
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Airport>> {
        let row = sqlx::query_as::<_, AirportRow>(&format!("{SELECT_AIRPORT} WHERE code = $1"))
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Airport::from))
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Airport>> {
        let row = sqlx::query_as::<_, AirportRow>(&format!("{SELECT_AIRPORT} WHERE name = $1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Airport::from))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM airports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
