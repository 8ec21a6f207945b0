use aerobook_core::repository::CrewMemberRepository;
use aerobook_core::{CrewMember, RepoResult};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgCrewMemberRepository {
    pool: PgPool,
}

impl PgCrewMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CrewMemberRow {
    id: Uuid,
    name: String,
    role: String,
    flight_id: Option<Uuid>,
}

impl From<CrewMemberRow> for CrewMember {
    fn from(row: CrewMemberRow) -> Self {
        CrewMember {
            id: row.id,
            name: row.name,
            role: row.role,
            flight_id: row.flight_id,
        }
    }
}

#[async_trait]
impl CrewMemberRepository for PgCrewMemberRepository {
    async fn save(&self, crew: &CrewMember) -> RepoResult<CrewMember> {
        let row = sqlx::query_as::<_, CrewMemberRow>(
            r#"
            INSERT INTO crew_members (id, name, role, flight_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, role = EXCLUDED.role, flight_id = EXCLUDED.flight_id
            RETURNING id, name, role, flight_id
            "#,
        )
        .bind(crew.id)
        .bind(&crew.name)
        .bind(&crew.role)
        .bind(crew.flight_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<CrewMember>> {
        let rows = sqlx::query_as::<_, CrewMemberRow>(
            "SELECT id, name, role, flight_id FROM crew_members ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(CrewMember::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<CrewMember>> {
        let row = sqlx::query_as::<_, CrewMemberRow>(
            "SELECT id, name, role, flight_id FROM crew_members WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.map(CrewMember::from))
    }

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<CrewMember>> {
        let rows = sqlx::query_as::<_, CrewMemberRow>(
            "SELECT id, name, role, flight_id FROM crew_members WHERE flight_id = $1 ORDER BY role, name",
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(rows.into_iter().map(CrewMember::from).collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM crew_members WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
