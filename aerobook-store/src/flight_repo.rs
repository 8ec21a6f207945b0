use aerobook_core::repository::FlightRepository;
use aerobook_core::{Flight, RepoResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::map_db_err;

pub struct PgFlightRepository {
    pool: PgPool,
}

impl PgFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_where(&self, column: &str, id: Uuid) -> RepoResult<Vec<Flight>> {
        // `column` is always one of our own literals, never user input
        let sql = format!("{SELECT_FLIGHT} WHERE {column} = $1 ORDER BY departure_time");
        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct FlightRow {
    id: Uuid,
    flight_number: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    origin_id: Uuid,
    destination_id: Uuid,
    airline_id: Uuid,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            flight_number: row.flight_number,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            origin_id: row.origin_id,
            destination_id: row.destination_id,
            airline_id: row.airline_id,
        }
    }
}

const SELECT_FLIGHT: &str = r#"
    SELECT id, flight_number, departure_time, arrival_time, origin_id, destination_id, airline_id
    FROM flights
"#;

#[async_trait]
impl FlightRepository for PgFlightRepository {
    async fn save(&self, flight: &Flight) -> RepoResult<Flight> {
        let row = sqlx::query_as::<_, FlightRow>(
            r#"
            INSERT INTO flights (id, flight_number, departure_time, arrival_time, origin_id, destination_id, airline_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                flight_number = EXCLUDED.flight_number,
                departure_time = EXCLUDED.departure_time,
                arrival_time = EXCLUDED.arrival_time,
                origin_id = EXCLUDED.origin_id,
                destination_id = EXCLUDED.destination_id,
                airline_id = EXCLUDED.airline_id
            RETURNING id, flight_number, departure_time, arrival_time, origin_id, destination_id, airline_id
            "#,
        )
        .bind(flight.id)
        .bind(&flight.flight_number)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .bind(flight.origin_id)
        .bind(flight.destination_id)
        .bind(flight.airline_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> RepoResult<Vec<Flight>> {
        let rows = sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} ORDER BY departure_time"))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Flight>> {
        let row = sqlx::query_as::<_, FlightRow>(&format!("{SELECT_FLIGHT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(row.map(Flight::from))
    }

    async fn find_by_airline(&self, airline_id: Uuid) -> RepoResult<Vec<Flight>> {
        self.find_where("airline_id", airline_id).await
    }

    async fn find_by_origin(&self, airport_id: Uuid) -> RepoResult<Vec<Flight>> {
        self.find_where("origin_id", airport_id).await
    }

    async fn find_by_destination(&self, airport_id: Uuid) -> RepoResult<Vec<Flight>> {
        self.find_where("destination_id", airport_id).await
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        // seats cascade, crew_members.flight_id is set to NULL
        sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}
