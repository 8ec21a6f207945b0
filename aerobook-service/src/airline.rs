use aerobook_core::repository::{AirlineRepository, FlightRepository};
use aerobook_core::{Airline, Flight, NewAirline, Repositories};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{on_duplicate, on_in_use, require_fields, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct AirlineService {
    airlines: Arc<dyn AirlineRepository>,
    flights: Arc<dyn FlightRepository>,
}

impl AirlineService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            airlines: repos.airlines.clone(),
            flights: repos.flights.clone(),
        }
    }

    pub async fn create_airline(&self, input: NewAirline) -> ServiceResult<Airline> {
        debug!("create_airline called with: {:?}", input);
        require_fields(&[("name", &input.name), ("code", &input.code)])?;

        let airline = Airline::new(input);
        self.ensure_unique(&airline).await?;

        let saved = self
            .airlines
            .save(&airline)
            .await
            .map_err(on_duplicate("Airline", &[("name", airline.name.as_str()), ("code", airline.code.as_str())]))?;

        info!("Airline {} ({}) persisted with ID: {}", saved.name, saved.code, saved.id);
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<Airline>> {
        debug!("retrieve_all airlines called");
        Ok(self.airlines.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<Airline> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.airlines
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Airline", id))
    }

    pub async fn update_airline(&self, id: Uuid, input: NewAirline) -> ServiceResult<Airline> {
        debug!("update_airline called with ID: {} - and {:?}", id, input);
        require_fields(&[("name", &input.name), ("code", &input.code)])?;

        let mut existing = self.retrieve_by_id(id).await?;
        existing.name = input.name.trim().to_string();
        existing.code = input.code.trim().to_string();
        self.ensure_unique(&existing).await?;

        let saved = self
            .airlines
            .save(&existing)
            .await
            .map_err(on_duplicate("Airline", &[("name", existing.name.as_str()), ("code", existing.code.as_str())]))?;

        info!("Airline {} updated", saved.id);
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.retrieve_by_id(id).await?;

        let flights = self.flights.find_by_airline(id).await?;
        if !flights.is_empty() {
            return Err(ServiceError::conflict(format!(
                "Airline {} still operates {} flight(s)",
                id,
                flights.len()
            )));
        }

        self.airlines
            .delete_by_id(id)
            .await
            .map_err(on_in_use(format!("Airline {} still operates flights", id)))?;
        info!("Airline {} deleted", id);
        Ok(())
    }

    /// Flights operated by the airline.
    pub async fn flights_of(&self, id: Uuid) -> ServiceResult<Vec<Flight>> {
        self.retrieve_by_id(id).await?;
        Ok(self.flights.find_by_airline(id).await?)
    }

    /// Name and code must not belong to any other airline.
    async fn ensure_unique(&self, candidate: &Airline) -> ServiceResult<()> {
        if let Some(existing) = self.airlines.find_by_name(&candidate.name).await? {
            if existing.id != candidate.id {
                return Err(ServiceError::already_exists("Airline", "name", &candidate.name));
            }
        }
        if let Some(existing) = self.airlines.find_by_code(&candidate.code).await? {
            if existing.id != candidate.id {
                return Err(ServiceError::already_exists("Airline", "code", &candidate.code));
            }
        }
        Ok(())
    }
}
