use aerobook_core::repository::{AirportRepository, FlightRepository};
use aerobook_core::{Airport, Flight, NewAirport, Repositories};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{on_duplicate, on_in_use, require_fields, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct AirportService {
    airports: Arc<dyn AirportRepository>,
    flights: Arc<dyn FlightRepository>,
}

impl AirportService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            airports: repos.airports.clone(),
            flights: repos.flights.clone(),
        }
    }

    pub async fn create_airport(&self, input: NewAirport) -> ServiceResult<Airport> {
        debug!("create_airport called with: {:?}", input);
        validate(&input)?;

        let airport = Airport::new(input);
        self.ensure_unique(&airport).await?;

        let saved = self
            .airports
            .save(&airport)
            .await
            .map_err(on_duplicate("Airport", &[("code", airport.code.as_str()), ("name", airport.name.as_str())]))?;

        info!("Airport {} persisted with ID: {}", saved.code, saved.id);
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<Airport>> {
        debug!("retrieve_all airports called");
        Ok(self.airports.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<Airport> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.airports
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Airport", id))
    }

    pub async fn update_airport(&self, id: Uuid, input: NewAirport) -> ServiceResult<Airport> {
        debug!("update_airport called with ID: {} - and {:?}", id, input);
        validate(&input)?;

        let mut existing = self.retrieve_by_id(id).await?;
        existing.code = input.code.trim().to_string();
        existing.name = input.name.trim().to_string();
        existing.location = input.location.trim().to_string();
        self.ensure_unique(&existing).await?;

        let saved = self
            .airports
            .save(&existing)
            .await
            .map_err(on_duplicate("Airport", &[("code", existing.code.as_str()), ("name", existing.name.as_str())]))?;

        info!("Airport {} updated", saved.id);
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.retrieve_by_id(id).await?;

        let departures = self.flights.find_by_origin(id).await?;
        let arrivals = self.flights.find_by_destination(id).await?;
        if !departures.is_empty() || !arrivals.is_empty() {
            return Err(ServiceError::conflict(format!(
                "Airport {} is still served by {} flight(s)",
                id,
                departures.len() + arrivals.len()
            )));
        }

        self.airports
            .delete_by_id(id)
            .await
            .map_err(on_in_use(format!("Airport {} is still used by flights", id)))?;
        info!("Airport {} deleted", id);
        Ok(())
    }

    pub async fn departures_of(&self, id: Uuid) -> ServiceResult<Vec<Flight>> {
        self.retrieve_by_id(id).await?;
        Ok(self.flights.find_by_origin(id).await?)
    }

    pub async fn arrivals_of(&self, id: Uuid) -> ServiceResult<Vec<Flight>> {
        self.retrieve_by_id(id).await?;
        Ok(self.flights.find_by_destination(id).await?)
    }

    async fn ensure_unique(&self, candidate: &Airport) -> ServiceResult<()> {
        if let Some(existing) = self.airports.find_by_code(&candidate.code).await? {
            if existing.id != candidate.id {
                return Err(ServiceError::already_exists("Airport", "code", &candidate.code));
            }
        }
        if let Some(existing) = self.airports.find_by_name(&candidate.name).await? {
            if existing.id != candidate.id {
                return Err(ServiceError::already_exists("Airport", "name", &candidate.name));
            }
        }
        Ok(())
    }
}

fn validate(input: &NewAirport) -> ServiceResult<()> {
    require_fields(&[
        ("code", &input.code),
        ("name", &input.name),
        ("location", &input.location),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flight_fixture, services};

    fn new_airport(code: &str, name: &str) -> NewAirport {
        NewAirport {
            code: code.to_string(),
            name: name.to_string(),
            location: "UK".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_retrieve_airport() {
        let services = services();
        let created = services.airports.create_airport(new_airport("LHR", "London Heathrow")).await.unwrap();

        let found = services.airports.retrieve_by_id(created.id).await.unwrap();
        assert_eq!(found.code, "LHR");
        assert_eq!(found.location, "UK");
        assert_eq!(services.airports.retrieve_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_airport_lists_every_blank_field() {
        let services = services();
        let err = services
            .airports
            .create_airport(NewAirport {
                code: "".to_string(),
                name: "Luton".to_string(),
                location: " ".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "One or more of the following fields are empty: code, location"
        );
    }

    #[tokio::test]
    async fn test_create_airport_rejects_duplicates() {
        let services = services();
        services.airports.create_airport(new_airport("LHR", "London Heathrow")).await.unwrap();

        let err = services.airports.create_airport(new_airport("LHR", "Heathrow")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { field: "code", .. }));

        let err = services.airports.create_airport(new_airport("LH2", "London Heathrow")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { field: "name", .. }));
    }

    #[tokio::test]
    async fn test_update_airport() {
        let services = services();
        let airport = services.airports.create_airport(new_airport("LGW", "Gatwick")).await.unwrap();

        let updated = services
            .airports
            .update_airport(airport.id, new_airport("LGW", "London Gatwick"))
            .await
            .unwrap();
        assert_eq!(updated.name, "London Gatwick");

        let err = services
            .airports
            .update_airport(Uuid::new_v4(), new_airport("XXX", "Nowhere"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Airport", .. }));
    }

    #[tokio::test]
    async fn test_departures_and_arrivals() {
        let services = services();
        let input = flight_fixture(&services).await;
        let (origin, destination) = (input.origin_id, input.destination_id);
        let flight = services.flights.create_flight(input).await.unwrap();

        assert_eq!(services.airports.departures_of(origin).await.unwrap(), vec![flight.clone()]);
        assert!(services.airports.arrivals_of(origin).await.unwrap().is_empty());
        assert_eq!(services.airports.arrivals_of(destination).await.unwrap(), vec![flight]);
    }

    #[tokio::test]
    async fn test_delete_airport_in_use_conflicts() {
        let services = services();
        let input = flight_fixture(&services).await;
        let destination = input.destination_id;
        services.flights.create_flight(input).await.unwrap();

        let err = services.airports.delete_by_id(destination).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_unused_airport() {
        let services = services();
        let airport = services.airports.create_airport(new_airport("LUT", "Luton")).await.unwrap();

        services.airports.delete_by_id(airport.id).await.unwrap();
        let err = services.airports.retrieve_by_id(airport.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }
}
