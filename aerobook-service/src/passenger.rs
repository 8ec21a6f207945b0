use aerobook_core::repository::{BookingRepository, PassengerRepository};
use aerobook_core::{Booking, NewPassenger, Passenger, Repositories};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{on_duplicate, require_fields, ServiceError, ServiceResult};

/// Passenger records. Passport numbers never reach the logs: every message
/// here goes through `Masked`'s `Debug`/`Display`.
#[derive(Clone)]
pub struct PassengerService {
    passengers: Arc<dyn PassengerRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl PassengerService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            passengers: repos.passengers.clone(),
            bookings: repos.bookings.clone(),
        }
    }

    pub async fn create_passenger(&self, input: NewPassenger) -> ServiceResult<Passenger> {
        debug!("create_passenger called with: {:?}", input);
        validate(&input)?;

        let passenger = Passenger::new(input);
        self.ensure_unique(&passenger).await?;
        let masked = passenger.passport_number.to_string();
        let saved = self
            .passengers
            .save(&passenger)
            .await
            .map_err(on_duplicate("Passenger", &[("passport_number", masked.as_str())]))?;

        info!("Passenger {} persisted with ID: {}", saved.name, saved.id);
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<Passenger>> {
        debug!("retrieve_all passengers called");
        Ok(self.passengers.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<Passenger> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.passengers
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Passenger", id))
    }

    pub async fn update_passenger(&self, id: Uuid, input: NewPassenger) -> ServiceResult<Passenger> {
        debug!("update_passenger called with ID: {} - and {:?}", id, input);
        validate(&input)?;

        let existing = self.retrieve_by_id(id).await?;
        let updated = Passenger { id: existing.id, ..Passenger::new(input) };
        self.ensure_unique(&updated).await?;
        let masked = updated.passport_number.to_string();
        let saved = self
            .passengers
            .save(&updated)
            .await
            .map_err(on_duplicate("Passenger", &[("passport_number", masked.as_str())]))?;

        info!("Passenger {} updated", saved.id);
        Ok(saved)
    }

    /// Deletes the passenger and unlinks it from every booking.
    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.retrieve_by_id(id).await?;

        self.passengers.delete_by_id(id).await?;
        info!("Passenger {} deleted", id);
        Ok(())
    }

    pub async fn bookings_of(&self, id: Uuid) -> ServiceResult<Vec<Booking>> {
        self.retrieve_by_id(id).await?;
        Ok(self.bookings.find_by_passenger(id).await?)
    }

    async fn ensure_unique(&self, candidate: &Passenger) -> ServiceResult<()> {
        let existing = self
            .passengers
            .find_by_passport(candidate.passport_number.expose())
            .await?;
        match existing {
            Some(other) if other.id != candidate.id => Err(ServiceError::already_exists(
                "Passenger",
                "passport_number",
                candidate.passport_number.to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn validate(input: &NewPassenger) -> ServiceResult<()> {
    require_fields(&[
        ("name", &input.name),
        ("passport_number", input.passport_number.expose()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flight_fixture, services};
    use aerobook_core::NewBooking;
    use aerobook_shared::Masked;

    fn new_passenger(name: &str, passport: &str) -> NewPassenger {
        NewPassenger { name: name.to_string(), passport_number: Masked::from(passport) }
    }

    #[tokio::test]
    async fn test_create_passenger() {
        let services = services();
        let passenger = services
            .passengers
            .create_passenger(new_passenger("Edgar Afonso", "PASS123"))
            .await
            .unwrap();

        assert_eq!(passenger.passport_number.expose(), "PASS123");
        assert_eq!(services.passengers.retrieve_by_id(passenger.id).await.unwrap(), passenger);
    }

    #[tokio::test]
    async fn test_create_passenger_with_blank_passport() {
        let services = services();
        let err = services
            .passengers
            .create_passenger(new_passenger("John Doe", "   "))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "One or more of the following fields are empty: passport_number");
    }

    #[tokio::test]
    async fn test_duplicate_passport_is_rejected_without_leaking_it() {
        let services = services();
        services.passengers.create_passenger(new_passenger("Edgar Afonso", "PASS123")).await.unwrap();

        let err = services
            .passengers
            .create_passenger(new_passenger("Impostor", "PASS123"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { field: "passport_number", .. }));
        assert!(!err.to_string().contains("PASS123"));
    }

    #[tokio::test]
    async fn test_update_passenger() {
        let services = services();
        let passenger = services.passengers.create_passenger(new_passenger("John Doe", "PASS456")).await.unwrap();

        let updated = services
            .passengers
            .update_passenger(passenger.id, new_passenger("John Q. Doe", "PASS456"))
            .await
            .unwrap();
        assert_eq!(updated.id, passenger.id);
        assert_eq!(updated.name, "John Q. Doe");
    }

    #[tokio::test]
    async fn test_delete_passenger_unlinks_bookings() {
        let services = services();
        let flight = services.flights.create_flight(flight_fixture(&services).await).await.unwrap();
        let booking = services
            .bookings
            .create_booking(NewBooking { flight_id: flight.id, status: "ON TIME".to_string() })
            .await
            .unwrap();
        let passenger = services.passengers.create_passenger(new_passenger("John Doe", "PASS456")).await.unwrap();
        services.bookings.add_passenger(booking.id, passenger.id).await.unwrap();
        assert_eq!(services.passengers.bookings_of(passenger.id).await.unwrap(), vec![booking.clone()]);

        services.passengers.delete_by_id(passenger.id).await.unwrap();

        let details = services.bookings.retrieve_by_id(booking.id).await.unwrap();
        assert!(details.passengers.is_empty());
    }
}
