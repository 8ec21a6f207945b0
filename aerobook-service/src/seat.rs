use aerobook_core::repository::{FlightRepository, SeatRepository};
use aerobook_core::{NewSeat, Repositories, Seat};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{on_duplicate, require_fields, ServiceError, ServiceResult};

/// Seat inventory per flight. Reservation goes through the booking service.
#[derive(Clone)]
pub struct SeatService {
    seats: Arc<dyn SeatRepository>,
    flights: Arc<dyn FlightRepository>,
}

impl SeatService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            seats: repos.seats.clone(),
            flights: repos.flights.clone(),
        }
    }

    pub async fn create_seat(&self, flight_id: Uuid, input: NewSeat) -> ServiceResult<Seat> {
        debug!("create_seat called for flight: {} - with {:?}", flight_id, input);
        validate(&input)?;

        if self.flights.find_by_id(flight_id).await?.is_none() {
            return Err(ServiceError::not_found("Flight", flight_id));
        }

        let seat = Seat::new(flight_id, input);
        self.ensure_unique(&seat).await?;
        let saved = self
            .seats
            .save(&seat)
            .await
            .map_err(on_duplicate("Seat", &[("seat_number", seat.seat_number.as_str())]))?;

        info!("Seat {} added to flight {}", saved.seat_number, flight_id);
        Ok(saved)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<Seat> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.seats
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Seat", id))
    }

    pub async fn list_for_flight(&self, flight_id: Uuid) -> ServiceResult<Vec<Seat>> {
        if self.flights.find_by_id(flight_id).await?.is_none() {
            return Err(ServiceError::not_found("Flight", flight_id));
        }
        Ok(self.seats.find_by_flight(flight_id).await?)
    }

    pub async fn update_seat(&self, id: Uuid, input: NewSeat) -> ServiceResult<Seat> {
        debug!("update_seat called with ID: {} - and {:?}", id, input);
        validate(&input)?;

        let mut existing = self.retrieve_by_id(id).await?;
        existing.seat_number = input.seat_number.trim().to_string();
        existing.seat_class = input.seat_class.trim().to_string();
        self.ensure_unique(&existing).await?;

        let saved = self
            .seats
            .save(&existing)
            .await
            .map_err(on_duplicate("Seat", &[("seat_number", existing.seat_number.as_str())]))?;
        info!("Seat {} updated", saved.id);
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        let seat = self.retrieve_by_id(id).await?;

        if let Some(booking_id) = seat.booking_id {
            return Err(ServiceError::conflict(format!(
                "Seat {} is held by booking {}",
                seat.seat_number, booking_id
            )));
        }

        self.seats.delete_by_id(id).await?;
        info!("Seat {} deleted", id);
        Ok(())
    }

    async fn ensure_unique(&self, candidate: &Seat) -> ServiceResult<()> {
        let existing = self
            .seats
            .find_by_flight_and_number(candidate.flight_id, &candidate.seat_number)
            .await?;
        match existing {
            Some(other) if other.id != candidate.id => Err(ServiceError::already_exists(
                "Seat",
                "seat_number",
                &candidate.seat_number,
            )),
            _ => Ok(()),
        }
    }
}

fn validate(input: &NewSeat) -> ServiceResult<()> {
    require_fields(&[
        ("seat_number", &input.seat_number),
        ("seat_class", &input.seat_class),
    ])
}
