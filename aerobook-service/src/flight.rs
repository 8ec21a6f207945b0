use aerobook_core::repository::{
    AirlineRepository, AirportRepository, BookingRepository, CrewMemberRepository,
    FlightRepository, SeatRepository,
};
use aerobook_core::{CrewMember, Flight, NewFlight, Repositories, Seat};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{on_in_use, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct FlightService {
    flights: Arc<dyn FlightRepository>,
    airlines: Arc<dyn AirlineRepository>,
    airports: Arc<dyn AirportRepository>,
    seats: Arc<dyn SeatRepository>,
    crew: Arc<dyn CrewMemberRepository>,
    bookings: Arc<dyn BookingRepository>,
}

/// A payload that passed the field checks, with both times present.
struct Schedule {
    flight_number: String,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
}

impl FlightService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            flights: repos.flights.clone(),
            airlines: repos.airlines.clone(),
            airports: repos.airports.clone(),
            seats: repos.seats.clone(),
            crew: repos.crew.clone(),
            bookings: repos.bookings.clone(),
        }
    }

    pub async fn create_flight(&self, input: NewFlight) -> ServiceResult<Flight> {
        debug!("create_flight called with: {:?}", input);
        let schedule = check_schedule(&input)?;
        self.resolve_references(&input).await?;

        debug!("References resolved, persisting flight {}", schedule.flight_number);
        let flight = Flight {
            id: Uuid::new_v4(),
            flight_number: schedule.flight_number,
            departure_time: schedule.departure_time,
            arrival_time: schedule.arrival_time,
            origin_id: input.origin_id,
            destination_id: input.destination_id,
            airline_id: input.airline_id,
        };
        let saved = self.flights.save(&flight).await?;

        info!("Flight {} persisted with ID: {}", saved.flight_number, saved.id);
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<Flight>> {
        debug!("retrieve_all flights called");
        Ok(self.flights.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<Flight> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.flights
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Flight", id))
    }

    pub async fn update_flight(&self, id: Uuid, input: NewFlight) -> ServiceResult<Flight> {
        debug!("update_flight called with ID: {} - and {:?}", id, input);
        let schedule = check_schedule(&input)?;
        let mut existing = self.retrieve_by_id(id).await?;
        self.resolve_references(&input).await?;

        existing.flight_number = schedule.flight_number;
        existing.departure_time = schedule.departure_time;
        existing.arrival_time = schedule.arrival_time;
        existing.origin_id = input.origin_id;
        existing.destination_id = input.destination_id;
        existing.airline_id = input.airline_id;
        let saved = self.flights.save(&existing).await?;

        info!("Flight {} updated", saved.id);
        Ok(saved)
    }

    /// Removes the flight with its seats and unassigns its crew. Refused while
    /// bookings still reference it.
    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.retrieve_by_id(id).await?;

        let bookings = self.bookings.find_by_flight(id).await?;
        if !bookings.is_empty() {
            return Err(ServiceError::conflict(format!(
                "Flight {} still has {} booking(s)",
                id,
                bookings.len()
            )));
        }

        // Seats and crew assignments go with the row; a booking that slipped
        // in after the check above makes the delete fail as a whole.
        self.flights
            .delete_by_id(id)
            .await
            .map_err(on_in_use(format!("Flight {} still has bookings", id)))?;
        info!("Flight {} deleted", id);
        Ok(())
    }

    pub async fn seats_of(&self, id: Uuid) -> ServiceResult<Vec<Seat>> {
        self.retrieve_by_id(id).await?;
        Ok(self.seats.find_by_flight(id).await?)
    }

    pub async fn crew_of(&self, id: Uuid) -> ServiceResult<Vec<CrewMember>> {
        self.retrieve_by_id(id).await?;
        Ok(self.crew.find_by_flight(id).await?)
    }

    /// Puts the crew member on the flight, moving them off any other one.
    pub async fn assign_crew_member(&self, flight_id: Uuid, crew_id: Uuid) -> ServiceResult<CrewMember> {
        debug!("assign_crew_member called with flight: {} - crew: {}", flight_id, crew_id);
        self.retrieve_by_id(flight_id).await?;
        let mut member = self.find_crew_member(crew_id).await?;

        if member.flight_id == Some(flight_id) {
            return Ok(member);
        }
        member.flight_id = Some(flight_id);
        let saved = self.crew.save(&member).await?;

        info!("Crew member {} assigned to flight {}", crew_id, flight_id);
        Ok(saved)
    }

    pub async fn unassign_crew_member(&self, flight_id: Uuid, crew_id: Uuid) -> ServiceResult<CrewMember> {
        debug!("unassign_crew_member called with flight: {} - crew: {}", flight_id, crew_id);
        self.retrieve_by_id(flight_id).await?;
        let mut member = self.find_crew_member(crew_id).await?;

        if member.flight_id != Some(flight_id) {
            return Err(ServiceError::conflict(format!(
                "Crew member {} is not assigned to flight {}",
                crew_id, flight_id
            )));
        }
        member.flight_id = None;
        let saved = self.crew.save(&member).await?;

        info!("Crew member {} removed from flight {}", crew_id, flight_id);
        Ok(saved)
    }

    async fn find_crew_member(&self, id: Uuid) -> ServiceResult<CrewMember> {
        self.crew
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Crew member", id))
    }

    async fn resolve_references(&self, input: &NewFlight) -> ServiceResult<()> {
        if self.airports.find_by_id(input.origin_id).await?.is_none() {
            return Err(ServiceError::not_found("Origin airport", input.origin_id));
        }
        if self.airports.find_by_id(input.destination_id).await?.is_none() {
            return Err(ServiceError::not_found("Destination airport", input.destination_id));
        }
        if self.airlines.find_by_id(input.airline_id).await?.is_none() {
            return Err(ServiceError::not_found("Airline", input.airline_id));
        }
        Ok(())
    }
}

fn check_schedule(input: &NewFlight) -> ServiceResult<Schedule> {
    let flight_number = input.flight_number.trim();
    if flight_number.is_empty() {
        warn!("Can't persist, flight number is empty");
        return Err(ServiceError::validation("Flight number can't be empty"));
    }

    let departure_time = input
        .departure_time
        .ok_or_else(|| ServiceError::validation("All flights need a departure time."))?;
    let arrival_time = input
        .arrival_time
        .ok_or_else(|| ServiceError::validation("All flights need an arrival time."))?;

    if arrival_time < departure_time {
        return Err(ServiceError::validation(
            "Flights can't have an arrival time which is earlier than the departure time.",
        ));
    }

    Ok(Schedule {
        flight_number: flight_number.to_string(),
        departure_time,
        arrival_time,
    })
}
