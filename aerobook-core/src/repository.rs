use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    Airline, Airport, Booking, CrewMember, Flight, Passenger, Payment, RepoResult, Seat, Ticket,
};

// `save` is an upsert keyed on `id` for every repository below.

/// Repository trait for airline data access
#[async_trait]
pub trait AirlineRepository: Send + Sync {
    async fn save(&self, airline: &Airline) -> RepoResult<Airline>;

    async fn find_all(&self) -> RepoResult<Vec<Airline>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Airline>>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Airline>>;

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Airline>>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

/// Repository trait for airport data access
#[async_trait]
pub trait AirportRepository: Send + Sync {
    async fn save(&self, airport: &Airport) -> RepoResult<Airport>;

    async fn find_all(&self) -> RepoResult<Vec<Airport>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Airport>>;

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Airport>>;

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Airport>>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

/// Repository trait for flight data access
#[async_trait]
pub trait FlightRepository: Send + Sync {
    async fn save(&self, flight: &Flight) -> RepoResult<Flight>;

    async fn find_all(&self) -> RepoResult<Vec<Flight>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Flight>>;

    async fn find_by_airline(&self, airline_id: Uuid) -> RepoResult<Vec<Flight>>;

    /// Flights departing from the airport.
    async fn find_by_origin(&self, airport_id: Uuid) -> RepoResult<Vec<Flight>>;

    /// Flights arriving at the airport.
    async fn find_by_destination(&self, airport_id: Uuid) -> RepoResult<Vec<Flight>>;

    /// Removes the flight together with its seats and unassigns its crew.
    /// Fails with `ForeignKeyViolation` while bookings reference it.
    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

#[async_trait]
pub trait CrewMemberRepository: Send + Sync {
    async fn save(&self, crew: &CrewMember) -> RepoResult<CrewMember>;

    async fn find_all(&self) -> RepoResult<Vec<CrewMember>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<CrewMember>>;

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<CrewMember>>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

#[async_trait]
pub trait SeatRepository: Send + Sync {
    async fn save(&self, seat: &Seat) -> RepoResult<Seat>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Seat>>;

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>>;

    async fn find_by_flight_and_number(
        &self,
        flight_id: Uuid,
        seat_number: &str,
    ) -> RepoResult<Option<Seat>>;

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Vec<Seat>>;

    /// Atomically hands the seat to the booking if it is free or already held
    /// by that booking. `None` means another booking holds it.
    async fn reserve(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>>;

    /// Atomically frees the seat if the booking holds it, `None` otherwise.
    async fn release(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

/// Repository trait for passenger data access.
///
/// Deleting a passenger also drops its booking links.
#[async_trait]
pub trait PassengerRepository: Send + Sync {
    async fn save(&self, passenger: &Passenger) -> RepoResult<Passenger>;

    async fn find_all(&self) -> RepoResult<Vec<Passenger>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Passenger>>;

    async fn find_by_passport(&self, passport_number: &str) -> RepoResult<Option<Passenger>>;

    /// Passengers linked to the booking.
    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Vec<Passenger>>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

/// Repository trait for booking data access, including the booking/passenger link table.
///
/// Deleting a booking also drops its passenger links and frees the seats it
/// held, in one step.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, booking: &Booking) -> RepoResult<Booking>;

    async fn find_all(&self) -> RepoResult<Vec<Booking>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>>;

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Booking>>;

    async fn find_by_passenger(&self, passenger_id: Uuid) -> RepoResult<Vec<Booking>>;

    /// Links a passenger to a booking. Linking twice is a no-op.
    async fn add_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> RepoResult<()>;

    /// Returns `false` when the passenger was not linked.
    async fn remove_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> RepoResult<bool>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: &Payment) -> RepoResult<Payment>;

    async fn find_all(&self) -> RepoResult<Vec<Payment>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Payment>>;

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Payment>>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    async fn save(&self, ticket: &Ticket) -> RepoResult<Ticket>;

    async fn find_all(&self) -> RepoResult<Vec<Ticket>>;

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Ticket>>;

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Ticket>>;

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()>;
}

/// One handle per repository, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub airlines: Arc<dyn AirlineRepository>,
    pub airports: Arc<dyn AirportRepository>,
    pub flights: Arc<dyn FlightRepository>,
    pub crew: Arc<dyn CrewMemberRepository>,
    pub seats: Arc<dyn SeatRepository>,
    pub passengers: Arc<dyn PassengerRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub payments: Arc<dyn PaymentRepository>,
    pub tickets: Arc<dyn TicketRepository>,
}
