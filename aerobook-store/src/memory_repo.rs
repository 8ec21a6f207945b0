//! In-memory implementation of every repository trait.
//!
//! Mirrors the PostgreSQL schema closely enough for the services to behave
//! the same on either backend: the same unique constraints are enforced,
//! deleting a flight cascades to its seats and unassigns its crew, and
//! deleting a booking or passenger drops their link rows.

use aerobook_core::repository::{
    AirlineRepository, AirportRepository, BookingRepository, CrewMemberRepository,
    FlightRepository, PassengerRepository, PaymentRepository, SeatRepository, TicketRepository,
};
use aerobook_core::{
    Airline, Airport, Booking, CrewMember, Flight, Passenger, Payment, RepoError, RepoResult,
    Repositories, Seat, Ticket,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    airlines: HashMap<Uuid, Airline>,
    airports: HashMap<Uuid, Airport>,
    flights: HashMap<Uuid, Flight>,
    crew: HashMap<Uuid, CrewMember>,
    seats: HashMap<Uuid, Seat>,
    passengers: HashMap<Uuid, Passenger>,
    bookings: HashMap<Uuid, Booking>,
    /// (booking_id, passenger_id)
    booking_passengers: HashSet<(Uuid, Uuid)>,
    payments: HashMap<Uuid, Payment>,
    tickets: HashMap<Uuid, Ticket>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every repository handle backed by this one store.
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            airlines: self.clone(),
            airports: self.clone(),
            flights: self.clone(),
            crew: self.clone(),
            seats: self.clone(),
            passengers: self.clone(),
            bookings: self.clone(),
            payments: self.clone(),
            tickets: self.clone(),
        }
    }
}

fn unique_violation(constraint: &str) -> RepoError {
    RepoError::UniqueViolation(format!("duplicate key value violates unique constraint \"{}\"", constraint))
}

fn sorted_by<T, K: Ord>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();
    rows.sort_by_key(|row| key(row));
    rows
}

#[async_trait]
impl AirlineRepository for MemoryStore {
    async fn save(&self, airline: &Airline) -> RepoResult<Airline> {
        let mut t = self.tables.write().await;
        let others = || t.airlines.values().filter(|a| a.id != airline.id);
        if others().any(|a| a.name == airline.name) {
            return Err(unique_violation("airlines_name_key"));
        }
        if others().any(|a| a.code == airline.code) {
            return Err(unique_violation("airlines_code_key"));
        }
        t.airlines.insert(airline.id, airline.clone());
        Ok(airline.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<Airline>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.airlines.values().cloned(), |a| a.name.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Airline>> {
        Ok(self.tables.read().await.airlines.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Airline>> {
        let t = self.tables.read().await;
        Ok(t.airlines.values().find(|a| a.name == name).cloned())
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Airline>> {
        let t = self.tables.read().await;
        Ok(t.airlines.values().find(|a| a.code == code).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.flights.values().any(|f| f.airline_id == id) {
            return Err(RepoError::ForeignKeyViolation("flights_airline_id_fkey".to_string()));
        }
        t.airlines.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl AirportRepository for MemoryStore {
    async fn save(&self, airport: &Airport) -> RepoResult<Airport> {
        let mut t = self.tables.write().await;
        let others = || t.airports.values().filter(|a| a.id != airport.id);
        if others().any(|a| a.code == airport.code) {
            return Err(unique_violation("airports_code_key"));
        }
        if others().any(|a| a.name == airport.name) {
            return Err(unique_violation("airports_name_key"));
        }
        t.airports.insert(airport.id, airport.clone());
        Ok(airport.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<Airport>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.airports.values().cloned(), |a| a.code.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Airport>> {
        Ok(self.tables.read().await.airports.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Airport>> {
        let t = self.tables.read().await;
        Ok(t.airports.values().find(|a| a.code == code).cloned())
    }

    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Airport>> {
        let t = self.tables.read().await;
        Ok(t.airports.values().find(|a| a.name == name).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.flights.values().any(|f| f.origin_id == id || f.destination_id == id) {
            return Err(RepoError::ForeignKeyViolation("flights_origin_id_fkey".to_string()));
        }
        t.airports.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl FlightRepository for MemoryStore {
    async fn save(&self, flight: &Flight) -> RepoResult<Flight> {
        let mut t = self.tables.write().await;
        t.flights.insert(flight.id, flight.clone());
        Ok(flight.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<Flight>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.flights.values().cloned(), |f| f.departure_time))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Flight>> {
        Ok(self.tables.read().await.flights.get(&id).cloned())
    }

    async fn find_by_airline(&self, airline_id: Uuid) -> RepoResult<Vec<Flight>> {
        let t = self.tables.read().await;
        let rows = t.flights.values().filter(|f| f.airline_id == airline_id).cloned();
        Ok(sorted_by(rows, |f| f.departure_time))
    }

    async fn find_by_origin(&self, airport_id: Uuid) -> RepoResult<Vec<Flight>> {
        let t = self.tables.read().await;
        let rows = t.flights.values().filter(|f| f.origin_id == airport_id).cloned();
        Ok(sorted_by(rows, |f| f.departure_time))
    }

    async fn find_by_destination(&self, airport_id: Uuid) -> RepoResult<Vec<Flight>> {
        let t = self.tables.read().await;
        let rows = t.flights.values().filter(|f| f.destination_id == airport_id).cloned();
        Ok(sorted_by(rows, |f| f.departure_time))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.bookings.values().any(|b| b.flight_id == id) {
            return Err(RepoError::ForeignKeyViolation("bookings_flight_id_fkey".to_string()));
        }
        t.seats.retain(|_, seat| seat.flight_id != id);
        for crew in t.crew.values_mut().filter(|c| c.flight_id == Some(id)) {
            crew.flight_id = None;
        }
        t.flights.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CrewMemberRepository for MemoryStore {
    async fn save(&self, crew: &CrewMember) -> RepoResult<CrewMember> {
        let mut t = self.tables.write().await;
        t.crew.insert(crew.id, crew.clone());
        Ok(crew.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<CrewMember>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.crew.values().cloned(), |c| c.name.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<CrewMember>> {
        Ok(self.tables.read().await.crew.get(&id).cloned())
    }

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<CrewMember>> {
        let t = self.tables.read().await;
        let rows = t.crew.values().filter(|c| c.flight_id == Some(flight_id)).cloned();
        Ok(sorted_by(rows, |c| (c.role.clone(), c.name.clone())))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        self.tables.write().await.crew.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl SeatRepository for MemoryStore {
    async fn save(&self, seat: &Seat) -> RepoResult<Seat> {
        let mut t = self.tables.write().await;
        if t
            .seats
            .values()
            .any(|s| s.id != seat.id && s.flight_id == seat.flight_id && s.seat_number == seat.seat_number)
        {
            return Err(unique_violation("seats_flight_id_seat_number_key"));
        }
        t.seats.insert(seat.id, seat.clone());
        Ok(seat.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Seat>> {
        Ok(self.tables.read().await.seats.get(&id).cloned())
    }

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>> {
        let t = self.tables.read().await;
        let rows = t.seats.values().filter(|s| s.flight_id == flight_id).cloned();
        Ok(sorted_by(rows, |s| s.seat_number.clone()))
    }

    async fn find_by_flight_and_number(
        &self,
        flight_id: Uuid,
        seat_number: &str,
    ) -> RepoResult<Option<Seat>> {
        let t = self.tables.read().await;
        Ok(t
            .seats
            .values()
            .find(|s| s.flight_id == flight_id && s.seat_number == seat_number)
            .cloned())
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Vec<Seat>> {
        let t = self.tables.read().await;
        let rows = t.seats.values().filter(|s| s.booking_id == Some(booking_id)).cloned();
        Ok(sorted_by(rows, |s| s.seat_number.clone()))
    }

    async fn reserve(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>> {
        let mut t = self.tables.write().await;
        let Some(seat) = t.seats.get_mut(&seat_id) else {
            return Ok(None);
        };
        if !seat.is_available && seat.booking_id != Some(booking_id) {
            return Ok(None);
        }
        seat.reserve(booking_id);
        Ok(Some(seat.clone()))
    }

    async fn release(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>> {
        let mut t = self.tables.write().await;
        match t.seats.get_mut(&seat_id) {
            Some(seat) if seat.booking_id == Some(booking_id) => {
                seat.release();
                Ok(Some(seat.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        self.tables.write().await.seats.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PassengerRepository for MemoryStore {
    async fn save(&self, passenger: &Passenger) -> RepoResult<Passenger> {
        let mut t = self.tables.write().await;
        if t
            .passengers
            .values()
            .any(|p| p.id != passenger.id && p.passport_number == passenger.passport_number)
        {
            return Err(unique_violation("passengers_passport_number_key"));
        }
        t.passengers.insert(passenger.id, passenger.clone());
        Ok(passenger.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<Passenger>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.passengers.values().cloned(), |p| p.name.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Passenger>> {
        Ok(self.tables.read().await.passengers.get(&id).cloned())
    }

    async fn find_by_passport(&self, passport_number: &str) -> RepoResult<Option<Passenger>> {
        let t = self.tables.read().await;
        Ok(t
            .passengers
            .values()
            .find(|p| p.passport_number.expose() == passport_number)
            .cloned())
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Vec<Passenger>> {
        let t = self.tables.read().await;
        let rows = t
            .booking_passengers
            .iter()
            .filter(|(b, _)| *b == booking_id)
            .filter_map(|(_, p)| t.passengers.get(p).cloned());
        Ok(sorted_by(rows, |p| p.name.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        t.booking_passengers.retain(|(_, p)| *p != id);
        t.passengers.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn save(&self, booking: &Booking) -> RepoResult<Booking> {
        let mut t = self.tables.write().await;
        t.bookings.insert(booking.id, booking.clone());
        Ok(booking.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<Booking>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.bookings.values().cloned(), |b| b.created_at))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(self.tables.read().await.bookings.get(&id).cloned())
    }

    async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Booking>> {
        let t = self.tables.read().await;
        let rows = t.bookings.values().filter(|b| b.flight_id == flight_id).cloned();
        Ok(sorted_by(rows, |b| b.created_at))
    }

    async fn find_by_passenger(&self, passenger_id: Uuid) -> RepoResult<Vec<Booking>> {
        let t = self.tables.read().await;
        let rows = t
            .booking_passengers
            .iter()
            .filter(|(_, p)| *p == passenger_id)
            .filter_map(|(b, _)| t.bookings.get(b).cloned());
        Ok(sorted_by(rows, |b| b.created_at))
    }

    async fn add_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if !t.bookings.contains_key(&booking_id) || !t.passengers.contains_key(&passenger_id) {
            return Err(RepoError::ForeignKeyViolation(
                "booking_passengers_booking_id_fkey".to_string(),
            ));
        }
        t.booking_passengers.insert((booking_id, passenger_id));
        Ok(())
    }

    async fn remove_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> RepoResult<bool> {
        let mut t = self.tables.write().await;
        Ok(t.booking_passengers.remove(&(booking_id, passenger_id)))
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        let mut t = self.tables.write().await;
        if t.payments.values().any(|p| p.booking_id == id) || t.tickets.values().any(|tk| tk.booking_id == id) {
            return Err(RepoError::ForeignKeyViolation("payments_booking_id_fkey".to_string()));
        }
        t.booking_passengers.retain(|(b, _)| *b != id);
        for seat in t.seats.values_mut().filter(|s| s.booking_id == Some(id)) {
            seat.release();
        }
        t.bookings.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn save(&self, payment: &Payment) -> RepoResult<Payment> {
        let mut t = self.tables.write().await;
        if t
            .payments
            .values()
            .any(|p| p.id != payment.id && p.booking_id == payment.booking_id)
        {
            return Err(unique_violation("payments_booking_id_key"));
        }
        t.payments.insert(payment.id, payment.clone());
        Ok(payment.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<Payment>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.payments.values().cloned(), |p| p.created_at))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Payment>> {
        Ok(self.tables.read().await.payments.get(&id).cloned())
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Payment>> {
        let t = self.tables.read().await;
        Ok(t.payments.values().find(|p| p.booking_id == booking_id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        self.tables.write().await.payments.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TicketRepository for MemoryStore {
    async fn save(&self, ticket: &Ticket) -> RepoResult<Ticket> {
        let mut t = self.tables.write().await;
        if t
            .tickets
            .values()
            .any(|tk| tk.id != ticket.id && tk.booking_id == ticket.booking_id)
        {
            return Err(unique_violation("tickets_booking_id_key"));
        }
        t.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket.clone())
    }

    async fn find_all(&self) -> RepoResult<Vec<Ticket>> {
        let t = self.tables.read().await;
        Ok(sorted_by(t.tickets.values().cloned(), |tk| tk.issued_at))
    }

    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Ticket>> {
        Ok(self.tables.read().await.tickets.get(&id).cloned())
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Ticket>> {
        let t = self.tables.read().await;
        Ok(t.tickets.values().find(|tk| tk.booking_id == booking_id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
        self.tables.write().await.tickets.remove(&id);
        Ok(())
    }
}
