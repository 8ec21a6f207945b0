use aerobook_core::repository::{
    BookingRepository, FlightRepository, PassengerRepository, PaymentRepository, SeatRepository,
    TicketRepository,
};
use aerobook_core::{Booking, BookingDetails, NewBooking, Repositories};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{on_in_use, require_fields, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    flights: Arc<dyn FlightRepository>,
    passengers: Arc<dyn PassengerRepository>,
    seats: Arc<dyn SeatRepository>,
    payments: Arc<dyn PaymentRepository>,
    tickets: Arc<dyn TicketRepository>,
}

impl BookingService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            bookings: repos.bookings.clone(),
            flights: repos.flights.clone(),
            passengers: repos.passengers.clone(),
            seats: repos.seats.clone(),
            payments: repos.payments.clone(),
            tickets: repos.tickets.clone(),
        }
    }

    pub async fn create_booking(&self, input: NewBooking) -> ServiceResult<Booking> {
        debug!("create_booking called with: {:?}", input);
        require_fields(&[("status", &input.status)])?;

        if self.flights.find_by_id(input.flight_id).await?.is_none() {
            return Err(ServiceError::not_found("Flight", input.flight_id));
        }

        let saved = self.bookings.save(&Booking::new(input)).await?;
        info!("Booking {} persisted for flight {}", saved.id, saved.flight_id);
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<Booking>> {
        debug!("retrieve_all bookings called");
        Ok(self.bookings.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<BookingDetails> {
        debug!("retrieve_by_id called with ID: {}", id);
        let booking = self.find(id).await?;
        self.details(booking).await
    }

    pub async fn update_status(&self, id: Uuid, status: String) -> ServiceResult<Booking> {
        debug!("update_status called with ID: {} - and status {:?}", id, status);
        require_fields(&[("status", &status)])?;

        let mut booking = self.find(id).await?;
        booking.status = status.trim().to_string();
        let saved = self.bookings.save(&booking).await?;

        info!("Booking {} is now {}", saved.id, saved.status);
        Ok(saved)
    }

    /// Deletes the booking, freeing its seats and dropping passenger links.
    /// Refused while a payment or ticket still points at the booking.
    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.find(id).await?;

        if self.payments.find_by_booking(id).await?.is_some() {
            return Err(ServiceError::conflict(format!("Booking {} still has a payment", id)));
        }
        if self.tickets.find_by_booking(id).await?.is_some() {
            return Err(ServiceError::conflict(format!("Booking {} still has a ticket", id)));
        }

        self.bookings
            .delete_by_id(id)
            .await
            .map_err(on_in_use(format!("Booking {} still has a payment or ticket", id)))?;
        info!("Booking {} deleted", id);
        Ok(())
    }

    /// Linking an already linked passenger is a no-op.
    pub async fn add_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> ServiceResult<BookingDetails> {
        debug!("add_passenger called with booking: {} - passenger: {}", booking_id, passenger_id);
        let booking = self.find(booking_id).await?;
        if self.passengers.find_by_id(passenger_id).await?.is_none() {
            return Err(ServiceError::not_found("Passenger", passenger_id));
        }

        self.bookings.add_passenger(booking_id, passenger_id).await?;
        info!("Passenger {} added to booking {}", passenger_id, booking_id);
        self.details(booking).await
    }

    pub async fn remove_passenger(&self, booking_id: Uuid, passenger_id: Uuid) -> ServiceResult<BookingDetails> {
        debug!("remove_passenger called with booking: {} - passenger: {}", booking_id, passenger_id);
        let booking = self.find(booking_id).await?;

        if !self.bookings.remove_passenger(booking_id, passenger_id).await? {
            return Err(ServiceError::conflict(format!(
                "Passenger {} is not on booking {}",
                passenger_id, booking_id
            )));
        }
        info!("Passenger {} removed from booking {}", passenger_id, booking_id);
        self.details(booking).await
    }

    pub async fn reserve_seat(&self, booking_id: Uuid, seat_id: Uuid) -> ServiceResult<BookingDetails> {
        debug!("reserve_seat called with booking: {} - seat: {}", booking_id, seat_id);
        let booking = self.find(booking_id).await?;
        let seat = self
            .seats
            .find_by_id(seat_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Seat", seat_id))?;

        if seat.flight_id != booking.flight_id {
            return Err(ServiceError::conflict(format!(
                "Seat {} does not belong to flight {}",
                seat.seat_number, booking.flight_id
            )));
        }
        if seat.booking_id == Some(booking_id) {
            return self.details(booking).await;
        }
        if !seat.is_available {
            return Err(ServiceError::conflict(format!(
                "Seat {} is not available",
                seat.seat_number
            )));
        }

        // The read above may be stale; only the conditional claim decides.
        if self.seats.reserve(seat_id, booking_id).await?.is_none() {
            return Err(ServiceError::conflict(format!(
                "Seat {} is not available",
                seat.seat_number
            )));
        }
        info!("Seat {} reserved for booking {}", seat.seat_number, booking_id);
        self.details(booking).await
    }

    pub async fn release_seat(&self, booking_id: Uuid, seat_id: Uuid) -> ServiceResult<BookingDetails> {
        debug!("release_seat called with booking: {} - seat: {}", booking_id, seat_id);
        let booking = self.find(booking_id).await?;
        let seat = self
            .seats
            .find_by_id(seat_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Seat", seat_id))?;

        if self.seats.release(seat_id, booking_id).await?.is_none() {
            return Err(ServiceError::conflict(format!(
                "Seat {} is not held by booking {}",
                seat.seat_number, booking_id
            )));
        }
        info!("Seat {} released from booking {}", seat.seat_number, booking_id);
        self.details(booking).await
    }

    async fn find(&self, id: Uuid) -> ServiceResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking", id))
    }

    async fn details(&self, booking: Booking) -> ServiceResult<BookingDetails> {
        let passengers = self.passengers.find_by_booking(booking.id).await?;
        let seats = self.seats.find_by_booking(booking.id).await?;
        Ok(BookingDetails { booking, passengers, seats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flight_fixture, services};
    use crate::Services;
    use aerobook_core::{Flight, NewFlight, NewPassenger, NewPayment, NewSeat, NewTicket, RepoResult, Seat};
    use aerobook_store::MemoryStore;
    use async_trait::async_trait;

    async fn booked_flight(services: &Services) -> (Flight, Booking) {
        let flight = services.flights.create_flight(flight_fixture(services).await).await.unwrap();
        let booking = services
            .bookings
            .create_booking(NewBooking { flight_id: flight.id, status: "ON TIME".to_string() })
            .await
            .unwrap();
        (flight, booking)
    }

    async fn seat(services: &Services, flight_id: Uuid, number: &str) -> Seat {
        services
            .seats
            .create_seat(flight_id, NewSeat { seat_number: number.to_string(), seat_class: "Economy".to_string() })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_booking() {
        let services = services();
        let (flight, booking) = booked_flight(&services).await;

        assert_eq!(booking.flight_id, flight.id);
        assert_eq!(booking.status, "ON TIME");
        let details = services.bookings.retrieve_by_id(booking.id).await.unwrap();
        assert_eq!(details.booking, booking);
        assert!(details.passengers.is_empty());
        assert!(details.seats.is_empty());
    }

    #[tokio::test]
    async fn test_create_booking_checks_status_and_flight() {
        let services = services();
        let err = services
            .bookings
            .create_booking(NewBooking { flight_id: Uuid::new_v4(), status: "".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = services
            .bookings
            .create_booking(NewBooking { flight_id: Uuid::new_v4(), status: "ON TIME".to_string() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Flight", .. }));
    }

    #[tokio::test]
    async fn test_update_status() {
        let services = services();
        let (_, booking) = booked_flight(&services).await;

        let updated = services.bookings.update_status(booking.id, "DELAYED".to_string()).await.unwrap();
        assert_eq!(updated.status, "DELAYED");
        assert_eq!(updated.created_at, booking.created_at);
    }

    #[tokio::test]
    async fn test_add_and_remove_passenger() {
        let services = services();
        let (_, booking) = booked_flight(&services).await;
        let passenger = services
            .passengers
            .create_passenger(NewPassenger { name: "Edgar Afonso".to_string(), passport_number: "PASS123".into() })
            .await
            .unwrap();

        services.bookings.add_passenger(booking.id, passenger.id).await.unwrap();
        let details = services.bookings.add_passenger(booking.id, passenger.id).await.unwrap();
        assert_eq!(details.passengers, vec![passenger.clone()]);

        let details = services.bookings.remove_passenger(booking.id, passenger.id).await.unwrap();
        assert!(details.passengers.is_empty());
        let err = services.bookings.remove_passenger(booking.id, passenger.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_add_unknown_passenger() {
        let services = services();
        let (_, booking) = booked_flight(&services).await;

        let err = services.bookings.add_passenger(booking.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Passenger", .. }));
    }

    #[tokio::test]
    async fn test_reserve_and_release_seat() {
        let services = services();
        let (flight, booking) = booked_flight(&services).await;
        let window = seat(&services, flight.id, "1A").await;

        let details = services.bookings.reserve_seat(booking.id, window.id).await.unwrap();
        assert_eq!(details.seats.len(), 1);
        assert!(!details.seats[0].is_available);
        assert_eq!(details.seats[0].booking_id, Some(booking.id));

        // Holding the seat already is fine.
        services.bookings.reserve_seat(booking.id, window.id).await.unwrap();

        let details = services.bookings.release_seat(booking.id, window.id).await.unwrap();
        assert!(details.seats.is_empty());
        let released = services.seats.retrieve_by_id(window.id).await.unwrap();
        assert!(released.is_available);
        assert_eq!(released.booking_id, None);
    }

    #[tokio::test]
    async fn test_reserve_taken_seat_conflicts() {
        let services = services();
        let (flight, first) = booked_flight(&services).await;
        let second = services
            .bookings
            .create_booking(NewBooking { flight_id: flight.id, status: "ON TIME".to_string() })
            .await
            .unwrap();
        let aisle = seat(&services, flight.id, "1C").await;

        services.bookings.reserve_seat(first.id, aisle.id).await.unwrap();
        let err = services.bookings.reserve_seat(second.id, aisle.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let err = services.bookings.release_seat(second.id, aisle.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    /// Yields after every seat lookup so two reservations interleave between
    /// the read and the claim.
    struct YieldingSeats(Arc<dyn SeatRepository>);

    #[async_trait]
    impl SeatRepository for YieldingSeats {
        async fn save(&self, seat: &Seat) -> RepoResult<Seat> {
            self.0.save(seat).await
        }
        async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Seat>> {
            let seat = self.0.find_by_id(id).await;
            tokio::task::yield_now().await;
            seat
        }
        async fn find_by_flight(&self, flight_id: Uuid) -> RepoResult<Vec<Seat>> {
            self.0.find_by_flight(flight_id).await
        }
        async fn find_by_flight_and_number(&self, flight_id: Uuid, seat_number: &str) -> RepoResult<Option<Seat>> {
            self.0.find_by_flight_and_number(flight_id, seat_number).await
        }
        async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Vec<Seat>> {
            self.0.find_by_booking(booking_id).await
        }
        async fn reserve(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>> {
            self.0.reserve(seat_id, booking_id).await
        }
        async fn release(&self, seat_id: Uuid, booking_id: Uuid) -> RepoResult<Option<Seat>> {
            self.0.release(seat_id, booking_id).await
        }
        async fn delete_by_id(&self, id: Uuid) -> RepoResult<()> {
            self.0.delete_by_id(id).await
        }
    }

    #[tokio::test]
    async fn test_concurrent_reservations_of_one_seat_admit_a_single_booking() {
        let store = Arc::new(MemoryStore::new());
        let mut repos = store.repositories();
        repos.seats = Arc::new(YieldingSeats(repos.seats.clone()));
        let services = Services::new(&repos);

        let (flight, first) = booked_flight(&services).await;
        let second = services
            .bookings
            .create_booking(NewBooking { flight_id: flight.id, status: "ON TIME".to_string() })
            .await
            .unwrap();
        let window = seat(&services, flight.id, "2A").await;

        let (a, b) = tokio::join!(
            services.bookings.reserve_seat(first.id, window.id),
            services.bookings.reserve_seat(second.id, window.id),
        );

        let winner = match (a, b) {
            (Ok(_), Err(ServiceError::Conflict(_))) => first.id,
            (Err(ServiceError::Conflict(_)), Ok(_)) => second.id,
            other => panic!("expected exactly one reservation to win, got {:?}", other),
        };
        let held = services.seats.retrieve_by_id(window.id).await.unwrap();
        assert_eq!(held.booking_id, Some(winner));
        assert!(!held.is_available);
    }

    #[tokio::test]
    async fn test_reserve_seat_on_other_flight_conflicts() {
        let services = services();
        let (flight, booking) = booked_flight(&services).await;
        let other = services
            .flights
            .create_flight(NewFlight {
                flight_number: "MH371".to_string(),
                departure_time: Some(flight.departure_time),
                arrival_time: Some(flight.arrival_time),
                origin_id: flight.destination_id,
                destination_id: flight.origin_id,
                airline_id: flight.airline_id,
            })
            .await
            .unwrap();
        let foreign = seat(&services, other.id, "1A").await;

        let err = services.bookings.reserve_seat(booking.id, foreign.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_booking_releases_seats() {
        let services = services();
        let (flight, booking) = booked_flight(&services).await;
        let window = seat(&services, flight.id, "1A").await;
        services.bookings.reserve_seat(booking.id, window.id).await.unwrap();

        services.bookings.delete_by_id(booking.id).await.unwrap();

        let window = services.seats.retrieve_by_id(window.id).await.unwrap();
        assert!(window.is_available);
        assert_eq!(window.booking_id, None);
        let err = services.bookings.retrieve_by_id(booking.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Booking", .. }));
    }

    #[tokio::test]
    async fn test_delete_paid_or_ticketed_booking_conflicts() {
        let services = services();
        let (_, booking) = booked_flight(&services).await;
        let payment = services
            .payments
            .create_payment(NewPayment { booking_id: booking.id, amount: 12_000, currency: None, status: None })
            .await
            .unwrap();

        let err = services.bookings.delete_by_id(booking.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        services.payments.delete_by_id(payment.id).await.unwrap();
        services
            .tickets
            .create_ticket(NewTicket { booking_id: booking.id, price: 12_000, currency: None })
            .await
            .unwrap();
        let err = services.bookings.delete_by_id(booking.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }
}
