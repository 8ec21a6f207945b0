pub mod airline;
pub mod airport;
pub mod booking;
pub mod crew;
pub mod flight;
pub mod passenger;
pub mod payment;
pub mod repository;
pub mod seat;
pub mod ticket;

pub use airline::{Airline, NewAirline};
pub use airport::{Airport, NewAirport};
pub use booking::{Booking, BookingDetails, NewBooking};
pub use crew::{CrewMember, NewCrewMember};
pub use flight::{Flight, NewFlight};
pub use passenger::{NewPassenger, Passenger};
pub use payment::{NewPayment, Payment, PaymentStatus};
pub use repository::Repositories;
pub use seat::{NewSeat, Seat};
pub use ticket::{NewTicket, Ticket};

/// Currency applied to payments and tickets created without one.
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("Referenced row is missing or still in use: {0}")]
    ForeignKeyViolation(String),
    #[error("Storage failure: {0}")]
    Storage(String),
}

pub type RepoResult<T> = Result<T, RepoError>;
