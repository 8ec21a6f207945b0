pub mod airline;
pub mod airport;
pub mod booking;
pub mod crew;
pub mod error;
pub mod flight;
pub mod passenger;
pub mod payment;
pub mod seat;
pub mod seed;
pub mod ticket;

pub use airline::AirlineService;
pub use airport::AirportService;
pub use booking::BookingService;
pub use crew::CrewMemberService;
pub use error::{ServiceError, ServiceResult};
pub use flight::FlightService;
pub use passenger::PassengerService;
pub use payment::PaymentService;
pub use seat::SeatService;
pub use ticket::TicketService;

use aerobook_core::Repositories;

/// Every service, wired against one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub airlines: AirlineService,
    pub airports: AirportService,
    pub flights: FlightService,
    pub crew: CrewMemberService,
    pub seats: SeatService,
    pub passengers: PassengerService,
    pub bookings: BookingService,
    pub payments: PaymentService,
    pub tickets: TicketService,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            airlines: AirlineService::new(repos),
            airports: AirportService::new(repos),
            flights: FlightService::new(repos),
            crew: CrewMemberService::new(repos),
            seats: SeatService::new(repos),
            passengers: PassengerService::new(repos),
            bookings: BookingService::new(repos),
            payments: PaymentService::new(repos),
            tickets: TicketService::new(repos),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::Services;
    use aerobook_core::{NewAirline, NewAirport, NewFlight};
    use aerobook_store::MemoryStore;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Arc;

    pub fn services() -> Services {
        let store = Arc::new(MemoryStore::new());
        Services::new(&store.repositories())
    }

    pub fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 10, hour, min, 0).unwrap()
    }

    /// Persists Luton, Gatwick and a test airline, then returns a valid
    /// LUT→LGW flight payload between them.
    pub async fn flight_fixture(services: &Services) -> NewFlight {
        let origin = services
            .airports
            .create_airport(NewAirport {
                code: "LUT".to_string(),
                name: "Luton".to_string(),
                location: "UK".to_string(),
            })
            .await
            .unwrap();
        let destination = services
            .airports
            .create_airport(NewAirport {
                code: "LGW".to_string(),
                name: "Gatwick".to_string(),
                location: "UK".to_string(),
            })
            .await
            .unwrap();
        let airline = services
            .airlines
            .create_airline(NewAirline {
                name: "Test-airline".to_string(),
                code: "TA".to_string(),
            })
            .await
            .unwrap();

        NewFlight {
            flight_number: "MH370".to_string(),
            departure_time: Some(at(6, 30)),
            arrival_time: Some(at(9, 45)),
            origin_id: origin.id,
            destination_id: destination.id,
            airline_id: airline.id,
        }
    }
}
