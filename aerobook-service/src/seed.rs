//! Sample data for local runs and demos.

use aerobook_core::{
    Airline, Airport, Flight, NewAirline, NewAirport, NewBooking, NewFlight, NewPassenger,
};
use chrono::{Duration, Utc};
use tracing::info;

use crate::{ServiceResult, Services};

/// Preloads two airlines, two London airports, a flight each way and one
/// booked passenger per flight. Does nothing when airlines already exist.
///
/// Returns whether anything was written.
pub async fn load_sample_data(services: &Services) -> ServiceResult<bool> {
    if !services.airlines.retrieve_all().await?.is_empty() {
        info!("DATABASE PRELOAD: airlines present, skipping sample data");
        return Ok(false);
    }

    info!("DATABASE PRELOAD: Creating airlines...");
    let iberia = airline(services, "Iberia", "IB").await?;
    let british = airline(services, "British Airways", "BA").await?;

    info!("DATABASE PRELOAD: Creating airports...");
    let heathrow = airport(services, "LHR", "London Heathrow").await?;
    let gatwick = airport(services, "LGW", "London Gatwick").await?;

    info!("DATABASE PRELOAD: Creating flights...");
    let outbound = flight(services, "1223", 10, 3, &heathrow, &gatwick, &iberia).await?;
    let inbound = flight(services, "4578", 5, 2, &gatwick, &heathrow, &british).await?;

    info!("DATABASE PRELOAD: Creating passengers and bookings...");
    for (flight, status, name, passport) in [
        (&outbound, "ON TIME", "Edgar Afonso", "PASS123"),
        (&inbound, "DELAYED", "John Doe", "PASS456"),
    ] {
        let passenger = services
            .passengers
            .create_passenger(NewPassenger {
                name: name.to_string(),
                passport_number: passport.into(),
            })
            .await?;
        let booking = services
            .bookings
            .create_booking(NewBooking {
                flight_id: flight.id,
                status: status.to_string(),
            })
            .await?;
        services.bookings.add_passenger(booking.id, passenger.id).await?;
        info!(
            "DATABASE PRELOAD: Booking {} ({}) for {} on flight {}",
            booking.id, booking.status, passenger.name, flight.flight_number
        );
    }

    Ok(true)
}

async fn airline(services: &Services, name: &str, code: &str) -> ServiceResult<Airline> {
    services
        .airlines
        .create_airline(NewAirline {
            name: name.to_string(),
            code: code.to_string(),
        })
        .await
}

async fn airport(services: &Services, code: &str, name: &str) -> ServiceResult<Airport> {
    services
        .airports
        .create_airport(NewAirport {
            code: code.to_string(),
            name: name.to_string(),
            location: "United Kingdom".to_string(),
        })
        .await
}

async fn flight(
    services: &Services,
    number: &str,
    days_ahead: i64,
    hours: i64,
    origin: &Airport,
    destination: &Airport,
    airline: &Airline,
) -> ServiceResult<Flight> {
    let departure = Utc::now() + Duration::days(days_ahead);
    services
        .flights
        .create_flight(NewFlight {
            flight_number: number.to_string(),
            departure_time: Some(departure),
            arrival_time: Some(departure + Duration::hours(hours)),
            origin_id: origin.id,
            destination_id: destination.id,
            airline_id: airline.id,
        })
        .await
}
