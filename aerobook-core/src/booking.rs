use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Passenger, Seat};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub flight_id: Uuid,
    /// Free-form status label, e.g. "ON TIME", "DELAYED".
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    pub flight_id: Uuid,
    pub status: String,
}

/// A booking together with the passengers travelling on it and the seats it holds.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    #[serde(flatten)]
    pub booking: Booking,
    pub passengers: Vec<Passenger>,
    pub seats: Vec<Seat>,
}

impl Booking {
    pub fn new(input: NewBooking) -> Self {
        Self {
            id: Uuid::new_v4(),
            flight_id: input.flight_id,
            status: input.status.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}
