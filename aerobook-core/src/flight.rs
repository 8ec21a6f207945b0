use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A scheduled flight. `origin_id`, `destination_id` and `airline_id` always
/// point at persisted records; the flight service resolves them before save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Flight {
    pub id: Uuid,
    pub flight_number: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub origin_id: Uuid,
    pub destination_id: Uuid,
    pub airline_id: Uuid,
}

/// Create/update payload. Times are optional here so that a missing value
/// is reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFlight {
    pub flight_number: String,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub origin_id: Uuid,
    pub destination_id: Uuid,
    pub airline_id: Uuid,
}

impl Flight {
    pub fn duration(&self) -> chrono::Duration {
        self.arrival_time - self.departure_time
    }
}
