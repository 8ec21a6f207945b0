use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ticket issued against a booking. `price` is in minor units of `currency`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ticket {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub price: i64,
    pub currency: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTicket {
    pub booking_id: Uuid,
    pub price: i64,
    pub currency: Option<String>,
}

impl Ticket {
    pub fn new(input: NewTicket) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id: input.booking_id,
            price: input.price,
            currency: input
                .currency
                .map(|c| c.trim().to_uppercase())
                .unwrap_or_else(|| crate::DEFAULT_CURRENCY.to_string()),
            issued_at: Utc::now(),
        }
    }
}
