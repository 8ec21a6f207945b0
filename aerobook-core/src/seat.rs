use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub seat_number: String,
    pub seat_class: String,
    pub is_available: bool,
    pub booking_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSeat {
    pub seat_number: String,
    pub seat_class: String,
}

impl Seat {
    pub fn new(flight_id: Uuid, input: NewSeat) -> Self {
        Self {
            id: Uuid::new_v4(),
            flight_id,
            seat_number: input.seat_number.trim().to_string(),
            seat_class: input.seat_class.trim().to_string(),
            is_available: true,
            booking_id: None,
        }
    }

    /// Hold the seat for a booking.
    pub fn reserve(&mut self, booking_id: Uuid) {
        self.is_available = false;
        self.booking_id = Some(booking_id);
    }

    pub fn release(&mut self) {
        self.is_available = true;
        self.booking_id = None;
    }
}
