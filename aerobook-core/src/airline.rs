use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airline {
    pub id: Uuid,
    pub name: String,
    /// IATA designator, e.g. "IB"
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAirline {
    pub name: String,
    pub code: String,
}

impl Airline {
    pub fn new(input: NewAirline) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            code: input.code.trim().to_string(),
        }
    }
}
