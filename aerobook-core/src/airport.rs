use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Airport {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAirport {
    pub code: String,
    pub name: String,
    pub location: String,
}

impl Airport {
    pub fn new(input: NewAirport) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: input.code.trim().to_string(),
            name: input.name.trim().to_string(),
            location: input.location.trim().to_string(),
        }
    }
}
