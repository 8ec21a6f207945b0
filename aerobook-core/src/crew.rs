use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewMember {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    /// Flight the member is currently rostered on, if any.
    pub flight_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCrewMember {
    pub name: String,
    pub role: String,
}

impl CrewMember {
    pub fn new(input: NewCrewMember) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            role: input.role.trim().to_string(),
            flight_id: None,
        }
    }
}
