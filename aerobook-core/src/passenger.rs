use aerobook_shared::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub id: Uuid,
    pub name: String,
    pub passport_number: Masked<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPassenger {
    pub name: String,
    pub passport_number: Masked<String>,
}

impl Passenger {
    pub fn new(input: NewPassenger) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            passport_number: Masked(input.passport_number.expose().trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passport_is_masked_in_debug_output() {
        let passenger = Passenger::new(NewPassenger {
            name: "Edgar Afonso".to_string(),
            passport_number: Masked::from(" PASS123 "),
        });
        let debug = format!("{:?}", passenger);
        assert!(!debug.contains("PASS123"));
        assert_eq!(passenger.passport_number.expose(), "PASS123");
    }
}
