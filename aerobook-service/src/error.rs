use aerobook_core::RepoError;
use aerobook_shared::blank_fields;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found with ID: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} already exists with {field}: {value}")]
    AlreadyExists {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: Uuid) -> Self {
        warn!("{} with ID: {} - NOT FOUND", entity, id);
        ServiceError::NotFound { entity, id }
    }

    pub(crate) fn already_exists(entity: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        warn!("{} already exists with {}: {}", entity, field, value);
        ServiceError::AlreadyExists { entity, field, value }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("Validation failed: {}", message);
        ServiceError::Validation(message)
    }

    pub(crate) fn conflict(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!("Conflict: {}", message);
        ServiceError::Conflict(message)
    }
}

/// Fails with `Validation` naming every blank field.
pub(crate) fn require_fields(fields: &[(&str, &str)]) -> ServiceResult<()> {
    let blanks = blank_fields(fields);
    if blanks.is_empty() {
        return Ok(());
    }
    Err(ServiceError::validation(format!(
        "One or more of the following fields are empty: {}",
        blanks.join(", ")
    )))
}

/// Maps a unique-constraint violation raised by `save` onto `AlreadyExists`,
/// naming whichever of `fields` the violated constraint covers.
pub(crate) fn on_duplicate<'a>(
    entity: &'static str,
    fields: &'a [(&'static str, &'a str)],
) -> impl FnOnce(RepoError) -> ServiceError + 'a {
    move |err| match err {
        RepoError::UniqueViolation(constraint) => {
            let (field, value) = fields
                .iter()
                .find(|(field, _)| constraint.contains(&format!("_{}_key", field)))
                .or_else(|| fields.first())
                .copied()
                .unwrap_or(("id", ""));
            ServiceError::already_exists(entity, field, value)
        }
        other => ServiceError::Repository(other),
    }
}

/// Maps a foreign-key violation raised by `delete_by_id` onto `Conflict`.
pub(crate) fn on_in_use(message: String) -> impl FnOnce(RepoError) -> ServiceError {
    move |err| match err {
        RepoError::ForeignKeyViolation(_) => ServiceError::conflict(message),
        other => ServiceError::Repository(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_fields_lists_blank_fields() {
        let err = require_fields(&[("name", ""), ("role", " ")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "One or more of the following fields are empty: name, role"
        );
    }

    #[test]
    fn test_on_duplicate_only_maps_unique_violations() {
        let fields = [("name", "Iberia")];
        let mapped = on_duplicate("Airline", &fields)(RepoError::UniqueViolation("airlines_name_key".into()));
        assert!(matches!(mapped, ServiceError::AlreadyExists { entity: "Airline", .. }));

        let passthrough = on_duplicate("Airline", &fields)(RepoError::Storage("timeout".into()));
        assert!(matches!(passthrough, ServiceError::Repository(RepoError::Storage(_))));
    }

    #[test]
    fn test_on_duplicate_names_the_violated_field() {
        let fields = [("name", "Iberia"), ("code", "IB")];
        let violation = |constraint: &str| {
            RepoError::UniqueViolation(format!(
                "duplicate key value violates unique constraint \"{}\"",
                constraint
            ))
        };

        let err = on_duplicate("Airline", &fields)(violation("airlines_code_key"));
        assert_eq!(err.to_string(), "Airline already exists with code: IB");

        let err = on_duplicate("Airline", &fields)(violation("airlines_name_key"));
        assert_eq!(err.to_string(), "Airline already exists with name: Iberia");

        // Unknown constraint falls back to the first field
        let err = on_duplicate("Airline", &fields)(violation("airlines_pkey"));
        assert_eq!(err.to_string(), "Airline already exists with name: Iberia");
    }

    #[test]
    fn test_on_in_use_maps_foreign_key_violations_to_conflict() {
        let mapped = on_in_use("Flight is in use".to_string())(RepoError::ForeignKeyViolation(
            "bookings_flight_id_fkey".into(),
        ));
        assert!(matches!(mapped, ServiceError::Conflict(ref m) if m == "Flight is in use"));

        let passthrough = on_in_use("Flight is in use".to_string())(RepoError::Storage("timeout".into()));
        assert!(matches!(passthrough, ServiceError::Repository(RepoError::Storage(_))));
    }
}
