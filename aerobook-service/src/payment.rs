use aerobook_core::repository::{BookingRepository, PaymentRepository};
use aerobook_core::{NewPayment, Payment, PaymentStatus, Repositories};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{on_duplicate, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl PaymentService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            payments: repos.payments.clone(),
            bookings: repos.bookings.clone(),
        }
    }

    /// One payment per booking; status defaults to `PENDING`.
    pub async fn create_payment(&self, input: NewPayment) -> ServiceResult<Payment> {
        debug!("create_payment called with: {:?}", input);
        check_money("amount", input.amount, input.currency.as_deref())?;

        if self.bookings.find_by_id(input.booking_id).await?.is_none() {
            return Err(ServiceError::not_found("Booking", input.booking_id));
        }
        if self.payments.find_by_booking(input.booking_id).await?.is_some() {
            return Err(ServiceError::already_exists(
                "Payment",
                "booking_id",
                input.booking_id.to_string(),
            ));
        }

        let payment = Payment::new(input);
        let booking_id = payment.booking_id.to_string();
        let saved = self
            .payments
            .save(&payment)
            .await
            .map_err(on_duplicate("Payment", &[("booking_id", booking_id.as_str())]))?;

        info!(
            "Payment {} of {} {} recorded for booking {}",
            saved.id, saved.amount, saved.currency, saved.booking_id
        );
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<Payment>> {
        debug!("retrieve_all payments called");
        Ok(self.payments.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<Payment> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Payment", id))
    }

    pub async fn retrieve_for_booking(&self, booking_id: Uuid) -> ServiceResult<Payment> {
        debug!("retrieve_for_booking called with booking: {}", booking_id);
        if self.bookings.find_by_id(booking_id).await?.is_none() {
            return Err(ServiceError::not_found("Booking", booking_id));
        }
        self.payments
            .find_by_booking(booking_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Payment for booking", booking_id))
    }

    pub async fn update_status(&self, id: Uuid, status: PaymentStatus) -> ServiceResult<Payment> {
        debug!("update_status called with ID: {} - and status {}", id, status);
        let mut payment = self.retrieve_by_id(id).await?;
        payment.update_status(status);

        let saved = self.payments.save(&payment).await?;
        info!("Payment {} is now {}", saved.id, saved.status);
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.retrieve_by_id(id).await?;

        self.payments.delete_by_id(id).await?;
        info!("Payment {} deleted", id);
        Ok(())
    }
}

/// Amounts are non-negative minor units; a currency, when given, must not be blank.
pub(crate) fn check_money(field: &str, amount: i64, currency: Option<&str>) -> ServiceResult<()> {
    if amount < 0 {
        return Err(ServiceError::validation(format!("{} can't be negative", field)));
    }
    if matches!(currency, Some(c) if c.trim().is_empty()) {
        return Err(ServiceError::validation("currency can't be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{flight_fixture, services};
    use crate::Services;
    use aerobook_core::{Booking, NewBooking};

    async fn booking(services: &Services) -> Booking {
        let flight = services.flights.create_flight(flight_fixture(services).await).await.unwrap();
        services
            .bookings
            .create_booking(NewBooking { flight_id: flight.id, status: "ON TIME".to_string() })
            .await
            .unwrap()
    }

    fn new_payment(booking_id: Uuid, amount: i64) -> NewPayment {
        NewPayment { booking_id, amount, currency: Some("eur".to_string()), status: None }
    }

    #[tokio::test]
    async fn test_create_payment() {
        let services = services();
        let booking = booking(&services).await;

        let payment = services.payments.create_payment(new_payment(booking.id, 25_000)).await.unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.currency, "EUR");
        assert_eq!(services.payments.retrieve_for_booking(booking.id).await.unwrap(), payment);
    }

    #[tokio::test]
    async fn test_create_payment_rejects_bad_money() {
        let services = services();
        let booking = booking(&services).await;

        let err = services.payments.create_payment(new_payment(booking.id, -1)).await.unwrap_err();
        assert_eq!(err.to_string(), "amount can't be negative");

        let mut input = new_payment(booking.id, 100);
        input.currency = Some(" ".to_string());
        let err = services.payments.create_payment(input).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_one_payment_per_booking() {
        let services = services();
        let booking = booking(&services).await;
        services.payments.create_payment(new_payment(booking.id, 100)).await.unwrap();

        let err = services.payments.create_payment(new_payment(booking.id, 200)).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { entity: "Payment", field: "booking_id", .. }));
    }

    #[tokio::test]
    async fn test_create_payment_for_unknown_booking() {
        let services = services();
        let err = services.payments.create_payment(new_payment(Uuid::new_v4(), 100)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Booking", .. }));
    }

    #[tokio::test]
    async fn test_update_status() {
        let services = services();
        let booking = booking(&services).await;
        let payment = services.payments.create_payment(new_payment(booking.id, 100)).await.unwrap();

        let updated = services.payments.update_status(payment.id, PaymentStatus::Completed).await.unwrap();
        assert_eq!(updated.status, PaymentStatus::Completed);
        assert!(updated.updated_at >= payment.updated_at);
        assert_eq!(updated.created_at, payment.created_at);
    }

    #[tokio::test]
    async fn test_retrieve_for_booking_without_payment() {
        let services = services();
        let booking = booking(&services).await;

        let err = services.payments.retrieve_for_booking(booking.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "Payment for booking", .. }));
    }
}
