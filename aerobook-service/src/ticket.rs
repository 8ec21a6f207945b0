use aerobook_core::repository::{BookingRepository, TicketRepository};
use aerobook_core::{NewTicket, Repositories, Ticket};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{on_duplicate, ServiceError, ServiceResult};
use crate::payment::check_money;

#[derive(Clone)]
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl TicketService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            tickets: repos.tickets.clone(),
            bookings: repos.bookings.clone(),
        }
    }

    pub async fn create_ticket(&self, input: NewTicket) -> ServiceResult<Ticket> {
        debug!("create_ticket called with: {:?}", input);
        check_money("price", input.price, input.currency.as_deref())?;

        if self.bookings.find_by_id(input.booking_id).await?.is_none() {
            return Err(ServiceError::not_found("Booking", input.booking_id));
        }
        if self.tickets.find_by_booking(input.booking_id).await?.is_some() {
            return Err(ServiceError::already_exists(
                "Ticket",
                "booking_id",
                input.booking_id.to_string(),
            ));
        }

        let ticket = Ticket::new(input);
        let booking_id = ticket.booking_id.to_string();
        let saved = self
            .tickets
            .save(&ticket)
            .await
            .map_err(on_duplicate("Ticket", &[("booking_id", booking_id.as_str())]))?;

        info!("Ticket {} issued for booking {}", saved.id, saved.booking_id);
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<Ticket>> {
        debug!("retrieve_all tickets called");
        Ok(self.tickets.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<Ticket> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket", id))
    }

    pub async fn retrieve_for_booking(&self, booking_id: Uuid) -> ServiceResult<Ticket> {
        debug!("retrieve_for_booking called with booking: {}", booking_id);
        if self.bookings.find_by_id(booking_id).await?.is_none() {
            return Err(ServiceError::not_found("Booking", booking_id));
        }
        self.tickets
            .find_by_booking(booking_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Ticket for booking", booking_id))
    }

    pub async fn update_price(&self, id: Uuid, price: i64) -> ServiceResult<Ticket> {
        debug!("update_price called with ID: {} - and price {}", id, price);
        check_money("price", price, None)?;

        let mut ticket = self.retrieve_by_id(id).await?;
        ticket.price = price;
        let saved = self.tickets.save(&ticket).await?;

        info!("Ticket {} repriced to {} {}", saved.id, saved.price, saved.currency);
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.retrieve_by_id(id).await?;

        self.tickets.delete_by_id(id).await?;
        info!("Ticket {} deleted", id);
        Ok(())
    }
}
