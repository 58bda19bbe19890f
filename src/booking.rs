use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{ClassCatalog, ReserveError};
use crate::ledger::BookingLedger;
use crate::models::BookingConfirmation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Class with ID '{0}' not found.")]
    ClassNotFound(String),
    #[error("No slots available for '{0}'.")]
    NoCapacity(String),
}

impl From<ReserveError> for BookingError {
    fn from(value: ReserveError) -> Self {
        match value {
            ReserveError::NotFound(id) => BookingError::ClassNotFound(id),
            ReserveError::NoCapacity(name) => BookingError::NoCapacity(name),
        }
    }
}

/// Books classes against the shared catalog and ledger.
#[derive(Debug, Clone)]
pub struct BookingService {
    catalog: Arc<ClassCatalog>,
    ledger: Arc<BookingLedger>,
}

impl BookingService {
    pub fn new(catalog: Arc<ClassCatalog>, ledger: Arc<BookingLedger>) -> Self {
        Self { catalog, ledger }
    }

    pub fn catalog(&self) -> &ClassCatalog {
        &self.catalog
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    /// Reserves one slot of `class_id` for the client and records the booking.
    ///
    /// The slot reservation runs inside the ledger's critical section, so either both the
    /// decrement and the ledger entry happen or neither does. Callers validate `client_name`
    /// and `client_email` beforehand.
    pub fn book(
        &self,
        class_id: &str,
        client_name: &str,
        client_email: &str,
    ) -> Result<BookingConfirmation, BookingError> {
        let class = self
            .catalog
            .get_by_id(class_id)
            .ok_or_else(|| BookingError::ClassNotFound(class_id.to_string()))?;

        let (record, remaining_slots) = self
            .ledger
            .append_reserved(class_id, client_name, client_email, || {
                self.catalog.reserve_slot(class_id)
            })
            .map_err(|err| {
                warn!(class_id, client_email, "Booking rejected: {err}");
                BookingError::from(err)
            })?;

        info!(
            class_id,
            client_email,
            booking_id = %record.booking_id,
            remaining_slots,
            "Booked class"
        );

        Ok(BookingConfirmation {
            message: "Booking successful!".to_string(),
            booking_id: record.booking_id,
            class_name: class.name,
            client_name: record.client_name,
            client_email: record.client_email,
            remaining_slots,
        })
    }
}
