use chrono::Utc;
use chrono_tz::Tz;
use parking_lot::Mutex;

use crate::models::BookingRecord;

/// Append-only store of bookings. Booking ids are derived from the ledger length, which is
/// only safe because records are never removed.
#[derive(Debug)]
pub struct BookingLedger {
    reference_timezone: Tz,
    records: Mutex<Vec<BookingRecord>>,
}

impl BookingLedger {
    /// `reference_timezone` is the zone every `booking_time` is stamped in.
    pub fn new(reference_timezone: Tz) -> Self {
        Self {
            reference_timezone,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn append(&self, class_id: &str, client_name: &str, client_email: &str) -> BookingRecord {
        let mut records = self.records.lock();
        self.push(&mut records, class_id, client_name, client_email)
    }

    /// Runs `reserve` and, only if it succeeds, appends the booking, all under the ledger lock.
    /// Nothing can interleave between the two, so a reservation never exists without its
    /// record. `reserve` must not touch the ledger.
    pub fn append_reserved<T, E>(
        &self,
        class_id: &str,
        client_name: &str,
        client_email: &str,
        reserve: impl FnOnce() -> Result<T, E>,
    ) -> Result<(BookingRecord, T), E> {
        let mut records = self.records.lock();
        let reserved = reserve()?;
        let record = self.push(&mut records, class_id, client_name, client_email);
        Ok((record, reserved))
    }

    /// Case-insensitive match on the client email, in booking order.
    pub fn find_by_email(&self, email: &str) -> Vec<BookingRecord> {
        let wanted = email.to_lowercase();
        self.records
            .lock()
            .iter()
            .filter(|record| record.client_email.to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(
        &self,
        records: &mut Vec<BookingRecord>,
        class_id: &str,
        client_name: &str,
        client_email: &str,
    ) -> BookingRecord {
        let record = BookingRecord {
            booking_id: format!("b{}", records.len() + 1),
            class_id: class_id.to_string(),
            client_name: client_name.to_string(),
            client_email: client_email.to_string(),
            booking_time: Utc::now().with_timezone(&self.reference_timezone),
        };
        records.push(record.clone());
        record
    }
}
