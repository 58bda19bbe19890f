use chrono_tz::Tz;
use parking_lot::RwLock;
use thiserror::Error;
use tracing::debug;

use crate::models::ClassRecord;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReserveError {
    #[error("Class with ID '{0}' not found.")]
    NotFound(String),
    #[error("No slots available for '{0}'.")]
    NoCapacity(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid timezone string provided: {0}")]
pub struct InvalidTimezone(pub String);

/// Resolves an IANA identifier such as `Asia/Kolkata` against the bundled tz database.
/// Case is ignored; the returned zone carries its canonical name.
pub fn parse_timezone(name: &str) -> Result<Tz, InvalidTimezone> {
    Tz::from_str_insensitive(name).map_err(|_| InvalidTimezone(name.to_string()))
}

#[derive(Debug)]
struct CatalogState {
    timezone: Tz,
    classes: Vec<ClassRecord>,
}

/// The set of bookable classes. All access goes through one lock, so readers always see
/// whole records and slot counters never race.
#[derive(Debug)]
pub struct ClassCatalog {
    state: RwLock<CatalogState>,
}

impl ClassCatalog {
    /// Builds a catalog whose schedule is expressed in `timezone`. Every class is converted
    /// into that zone on the way in.
    pub fn new(timezone: Tz, classes: Vec<ClassRecord>) -> Self {
        let classes = classes
            .into_iter()
            .map(|mut class| {
                class.scheduled = class.scheduled.with_timezone(&timezone);
                class
            })
            .collect();
        Self {
            state: RwLock::new(CatalogState { timezone, classes }),
        }
    }

    pub fn list(&self) -> Vec<ClassRecord> {
        self.state.read().classes.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<ClassRecord> {
        self.state
            .read()
            .classes
            .iter()
            .find(|class| class.id == id)
            .cloned()
    }

    pub fn timezone(&self) -> Tz {
        self.state.read().timezone
    }

    /// Takes one slot of class `id` and returns how many remain afterwards.
    pub fn reserve_slot(&self, id: &str) -> Result<u32, ReserveError> {
        let mut state = self.state.write();
        let class = state
            .classes
            .iter_mut()
            .find(|class| class.id == id)
            .ok_or_else(|| ReserveError::NotFound(id.to_string()))?;

        if class.available_slots == 0 {
            return Err(ReserveError::NoCapacity(class.name.clone()));
        }
        class.available_slots -= 1;
        debug!(
            class_id = %class.id,
            remaining = class.available_slots,
            "Reserved slot"
        );
        Ok(class.available_slots)
    }

    /// Re-expresses every scheduled instant in `new_timezone`. The instants themselves do not
    /// move. An unknown identifier leaves the catalog untouched.
    pub fn rewrite_timezone(&self, new_timezone: &str) -> Result<Tz, InvalidTimezone> {
        let tz = parse_timezone(new_timezone)?;

        let mut state = self.state.write();
        for class in state.classes.iter_mut() {
            class.scheduled = class.scheduled.with_timezone(&tz);
        }
        state.timezone = tz;
        Ok(tz)
    }
}
