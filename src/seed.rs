use chrono::TimeZone;
use chrono_tz::Tz;
use thiserror::Error;

use crate::models::ClassRecord;

#[derive(Debug, Error)]
#[error("Seed class {id} has no single local time {local} in {timezone}")]
pub struct SeedError {
    id: &'static str,
    local: String,
    timezone: Tz,
}

struct SeedClass {
    id: &'static str,
    name: &'static str,
    local: (i32, u32, u32, u32, u32),
    instructor: &'static str,
    slots: u32,
}

const SEED_CLASSES: [SeedClass; 3] = [
    SeedClass {
        id: "c1",
        name: "Yoga Basics",
        local: (2025, 6, 9, 10, 0),
        instructor: "Priya Sharma",
        slots: 15,
    },
    SeedClass {
        id: "c2",
        name: "Zumba Dance",
        local: (2025, 6, 9, 17, 30),
        instructor: "Amit Singh",
        slots: 20,
    },
    SeedClass {
        id: "c3",
        name: "HIIT Express",
        local: (2025, 6, 10, 8, 0),
        instructor: "Vikram Das",
        slots: 10,
    },
];

/// The classes the service starts with, localized in `timezone`.
pub fn seed_classes(timezone: Tz) -> Result<Vec<ClassRecord>, SeedError> {
    SEED_CLASSES
        .iter()
        .map(|seed| {
            let (year, month, day, hour, minute) = seed.local;
            timezone
                .with_ymd_and_hms(year, month, day, hour, minute, 0)
                .single()
                .map(|scheduled| {
                    ClassRecord::new(seed.id, seed.name, scheduled, seed.instructor, seed.slots)
                })
                .ok_or_else(|| SeedError {
                    id: seed.id,
                    local: format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"),
                    timezone,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono_tz::Asia::Kolkata;

    use super::*;

    #[test]
    fn test_seed_classes_in_ist() {
        let classes = seed_classes(Kolkata).unwrap();

        assert_eq!(classes.len(), 3);
        let c3 = &classes[2];
        assert_eq!(c3.id, "c3");
        assert_eq!(c3.total_slots, 10);
        assert_eq!(c3.available_slots, 10);
        assert_eq!(
            c3.scheduled.fixed_offset().to_rfc3339(),
            "2025-06-10T08:00:00+05:30"
        );
    }
}
