use chrono::Duration;
use chrono_tz::Tz;
use icalendar::{Calendar, CalendarDateTime, Component, Event, EventLike};

use crate::models::ClassRecord;

/// Length assumed for every class; the catalog does not track durations.
const CLASS_LENGTH_MINUTES: i64 = 60;

fn zoned(date_time: chrono::DateTime<Tz>) -> CalendarDateTime {
    CalendarDateTime::WithTimezone {
        date_time: date_time.naive_local(),
        tzid: date_time.timezone().name().to_string(),
    }
}

#[derive(Clone, Default)]
pub struct ICalExporter;

impl ICalExporter {
    pub fn new() -> Self {
        Self
    }

    /// Renders the classes as VEVENTs dated in whatever zone each class is expressed in.
    pub fn generate(&self, classes: &[ClassRecord]) -> Vec<u8> {
        let mut calendar = Calendar::new();
        calendar.name("Fitness Classes");

        for class in classes {
            let end = class.scheduled + Duration::minutes(CLASS_LENGTH_MINUTES);

            let mut event = Event::new();
            event.summary(&class.name);
            event.starts(zoned(class.scheduled));
            event.ends(zoned(end));
            event.description(&format!(
                "Instructor: {}\nAvailable slots: {}/{}",
                class.instructor, class.available_slots, class.total_slots
            ));
            event.uid(&format!("{}-fitness-booking", class.id));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use chrono_tz::Asia::Kolkata;

    use super::*;

    fn yoga() -> ClassRecord {
        ClassRecord::new(
            "c1",
            "Yoga Basics",
            Kolkata.with_ymd_and_hms(2025, 6, 9, 10, 0, 0).unwrap(),
            "Priya Sharma",
            15,
        )
    }

    #[test]
    fn test_generate_events_with_tzid() {
        let exporter = ICalExporter::new();
        let body = String::from_utf8(exporter.generate(&[yoga()])).unwrap();

        assert!(body.contains("BEGIN:VCALENDAR"));
        assert!(body.contains("BEGIN:VEVENT"));
        assert!(body.contains("SUMMARY:Yoga Basics"));
        assert!(body.contains("TZID=Asia/Kolkata:20250609T100000"));
        assert!(body.contains("TZID=Asia/Kolkata:20250609T110000"));
        assert!(body.contains("UID:c1-fitness-booking"));
    }

    #[test]
    fn test_generate_follows_class_zone() {
        let mut class = yoga();
        class.scheduled = class.scheduled.with_timezone(&New_York);

        let body = String::from_utf8(ICalExporter::new().generate(&[class])).unwrap();

        assert!(body.contains("TZID=America/New_York:20250609T003000"));
    }

    #[test]
    fn test_generate_empty_calendar() {
        let body = String::from_utf8(ICalExporter::new().generate(&[])).unwrap();

        assert!(body.contains("BEGIN:VCALENDAR"));
        assert!(!body.contains("BEGIN:VEVENT"));
    }
}
