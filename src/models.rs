use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// Serializes a zoned instant as RFC 3339 with its numeric offset, e.g. `2025-06-09T10:00:00+05:30`.
pub(crate) fn serialize_instant<S>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.fixed_offset().to_rfc3339())
}

/// A scheduled fitness class together with its capacity counters.
///
/// Records handed out by the catalog are snapshots; mutating one does not touch the catalog.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct ClassRecord {
    #[schema(example = "c1")]
    pub id: String,
    #[schema(example = "Yoga Basics")]
    pub name: String,
    #[serde(rename = "datetime", serialize_with = "serialize_instant")]
    #[schema(value_type = String, format = "date-time", example = "2025-06-09T10:00:00+05:30")]
    pub scheduled: DateTime<Tz>,
    #[schema(example = "Priya Sharma")]
    pub instructor: String,
    pub total_slots: u32,
    pub available_slots: u32,
}

impl ClassRecord {
    /// Creates a class with every slot still available.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scheduled: DateTime<Tz>,
        instructor: impl Into<String>,
        total_slots: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            scheduled,
            instructor: instructor.into(),
            total_slots,
            available_slots: total_slots,
        }
    }
}

/// A client's reservation of one slot in a class. `class_id` is a lookup key, not an owning link.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct BookingRecord {
    #[schema(example = "b1")]
    pub booking_id: String,
    #[schema(example = "c1")]
    pub class_id: String,
    pub client_name: String,
    pub client_email: String,
    #[serde(serialize_with = "serialize_instant")]
    #[schema(value_type = String, format = "date-time", example = "2025-06-01T12:00:00+05:30")]
    pub booking_time: DateTime<Tz>,
}

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
pub struct BookingConfirmation {
    #[schema(example = "Booking successful!")]
    pub message: String,
    pub booking_id: String,
    pub class_name: String,
    pub client_name: String,
    pub client_email: String,
    pub remaining_slots: u32,
}

/// Body of `POST /book`. Fields are optional so missing ones can be reported by name.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookClassRequest {
    pub class_id: Option<String>,
    pub client_name: Option<String>,
    pub client_email: Option<String>,
}

/// Body of `POST /admin/change_timezone`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ChangeTimezoneRequest {
    #[schema(example = "America/New_York")]
    pub new_timezone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimezoneResponse {
    #[schema(example = "Asia/Kolkata")]
    pub timezone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Asia::Kolkata;

    use super::*;

    #[test]
    fn test_class_serializes_datetime_with_offset() {
        let scheduled = Kolkata.with_ymd_and_hms(2025, 6, 9, 10, 0, 0).unwrap();
        let class = ClassRecord::new("c1", "Yoga Basics", scheduled, "Priya Sharma", 15);

        let json = serde_json::to_value(&class).unwrap();

        assert_eq!(json["datetime"], "2025-06-09T10:00:00+05:30");
        assert_eq!(json["available_slots"], 15);
        assert_eq!(json["total_slots"], 15);
        assert!(json.get("scheduled").is_none());
    }

    #[test]
    fn test_book_request_tolerates_missing_fields() {
        let request: BookClassRequest =
            serde_json::from_str(r#"{"class_id": "c1"}"#).unwrap();

        assert_eq!(request.class_id.as_deref(), Some("c1"));
        assert!(request.client_name.is_none());
        assert!(request.client_email.is_none());
    }
}
