use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "2026-01-15", value_type = String, format = "date")]
    #[serde(deserialize_with = "day_or_datetime")]
    pub date: NaiveDate,

    #[schema(example = "S-1001")]
    pub student_id: String,

    /// `present`, `absent` or `late`; stored as given
    #[schema(example = "present")]
    pub status: String,

    /// Wall-clock time of marking; an offset, if sent, is dropped
    #[schema(example = "2026-01-15T08:58:12", value_type = String, format = "date-time")]
    #[serde(deserialize_with = "local_datetime")]
    pub timestamp: NaiveDateTime,

    #[schema(example = "manual")]
    pub method: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum MarkingMethod {
    FacialRecognition,
    Manual,
}

#[derive(sqlx::FromRow)]
pub struct AttendanceRow {
    pub date: String,
    pub student_id: String,
    pub status: String,
    pub recorded_at: String,
    pub method: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = chrono::ParseError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        Ok(Self {
            date: NaiveDate::parse_from_str(&row.date, DATE_FORMAT)?,
            student_id: row.student_id,
            status: row.status,
            timestamp: NaiveDateTime::parse_from_str(&row.recorded_at, TIMESTAMP_FORMAT)?,
            method: row.method,
        })
    }
}

/// Accepts a plain `YYYY-MM-DD` day or a full ISO-8601 datetime and keeps the day.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Accepts a naive ISO-8601 datetime or RFC 3339 with an offset, keeping the
/// local wall-clock time as written.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

fn local_datetime<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}")))
}

fn day_or_datetime<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_day(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_accepts_date_and_datetime() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        assert_eq!(parse_day("2026-01-15"), Some(day));
        assert_eq!(parse_day("2026-01-15T09:30:00"), Some(day));
        assert_eq!(parse_day("2026-01-15T09:30:00.123456"), Some(day));
        assert_eq!(parse_day("2026-01-15T09:30:00+02:00"), Some(day));
        assert_eq!(parse_day("15/01/2026"), None);
    }

    #[test]
    fn record_from_dashboard_payload() {
        let record: AttendanceRecord = serde_json::from_value(serde_json::json!({
            "date": "2026-01-15T08:00:00",
            "student_id": "S-1",
            "status": "late",
            "timestamp": "2026-01-15T08:14:02.551",
            "method": "manual"
        }))
        .unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(record.status.parse::<AttendanceStatus>(), Ok(AttendanceStatus::Late));
    }

    #[test]
    fn timestamp_keeps_wall_clock_time_of_offset_input() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 15)
            .unwrap()
            .and_hms_opt(8, 14, 2)
            .unwrap();

        assert_eq!(parse_timestamp("2026-01-15T08:14:02"), Some(at));
        assert_eq!(parse_timestamp("2026-01-15T08:14:02+02:00"), Some(at));
        assert_eq!(parse_timestamp("2026-01-15T08:14:02Z"), Some(at));
        assert_eq!(parse_timestamp("2026-01-15"), None);

        let record: AttendanceRecord = serde_json::from_value(serde_json::json!({
            "date": "2026-01-15",
            "student_id": "S-1",
            "status": "present",
            "timestamp": "2026-01-15T08:14:02+02:00",
            "method": "manual"
        }))
        .unwrap();
        assert_eq!(record.timestamp, at);
    }

    #[test]
    fn labels_are_snake_case() {
        assert_eq!(MarkingMethod::FacialRecognition.as_ref(), "facial_recognition");
        assert_eq!(AttendanceStatus::Present.to_string(), "present");
        assert!("excused".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn row_round_trips_through_storage_formats() {
        let row = AttendanceRow {
            date: "2026-01-15".into(),
            student_id: "S-1".into(),
            status: "present".into(),
            recorded_at: "2026-01-15T08:14:02.551".into(),
            method: "manual".into(),
        };

        let record = AttendanceRecord::try_from(row).unwrap();
        assert_eq!(
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "2026-01-15T08:14:02.551"
        );
    }
}
