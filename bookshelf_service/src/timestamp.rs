use chrono::{DateTime, SecondsFormat, Utc};

/// Renders a timestamp as ISO 8601 in UTC with millisecond precision, e.g. `2024-05-01T10:20:30.123Z`
pub fn to_iso_string(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub mod serializer {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::to_iso_string;

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_iso_string(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&str_time)
            .map(|time| time.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
