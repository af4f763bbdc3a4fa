//! Serde helpers for instants persisted by the client.
//!
//! Instants are written as RFC 3339 strings with millisecond precision. On read
//! both that form and plain epoch milliseconds are accepted, so records written
//! by older clients rehydrate into `DateTime<Utc>` as well.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInstant {
    Text(String),
    Millis(i64),
    Fractional(f64),
}

fn from_millis<E: de::Error>(millis: i64) -> Result<DateTime<Utc>, E> {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .ok_or_else(|| E::custom(format!("timestamp out of range: {}", millis)))
}

pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawInstant::deserialize(deserializer)? {
        RawInstant::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom),
        RawInstant::Millis(millis) => from_millis(millis),
        RawInstant::Fractional(millis) => from_millis(millis.trunc() as i64),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "super")]
        at: chrono::DateTime<Utc>,
    }

    #[test]
    fn test_serializes_as_rfc3339_millis() {
        let at = Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap();
        let json = serde_json::to_string(&Wrapper { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-05-04T10:30:00.000Z"}"#);
    }

    #[test]
    fn test_rehydrates_string_and_millis() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 4, 10, 30, 0).unwrap();

        let from_text: Wrapper = serde_json::from_str(r#"{"at":"2024-05-04T12:30:00+02:00"}"#).unwrap();
        assert_eq!(from_text.at, expected);

        let millis = expected.timestamp_millis();
        let from_number: Wrapper = serde_json::from_str(&format!(r#"{{"at":{}}}"#, millis)).unwrap();
        assert_eq!(from_number.at, expected);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":"yesterday"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"at":true}"#).is_err());
    }
}
