//! Message model as returned by the backend listing endpoints

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unique identifier for a message
///
/// The backend emits numeric ids; they are carried as strings so that the
/// id can be used verbatim as a checkbox value and in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// A message as shown in a folder listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Backend message ID
    pub message_id: MessageId,
    /// Subject line
    #[serde(default)]
    pub subject: String,
    /// When the message was sent
    #[serde(with = "timestamp")]
    pub date_time: DateTime<Utc>,
    /// Whether the receiver has read the message
    #[serde(default)]
    pub read: bool,
}

impl Message {
    pub fn new(
        message_id: impl Into<MessageId>,
        subject: impl Into<String>,
        date_time: DateTime<Utc>,
        read: bool,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            subject: subject.into(),
            date_time,
            read,
        }
    }
}

/// (De)serialization of the backend's `dateTime` field
///
/// Accepts RFC 3339 timestamps as well as zone-less ISO local date-times
/// (the backend serializes `LocalDateTime`), which are read in the local
/// time zone. Seconds and fractional seconds are optional in the local form.
pub mod timestamp {
    use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    /// Parse a backend timestamp, returning `None` for unrecognized input
    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        LOCAL_FORMATS.iter().find_map(|format| {
            let naive = NaiveDateTime::parse_from_str(raw, format).ok()?;
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
        })
    }

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid dateTime: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveDate, TimeZone};

    #[test]
    fn test_decode_listing() {
        let json = r#"[
            {"messageId": "1", "subject": "A", "dateTime": "2024-01-01T10:00:00Z", "read": false},
            {"messageId": 2, "subject": "B", "dateTime": "2024-02-01T10:00:00+01:00", "read": true,
             "messageContent": "ignored", "threadId": 7}
        ]"#;

        let messages: Vec<Message> = serde_json::from_str(json).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_id, MessageId::new("1"));
        assert!(!messages[0].read);
        assert_eq!(messages[1].message_id.as_str(), "2");
        assert_eq!(
            messages[1].date_time,
            Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_local_timestamp_uses_local_zone() {
        let expected = Local
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 8, 9)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap(),
            )
            .earliest()
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(timestamp::parse("2024-08-09T10:30:00"), Some(expected));
        assert_eq!(timestamp::parse("2024-08-09T10:30"), Some(expected));
        assert_eq!(timestamp::parse("2024-08-09T10:30:00.000"), Some(expected));
    }

    #[test]
    fn test_invalid_timestamp_rejects_message() {
        let json = r#"{"messageId": "1", "subject": "A", "dateTime": "yesterday", "read": false}"#;
        let err = serde_json::from_str::<Message>(json).unwrap_err();
        assert!(err.to_string().contains("invalid dateTime"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"messageId": "9", "dateTime": "2024-01-01T10:00:00Z"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.subject, "");
        assert!(!message.read);
    }
}
