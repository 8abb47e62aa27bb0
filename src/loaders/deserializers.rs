use chrono::{DateTime, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer for timestamp that accepts both integers (ms) and RFC3339 strings
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Number(n) => {
            // Unix timestamp in milliseconds, as produced by Date.now()
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))
        }
        Value::String(s) => s
            .parse::<DateTime<Utc>>()
            .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e))),
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use crate::models::{Conversation, Message};

    #[test]
    fn test_message_timestamp_integer() {
        let json = r#"{
            "id": "m1",
            "role": "assistant",
            "content": "hello",
            "timestamp": 1762076480016
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        let expected = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(msg.timestamp, expected);
    }

    #[test]
    fn test_message_timestamp_rfc3339() {
        let json = r#"{
            "id": "m1",
            "role": "user",
            "content": "hello",
            "timestamp": "2025-11-02T09:41:20.016Z"
        }"#;

        let msg: Message = serde_json::from_str(json).unwrap();
        let expected = DateTime::from_timestamp_millis(1762076480016).unwrap();
        assert_eq!(msg.timestamp, expected);
    }

    #[test]
    fn test_timestamp_rejects_other_types() {
        let json = r#"{"id":"m1","role":"user","content":"x","timestamp":true}"#;
        let err = serde_json::from_str::<Message>(json).unwrap_err();
        assert!(err.to_string().contains("timestamp must be a number or string"));
    }

    #[test]
    fn test_timestamp_rejects_bad_string() {
        let json = r#"{"id":"m1","role":"user","content":"x","timestamp":"yesterday"}"#;
        let err = serde_json::from_str::<Message>(json).unwrap_err();
        assert!(err.to_string().contains("invalid RFC3339 timestamp"));
    }

    #[test]
    fn test_conversation_without_messages() {
        let json = r#"{
            "id": "c1",
            "title": "Empty",
            "model": "gpt-4",
            "createdAt": 1700000000000,
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;

        let conv: Conversation = serde_json::from_str(json).unwrap();
        assert!(conv.messages.is_empty());
        assert_eq!(conv.title, "Empty");
    }

    #[test]
    fn test_timestamps_serialize_as_rfc3339() {
        let json = r#"{"id":"m1","role":"user","content":"x","timestamp":0}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&msg).unwrap();
        assert!(out.contains(r#""timestamp":"1970-01-01T00:00:00Z""#));
    }
}
