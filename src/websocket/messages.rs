/// Wire frames of the realtime notification channel
use crate::models::RawNotification;
use serde::Deserialize;

/// The single event type the panel subscribes to
pub const NOTIFICATION_EVENT: &str = "notification";

/// An event frame as sent by the realtime server: an event name plus an
/// arbitrary payload. Only `notification` frames carry a payload we use.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveFrame {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl LiveFrame {
    /// Parse a text frame into a notification record.
    ///
    /// Returns `None` for frames that are not JSON, carry a different
    /// event, or whose payload is not notification-shaped; the reader
    /// skips those rather than dropping the connection.
    pub fn parse_notification(text: &str) -> Option<RawNotification> {
        let frame: LiveFrame = serde_json::from_str(text).ok()?;
        if frame.event != NOTIFICATION_EVENT {
            return None;
        }
        serde_json::from_value(frame.data).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_notification_frame() {
        let text = r#"{
            "event": "notification",
            "data": { "id": "n1", "title": "Room check", "message": "At 18:00" }
        }"#;
        let raw = LiveFrame::parse_notification(text).unwrap();
        assert_eq!(raw.id.as_deref(), Some("n1"));
        assert_eq!(raw.message.as_deref(), Some("At 18:00"));
    }

    #[test]
    fn test_other_events_are_skipped() {
        let text = r#"{ "event": "presence", "data": { "online": 4 } }"#;
        assert!(LiveFrame::parse_notification(text).is_none());
    }

    #[test]
    fn test_non_json_is_skipped() {
        assert!(LiveFrame::parse_notification("hello").is_none());
    }

    #[test]
    fn test_payloadless_notification_still_parses() {
        // data defaults to null, which RawNotification does not accept
        let text = r#"{ "event": "notification" }"#;
        assert!(LiveFrame::parse_notification(text).is_none());
    }
}
