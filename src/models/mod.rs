use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Category assigned when the backend omits one
pub const DEFAULT_KIND: &str = "system";

/// A normalized notification as held in the panel.
///
/// The backend is not consistent about field names (`_id` vs `id`,
/// `message` vs `description`), so this shape only ever exists after
/// [`RawNotification::normalize`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Notification category, e.g. "system", "announcement"
    pub kind: String,
}

/// A notification record as it arrives on the wire, fetch or live.
///
/// Every field is optional; [`normalize`](Self::normalize) resolves the
/// aliases and fills the gaps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNotification {
    /// Document-store style id, preferred over `id` when both are present
    #[serde(rename = "_id")]
    pub mongo_id: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "createdAt", deserialize_with = "lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl RawNotification {
    /// Resolve field aliases into the canonical [`Notification`] shape.
    ///
    /// Live events may carry neither an id nor a timestamp; both are
    /// synthesized so the panel can always key and sort entries.
    pub fn normalize(self) -> Notification {
        Notification {
            id: self
                .mongo_id
                .or(self.id)
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: self.title.unwrap_or_default(),
            description: self.message.or(self.description).unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
            kind: self.kind.unwrap_or_else(|| DEFAULT_KIND.to_string()),
        }
    }
}

/// Accept a missing, null or unparseable `createdAt` without failing the
/// whole envelope.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// Response envelope of the notifications listing endpoint.
///
/// The list arrives under `notifications` or `data` depending on the
/// backend version; `notifications` wins when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationPage {
    pub success: bool,
    pub notifications: Option<Vec<RawNotification>>,
    pub data: Option<Vec<RawNotification>>,
    #[serde(rename = "unreadCount")]
    pub unread_count: Option<u64>,
}

impl NotificationPage {
    /// Pull the record list out of whichever field carried it
    pub fn records(self) -> Vec<RawNotification> {
        self.notifications.or(self.data).unwrap_or_default()
    }
}

/// User role, selecting the realtime namespace to subscribe to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Student,
    HostelIncharge,
    FloorIncharge,
    Warden,
}

impl Role {
    /// Parse a role string; unrecognized roles fall back to the warden
    /// catch-all namespace.
    pub fn parse(s: &str) -> Self {
        match s {
            "student" => Role::Student,
            "hostel-incharge" => Role::HostelIncharge,
            "floor-incharge" => Role::FloorIncharge,
            _ => Role::Warden,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::HostelIncharge => "hostel-incharge",
            Role::FloorIncharge => "floor-incharge",
            Role::Warden => "warden",
        }
    }

    /// Realtime namespace this role subscribes to
    pub fn namespace(&self) -> &'static str {
        match self {
            Role::Student => "/student",
            Role::HostelIncharge => "/hostel-incharge",
            Role::FloorIncharge => "/floor-incharge",
            Role::Warden => "/warden",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_prefers_mongo_id() {
        let raw: RawNotification =
            serde_json::from_value(json!({ "_id": "abc", "id": "def", "title": "t" })).unwrap();
        let n = raw.normalize();
        assert_eq!(n.id, "abc");
    }

    #[test]
    fn test_normalize_message_alias() {
        let raw: RawNotification = serde_json::from_value(json!({
            "id": "1",
            "title": "Curfew",
            "message": "Gates close at 22:00",
            "createdAt": "2025-03-01T10:00:00Z"
        }))
        .unwrap();
        let n = raw.normalize();
        assert_eq!(n.description, "Gates close at 22:00");
        assert_eq!(n.kind, DEFAULT_KIND);
    }

    #[test]
    fn test_normalize_synthesizes_id_and_timestamp() {
        let raw: RawNotification =
            serde_json::from_value(json!({ "title": "live", "description": "d" })).unwrap();
        let before = Utc::now();
        let n = raw.normalize();
        assert!(!n.id.is_empty());
        assert!(n.created_at >= before);
    }

    #[test]
    fn test_lenient_datetime_tolerates_garbage() {
        let raw: RawNotification =
            serde_json::from_value(json!({ "id": "1", "createdAt": "not-a-date" })).unwrap();
        assert!(raw.created_at.is_none());
    }

    #[test]
    fn test_page_prefers_notifications_over_data() {
        let page: NotificationPage = serde_json::from_value(json!({
            "success": true,
            "notifications": [{ "id": "a" }],
            "data": [{ "id": "b" }, { "id": "c" }],
            "unreadCount": 2
        }))
        .unwrap();
        let records = page.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_deref(), Some("a"));
    }

    #[test]
    fn test_page_falls_back_to_data() {
        let page: NotificationPage = serde_json::from_value(json!({
            "success": true,
            "data": [{ "id": "b" }]
        }))
        .unwrap();
        assert_eq!(page.unread_count, None);
        assert_eq!(page.records().len(), 1);
    }

    #[test]
    fn test_page_missing_lists_is_empty() {
        let page: NotificationPage =
            serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(page.records().is_empty());
    }

    #[test]
    fn test_role_namespaces() {
        assert_eq!(Role::Student.namespace(), "/student");
        assert_eq!(Role::HostelIncharge.namespace(), "/hostel-incharge");
        assert_eq!(Role::FloorIncharge.namespace(), "/floor-incharge");
        assert_eq!(Role::Warden.namespace(), "/warden");
    }

    #[test]
    fn test_role_parse_catch_all() {
        assert_eq!(Role::parse("student"), Role::Student);
        assert_eq!(Role::parse("janitor"), Role::Warden);
        assert_eq!(Role::parse(""), Role::Warden);
    }
}
