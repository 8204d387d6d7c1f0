/// Plain-text presentation of the panel
use crate::models::Notification;
use chrono::Local;
use std::fmt::Write;

/// Render the panel: a header with the unread count, then one block per
/// notification (title, body, localized timestamp), newest first.
pub fn render_panel(notifications: &[Notification], unread: u64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Notifications ({unread} unread)");
    if notifications.is_empty() {
        let _ = writeln!(out, "  (no notifications)");
        return out;
    }
    for notification in notifications {
        let _ = writeln!(out, "  [{}] {}", notification.kind, notification.title);
        let _ = writeln!(out, "      {}", notification.description);
        let _ = writeln!(
            out,
            "      {}",
            notification
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
        );
    }
    out
}
