//! Notification banners rendered as terminal lines.

use qrpanel_core::{Notifications, Severity};

/// Print every visible notification, oldest first.
pub async fn print_notifications(notifications: &Notifications) {
    for note in notifications.active().await {
        match note.severity {
            Severity::Success => println!("\x1b[1;32m✓\x1b[0m {}", note.message),
            Severity::Info => println!("\x1b[1;34mℹ\x1b[0m {}", note.message),
            Severity::Warning => println!("\x1b[1;33m!\x1b[0m {}", note.message),
            Severity::Error => eprintln!("\x1b[1;31m✗\x1b[0m {}", note.message),
        }
    }
}
