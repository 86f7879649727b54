use serde::Serialize;

/// Body delivered to the service worker; `static/sw.js` reads
/// `payload.notification.{title,body}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    pub notification: PushNotification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushNotification {
    pub title: String,
    pub body: String,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: PushNotification {
                title: title.into(),
                body: body.into(),
            },
        }
    }

    /// Reminder for a prayer whose time has arrived.
    pub fn prayer_due(title: impl Into<String>, prayer: &str, time: &str) -> Self {
        Self::new(title, format!("It is time for {prayer} ({time})."))
    }
}
