//! Push Notification Boundary
//!
//! Best-effort alert dispatch after a message is persisted. Delivery is pure
//! UX: every failure path here is a log line, never an error surfaced to the
//! sender. Message persistence is the durable source of truth.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;

use crate::backend::messaging::db;
use crate::shared::messaging::{Message, Thread};

/// Alert payload handed to the push gateway.
#[derive(Debug, Clone, Serialize)]
pub struct PushAlert {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Dispatch of a single alert to a device token.
///
/// Returns whether delivery was accepted; callers treat `false` as a
/// loggable non-event.
#[async_trait]
pub trait PushSender: Send + Sync {
    async fn send_to_device(&self, token: &str, alert: &PushAlert) -> bool;
}

/// Push sender POSTing alerts to an HTTP gateway (FCM-style relay).
pub struct HttpPushSender {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPushSender {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[derive(Serialize)]
struct PushRequest<'a> {
    token: &'a str,
    #[serde(flatten)]
    alert: &'a PushAlert,
}

#[async_trait]
impl PushSender for HttpPushSender {
    async fn send_to_device(&self, token: &str, alert: &PushAlert) -> bool {
        let result = self
            .client
            .post(&self.endpoint)
            .json(&PushRequest { token, alert })
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(status = %response.status(), "push gateway rejected alert");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "push gateway unreachable");
                false
            }
        }
    }
}

/// Sender used when no push gateway is configured.
pub struct DisabledPushSender;

#[async_trait]
impl PushSender for DisabledPushSender {
    async fn send_to_device(&self, _token: &str, _alert: &PushAlert) -> bool {
        tracing::debug!("push disabled, dropping alert");
        false
    }
}

/// Look up the recipient's device token and dispatch a new-message alert.
///
/// Called by the send-message handler after persistence and event
/// publication; runs on its own task and never blocks or fails the send.
pub async fn notify_new_message(
    pool: &PgPool,
    sender: &dyn PushSender,
    thread: &Thread,
    message: &Message,
) {
    let token = match db::get_device_token(pool, message.recipient_id).await {
        Ok(Some(token)) => token,
        Ok(None) => {
            tracing::debug!(recipient_id = %message.recipient_id, "no device token registered");
            return;
        }
        Err(e) => {
            tracing::warn!(error = %e, "device token lookup failed");
            return;
        }
    };

    let title = thread
        .participant_meta
        .iter()
        .find(|p| p.id == message.sender_id)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| "New message".to_string());

    let alert = PushAlert {
        title,
        body: message.preview(),
        data: serde_json::json!({
            "thread_id": message.thread_id,
            "message_id": message.id,
        }),
    };

    if !sender.send_to_device(&token, &alert).await {
        tracing::warn!(
            thread_id = %message.thread_id,
            recipient_id = %message.recipient_id,
            "push delivery failed"
        );
    }
}

/// Convenience for spawning [`notify_new_message`] off the request path.
pub fn spawn_notify_new_message(
    pool: PgPool,
    sender: std::sync::Arc<dyn PushSender>,
    thread: Thread,
    message: Message,
) {
    tokio::spawn(async move {
        notify_new_message(&pool, sender.as_ref(), &thread, &message).await;
    });
}
