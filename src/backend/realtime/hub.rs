//! Real-time Event Hub
//!
//! Fan-out of direct-messaging events over `tokio::sync::broadcast`. Each
//! user has a personal channel (thread summaries scoped to their own unread
//! count) and each thread has a shared channel for live viewers.
//!
//! Delivery is best-effort, at-most-once: sends to channels with no
//! receivers are dropped, lagged receivers lose events, and clients recover
//! by refetching. Channels are created on demand and evicted by a periodic
//! cleanup pass once their last subscriber disconnects.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::shared::messaging::{Message, Thread};
use crate::shared::DmEvent;

const CHANNEL_CAPACITY: usize = 100;

/// Broadcast hub for per-user and per-thread event channels.
#[derive(Clone)]
pub struct EventHub {
    user_channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<DmEvent>>>>,
    thread_channels: Arc<Mutex<HashMap<Uuid, broadcast::Sender<DmEvent>>>>,
}

impl EventHub {
    pub fn new() -> Self {
        Self {
            user_channels: Arc::new(Mutex::new(HashMap::new())),
            thread_channels: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Subscribe to a user's personal channel, creating it if needed.
    pub fn subscribe_user(&self, user_id: Uuid) -> broadcast::Receiver<DmEvent> {
        Self::sender_for(&self.user_channels, user_id).subscribe()
    }

    /// Subscribe to a thread's shared channel, creating it if needed.
    pub fn subscribe_thread(&self, thread_id: Uuid) -> broadcast::Receiver<DmEvent> {
        Self::sender_for(&self.thread_channels, thread_id).subscribe()
    }

    /// Publish a new-message event after a successful append.
    ///
    /// Each participant's personal channel gets the thread summary scoped to
    /// their own unread count plus the message; the thread channel gets the
    /// message for live viewers. Events for one thread go out in append
    /// order because this runs synchronously in the sending call.
    pub fn publish_new_message(&self, thread: &Thread, message: &Message) {
        for participant in [thread.participant_a, thread.participant_b] {
            let event = DmEvent::new_message(&thread.summary_for(participant), message);
            Self::send(&self.user_channels, participant, event);
        }
        Self::send(
            &self.thread_channels,
            thread.id,
            DmEvent::thread_message(message),
        );
    }

    /// Publish a thread-updated event to the reader's personal channel only.
    pub fn publish_thread_updated(&self, thread: &Thread, reader_id: Uuid) {
        let event = DmEvent::thread_updated(&thread.summary_for(reader_id));
        Self::send(&self.user_channels, reader_id, event);
    }

    /// Evict channels whose last subscriber disconnected.
    pub fn cleanup_inactive_channels(&self) {
        self.user_channels
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
        self.thread_channels
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
    }

    /// Subscriber count for a user channel (for debugging)
    pub fn user_subscriber_count(&self, user_id: Uuid) -> usize {
        self.user_channels
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Subscriber count for a thread channel (for debugging)
    pub fn thread_subscriber_count(&self, thread_id: Uuid) -> usize {
        self.thread_channels
            .lock()
            .unwrap()
            .get(&thread_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    fn sender_for(
        channels: &Mutex<HashMap<Uuid, broadcast::Sender<DmEvent>>>,
        id: Uuid,
    ) -> broadcast::Sender<DmEvent> {
        let mut channels = channels.lock().unwrap();
        channels
            .entry(id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }

    fn send(channels: &Mutex<HashMap<Uuid, broadcast::Sender<DmEvent>>>, id: Uuid, event: DmEvent) {
        // No channel means nobody ever subscribed; dropping is the
        // at-most-once contract, not an error.
        if let Some(sender) = channels.lock().unwrap().get(&id) {
            let _ = sender.send(event);
        }
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}
