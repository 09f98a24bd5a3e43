//! Real-time Subscription Handlers
//!
//! Server-Sent Events endpoints over the broadcast hub. SSE fits the
//! one-way, best-effort contract: the server pushes events, keep-alive
//! comments hold the connection open, and a dropped or lagged client
//! recovers by refetching thread state.

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::stream;
use futures_util::Stream;
use std::convert::Infallible;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::messaging::service;
use crate::backend::middleware::TrustedUser;
use crate::backend::server::state::AppState;
use crate::shared::DmEvent;

/// Turn a broadcast receiver into an SSE event stream.
///
/// Lagged receivers skip the lost events and keep listening; a closed
/// channel ends the stream.
fn event_stream(
    rx: broadcast::Receiver<DmEvent>,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let data = match serde_json::to_string(&event) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!(error = %e, "failed to serialize event");
                            continue;
                        }
                    };
                    let sse_event = Event::default().event(event.event_name()).data(data);
                    return Some((Ok(sse_event), rx));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "subscriber lagged, dropping events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    })
}

/// Handle personal event subscription (GET /api/dm/events)
///
/// Streams new-message and thread-updated events for every thread the
/// caller participates in, each scoped to the caller's own unread count.
pub async fn personal_events(
    State(state): State<AppState>,
    TrustedUser(user_id): TrustedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!(user_id = %user_id, "personal event subscription opened");
    let rx = state.events.subscribe_user(user_id);
    Sse::new(event_stream(rx)).keep_alive(KeepAlive::default())
}

/// Handle thread event subscription (GET /api/dm/threads/{id}/events)
///
/// Streams new-message events for one thread to a live viewer. Callers who
/// are not participants get not-found, the same as for an unknown thread.
pub async fn thread_events(
    State(state): State<AppState>,
    TrustedUser(user_id): TrustedUser,
    Path(thread_id): Path<Uuid>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    service::get_thread_for_user(&state.db_pool, thread_id, user_id).await?;

    tracing::debug!(thread_id = %thread_id, user_id = %user_id, "thread event subscription opened");
    let rx = state.events.subscribe_thread(thread_id);
    Ok(Sse::new(event_stream(rx)).keep_alive(KeepAlive::default()))
}
