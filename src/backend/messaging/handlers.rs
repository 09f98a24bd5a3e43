//! Messaging HTTP Handlers
//!
//! Thin axum handlers over the messaging services. After a successful
//! append these publish real-time events and spawn the push alert; both are
//! best-effort and can never fail the request.

use axum::extract::{Path, Query, State};
use axum::Json;
use uuid::Uuid;

use crate::backend::error::ApiError;
use crate::backend::messaging::service::{self, AppendMessage};
use crate::backend::middleware::TrustedUser;
use crate::backend::push;
use crate::backend::server::state::AppState;
use crate::shared::messaging::{
    CreateThreadRequest, ListMessagesResponse, ListThreadsResponse, MessageCursor,
    SendMessageRequest, SendMessageResponse, Thread,
};

/// Query parameters for listing threads
#[derive(Debug, serde::Deserialize)]
pub struct ListThreadsParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for listing messages
#[derive(Debug, serde::Deserialize)]
pub struct ListMessagesParams {
    pub limit: Option<i64>,
    /// Compound cursor from a previous page's `next_cursor`
    pub before: Option<String>,
}

/// Get or create the thread with another user
///
/// `POST /api/dm/threads`
pub async fn create_thread(
    State(state): State<AppState>,
    TrustedUser(user_id): TrustedUser,
    Json(request): Json<CreateThreadRequest>,
) -> Result<Json<Thread>, ApiError> {
    if user_id == request.target_user_id {
        return Err(ApiError::bad_request("cannot open a thread with yourself"));
    }

    let thread = service::get_or_create_thread(
        &state.db_pool,
        state.directory.as_ref(),
        user_id,
        request.target_user_id,
    )
    .await?;

    Ok(Json(thread))
}

/// Get one thread as seen by the caller
///
/// `GET /api/dm/threads/{thread_id}`
pub async fn get_thread(
    State(state): State<AppState>,
    TrustedUser(user_id): TrustedUser,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<Thread>, ApiError> {
    let thread = service::get_thread_for_user(&state.db_pool, thread_id, user_id).await?;
    Ok(Json(thread))
}

/// List the caller's threads, most recently updated first
///
/// `GET /api/dm/threads`
pub async fn list_threads(
    State(state): State<AppState>,
    TrustedUser(user_id): TrustedUser,
    Query(params): Query<ListThreadsParams>,
) -> Result<Json<ListThreadsResponse>, ApiError> {
    let (threads, total) =
        service::list_threads(&state.db_pool, user_id, params.limit, params.offset).await?;
    Ok(Json(ListThreadsResponse { threads, total }))
}

/// List one page of a thread's messages
///
/// `GET /api/dm/threads/{thread_id}/messages`
pub async fn list_messages(
    State(state): State<AppState>,
    TrustedUser(user_id): TrustedUser,
    Path(thread_id): Path<Uuid>,
    Query(params): Query<ListMessagesParams>,
) -> Result<Json<ListMessagesResponse>, ApiError> {
    let before = params
        .before
        .as_deref()
        .map(|cursor| cursor.parse::<MessageCursor>())
        .transpose()
        .map_err(|_| ApiError::bad_request("malformed pagination cursor"))?;

    let page =
        service::list_messages(&state.db_pool, thread_id, user_id, params.limit, before).await?;

    Ok(Json(ListMessagesResponse {
        thread: page.thread,
        messages: page.messages,
        has_more: page.has_more,
        next_cursor: page.next_cursor.map(|cursor| cursor.to_string()),
    }))
}

/// Send a message into a thread
///
/// `POST /api/dm/threads/{thread_id}/messages`
///
/// Persists the message, atomically updates the thread's denormalized
/// state, publishes real-time events, and spawns a best-effort push alert.
pub async fn send_message(
    State(state): State<AppState>,
    TrustedUser(sender_id): TrustedUser,
    Path(thread_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, ApiError> {
    let (thread, message) = service::append_message(
        &state.db_pool,
        AppendMessage {
            thread_id,
            sender_id,
            recipient_id: request.recipient_id,
            content: request.content,
            attachments: request.attachments,
        },
    )
    .await?;

    state.events.publish_new_message(&thread, &message);
    push::spawn_notify_new_message(
        state.db_pool.clone(),
        state.push.clone(),
        thread.clone(),
        message.clone(),
    );

    Ok(Json(SendMessageResponse { thread, message }))
}

/// Zero the caller's unread counter on a thread
///
/// `POST /api/dm/threads/{thread_id}/read`
pub async fn mark_thread_read(
    State(state): State<AppState>,
    TrustedUser(user_id): TrustedUser,
    Path(thread_id): Path<Uuid>,
) -> Result<Json<Thread>, ApiError> {
    let thread = service::mark_thread_read(&state.db_pool, thread_id, user_id).await?;
    state.events.publish_thread_updated(&thread, user_id);
    Ok(Json(thread))
}
