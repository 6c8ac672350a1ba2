//! WebSocket chat handler.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use rentchat_shared::{AuthToken, CreateMessagePayload, ListingId, UserId};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConversationId, ConversationRepository},
    ui::state::{AppState, ChatQuery},
    usecase::{JoinConversationUseCase, JoinError, LeaveConversationUseCase, RelayMessageUseCase},
};

/// `GET /v1/listings/{listing_id}/chat/{receiver_id}?token=...`
pub async fn chat_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path((listing_id, receiver_id)): Path<(String, String)>,
    Query(query): Query<ChatQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let token = match AuthToken::new(query.token.unwrap_or_default()) {
        Ok(token) => token,
        Err(_) => {
            tracing::warn!("Rejecting chat connection without token");
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    // Convert String -> Domain Models
    let (listing_id, receiver_id, user_id) = match (
        ListingId::try_from(listing_id),
        UserId::try_from(receiver_id),
        UserId::try_from(token.as_str().to_string()),
    ) {
        (Ok(listing), Ok(receiver), Ok(user)) => (listing, receiver, user),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            tracing::warn!("Invalid chat connection request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };
    let conversation_id = ConversationId::new(listing_id, user_id.clone(), receiver_id);

    // Channel through which the conversation reaches this connection
    let (tx, rx) = mpsc::unbounded_channel();

    let join_usecase = JoinConversationUseCase::new(state.repository.clone());
    match join_usecase
        .execute(conversation_id.clone(), user_id.clone(), tx)
        .await
    {
        Ok(connection_id) => {
            tracing::info!(
                "Connection '{}' of '{}' joined conversation {}",
                connection_id,
                user_id,
                conversation_id
            );
            let membership = Membership::new(
                state.repository.clone(),
                conversation_id,
                connection_id,
            );
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, membership, user_id, rx)))
        }
        Err(JoinError::ConversationFull { capacity }) => {
            tracing::warn!(
                "Conversation {} is full ({} connections). Rejecting '{}'",
                conversation_id,
                capacity,
                user_id
            );
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
        Err(e) => {
            tracing::error!("Failed to join conversation {}: {}", conversation_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// A joined connection's place in its conversation.
///
/// Dropped without [`Membership::leave`] (the upgrade never completed), it still
/// removes the connection so the slot does not count toward the capacity.
struct Membership {
    repository: Arc<dyn ConversationRepository>,
    conversation_id: ConversationId,
    connection_id: ConnectionId,
    joined: bool,
}

impl Membership {
    fn new(
        repository: Arc<dyn ConversationRepository>,
        conversation_id: ConversationId,
        connection_id: ConnectionId,
    ) -> Self {
        Self {
            repository,
            conversation_id,
            connection_id,
            joined: true,
        }
    }

    async fn leave(mut self) {
        self.joined = false;
        leave_conversation(
            self.repository.clone(),
            &self.conversation_id,
            &self.connection_id,
        )
        .await;
    }
}

impl Drop for Membership {
    fn drop(&mut self) {
        if !self.joined {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(
                "No runtime to remove connection '{}' from conversation {}",
                self.connection_id,
                self.conversation_id
            );
            return;
        };

        tracing::warn!(
            "Connection '{}' was never upgraded; removing it from conversation {}",
            self.connection_id,
            self.conversation_id
        );
        let repository = self.repository.clone();
        let conversation_id = self.conversation_id.clone();
        let connection_id = self.connection_id.clone();
        runtime.spawn(async move {
            leave_conversation(repository, &conversation_id, &connection_id).await;
        });
    }
}

async fn leave_conversation(
    repository: Arc<dyn ConversationRepository>,
    conversation_id: &ConversationId,
    connection_id: &ConnectionId,
) {
    let leave_usecase = LeaveConversationUseCase::new(repository);
    match leave_usecase.execute(conversation_id, connection_id).await {
        Ok(()) => tracing::info!(
            "Connection '{}' left conversation {}",
            connection_id,
            conversation_id
        ),
        Err(e) => tracing::warn!("Failed to remove connection '{}': {}", connection_id, e),
    }
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    membership: Membership,
    user_id: UserId,
    mut rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    let relay_usecase = RelayMessageUseCase::new(state.repository.clone());
    let recv_conversation = membership.conversation_id.clone();
    let recv_connection = membership.connection_id.clone();

    // Frames from this client are relayed to the whole conversation
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_connection, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let payload = match serde_json::from_str::<CreateMessagePayload>(&text) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::warn!(
                                "Ignoring malformed frame from '{}': {}",
                                recv_connection,
                                e
                            );
                            continue;
                        }
                    };

                    match relay_usecase
                        .execute(&recv_conversation, &user_id, payload.content)
                        .await
                    {
                        Ok(message) => {
                            tracing::debug!(
                                "Relayed message '{}' in conversation {}",
                                message.id,
                                recv_conversation
                            );
                        }
                        Err(e) => {
                            tracing::warn!("Failed to relay message: {}", e);
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection);
                    break;
                }
                _ => {}
            }
        }
    });

    // Messages of the conversation are written to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    membership.leave().await;
}
