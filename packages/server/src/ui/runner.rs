//! Router construction and server startup.

use std::{future::Future, io, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    infrastructure::repository::InMemoryConversationRepository,
    ui::{
        handler::{chat_handler, health_check},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Build the router over the given state
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/v1/listings/{listing_id}/chat/{receiver_id}",
            get(chat_handler),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let repository = Arc::new(InMemoryConversationRepository::new());
    let app = create_router(Arc::new(AppState::new(repository)));

    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind `host:port` and serve until Ctrl-C.
pub async fn run(host: &str, port: u16) -> io::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    serve(listener, shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}
