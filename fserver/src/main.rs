use foundry::config::FoundryConfig;
use fserver::{AppState, SERVICE_NAME, init_tracing, router};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = FoundryConfig::load()?;
    let chat = foundry::build_chat_service(&config)?;
    info!(
        service = SERVICE_NAME,
        provider = ?config.provider.kind,
        model = config.provider.model(),
        retrieval = %config.retrieval.base_url,
        "chat service configured"
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    for route in [
        "POST /api/chat",
        "POST /api/chat-with-tool",
        "POST /api/chat-with-agent",
        "POST /api/chat-with-doc",
        "GET  /api/health",
    ] {
        info!(route, "endpoint");
    }

    axum::serve(listener, router(AppState::new(chat))).await?;
    Ok(())
}
