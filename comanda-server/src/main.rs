use comanda_server::{Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 配置, 日志)
    let (config, _log_guard) = setup_environment()?;

    tracing::info!(
        vendor_id = %format!("{:#06x}", config.vendor_id),
        product_id = %format!("{:#06x}", config.product_id),
        "🧾 Comanda printer client starting..."
    );

    // 2. 初始化服务器状态
    let state = ServerState::initialize(&config);

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
