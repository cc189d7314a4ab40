//! Server Implementation
//!
//! HTTP 服务器启动和管理

use comanda_printer::PrinterDevice;
use tokio::net::TcpListener;

use crate::api;
use crate::core::{Config, Result, ServerState};

/// HTTP Server
pub struct Server<D: PrinterDevice> {
    config: Config,
    state: ServerState<D>,
}

impl<D: PrinterDevice> Server<D> {
    pub fn with_state(config: Config, state: ServerState<D>) -> Self {
        Self { config, state }
    }

    pub async fn run(self) -> Result<()> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(
            printer = %self.state.printer.printer(),
            "🧾 Printer client listening on http://{}",
            addr
        );

        let app = api::build_app(self.state);

        let shutdown = async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        };

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
