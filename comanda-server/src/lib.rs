//! Comanda Server - 订单小票打印客户端
//!
//! 接收局域网内 POS 发来的订单 JSON，渲染成 ESC/POS 小票，
//! 通过 USB 发送到柜台热敏打印机并切纸。
//!
//! # 模块结构
//!
//! ```text
//! comanda-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单解析与校验
//! ├── printing/      # 小票渲染与打印服务
//! └── utils/         # 错误、日志
//! ```

pub mod api;
pub mod core;
pub mod orders;
pub mod printing;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use orders::{LineItem, Order};
pub use printing::{PrintService, PrintSummary, ReceiptRenderer};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

/// 加载 `.env`、读取配置并初始化日志
///
/// 返回的 guard 需要在进程生命周期内持有，否则文件日志会丢失。
pub fn setup_environment() -> anyhow::Result<(Config, tracing_appender::non_blocking::WorkerGuard)>
{
    // .env 必须在读取配置之前加载
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let guard = init_logger(&config.log_level, &config.log_dir)?;

    Ok((config, guard))
}
