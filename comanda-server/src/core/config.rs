use std::net::SocketAddr;
use std::time::Duration;

use crate::core::{Result, ServerError};

/// Default USB vendor ID of the counter printer
pub const DEFAULT_VENDOR_ID: u16 = 0x28E9;
/// Default USB product ID of the counter printer
pub const DEFAULT_PRODUCT_ID: u16 = 0x0289;

/// 服务配置 - 打印客户端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖 (也可以写在 `.env` 中)：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | PRINTER_CLIENT_HOST | 0.0.0.0 | 监听地址 |
/// | PRINTER_CLIENT_PORT | 5000 | HTTP 端口 |
/// | PRINTER_VENDOR_ID | 0x28E9 | USB 厂商 ID (十六进制) |
/// | PRINTER_PRODUCT_ID | 0x0289 | USB 产品 ID (十六进制) |
/// | USB_TIMEOUT_MS | 5000 | USB 批量传输超时(毫秒) |
/// | PAPER_WIDTH | 48 | 每行字符数 |
/// | PRINT_CUSTOMER | false | 是否打印客户名 |
/// | LOG_DIR | . | printer_client.log 所在目录 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
///
/// # 示例
///
/// ```ignore
/// PRINTER_CLIENT_PORT=8080 PRINTER_VENDOR_ID=04b8 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 监听地址
    pub host: String,
    /// HTTP 端口
    pub port: u16,
    /// USB 厂商 ID
    pub vendor_id: u16,
    /// USB 产品 ID
    pub product_id: u16,
    /// USB 批量传输超时 (毫秒)
    pub usb_timeout_ms: u64,
    /// 纸宽 (字符数): 58mm = 32, 80mm = 48
    pub paper_width: usize,
    /// 是否在小票末尾打印客户名
    pub print_customer: bool,
    /// 日志目录
    pub log_dir: String,
    /// 默认日志级别
    pub log_level: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("PRINTER_CLIENT_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PRINTER_CLIENT_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            vendor_id: std::env::var("PRINTER_VENDOR_ID")
                .ok()
                .and_then(|v| parse_hex_u16(&v))
                .unwrap_or(DEFAULT_VENDOR_ID),
            product_id: std::env::var("PRINTER_PRODUCT_ID")
                .ok()
                .and_then(|v| parse_hex_u16(&v))
                .unwrap_or(DEFAULT_PRODUCT_ID),
            usb_timeout_ms: std::env::var("USB_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            paper_width: std::env::var("PAPER_WIDTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|w| *w > 0)
                .unwrap_or(48),
            print_customer: std::env::var("PRINT_CUSTOMER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").unwrap_or_else(|_| ".".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// HTTP 监听地址
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|_| ServerError::Config(format!("Invalid bind address: {}", addr)))
    }

    /// USB 批量传输超时
    pub fn usb_timeout(&self) -> Duration {
        Duration::from_millis(self.usb_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            vendor_id: DEFAULT_VENDOR_ID,
            product_id: DEFAULT_PRODUCT_ID,
            usb_timeout_ms: 5000,
            paper_width: 48,
            print_customer: false,
            log_dir: ".".into(),
            log_level: "info".into(),
        }
    }
}

/// Parse a 16-bit USB ID written in hex, with or without a `0x` prefix
fn parse_hex_u16(s: &str) -> Option<u16> {
    let s = s.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u16::from_str_radix(digits, 16).ok()
}
