//! 统一错误处理
//!
//! 提供请求级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`AppResponse`] - API 响应结构
//!
//! # 错误码规范
//!
//! | 前缀 | 分类 | 示例 |
//! |------|------|------|
//! | E0xxx | 请求错误 (4xx) | E0001 空请求 |
//! | E9xxx | 系统/设备错误 (5xx) | E9101 打印机错误 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use comanda_printer::PrintError;
use serde::Serialize;
use tracing::{error, warn};

use crate::orders::OrderError;
use crate::printing::PrintServiceError;

/// API 统一响应结构
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Comanda impresa exitosamente",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// 错误码 (E0000 表示成功)
    pub code: String,
    /// 消息
    pub message: String,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 应用错误枚举
///
/// 输入错误 (4xx) 在访问打印机之前产生；格式化和设备错误 (5xx)
/// 会带上底层错误描述返回给调用方。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 请求错误 (4xx) ==========
    #[error("Empty print payload")]
    /// 请求体为空 (400)
    EmptyPayload,

    #[error("Validation failed: {0}")]
    /// 字段缺失或类型错误 (400)
    Validation(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Formatting error: {0}")]
    /// 订单内容无法格式化 (500)
    Format(String),

    #[error("Printer error: {0}")]
    /// 打印机不可用或拒绝数据 (500)
    Printer(#[from] PrintError),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::EmptyPayload | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Format(_) | AppError::Printer(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::EmptyPayload => "E0001",
            AppError::Validation(_) => "E0002",
            AppError::Format(_) => "E9003",
            AppError::Printer(_) => "E9101",
            AppError::Internal(_) => "E9001",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::EmptyPayload => {
                warn!("Received empty print data");
                "No se recibieron datos para imprimir.".to_string()
            }
            AppError::Validation(msg) => {
                warn!(error = %msg, "Rejected print request");
                format!("Datos de comanda inválidos: {}", msg)
            }
            AppError::Format(msg) => {
                error!(target: "printing", error = %msg, "Order formatting failed");
                format!("Error al imprimir comanda: {}", msg)
            }
            AppError::Printer(e) => {
                error!(target: "printing", error = ?e, "Printer error occurred");
                format!("Error al imprimir comanda: {}", e)
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                format!("Error al imprimir comanda: {}", msg)
            }
        };

        let body = Json(AppResponse::<()> {
            code: self.code().to_string(),
            message,
            data: None,
        });

        (self.status(), body).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Empty => AppError::EmptyPayload,
            OrderError::Invalid(msg) => AppError::Validation(msg),
            OrderError::Quantity { .. } => AppError::Format(err.to_string()),
        }
    }
}

impl From<PrintServiceError> for AppError {
    fn from(err: PrintServiceError) -> Self {
        match err {
            PrintServiceError::Printer(e) => AppError::Printer(e),
            PrintServiceError::Join(msg) => AppError::Internal(msg),
        }
    }
}

// ========== Helper functions ==========

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: "E0000".to_string(),
        message: message.into(),
        data: Some(data),
    })
}
