// 内容存储 API 处理器

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::intake::IntakeError;
use crate::server::state::AppState;

/// 存储请求
///
/// type 与 content 均为可选：缺失等同于空值，由服务层统一拒绝
#[derive(Debug, Deserialize)]
pub struct StoreRequest {
    /// 声明的内容类型（text/image/email，仅作路由提示）
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    /// 内容载荷（纯文本或 data URI 字符串）
    #[serde(default)]
    pub content: Option<String>,
}

/// 存储成功响应
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub success: bool,
    pub filename: String,
    pub message: String,
}

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> axum::response::Response {
        let status = if self.code.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        warn!("存储请求失败 [{}]: {}", self.code.code(), self.message);

        let body = Json(ErrorResponse {
            error: self.message,
        });
        (status, body).into_response()
    }
}

/// POST /store
/// 接收拖放内容（文本/图片/邮件）并落盘
pub async fn store_content(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>, IntakeError> {
    let declared_type = req.content_type.as_deref().unwrap_or("");
    let content = req.content.as_deref().unwrap_or("");

    let outcome = state.intake.store(declared_type, content).await?;

    info!(
        "已保存 {} 内容: {} ({} 字节)",
        outcome.kind.as_str(),
        outcome.filename,
        outcome.bytes_written
    );

    let message = outcome.message();
    Ok(Json(StoreResponse {
        success: true,
        filename: outcome.filename,
        message,
    }))
}

/// 健康检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health
/// 无条件返回 healthy，不受之前请求结果影响
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
