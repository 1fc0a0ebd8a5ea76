use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::evaluations::responses::AuditListResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 列出评审的审计日志（管理员）
/// GET /evaluations/{evaluation_id}/audits
pub async fn list_evaluation_audits(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_evaluation_audits(evaluation_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AuditListResponse { items },
            "查询成功",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询审计日志失败: {e}"),
            )),
        ),
    }
}
