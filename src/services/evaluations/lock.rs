use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::{ApiResponse, ErrorCode};

/// 锁定评审（管理员）
/// POST /evaluations/{evaluation_id}/lock
///
/// 仅 submitted 可锁定；锁定后评分与扩展字段对非管理员不可变。
pub async fn lock_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.lock_evaluation(evaluation_id).await {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "已锁定"))),
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::EvaluationNotFound,
        )),
    }
}
