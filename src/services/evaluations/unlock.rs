use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::requests::UnlockEvaluationRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 管理员解锁评审（locked -> submitted）
/// POST /evaluations/{evaluation_id}/unlock
///
/// 必须给出原因；审计记录与状态变更在同一事务内写入，
/// 审计失败则解锁不生效。
pub async fn unlock_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    req: UnlockEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if req.reason.trim().is_empty() {
        return Ok(
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::Validation,
                "解锁必须填写原因",
            )),
        );
    }

    match storage
        .unlock_evaluation(evaluation_id, actor_id, req.reason.trim())
        .await
    {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "已解锁"))),
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::EvaluationNotFound,
        )),
    }
}
