use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::requests::UnassignParams;
use crate::models::{ApiResponse, ErrorCode};

/// 取消分配（删除评审记录）
/// DELETE /evaluations/{evaluation_id}?force=&reason=
///
/// pending/submitted 可直接删除；locked 必须 force=true，
/// 且删除与带快照的审计记录同事务提交。
pub async fn unassign_evaluator(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    params: UnassignParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let actor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let force = params.force.unwrap_or(false);

    match storage
        .delete_evaluation(evaluation_id, force, actor_id, params.reason)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("已取消分配"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EvaluationNotFound,
            "评审记录不存在",
        ))),
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::EvaluationNotFound,
        )),
    }
}
