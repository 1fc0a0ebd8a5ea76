use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::evaluations::requests::AssignEvaluatorRequest;
use crate::models::evaluations::responses::AssignEvaluatorResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 分配评委到答辩场次
/// POST /evaluations/assign
///
/// 幂等：重复分配不报错，返回 created=false 和已有记录。
pub async fn assign_evaluator(
    service: &EvaluationService,
    request: &HttpRequest,
    req: AssignEvaluatorRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 校验场次存在
    match storage.get_schedule_by_id(req.schedule_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ScheduleNotFound,
                "答辩场次不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询场次失败: {e}"),
                )),
            );
        }
    }

    // 被分配者必须是评委或管理员
    match storage.get_user_by_id(req.evaluator_id).await {
        Ok(Some(user)) => {
            if user.role == UserRole::Student {
                return Ok(
                    HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                        ErrorCode::Validation,
                        "只能分配评委或管理员为评审人",
                    )),
                );
            }
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "评委用户不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    }

    match storage
        .assign_evaluator(req.schedule_id, req.evaluator_id)
        .await
    {
        Ok((evaluation, created)) => {
            let message = if created {
                "分配成功"
            } else {
                "该评委已分配过此场次"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AssignEvaluatorResponse { evaluation, created },
                message,
            )))
        }
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::EvaluationNotFound,
        )),
    }
}
