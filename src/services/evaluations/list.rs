use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::responses::EvaluationListResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 列出场次下的评审记录
/// GET /schedules/{schedule_id}/evaluations
///
/// 管理员看到全部；评委只看到已提交/已锁定的记录和自己的草稿
/// （pending 是各评委的私有草稿）。
pub async fn list_schedule_evaluations(
    service: &EvaluationService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match storage.get_schedule_by_id(schedule_id).await {
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

    match storage.list_evaluations_by_schedule(schedule_id).await {
        Ok(items) => {
            let items = if current_user.role == UserRole::Admin {
                items
            } else {
                items
                    .into_iter()
                    .filter(|e| {
                        e.status.is_qualifying() || e.evaluator_id == current_user.id
                    })
                    .collect()
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                EvaluationListResponse { items },
                "查询成功",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询评审列表失败: {e}"),
            )),
        ),
    }
}
