use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentEvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::student_evaluations::responses::StudentEvaluationResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 领取本场次的自评表（当前登录学生）
/// POST /schedules/{schedule_id}/student-evaluation
///
/// 幂等：重复领取返回已有记录；仅本组成员可领取。
pub async fn claim_student_evaluation(
    service: &StudentEvaluationService,
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

    let schedule = match storage.get_schedule_by_id(schedule_id).await {
        Ok(Some(s)) => s,
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
    };

    // 仅本组成员可领取自评表
    let members = match storage.list_group_members(schedule.group_id).await {
        Ok(m) => m,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询小组成员失败: {e}"),
                )),
            );
        }
    };
    if !members.iter().any(|m| m.student_id == current_user.id) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "您不是该答辩小组的成员",
        )));
    }

    match storage
        .get_or_create_student_evaluation(schedule_id, current_user.id)
        .await
    {
        Ok((student_evaluation, created)) => {
            let message = if created { "领取成功" } else { "已领取过自评表" };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                StudentEvaluationResponse {
                    student_evaluation,
                    created,
                },
                message,
            )))
        }
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::StudentEvaluationNotFound,
        )),
    }
}
