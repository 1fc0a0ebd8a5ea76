use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentEvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::models::student_evaluations::requests::SubmitStudentEvaluationRequest;

/// 提交自评表（仅本人）
/// POST /student-evaluations/{id}/submit
pub async fn submit_student_evaluation(
    service: &StudentEvaluationService,
    request: &HttpRequest,
    id: i64,
    req: SubmitStudentEvaluationRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let existing = match storage.get_student_evaluation_by_id(id).await {
        Ok(Some(row)) => row,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentEvaluationNotFound,
                "自评表不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询自评表失败: {e}"),
                )),
            );
        }
    };

    if existing.student_id != current_user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能提交自己的自评表",
        )));
    }

    match storage.submit_student_evaluation(id, req.content).await {
        Ok(student_evaluation) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(student_evaluation, "提交成功")))
        }
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::StudentEvaluationNotFound,
        )),
    }
}
