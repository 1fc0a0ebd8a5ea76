pub mod evaluations;
pub mod rankings;
pub mod rubrics;
pub mod schedules;
pub mod student_evaluations;

pub use evaluations::EvaluationService;
pub use rankings::RankingService;
pub use rubrics::RubricService;
pub use schedules::ScheduleService;
pub use student_evaluations::StudentEvaluationService;

use actix_web::HttpResponse;

use crate::errors::DefSystemError;
use crate::models::{ApiResponse, ErrorCode};

// 存储层错误到 HTTP 响应的统一映射
//
// 校验错误 422、状态冲突 409、不存在 404（错误码按域传入）、
// 其余一律 500。错误详情原样带给调用方。
pub(crate) fn storage_error_response(
    err: &DefSystemError,
    not_found_code: ErrorCode,
) -> HttpResponse {
    match err {
        DefSystemError::Validation(msg) => HttpResponse::UnprocessableEntity().json(
            ApiResponse::<()>::error_empty(ErrorCode::Validation, msg.clone()),
        ),
        DefSystemError::StateConflict(msg) => HttpResponse::Conflict().json(
            ApiResponse::<()>::error_empty(ErrorCode::StateConflict, msg.clone()),
        ),
        DefSystemError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(not_found_code, msg.clone()))
        }
        other => HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
            ErrorCode::InternalServerError,
            format!("操作失败: {other}"),
        )),
    }
}
