use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::requests::SaveScoresRequest;
use crate::models::evaluations::responses::EvaluationDetailResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 保存逐项评分与扩展字段
/// PUT /evaluations/{evaluation_id}/scores
///
/// 仅评审归属的评委本人或管理员可写；评分范围按模板校验，
/// 越界直接拒绝而不是截断；锁定后的评审由存储层拒绝。
pub async fn save_scores(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
    req: SaveScoresRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let evaluation = match storage.get_evaluation_by_id(evaluation_id).await {
        Ok(Some(e)) => e,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::EvaluationNotFound,
                "评审记录不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评审失败: {e}"),
                )),
            );
        }
    };

    // 只有归属评委本人或管理员可以写评分
    if evaluation.evaluator_id != current_user.id && current_user.role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能修改自己的评审记录",
        )));
    }

    // 按场次模板校验评分项与评分范围
    let schedule = match storage.get_schedule_by_id(evaluation.schedule_id).await {
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

    let criteria = match storage
        .list_rubric_criteria(schedule.rubric_template_id)
        .await
    {
        Ok(c) => c,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评分项失败: {e}"),
                )),
            );
        }
    };

    for entry in &req.scores {
        let Some(criterion) = criteria.iter().find(|c| c.id == entry.criterion_id) else {
            return Ok(
                HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::Validation,
                    format!("评分项 {} 不属于本场次使用的模板", entry.criterion_id),
                )),
            );
        };
        if entry.score < criterion.min_score || entry.score > criterion.max_score {
            return Ok(
                HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::ScoreOutOfRange,
                    format!(
                        "评分项 {} 的评分 {} 超出允许范围 [{}, {}]",
                        criterion.id, entry.score, criterion.min_score, criterion.max_score
                    ),
                )),
            );
        }
    }

    match storage
        .save_evaluation_scores(evaluation_id, req.scores, req.extras)
        .await
    {
        Ok(evaluation) => {
            let scores = storage
                .list_evaluation_scores(evaluation_id)
                .await
                .unwrap_or_default();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                EvaluationDetailResponse { evaluation, scores },
                "评分已保存",
            )))
        }
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::EvaluationNotFound,
        )),
    }
}
