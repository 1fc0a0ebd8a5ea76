use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashSet;

use super::EvaluationService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::evaluations::responses::MissingCriteriaResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 提交评审
/// POST /evaluations/{evaluation_id}/submit
///
/// 仅 pending 可提交；缺评时返回缺失评分项列表；
/// 按 `evaluation.lock_on_submit` 策略决定是否顺带锁定。
pub async fn submit_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    evaluation_id: i64,
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

    if evaluation.evaluator_id != current_user.id && current_user.role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "只能提交自己的评审记录",
        )));
    }

    // 预检缺失评分项，给调用方结构化的缺失列表
    // （存储层在事务内仍会再校验一次）
    if let Ok(Some(schedule)) = storage.get_schedule_by_id(evaluation.schedule_id).await {
        let criteria = storage
            .list_rubric_criteria(schedule.rubric_template_id)
            .await
            .unwrap_or_default();
        let scored: HashSet<i64> = storage
            .list_evaluation_scores(evaluation_id)
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.criterion_id)
            .collect();
        let mut missing: Vec<i64> = criteria
            .iter()
            .filter(|c| !scored.contains(&c.id))
            .map(|c| c.id)
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Ok(HttpResponse::UnprocessableEntity().json(ApiResponse::error(
                ErrorCode::MissingCriterionScores,
                MissingCriteriaResponse {
                    missing_criterion_ids: missing,
                },
                "提交前必须完成所有评分项",
            )));
        }
    }

    let lock_on_submit = AppConfig::get().evaluation.lock_on_submit;

    match storage
        .submit_evaluation(evaluation_id, lock_on_submit)
        .await
    {
        Ok(evaluation) => Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "提交成功"))),
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::EvaluationNotFound,
        )),
    }
}
