use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::ScheduleService;
use crate::models::evaluations::entities::EvaluationScore;
use crate::models::rankings::responses::ScheduleAggregateResponse;
use crate::models::student_evaluations::responses::StudentEvaluationSummary;
use crate::models::{ApiResponse, ErrorCode};
use crate::scoring::aggregate::{EvaluationBundle, aggregate_schedule};

/// 获取场次聚合结果
/// GET /schedules/{schedule_id}/aggregate
///
/// 纯读路径：每次现算，无写入、无锁，读到提交中的旧状态
/// 也没有问题（过滤条件同样是 submitted/locked）。
pub async fn get_schedule_aggregate(
    service: &ScheduleService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    let evaluations = match storage.list_evaluations_by_schedule(schedule_id).await {
        Ok(e) => e,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评审列表失败: {e}"),
                )),
            );
        }
    };

    let evaluation_ids: Vec<i64> = evaluations.iter().map(|e| e.id).collect();
    let all_scores = match storage
        .list_evaluation_scores_for_evaluations(&evaluation_ids)
        .await
    {
        Ok(s) => s,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询评分明细失败: {e}"),
                )),
            );
        }
    };

    let mut scores_by_evaluation: HashMap<i64, Vec<EvaluationScore>> = HashMap::new();
    for score in all_scores {
        scores_by_evaluation
            .entry(score.evaluation_id)
            .or_default()
            .push(score);
    }

    let bundles: Vec<EvaluationBundle> = evaluations
        .into_iter()
        .map(|evaluation| {
            let scores = scores_by_evaluation
                .remove(&evaluation.id)
                .unwrap_or_default();
            EvaluationBundle::new(evaluation, scores)
        })
        .collect();

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

    let aggregate = aggregate_schedule(schedule.id, schedule.group_id, &bundles, &criteria, &members);

    // 学生自评状态随聚合结果一并展示（不贡献分数）
    let student_evaluations = match storage
        .list_student_evaluations_by_schedule(schedule_id)
        .await
    {
        Ok(rows) => rows
            .into_iter()
            .map(|row| StudentEvaluationSummary {
                student_id: row.student_id,
                status: row.status,
                submitted_at: row.submitted_at,
            })
            .collect(),
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询学生自评失败: {e}"),
                )),
            );
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ScheduleAggregateResponse {
            aggregate,
            student_evaluations,
        },
        "查询成功",
    )))
}
