use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::collections::HashMap;
use std::sync::Arc;

use super::RankingService;
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::evaluations::entities::EvaluationScore;
use crate::models::rankings::requests::{RankTarget, RankingsParams};
use crate::models::rankings::responses::{RankingItem, RankingsResponse};
use crate::models::schedules::entities::DefenseSchedule;
use crate::models::{ApiResponse, ErrorCode};
use crate::scoring::aggregate::{EvaluationBundle, aggregate_schedule};
use crate::scoring::rank::{RankEntry, rank};

/// 排行榜
/// GET /rankings?target=group|student&limit=
///
/// 聚合与排名都是纯函数，这里负责取数并套一层短 TTL 缓存；
/// 读到旧一拍的状态是可接受的（过滤条件不变）。
pub async fn list_rankings(
    service: &RankingService,
    request: &HttpRequest,
    params: RankingsParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let limit = params.limit.unwrap_or(50).clamp(1, 500) as usize;
    let cache_key = format!("rankings:{}:{limit}", params.target);

    // 短 TTL 缓存，排行榜页高频刷新
    let cache = request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());
    if let Some(cache) = &cache {
        if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
            if let Ok(response) = serde_json::from_str::<RankingsResponse>(&json) {
                return Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")));
            }
            cache.remove(&cache_key).await;
        }
    }

    let schedules = match storage.list_schedules().await {
        Ok(s) => s,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询场次列表失败: {e}"),
                )),
            );
        }
    };

    // 一个小组多场答辩时取最近一场（列表按答辩时间升序，后者覆盖）
    let mut latest_by_group: HashMap<i64, DefenseSchedule> = HashMap::new();
    for schedule in schedules {
        latest_by_group.insert(schedule.group_id, schedule);
    }

    let mut entries: Vec<RankEntry> = Vec::new();
    // 条目 ID -> 最近答辩时间
    let mut defense_times: HashMap<i64, chrono::DateTime<chrono::Utc>> = HashMap::new();

    for schedule in latest_by_group.values() {
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

        let evaluations = match storage.list_evaluations_by_schedule(schedule.id).await {
            Ok(rows) => rows,
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

        let aggregate =
            aggregate_schedule(schedule.id, schedule.group_id, &bundles, &criteria, &members);

        match params.target {
            RankTarget::Group => {
                let group_name = match storage.get_group_by_id(schedule.group_id).await {
                    Ok(Some(group)) => group.name,
                    Ok(None) => format!("group-{}", schedule.group_id),
                    Err(e) => {
                        return Ok(HttpResponse::InternalServerError().json(
                            ApiResponse::error_empty(
                                ErrorCode::InternalServerError,
                                format!("查询小组失败: {e}"),
                            ),
                        ));
                    }
                };
                defense_times.insert(schedule.group_id, schedule.defense_at);
                entries.push(RankEntry {
                    id: schedule.group_id,
                    percentage: aggregate.group_score,
                    submitted_count: aggregate.submitted_evaluations_count,
                    tie_break_key: group_name,
                });
            }
            RankTarget::Student => {
                for member in &aggregate.members {
                    defense_times.insert(member.student_id, schedule.defense_at);
                    entries.push(RankEntry {
                        id: member.student_id,
                        percentage: member.personal_score,
                        submitted_count: aggregate.submitted_evaluations_count,
                        tie_break_key: member.display_name.clone(),
                    });
                }
            }
        }
    }

    let ranked = rank(&entries);
    let items: Vec<RankingItem> = ranked
        .into_iter()
        .take(limit)
        .map(|entry| RankingItem {
            id: entry.id,
            name: entry.tie_break_key,
            percentage: entry.percentage,
            submitted_count: entry.submitted_count,
            last_defense_at: defense_times
                .get(&entry.id)
                .copied()
                .unwrap_or_default(),
            rank: entry.rank,
        })
        .collect();

    let response = RankingsResponse {
        target: params.target.to_string(),
        items,
    };

    if let Some(cache) = &cache {
        if let Ok(json) = serde_json::to_string(&response) {
            cache
                .insert_raw(
                    cache_key,
                    json,
                    AppConfig::get().evaluation.rankings_cache_ttl,
                )
                .await;
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
