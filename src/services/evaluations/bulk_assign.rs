use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::evaluations::responses::BulkAssignResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 为场次的全部评委批量建立评审记录
/// POST /schedules/{schedule_id}/assign-panel
///
/// 已有记录的评委原样跳过，返回本次新建的数量。
/// 逐个走幂等分配，评委名单变化或并发重试都不会产生重复行。
pub async fn bulk_assign_panel(
    service: &EvaluationService,
    request: &HttpRequest,
    schedule_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    let panelist_ids = match storage.list_schedule_panelists(schedule_id).await {
        Ok(ids) => ids,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询场次评委失败: {e}"),
                )),
            );
        }
    };

    let mut created_count: i64 = 0;
    for panelist_id in panelist_ids {
        match storage.assign_evaluator(schedule_id, panelist_id).await {
            Ok((_, created)) => {
                if created {
                    created_count += 1;
                }
            }
            Err(e) => {
                return Ok(crate::services::storage_error_response(
                    &e,
                    ErrorCode::EvaluationNotFound,
                ));
            }
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BulkAssignResponse {
            created: created_count,
        },
        "批量分配完成",
    )))
}
