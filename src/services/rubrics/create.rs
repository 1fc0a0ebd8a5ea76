use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RubricService;
use crate::models::rubrics::requests::CreateRubricTemplateRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::scoring::rubric::{EXPECTED_WEIGHT_SUM, WEIGHT_SUM_TOLERANCE};

/// 创建评分细则模板（管理员）
/// POST /rubrics
///
/// 创建即校验权重之和为 100；历史数据可能不满足，
/// 聚合时还会再检查一次并降级为警告。
pub async fn create_rubric_template(
    service: &RubricService,
    request: &HttpRequest,
    req: CreateRubricTemplateRequest,
) -> ActixResult<HttpResponse> {
    if req.name.trim().is_empty() {
        return Ok(
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::Validation,
                "模板名称不能为空",
            )),
        );
    }

    if req.criteria.is_empty() {
        return Ok(
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::Validation,
                "模板至少需要一个评分项",
            )),
        );
    }

    for criterion in &req.criteria {
        if criterion.label.trim().is_empty() {
            return Ok(
                HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::Validation,
                    "评分项名称不能为空",
                )),
            );
        }
        if criterion.weight <= 0.0 {
            return Ok(
                HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::Validation,
                    format!("评分项 {} 的权重必须为正数", criterion.label),
                )),
            );
        }
        if criterion.min_score >= criterion.max_score {
            return Ok(
                HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                    ErrorCode::Validation,
                    format!("评分项 {} 的分数范围非法", criterion.label),
                )),
            );
        }
    }

    let weight_sum: f64 = req.criteria.iter().map(|c| c.weight).sum();
    if (weight_sum - EXPECTED_WEIGHT_SUM).abs() > WEIGHT_SUM_TOLERANCE {
        return Ok(
            HttpResponse::UnprocessableEntity().json(ApiResponse::error_empty(
                ErrorCode::WeightSumInvalid,
                format!("评分项权重之和为 {weight_sum}，应为 100"),
            )),
        );
    }

    let storage = service.get_storage(request);
    match storage.create_rubric_template(req).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "创建成功"))),
        Err(e) => Ok(crate::services::storage_error_response(
            &e,
            ErrorCode::TemplateNotFound,
        )),
    }
}
