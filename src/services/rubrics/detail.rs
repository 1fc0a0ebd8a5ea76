use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RubricService;
use crate::models::{ApiResponse, ErrorCode};

/// 获取模板详情（含评分项）
/// GET /rubrics/{template_id}
pub async fn get_rubric_template(
    service: &RubricService,
    request: &HttpRequest,
    template_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_rubric_template_with_criteria(template_id).await {
        Ok(Some(response)) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TemplateNotFound,
            "评分细则模板不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询模板失败: {e}"),
            )),
        ),
    }
}
