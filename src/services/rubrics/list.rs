use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RubricService;
use crate::models::rubrics::requests::{RubricListParams, RubricListQuery};
use crate::models::{ApiResponse, ErrorCode};

/// 列出评分细则模板
/// GET /rubrics
pub async fn list_rubric_templates(
    service: &RubricService,
    request: &HttpRequest,
    params: RubricListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = RubricListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        active: params.active,
    };

    match storage.list_rubric_templates_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询模板列表失败: {e}"),
            )),
        ),
    }
}
