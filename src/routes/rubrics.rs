use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::rubrics::requests::{CreateRubricTemplateRequest, RubricListParams};
use crate::models::users::entities::UserRole;
use crate::services::RubricService;
use crate::utils::SafeTemplateIdI64;

// 懒加载的全局 RubricService 实例
static RUBRIC_SERVICE: Lazy<RubricService> = Lazy::new(RubricService::new_lazy);

// 列出模板
pub async fn list_rubric_templates(
    req: HttpRequest,
    query: web::Query<RubricListParams>,
) -> ActixResult<HttpResponse> {
    RUBRIC_SERVICE
        .list_rubric_templates(&req, query.into_inner())
        .await
}

// 创建模板
pub async fn create_rubric_template(
    req: HttpRequest,
    body: web::Json<CreateRubricTemplateRequest>,
) -> ActixResult<HttpResponse> {
    RUBRIC_SERVICE
        .create_rubric_template(&req, body.into_inner())
        .await
}

// 获取模板详情
pub async fn get_rubric_template(
    req: HttpRequest,
    path: SafeTemplateIdI64,
) -> ActixResult<HttpResponse> {
    RUBRIC_SERVICE.get_rubric_template(&req, path.0).await
}

// 配置路由
pub fn configure_rubrics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/rubrics")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出模板 - 所有登录用户可访问
                    .route(web::get().to(list_rubric_templates))
                    // 创建模板 - 仅管理员
                    .route(
                        web::post()
                            .to(create_rubric_template)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{template_id}")
                    // 模板详情 - 所有登录用户可访问
                    .route(web::get().to(get_rubric_template)),
            ),
    );
}
