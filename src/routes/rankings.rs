use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::rankings::requests::RankingsParams;
use crate::services::RankingService;

// 懒加载的全局 RankingService 实例
static RANKING_SERVICE: Lazy<RankingService> = Lazy::new(RankingService::new_lazy);

// 排行榜
pub async fn list_rankings(
    req: HttpRequest,
    query: web::Query<RankingsParams>,
) -> ActixResult<HttpResponse> {
    RANKING_SERVICE.list_rankings(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_rankings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/rankings")
            .wrap(middlewares::RequireJWT)
            // 排行榜 - 所有登录用户可访问
            .service(web::resource("").route(web::get().to(list_rankings))),
    );
}
