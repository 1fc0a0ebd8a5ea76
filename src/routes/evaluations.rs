use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::evaluations::requests::{
    AssignEvaluatorRequest, SaveScoresRequest, UnassignParams, UnlockEvaluationRequest,
};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::EvaluationService;
use crate::utils::SafeEvaluationIdI64;

// 懒加载的全局 EvaluationService 实例
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// 分配评委
pub async fn assign_evaluator(
    req: HttpRequest,
    body: web::Json<AssignEvaluatorRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .assign_evaluator(&req, body.into_inner())
        .await
}

// 获取评审详情
pub async fn get_evaluation(
    req: HttpRequest,
    path: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.get_evaluation(&req, path.0).await
}

// 保存评分
pub async fn save_scores(
    req: HttpRequest,
    path: SafeEvaluationIdI64,
    body: web::Json<SaveScoresRequest>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .save_scores(&req, path.0, body.into_inner())
        .await
}

// 提交评审
pub async fn submit_evaluation(
    req: HttpRequest,
    path: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.submit_evaluation(&req, path.0).await
}

// 锁定评审
pub async fn lock_evaluation(
    req: HttpRequest,
    path: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.lock_evaluation(&req, path.0).await
}

// 管理员解锁评审
pub async fn unlock_evaluation(
    req: HttpRequest,
    path: SafeEvaluationIdI64,
    body: web::Json<UnlockEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    let actor = match RequireJWT::extract_user_claims(&req) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };
    // 双保险：路由层已有 RequireRole，这里再确认一次管理员身份
    if actor.role != UserRole::Admin {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "仅管理员可解锁评审",
        )));
    }

    EVALUATION_SERVICE
        .unlock_evaluation(&req, path.0, body.into_inner())
        .await
}

// 取消分配（删除评审）
pub async fn unassign_evaluator(
    req: HttpRequest,
    path: SafeEvaluationIdI64,
    query: web::Query<UnassignParams>,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .unassign_evaluator(&req, path.0, query.into_inner())
        .await
}

// 获取评审审计日志
pub async fn list_evaluation_audits(
    req: HttpRequest,
    path: SafeEvaluationIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_evaluation_audits(&req, path.0)
        .await
}

// 配置路由
pub fn configure_evaluations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/evaluations")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/assign")
                    // 分配评委 - 评委和管理员
                    .route(
                        web::post()
                            .to(assign_evaluator)
                            .wrap(middlewares::RequireRole::new_any(UserRole::panelist_roles())),
                    ),
            )
            .service(
                web::resource("/{evaluation_id}")
                    // 评审详情 - 归属校验在业务层（本人或管理员）
                    .route(web::get().to(get_evaluation))
                    // 取消分配 - 仅管理员，锁定记录需 force
                    .route(
                        web::delete()
                            .to(unassign_evaluator)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{evaluation_id}/scores")
                    // 保存评分 - 评委和管理员（归属校验在业务层）
                    .route(
                        web::put()
                            .to(save_scores)
                            .wrap(middlewares::RequireRole::new_any(UserRole::panelist_roles())),
                    ),
            )
            .service(
                web::resource("/{evaluation_id}/submit")
                    // 提交评审 - 评委和管理员（归属校验在业务层）
                    .route(
                        web::post()
                            .to(submit_evaluation)
                            .wrap(middlewares::RequireRole::new_any(UserRole::panelist_roles())),
                    ),
            )
            .service(
                web::resource("/{evaluation_id}/lock")
                    // 锁定 - 仅管理员
                    .route(
                        web::post()
                            .to(lock_evaluation)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{evaluation_id}/unlock")
                    // 解锁 - 仅管理员，必须审计
                    .route(
                        web::post()
                            .to(unlock_evaluation)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{evaluation_id}/audits")
                    // 审计日志 - 仅管理员
                    .route(
                        web::get()
                            .to(list_evaluation_audits)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
