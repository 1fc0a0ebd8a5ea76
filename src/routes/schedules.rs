use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::users::entities::UserRole;
use crate::services::{EvaluationService, ScheduleService, StudentEvaluationService};
use crate::utils::SafeScheduleIdI64;

// 懒加载的全局服务实例
static SCHEDULE_SERVICE: Lazy<ScheduleService> = Lazy::new(ScheduleService::new_lazy);
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);
static STUDENT_EVALUATION_SERVICE: Lazy<StudentEvaluationService> =
    Lazy::new(StudentEvaluationService::new_lazy);

// 获取场次聚合结果
pub async fn get_schedule_aggregate(
    req: HttpRequest,
    path: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    SCHEDULE_SERVICE.get_schedule_aggregate(&req, path.0).await
}

// 列出场次下的评审
pub async fn list_schedule_evaluations(
    req: HttpRequest,
    path: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE
        .list_schedule_evaluations(&req, path.0)
        .await
}

// 批量分配场次评委
pub async fn bulk_assign_panel(
    req: HttpRequest,
    path: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    EVALUATION_SERVICE.bulk_assign_panel(&req, path.0).await
}

// 学生领取自评表
pub async fn claim_student_evaluation(
    req: HttpRequest,
    path: SafeScheduleIdI64,
) -> ActixResult<HttpResponse> {
    STUDENT_EVALUATION_SERVICE
        .claim_student_evaluation(&req, path.0)
        .await
}

// 配置路由
pub fn configure_schedules_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{schedule_id}/aggregate")
                    // 聚合结果 - 所有登录用户可看（pending 本就不计入）
                    .route(web::get().to(get_schedule_aggregate)),
            )
            .service(
                web::resource("/{schedule_id}/evaluations")
                    // 评审列表 - 评委和管理员（草稿过滤在业务层）
                    .route(
                        web::get()
                            .to(list_schedule_evaluations)
                            .wrap(middlewares::RequireRole::new_any(UserRole::panelist_roles())),
                    ),
            )
            .service(
                web::resource("/{schedule_id}/assign-panel")
                    // 批量分配 - 仅管理员
                    .route(
                        web::post()
                            .to(bulk_assign_panel)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{schedule_id}/student-evaluation")
                    // 领取自评表 - 登录学生（成员校验在业务层）
                    .route(web::post().to(claim_student_evaluation)),
            ),
    );
}
