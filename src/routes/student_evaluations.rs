use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::student_evaluations::requests::SubmitStudentEvaluationRequest;
use crate::services::StudentEvaluationService;
use crate::utils::SafeIDI64;

// 懒加载的全局 StudentEvaluationService 实例
static STUDENT_EVALUATION_SERVICE: Lazy<StudentEvaluationService> =
    Lazy::new(StudentEvaluationService::new_lazy);

// 提交自评表
pub async fn submit_student_evaluation(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitStudentEvaluationRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_EVALUATION_SERVICE
        .submit_student_evaluation(&req, path.0, body.into_inner())
        .await
}

// 配置路由（领取自评表的入口在场次路由下）
pub fn configure_student_evaluations_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student-evaluations")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}/submit")
                    // 提交自评 - 仅本人（归属校验在业务层）
                    .route(web::post().to(submit_student_evaluation)),
            ),
    );
}
