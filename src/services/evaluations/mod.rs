pub mod assign;
pub mod audits;
pub mod bulk_assign;
pub mod detail;
pub mod list;
pub mod lock;
pub mod scores;
pub mod submit;
pub mod unassign;
pub mod unlock;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::evaluations::requests::{
    AssignEvaluatorRequest, SaveScoresRequest, UnassignParams, UnlockEvaluationRequest,
};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl EvaluationService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn assign_evaluator(
        &self,
        request: &HttpRequest,
        req: AssignEvaluatorRequest,
    ) -> ActixResult<HttpResponse> {
        assign::assign_evaluator(self, request, req).await
    }

    pub async fn bulk_assign_panel(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        bulk_assign::bulk_assign_panel(self, request, schedule_id).await
    }

    pub async fn save_scores(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        req: SaveScoresRequest,
    ) -> ActixResult<HttpResponse> {
        scores::save_scores(self, request, evaluation_id, req).await
    }

    pub async fn submit_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        submit::submit_evaluation(self, request, evaluation_id).await
    }

    pub async fn lock_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        lock::lock_evaluation(self, request, evaluation_id).await
    }

    pub async fn unlock_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        req: UnlockEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        unlock::unlock_evaluation(self, request, evaluation_id, req).await
    }

    pub async fn unassign_evaluator(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
        params: UnassignParams,
    ) -> ActixResult<HttpResponse> {
        unassign::unassign_evaluator(self, request, evaluation_id, params).await
    }

    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_evaluation(self, request, evaluation_id).await
    }

    pub async fn list_schedule_evaluations(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_schedule_evaluations(self, request, schedule_id).await
    }

    pub async fn list_evaluation_audits(
        &self,
        request: &HttpRequest,
        evaluation_id: i64,
    ) -> ActixResult<HttpResponse> {
        audits::list_evaluation_audits(self, request, evaluation_id).await
    }
}
