pub mod claim;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::student_evaluations::requests::SubmitStudentEvaluationRequest;
use crate::storage::Storage;

pub struct StudentEvaluationService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentEvaluationService {
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

    pub async fn claim_student_evaluation(
        &self,
        request: &HttpRequest,
        schedule_id: i64,
    ) -> ActixResult<HttpResponse> {
        claim::claim_student_evaluation(self, request, schedule_id).await
    }

    pub async fn submit_student_evaluation(
        &self,
        request: &HttpRequest,
        id: i64,
        req: SubmitStudentEvaluationRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_student_evaluation(self, request, id, req).await
    }
}
