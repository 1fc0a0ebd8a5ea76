pub mod create;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::rubrics::requests::{CreateRubricTemplateRequest, RubricListParams};
use crate::storage::Storage;

pub struct RubricService {
    storage: Option<Arc<dyn Storage>>,
}

impl RubricService {
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

    pub async fn create_rubric_template(
        &self,
        request: &HttpRequest,
        req: CreateRubricTemplateRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_rubric_template(self, request, req).await
    }

    pub async fn get_rubric_template(
        &self,
        request: &HttpRequest,
        template_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_rubric_template(self, request, template_id).await
    }

    pub async fn list_rubric_templates(
        &self,
        request: &HttpRequest,
        params: RubricListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_rubric_templates(self, request, params).await
    }
}
