use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::pagination::PaginationInfo;
use crate::models::rubrics::entities::{RubricCriterion, RubricTemplate};

// 模板详情（含评分项）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct RubricTemplateResponse {
    pub template: RubricTemplate,
    pub criteria: Vec<RubricCriterion>,
}

// 模板列表响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct RubricListResponse {
    pub items: Vec<RubricTemplate>,
    pub pagination: PaginationInfo,
}
