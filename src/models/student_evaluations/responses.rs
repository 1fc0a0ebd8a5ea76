use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::evaluations::entities::EvaluationStatus;
use crate::models::student_evaluations::entities::StudentEvaluation;

// 自评表领取/查询结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_evaluation.ts")]
pub struct StudentEvaluationResponse {
    pub student_evaluation: StudentEvaluation,
    pub created: bool,
}

// 聚合结果旁展示的自评状态摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_evaluation.ts")]
pub struct StudentEvaluationSummary {
    pub student_id: i64,
    pub status: EvaluationStatus,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
}
