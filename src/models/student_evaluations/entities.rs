use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::evaluations::entities::EvaluationStatus;

// 学生自评反馈实体
//
// 与评委评审（Evaluation）相互独立：不贡献评分，
// 仅作为答辩聚合结果旁的反馈信息展示。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_evaluation.ts")]
pub struct StudentEvaluation {
    pub id: i64,
    pub schedule_id: i64,
    pub student_id: i64,
    pub status: EvaluationStatus,
    pub content: serde_json::Value,
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    pub locked_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
