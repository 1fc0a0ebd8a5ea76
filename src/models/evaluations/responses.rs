use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::evaluations::entities::{Evaluation, EvaluationAudit, EvaluationScore};

// 分配结果：created=false 表示该评委已有记录（幂等）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct AssignEvaluatorResponse {
    pub evaluation: Evaluation,
    pub created: bool,
}

// 批量分配结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct BulkAssignResponse {
    pub created: i64,
}

// 评审详情（含评分明细）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationDetailResponse {
    pub evaluation: Evaluation,
    pub scores: Vec<EvaluationScore>,
}

// 场次评审列表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationListResponse {
    pub items: Vec<Evaluation>,
}

// 提交校验失败时返回缺失的评分项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct MissingCriteriaResponse {
    pub missing_criterion_ids: Vec<i64>,
}

// 审计日志列表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct AuditListResponse {
    pub items: Vec<EvaluationAudit>,
}
