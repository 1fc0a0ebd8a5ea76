use serde::Deserialize;
use ts_rs::TS;

/// 分配评委请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct AssignEvaluatorRequest {
    pub schedule_id: i64,
    pub evaluator_id: i64,
}

/// 单项评分
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct ScoreEntry {
    pub criterion_id: i64,
    pub score: f64,
}

/// 保存评分请求（逐项评分 + 扩展字段）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct SaveScoresRequest {
    pub scores: Vec<ScoreEntry>,
    pub extras: Option<serde_json::Value>,
}

/// 管理员解锁请求（必须给出原因，写入审计日志）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct UnlockEvaluationRequest {
    pub reason: String,
}

/// 取消分配（删除）查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct UnassignParams {
    pub force: Option<bool>,
    pub reason: Option<String>,
}
