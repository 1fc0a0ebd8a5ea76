use serde::Deserialize;
use ts_rs::TS;

/// 提交学生自评请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student_evaluation.ts")]
pub struct SubmitStudentEvaluationRequest {
    pub content: Option<serde_json::Value>,
}
