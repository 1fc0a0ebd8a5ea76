use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评分细则模板（版本化）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct RubricTemplate {
    // 唯一 ID
    pub id: i64,
    // 模板名称
    pub name: String,
    // 版本号（单调递增）
    pub version: i64,
    // 是否启用
    pub active: bool,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 评分项
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rubric.ts")]
pub struct RubricCriterion {
    // 唯一 ID
    pub id: i64,
    // 所属模板 ID
    pub template_id: i64,
    // 评分项名称
    pub label: String,
    // 权重（百分点，同一模板之和应为 100）
    pub weight: f64,
    // 最低分
    pub min_score: f64,
    // 最高分
    pub max_score: f64,
    // 展示顺序
    pub position: i64,
}
