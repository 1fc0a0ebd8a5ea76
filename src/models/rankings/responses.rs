use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::rankings::entities::ScheduleAggregate;
use crate::models::student_evaluations::responses::StudentEvaluationSummary;

// 聚合查询响应：聚合结果 + 学生自评状态摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/aggregate.ts")]
pub struct ScheduleAggregateResponse {
    pub aggregate: ScheduleAggregate,
    pub student_evaluations: Vec<StudentEvaluationSummary>,
}

// 排行榜条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub struct RankingItem {
    // 小组或学生 ID（取决于 target）
    pub id: i64,
    pub name: String,
    // 综合百分比；没有任何有效评审时为 null，排在榜尾
    pub percentage: Option<f64>,
    // 计入聚合的评审数，展示时必须与百分比一起呈现
    pub submitted_count: i64,
    // 最近一次答辩时间
    pub last_defense_at: chrono::DateTime<chrono::Utc>,
    // 名次（竞赛排名：并列共享名次，下一名次跳过并列数）
    pub rank: i64,
}

// 排行榜响应
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub struct RankingsResponse {
    pub target: String,
    pub items: Vec<RankingItem>,
}
