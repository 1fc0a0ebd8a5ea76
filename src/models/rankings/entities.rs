use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 单个成员的聚合结果
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/aggregate.ts")]
pub struct MemberAggregate {
    pub student_id: i64,
    pub display_name: String,
    // 跨评委个人得分均值；没有任何评委给出个人分时为 null
    pub personal_score: Option<f64>,
    // 给出个人分的评委数量
    pub personal_entries: i64,
    // 评委给该成员的个人评语
    pub comments: Vec<String>,
}

// 一个答辩场次的聚合结果
//
// 只统计 submitted/locked 的评审；pending 只是评委草稿。
// 均值在零条有效输入时为 null 而不是 0。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/aggregate.ts")]
pub struct ScheduleAggregate {
    pub schedule_id: i64,
    pub group_id: i64,
    // 小组得分（百分比），跨评委均值
    pub group_score: Option<f64>,
    // 系统/作品得分，跨评委均值
    pub system_score: Option<f64>,
    // 各成员个人得分
    pub members: Vec<MemberAggregate>,
    // 计入聚合的评审数（submitted + locked），覆盖度信号
    pub submitted_evaluations_count: i64,
    // 已分配的评审总数
    pub assigned_evaluations_count: i64,
    // 出现孤儿评分或模板配置问题时为 true
    pub partial: bool,
    // 数据质量警告（不会阻塞读取）
    pub warnings: Vec<String>,
}
