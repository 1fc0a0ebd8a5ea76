use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 答辩小组
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct DefenseGroup {
    pub id: i64,
    pub name: String,
    pub thesis_title: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 小组成员（含展示名，供聚合与排名使用）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct GroupMember {
    pub student_id: i64,
    pub display_name: String,
}

// 答辩场次
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct DefenseSchedule {
    pub id: i64,
    // 受评小组 ID
    pub group_id: i64,
    // 本场次使用的评分细则模板 ID
    pub rubric_template_id: i64,
    // 答辩时间
    pub defense_at: chrono::DateTime<chrono::Utc>,
    // 答辩教室
    pub room: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
