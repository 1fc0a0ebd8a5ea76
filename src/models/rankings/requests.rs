use serde::Deserialize;
use ts_rs::TS;

// 排名对象：按小组或按学生个人
#[derive(Debug, Clone, Copy, PartialEq, Eq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub enum RankTarget {
    Group,
    Student,
}

impl<'de> Deserialize<'de> for RankTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "group" => Ok(RankTarget::Group),
            "student" => Ok(RankTarget::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的排名对象: '{s}'. 支持: group, student"
            ))),
        }
    }
}

impl std::fmt::Display for RankTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankTarget::Group => write!(f, "group"),
            RankTarget::Student => write!(f, "student"),
        }
    }
}

/// 排行榜查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ranking.ts")]
pub struct RankingsParams {
    pub target: RankTarget,
    pub limit: Option<i64>,
}
