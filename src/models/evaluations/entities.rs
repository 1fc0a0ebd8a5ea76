use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评审状态机：pending -> submitted -> locked，
// 管理员可执行 locked -> submitted 的解锁回退。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub enum EvaluationStatus {
    Pending,   // 已分配，评委尚未提交
    Submitted, // 评委已提交
    Locked,    // 已锁定，非管理员不可变更
}

impl EvaluationStatus {
    pub const PENDING: &'static str = "pending";
    pub const SUBMITTED: &'static str = "submitted";
    pub const LOCKED: &'static str = "locked";

    /// 是否计入正式聚合（submitted 或 locked）
    pub fn is_qualifying(&self) -> bool {
        matches!(self, EvaluationStatus::Submitted | EvaluationStatus::Locked)
    }

    /// 是否允许提交（仅 pending）
    pub fn can_submit(&self) -> bool {
        matches!(self, EvaluationStatus::Pending)
    }

    /// 是否允许锁定（仅 submitted，不允许从 pending 直接锁定）
    pub fn can_lock(&self) -> bool {
        matches!(self, EvaluationStatus::Submitted)
    }

    /// 是否允许解锁（仅 locked，且必须走管理员审计通道）
    pub fn can_unlock(&self) -> bool {
        matches!(self, EvaluationStatus::Locked)
    }
}

impl<'de> Deserialize<'de> for EvaluationStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            EvaluationStatus::PENDING => Ok(EvaluationStatus::Pending),
            EvaluationStatus::SUBMITTED => Ok(EvaluationStatus::Submitted),
            EvaluationStatus::LOCKED => Ok(EvaluationStatus::Locked),
            _ => Err(serde::de::Error::custom(format!(
                "无效的评审状态: '{s}'. 支持的状态: pending, submitted, locked"
            ))),
        }
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationStatus::Pending => write!(f, "{}", EvaluationStatus::PENDING),
            EvaluationStatus::Submitted => write!(f, "{}", EvaluationStatus::SUBMITTED),
            EvaluationStatus::Locked => write!(f, "{}", EvaluationStatus::LOCKED),
        }
    }
}

impl std::str::FromStr for EvaluationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EvaluationStatus::Pending),
            "submitted" => Ok(EvaluationStatus::Submitted),
            "locked" => Ok(EvaluationStatus::Locked),
            _ => Err(format!("Invalid evaluation status: {s}")),
        }
    }
}

// 评审记录实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct Evaluation {
    // 唯一 ID
    pub id: i64,
    // 答辩场次 ID
    pub schedule_id: i64,
    // 评委 ID
    pub evaluator_id: i64,
    // 状态
    pub status: EvaluationStatus,
    // 扩展字段（半结构化：小组/系统/个人得分与评语等）
    pub extras: serde_json::Value,
    // 提交时间
    pub submitted_at: Option<chrono::DateTime<chrono::Utc>>,
    // 锁定时间
    pub locked_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Evaluation {
    /// 是否已锁定（locked_at 为准，而非 status 字符串）
    pub fn is_locked(&self) -> bool {
        self.locked_at.is_some()
    }
}

// 评分明细实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationScore {
    pub id: i64,
    pub evaluation_id: i64,
    pub criterion_id: i64,
    pub score: f64,
}

// 审计日志实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvaluationAudit {
    pub id: i64,
    pub actor_id: i64,
    pub action: String,
    pub entity: String,
    pub entity_id: i64,
    pub details: serde_json::Value,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in ["pending", "submitted", "locked"] {
            let status: EvaluationStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
        assert!("graded".parse::<EvaluationStatus>().is_err());
    }

    #[test]
    fn test_qualifying_states() {
        assert!(!EvaluationStatus::Pending.is_qualifying());
        assert!(EvaluationStatus::Submitted.is_qualifying());
        assert!(EvaluationStatus::Locked.is_qualifying());
    }

    #[test]
    fn test_transition_guards() {
        assert!(EvaluationStatus::Pending.can_submit());
        assert!(!EvaluationStatus::Submitted.can_submit());
        assert!(!EvaluationStatus::Locked.can_submit());

        assert!(!EvaluationStatus::Pending.can_lock());
        assert!(EvaluationStatus::Submitted.can_lock());
        assert!(!EvaluationStatus::Locked.can_lock());

        assert!(EvaluationStatus::Locked.can_unlock());
        assert!(!EvaluationStatus::Submitted.can_unlock());
    }
}
