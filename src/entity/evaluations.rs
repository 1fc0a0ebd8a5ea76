//! 评审记录实体
//!
//! 每条记录对应一位评委对一个答辩场次的评审，
//! (schedule_id, evaluator_id) 上的唯一索引是幂等分配的依据。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub schedule_id: i64,
    pub evaluator_id: i64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub extras: Option<String>,
    pub submitted_at: Option<i64>,
    pub locked_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::defense_schedules::Entity",
        from = "Column::ScheduleId",
        to = "super::defense_schedules::Column::Id"
    )]
    Schedule,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EvaluatorId",
        to = "super::users::Column::Id"
    )]
    Evaluator,
    #[sea_orm(has_many = "super::evaluation_scores::Entity")]
    EvaluationScores,
}

impl Related<super::defense_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluator.def()
    }
}

impl Related<super::evaluation_scores::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EvaluationScores.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::{Evaluation, EvaluationStatus};
        use chrono::{DateTime, Utc};

        Evaluation {
            id: self.id,
            schedule_id: self.schedule_id,
            evaluator_id: self.evaluator_id,
            status: self
                .status
                .parse::<EvaluationStatus>()
                .unwrap_or(EvaluationStatus::Pending),
            extras: self
                .extras
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok())
                .unwrap_or(serde_json::Value::Null),
            submitted_at: self
                .submitted_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            locked_at: self
                .locked_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
