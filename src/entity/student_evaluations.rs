//! 学生自评反馈实体
//!
//! 学生对自己答辩的反馈表，一名学生在一个场次只有一条记录，
//! 独立生命周期，不参与评委评分聚合。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub schedule_id: i64,
    pub student_id: i64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    pub submitted_at: Option<i64>,
    pub locked_at: Option<i64>,
    pub created_at: i64,
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
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
}

impl Related<super::defense_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_student_evaluation(
        self,
    ) -> crate::models::student_evaluations::entities::StudentEvaluation {
        use crate::models::evaluations::entities::EvaluationStatus;
        use crate::models::student_evaluations::entities::StudentEvaluation;
        use chrono::{DateTime, Utc};

        StudentEvaluation {
            id: self.id,
            schedule_id: self.schedule_id,
            student_id: self.student_id,
            status: self
                .status
                .parse::<EvaluationStatus>()
                .unwrap_or(EvaluationStatus::Pending),
            content: self
                .content
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
        }
    }
}
