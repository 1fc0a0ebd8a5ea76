//! 答辩场次实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "defense_schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub group_id: i64,
    pub rubric_template_id: i64,
    pub defense_at: i64,
    pub room: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::defense_groups::Entity",
        from = "Column::GroupId",
        to = "super::defense_groups::Column::Id"
    )]
    Group,
    #[sea_orm(
        belongs_to = "super::rubric_templates::Entity",
        from = "Column::RubricTemplateId",
        to = "super::rubric_templates::Column::Id"
    )]
    RubricTemplate,
    #[sea_orm(has_many = "super::evaluations::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::schedule_panelists::Entity")]
    SchedulePanelists,
    #[sea_orm(has_many = "super::student_evaluations::Entity")]
    StudentEvaluations,
}

impl Related<super::defense_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Group.def()
    }
}

impl Related<super::rubric_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RubricTemplate.def()
    }
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::schedule_panelists::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchedulePanelists.def()
    }
}

impl Related<super::student_evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentEvaluations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_schedule(self) -> crate::models::schedules::entities::DefenseSchedule {
        use crate::models::schedules::entities::DefenseSchedule;
        use chrono::{DateTime, Utc};

        DefenseSchedule {
            id: self.id,
            group_id: self.group_id,
            rubric_template_id: self.rubric_template_id,
            defense_at: DateTime::<Utc>::from_timestamp(self.defense_at, 0).unwrap_or_default(),
            room: self.room,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
