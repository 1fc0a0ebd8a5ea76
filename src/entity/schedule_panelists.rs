//! 场次评委实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schedule_panelists")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub schedule_id: i64,
    pub panelist_id: i64,
    pub assigned_at: i64,
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
        from = "Column::PanelistId",
        to = "super::users::Column::Id"
    )]
    Panelist,
}

impl Related<super::defense_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Panelist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
