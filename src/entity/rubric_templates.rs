//! 评分细则模板实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rubric_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub version: i64,
    pub active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::rubric_criteria::Entity")]
    RubricCriteria,
    #[sea_orm(has_many = "super::defense_schedules::Entity")]
    DefenseSchedules,
}

impl Related<super::rubric_criteria::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RubricCriteria.def()
    }
}

impl Related<super::defense_schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DefenseSchedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_template(self) -> crate::models::rubrics::entities::RubricTemplate {
        use crate::models::rubrics::entities::RubricTemplate;
        use chrono::{DateTime, Utc};

        RubricTemplate {
            id: self.id,
            name: self.name,
            version: self.version,
            active: self.active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
