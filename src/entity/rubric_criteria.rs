//! 评分项实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "rubric_criteria")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub template_id: i64,
    pub label: String,
    pub weight: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub position: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rubric_templates::Entity",
        from = "Column::TemplateId",
        to = "super::rubric_templates::Column::Id"
    )]
    Template,
}

impl Related<super::rubric_templates::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_criterion(self) -> crate::models::rubrics::entities::RubricCriterion {
        use crate::models::rubrics::entities::RubricCriterion;

        RubricCriterion {
            id: self.id,
            template_id: self.template_id,
            label: self.label,
            weight: self.weight,
            min_score: self.min_score,
            max_score: self.max_score,
            position: self.position,
        }
    }
}
