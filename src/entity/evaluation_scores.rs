//! 评分明细实体
//!
//! criterion_id 是弱引用：评分项被删除后明细仍可能存在，
//! 聚合层负责检测并排除这类孤儿评分。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluation_scores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub evaluation_id: i64,
    pub criterion_id: i64,
    pub score: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::evaluations::Entity",
        from = "Column::EvaluationId",
        to = "super::evaluations::Column::Id"
    )]
    Evaluation,
}

impl Related<super::evaluations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_score(self) -> crate::models::evaluations::entities::EvaluationScore {
        use crate::models::evaluations::entities::EvaluationScore;

        EvaluationScore {
            id: self.id,
            evaluation_id: self.evaluation_id,
            criterion_id: self.criterion_id,
            score: self.score,
        }
    }
}
