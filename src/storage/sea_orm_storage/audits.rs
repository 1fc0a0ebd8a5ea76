//! 审计日志存储操作
//!
//! 审计写入必须与触发它的状态变更在同一事务内：
//! 审计写失败则整个操作回滚，保证"无审计不越权"。

use super::SeaOrmStorage;
use crate::entity::evaluation_audits::{ActiveModel, Column, Entity as EvaluationAudits};
use crate::errors::{DefSystemError, Result};
use crate::models::evaluations::entities::EvaluationAudit;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

/// 在给定连接（通常是进行中的事务）上追加一条审计记录
pub(crate) async fn insert_audit<C: ConnectionTrait>(
    conn: &C,
    actor_id: i64,
    action: &str,
    entity: &str,
    entity_id: i64,
    details: serde_json::Value,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    ActiveModel {
        actor_id: Set(actor_id),
        action: Set(action.to_string()),
        entity: Set(entity.to_string()),
        entity_id: Set(entity_id),
        details: Set(Some(details.to_string())),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| DefSystemError::database_operation(format!("写入审计日志失败: {e}")))?;

    Ok(())
}

impl SeaOrmStorage {
    /// 列出某条评审的审计日志（新到旧）
    pub async fn list_evaluation_audits_impl(&self, entity_id: i64) -> Result<Vec<EvaluationAudit>> {
        let rows = EvaluationAudits::find()
            .filter(Column::EntityId.eq(entity_id))
            .filter(Column::Entity.eq("evaluation"))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询审计日志失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_audit()).collect())
    }
}
