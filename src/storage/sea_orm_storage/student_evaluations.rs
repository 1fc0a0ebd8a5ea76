//! 学生自评存储操作
//!
//! 与评委评审相同的幂等领取模式：唯一索引兜底，冲突后回读。

use super::SeaOrmStorage;
use crate::entity::student_evaluations::{ActiveModel, Column, Entity as StudentEvaluations};
use crate::errors::{DefSystemError, Result};
use crate::models::evaluations::entities::EvaluationStatus;
use crate::models::student_evaluations::entities::StudentEvaluation;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

impl SeaOrmStorage {
    /// 领取（或返回已有）自评表
    pub async fn get_or_create_student_evaluation_impl(
        &self,
        schedule_id: i64,
        student_id: i64,
    ) -> Result<(StudentEvaluation, bool)> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            schedule_id: Set(schedule_id),
            student_id: Set(student_id),
            status: Set(EvaluationStatus::Pending.to_string()),
            content: Set(None),
            created_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok((inserted.into_student_evaluation(), true)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let existing = StudentEvaluations::find()
                    .filter(
                        Condition::all()
                            .add(Column::ScheduleId.eq(schedule_id))
                            .add(Column::StudentId.eq(student_id)),
                    )
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        DefSystemError::database_operation(format!("回读自评表失败: {e}"))
                    })?
                    .ok_or_else(|| {
                        DefSystemError::database_operation("唯一约束冲突后自评表不存在")
                    })?;
                Ok((existing.into_student_evaluation(), false))
            }
            Err(err) => Err(DefSystemError::database_operation(format!(
                "创建自评表失败: {err}"
            ))),
        }
    }

    /// 通过 ID 获取自评表
    pub async fn get_student_evaluation_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<StudentEvaluation>> {
        let result = StudentEvaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询自评表失败: {e}")))?;

        Ok(result.map(|m| m.into_student_evaluation()))
    }

    /// 提交自评表（仅 pending，可附带内容）
    pub async fn submit_student_evaluation_impl(
        &self,
        id: i64,
        content: Option<serde_json::Value>,
    ) -> Result<StudentEvaluation> {
        let existing = StudentEvaluations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询自评表失败: {e}")))?
            .ok_or_else(|| DefSystemError::not_found(format!("自评表 {id} 不存在")))?;

        let status: EvaluationStatus = existing
            .status
            .parse()
            .map_err(|_| DefSystemError::data_integrity(format!("非法自评状态: {}", existing.status)))?;

        if !status.can_submit() {
            return Err(DefSystemError::state_conflict(format!(
                "自评表 {id} 当前状态为 {status}，仅 pending 可提交"
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let mut update = ActiveModel {
            id: Set(id),
            status: Set(EvaluationStatus::Submitted.to_string()),
            submitted_at: Set(Some(now)),
            ..Default::default()
        };
        if let Some(content) = content {
            update.content = Set(Some(content.to_string()));
        }

        let updated = update
            .update(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交自评表失败: {e}")))?;

        Ok(updated.into_student_evaluation())
    }

    /// 列出场次下所有自评表
    pub async fn list_student_evaluations_by_schedule_impl(
        &self,
        schedule_id: i64,
    ) -> Result<Vec<StudentEvaluation>> {
        let rows = StudentEvaluations::find()
            .filter(Column::ScheduleId.eq(schedule_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询自评表列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_student_evaluation()).collect())
    }
}
