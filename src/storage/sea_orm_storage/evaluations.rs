//! 评审记录存储操作
//!
//! 状态机不变量（唯一分配、pending->submitted->locked、锁定
//! 后不可变、越权必审计）全部在这里的单行事务内维护。

use std::collections::HashSet;

use super::{SeaOrmStorage, audits};
use crate::entity::defense_schedules::Entity as DefenseSchedules;
use crate::entity::evaluation_scores::{
    ActiveModel as ScoreActiveModel, Column as ScoreColumn, Entity as EvaluationScores,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations};
use crate::entity::rubric_criteria::{Column as CriterionColumn, Entity as RubricCriteria};
use crate::errors::{DefSystemError, Result};
use crate::models::evaluations::{
    entities::{Evaluation, EvaluationScore, EvaluationStatus},
    requests::ScoreEntry,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait,
};
use serde_json::json;

impl SeaOrmStorage {
    /// 分配评委：插入或返回已有记录
    ///
    /// 幂等性由 (schedule_id, evaluator_id) 唯一索引保证：
    /// 先插入、唯一冲突后回读，而不是先查再插（后者存在竞态窗口）。
    pub async fn assign_evaluator_impl(
        &self,
        schedule_id: i64,
        evaluator_id: i64,
    ) -> Result<(Evaluation, bool)> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            schedule_id: Set(schedule_id),
            evaluator_id: Set(evaluator_id),
            status: Set(EvaluationStatus::Pending.to_string()),
            extras: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        match model.insert(&self.db).await {
            Ok(inserted) => Ok((inserted.into_evaluation(), true)),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let existing = Evaluations::find()
                    .filter(
                        Condition::all()
                            .add(Column::ScheduleId.eq(schedule_id))
                            .add(Column::EvaluatorId.eq(evaluator_id)),
                    )
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        DefSystemError::database_operation(format!("回读评审记录失败: {e}"))
                    })?
                    .ok_or_else(|| {
                        DefSystemError::database_operation("唯一约束冲突后评审记录不存在")
                    })?;
                Ok((existing.into_evaluation(), false))
            }
            Err(err) => Err(DefSystemError::database_operation(format!(
                "分配评委失败: {err}"
            ))),
        }
    }

    /// 通过 ID 获取评审
    pub async fn get_evaluation_by_id_impl(&self, evaluation_id: i64) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(evaluation_id)
            .one(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评审失败: {e}")))?;

        Ok(result.map(|m| m.into_evaluation()))
    }

    /// 列出场次下的评审
    pub async fn list_evaluations_by_schedule_impl(
        &self,
        schedule_id: i64,
    ) -> Result<Vec<Evaluation>> {
        let rows = Evaluations::find()
            .filter(Column::ScheduleId.eq(schedule_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评审列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_evaluation()).collect())
    }

    /// 列出一条评审的评分明细
    pub async fn list_evaluation_scores_impl(
        &self,
        evaluation_id: i64,
    ) -> Result<Vec<EvaluationScore>> {
        let rows = EvaluationScores::find()
            .filter(ScoreColumn::EvaluationId.eq(evaluation_id))
            .order_by_asc(ScoreColumn::CriterionId)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评分明细失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_score()).collect())
    }

    /// 批量列出多条评审的评分明细（聚合用，一次查询）
    pub async fn list_evaluation_scores_for_evaluations_impl(
        &self,
        evaluation_ids: &[i64],
    ) -> Result<Vec<EvaluationScore>> {
        if evaluation_ids.is_empty() {
            return Ok(vec![]);
        }

        let rows = EvaluationScores::find()
            .filter(ScoreColumn::EvaluationId.is_in(evaluation_ids.to_vec()))
            .order_by_asc(ScoreColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评分明细失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_score()).collect())
    }

    /// 保存评分明细与扩展字段
    ///
    /// 锁定后的评审拒绝一切写入（StateConflict）；
    /// 逐项评分按 (evaluation_id, criterion_id) 覆盖更新。
    pub async fn save_evaluation_scores_impl(
        &self,
        evaluation_id: i64,
        entries: Vec<ScoreEntry>,
        extras: Option<serde_json::Value>,
    ) -> Result<Evaluation> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let evaluation = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评审失败: {e}")))?
            .ok_or_else(|| DefSystemError::not_found(format!("评审 {evaluation_id} 不存在")))?;

        if evaluation.locked_at.is_some() {
            return Err(DefSystemError::state_conflict(format!(
                "评审 {evaluation_id} 已锁定（当前状态: {}），不可修改评分",
                evaluation.status
            )));
        }

        let now = chrono::Utc::now().timestamp();

        for entry in entries {
            let existing = EvaluationScores::find()
                .filter(
                    Condition::all()
                        .add(ScoreColumn::EvaluationId.eq(evaluation_id))
                        .add(ScoreColumn::CriterionId.eq(entry.criterion_id)),
                )
                .one(&txn)
                .await
                .map_err(|e| DefSystemError::database_operation(format!("查询评分失败: {e}")))?;

            match existing {
                Some(row) => {
                    ScoreActiveModel {
                        id: Set(row.id),
                        score: Set(entry.score),
                        ..Default::default()
                    }
                    .update(&txn)
                    .await
                    .map_err(|e| {
                        DefSystemError::database_operation(format!("更新评分失败: {e}"))
                    })?;
                }
                None => {
                    ScoreActiveModel {
                        evaluation_id: Set(evaluation_id),
                        criterion_id: Set(entry.criterion_id),
                        score: Set(entry.score),
                        ..Default::default()
                    }
                    .insert(&txn)
                    .await
                    .map_err(|e| {
                        DefSystemError::database_operation(format!("写入评分失败: {e}"))
                    })?;
                }
            }
        }

        let mut update = ActiveModel {
            id: Set(evaluation_id),
            updated_at: Set(now),
            ..Default::default()
        };
        if let Some(extras) = extras {
            update.extras = Set(Some(extras.to_string()));
        }
        let updated = update
            .update(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("更新评审失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated.into_evaluation())
    }

    /// 提交评审
    ///
    /// 仅 pending 可提交；提交前场次模板的所有评分项都必须已
    /// 评分，否则返回列出缺失项的校验错误。`lock_on_submit`
    /// 为真时在同一事务内顺带锁定。
    pub async fn submit_evaluation_impl(
        &self,
        evaluation_id: i64,
        lock_on_submit: bool,
    ) -> Result<Evaluation> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let evaluation = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评审失败: {e}")))?
            .ok_or_else(|| DefSystemError::not_found(format!("评审 {evaluation_id} 不存在")))?;

        let status: EvaluationStatus = evaluation
            .status
            .parse()
            .map_err(|_| DefSystemError::data_integrity(format!("非法评审状态: {}", evaluation.status)))?;

        if !status.can_submit() {
            return Err(DefSystemError::state_conflict(format!(
                "评审 {evaluation_id} 当前状态为 {status}，仅 pending 可提交"
            )));
        }

        // 提交前必须完成所有评分项
        let schedule = DefenseSchedules::find_by_id(evaluation.schedule_id)
            .one(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询场次失败: {e}")))?
            .ok_or_else(|| {
                DefSystemError::not_found(format!("场次 {} 不存在", evaluation.schedule_id))
            })?;

        let criteria = RubricCriteria::find()
            .filter(CriterionColumn::TemplateId.eq(schedule.rubric_template_id))
            .all(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评分项失败: {e}")))?;

        let scored: HashSet<i64> = EvaluationScores::find()
            .filter(ScoreColumn::EvaluationId.eq(evaluation_id))
            .all(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评分明细失败: {e}")))?
            .into_iter()
            .map(|row| row.criterion_id)
            .collect();

        let mut missing: Vec<i64> = criteria
            .iter()
            .filter(|c| !scored.contains(&c.id))
            .map(|c| c.id)
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            return Err(DefSystemError::validation(format!(
                "提交前必须完成所有评分项，缺少评分项: {missing:?}"
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let mut update = ActiveModel {
            id: Set(evaluation_id),
            status: Set(EvaluationStatus::Submitted.to_string()),
            submitted_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };
        if lock_on_submit {
            update.status = Set(EvaluationStatus::Locked.to_string());
            update.locked_at = Set(Some(now));
        }

        let updated = update
            .update(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交评审失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated.into_evaluation())
    }

    /// 锁定评审（仅 submitted，不允许从 pending 直接锁定）
    pub async fn lock_evaluation_impl(&self, evaluation_id: i64) -> Result<Evaluation> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let evaluation = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评审失败: {e}")))?
            .ok_or_else(|| DefSystemError::not_found(format!("评审 {evaluation_id} 不存在")))?;

        let status: EvaluationStatus = evaluation
            .status
            .parse()
            .map_err(|_| DefSystemError::data_integrity(format!("非法评审状态: {}", evaluation.status)))?;

        if !status.can_lock() {
            return Err(DefSystemError::state_conflict(format!(
                "评审 {evaluation_id} 当前状态为 {status}，仅 submitted 可锁定"
            )));
        }

        let now = chrono::Utc::now().timestamp();
        let updated = ActiveModel {
            id: Set(evaluation_id),
            status: Set(EvaluationStatus::Locked.to_string()),
            locked_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| DefSystemError::database_operation(format!("锁定评审失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated.into_evaluation())
    }

    /// 管理员解锁：locked -> submitted，审计与状态变更同事务
    pub async fn unlock_evaluation_impl(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        reason: &str,
    ) -> Result<Evaluation> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let evaluation = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评审失败: {e}")))?
            .ok_or_else(|| DefSystemError::not_found(format!("评审 {evaluation_id} 不存在")))?;

        let status: EvaluationStatus = evaluation
            .status
            .parse()
            .map_err(|_| DefSystemError::data_integrity(format!("非法评审状态: {}", evaluation.status)))?;

        if !status.can_unlock() {
            return Err(DefSystemError::state_conflict(format!(
                "评审 {evaluation_id} 当前状态为 {status}，仅 locked 可解锁"
            )));
        }

        // 审计写失败整个解锁回滚
        audits::insert_audit(
            &txn,
            actor_id,
            "unlock",
            "evaluation",
            evaluation_id,
            json!({
                "reason": reason,
                "prior_status": evaluation.status,
                "prior_locked_at": evaluation.locked_at,
            }),
        )
        .await?;

        let now = chrono::Utc::now().timestamp();
        let updated = ActiveModel {
            id: Set(evaluation_id),
            status: Set(EvaluationStatus::Submitted.to_string()),
            locked_at: Set(None),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| DefSystemError::database_operation(format!("解锁评审失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(updated.into_evaluation())
    }

    /// 删除（取消分配）评审
    ///
    /// pending/submitted 可直接删除；locked 必须 force，并在同一
    /// 事务内写入带删除前快照的审计记录，审计失败则删除回滚。
    pub async fn delete_evaluation_impl(
        &self,
        evaluation_id: i64,
        force: bool,
        actor_id: i64,
        reason: Option<String>,
    ) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(evaluation) = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评审失败: {e}")))?
        else {
            return Ok(false);
        };

        if evaluation.locked_at.is_some() {
            if !force {
                return Err(DefSystemError::state_conflict(format!(
                    "评审 {evaluation_id} 已锁定（当前状态: {}），删除需要 force=true",
                    evaluation.status
                )));
            }

            // 强制删除锁定记录：先在同事务内写入删除前快照
            let scores = EvaluationScores::find()
                .filter(ScoreColumn::EvaluationId.eq(evaluation_id))
                .all(&txn)
                .await
                .map_err(|e| DefSystemError::database_operation(format!("查询评分明细失败: {e}")))?;

            let snapshot = json!({
                "reason": reason,
                "prior": {
                    "schedule_id": evaluation.schedule_id,
                    "evaluator_id": evaluation.evaluator_id,
                    "status": evaluation.status,
                    "extras": evaluation.extras,
                    "submitted_at": evaluation.submitted_at,
                    "locked_at": evaluation.locked_at,
                    "scores": scores
                        .iter()
                        .map(|s| json!({"criterion_id": s.criterion_id, "score": s.score}))
                        .collect::<Vec<_>>(),
                },
            });

            audits::insert_audit(&txn, actor_id, "force_delete", "evaluation", evaluation_id, snapshot)
                .await?;
        }

        // 评分明细随评审一并删除（所有权归属评审）
        EvaluationScores::delete_many()
            .filter(ScoreColumn::EvaluationId.eq(evaluation_id))
            .exec(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("删除评分明细失败: {e}")))?;

        Evaluations::delete_by_id(evaluation_id)
            .exec(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("删除评审失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }
}
