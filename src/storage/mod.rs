use std::sync::Arc;

use crate::models::{
    evaluations::{
        entities::{Evaluation, EvaluationAudit, EvaluationScore},
        requests::ScoreEntry,
    },
    rubrics::{
        entities::RubricCriterion,
        requests::{CreateRubricTemplateRequest, RubricListQuery},
        responses::{RubricListResponse, RubricTemplateResponse},
    },
    schedules::entities::{DefenseGroup, DefenseSchedule, GroupMember},
    student_evaluations::entities::StudentEvaluation,
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户方法（无对外 CRUD 端点，仅供认证与启动期初始化）
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 用户总数
    async fn count_users(&self) -> Result<i64>;

    /// 评分细则方法
    // 创建模板（含评分项）
    async fn create_rubric_template(
        &self,
        req: CreateRubricTemplateRequest,
    ) -> Result<RubricTemplateResponse>;
    // 获取模板详情（含评分项）
    async fn get_rubric_template_with_criteria(
        &self,
        template_id: i64,
    ) -> Result<Option<RubricTemplateResponse>>;
    // 列出模板
    async fn list_rubric_templates_with_pagination(
        &self,
        query: RubricListQuery,
    ) -> Result<RubricListResponse>;
    // 列出模板下的评分项
    async fn list_rubric_criteria(&self, template_id: i64) -> Result<Vec<RubricCriterion>>;

    /// 答辩场次方法（场次/小组由外部排程系统维护，这里只读）
    // 通过ID获取场次
    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<DefenseSchedule>>;
    // 列出所有场次（排行榜用）
    async fn list_schedules(&self) -> Result<Vec<DefenseSchedule>>;
    // 通过ID获取小组
    async fn get_group_by_id(&self, group_id: i64) -> Result<Option<DefenseGroup>>;
    // 列出小组成员（含展示名）
    async fn list_group_members(&self, group_id: i64) -> Result<Vec<GroupMember>>;
    // 列出场次评委 ID
    async fn list_schedule_panelists(&self, schedule_id: i64) -> Result<Vec<i64>>;

    /// 评审记录方法
    // 分配评委：插入或返回已有记录（幂等，唯一约束兜底竞态）
    async fn assign_evaluator(
        &self,
        schedule_id: i64,
        evaluator_id: i64,
    ) -> Result<(Evaluation, bool)>;
    // 通过ID获取评审
    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>>;
    // 列出场次下的评审
    async fn list_evaluations_by_schedule(&self, schedule_id: i64) -> Result<Vec<Evaluation>>;
    // 列出一条评审的评分明细
    async fn list_evaluation_scores(&self, evaluation_id: i64) -> Result<Vec<EvaluationScore>>;
    // 批量列出多条评审的评分明细
    async fn list_evaluation_scores_for_evaluations(
        &self,
        evaluation_ids: &[i64],
    ) -> Result<Vec<EvaluationScore>>;
    // 保存评分明细与扩展字段（锁定后拒绝）
    async fn save_evaluation_scores(
        &self,
        evaluation_id: i64,
        entries: Vec<ScoreEntry>,
        extras: Option<serde_json::Value>,
    ) -> Result<Evaluation>;
    // 提交评审（仅 pending；要求所有评分项已评分；可按策略顺带锁定）
    async fn submit_evaluation(&self, evaluation_id: i64, lock_on_submit: bool)
    -> Result<Evaluation>;
    // 锁定评审（仅 submitted）
    async fn lock_evaluation(&self, evaluation_id: i64) -> Result<Evaluation>;
    // 管理员解锁（locked -> submitted，同事务写审计）
    async fn unlock_evaluation(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        reason: &str,
    ) -> Result<Evaluation>;
    // 删除评审（锁定记录必须 force，同事务写审计快照）
    async fn delete_evaluation(
        &self,
        evaluation_id: i64,
        force: bool,
        actor_id: i64,
        reason: Option<String>,
    ) -> Result<bool>;
    // 列出某条评审的审计日志
    async fn list_evaluation_audits(&self, entity_id: i64) -> Result<Vec<EvaluationAudit>>;

    /// 学生自评方法
    // 领取（或返回已有）自评表，幂等
    async fn get_or_create_student_evaluation(
        &self,
        schedule_id: i64,
        student_id: i64,
    ) -> Result<(StudentEvaluation, bool)>;
    // 通过ID获取自评表
    async fn get_student_evaluation_by_id(&self, id: i64) -> Result<Option<StudentEvaluation>>;
    // 提交自评表
    async fn submit_student_evaluation(
        &self,
        id: i64,
        content: Option<serde_json::Value>,
    ) -> Result<StudentEvaluation>;
    // 列出场次下所有自评表
    async fn list_student_evaluations_by_schedule(
        &self,
        schedule_id: i64,
    ) -> Result<Vec<StudentEvaluation>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
