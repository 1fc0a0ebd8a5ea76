//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 评审状态机的全部不变量在这一层的单行事务内维护。

mod audits;
mod evaluations;
mod rubrics;
mod schedules;
mod student_evaluations;
mod users;

use crate::config::AppConfig;
use crate::errors::{DefSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 基于已有连接创建存储实例（集成测试用，调用方负责迁移）
    pub fn with_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| DefSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| DefSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| DefSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(DefSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn count_users(&self) -> Result<i64> {
        self.count_users_impl().await
    }

    // 评分细则模块
    async fn create_rubric_template(
        &self,
        req: CreateRubricTemplateRequest,
    ) -> Result<RubricTemplateResponse> {
        self.create_rubric_template_impl(req).await
    }

    async fn get_rubric_template_with_criteria(
        &self,
        template_id: i64,
    ) -> Result<Option<RubricTemplateResponse>> {
        self.get_rubric_template_with_criteria_impl(template_id)
            .await
    }

    async fn list_rubric_templates_with_pagination(
        &self,
        query: RubricListQuery,
    ) -> Result<RubricListResponse> {
        self.list_rubric_templates_with_pagination_impl(query).await
    }

    async fn list_rubric_criteria(&self, template_id: i64) -> Result<Vec<RubricCriterion>> {
        self.list_rubric_criteria_impl(template_id).await
    }

    // 答辩场次模块
    async fn get_schedule_by_id(&self, schedule_id: i64) -> Result<Option<DefenseSchedule>> {
        self.get_schedule_by_id_impl(schedule_id).await
    }

    async fn list_schedules(&self) -> Result<Vec<DefenseSchedule>> {
        self.list_schedules_impl().await
    }

    async fn get_group_by_id(&self, group_id: i64) -> Result<Option<DefenseGroup>> {
        self.get_group_by_id_impl(group_id).await
    }

    async fn list_group_members(&self, group_id: i64) -> Result<Vec<GroupMember>> {
        self.list_group_members_impl(group_id).await
    }

    async fn list_schedule_panelists(&self, schedule_id: i64) -> Result<Vec<i64>> {
        self.list_schedule_panelists_impl(schedule_id).await
    }

    // 评审模块
    async fn assign_evaluator(
        &self,
        schedule_id: i64,
        evaluator_id: i64,
    ) -> Result<(Evaluation, bool)> {
        self.assign_evaluator_impl(schedule_id, evaluator_id).await
    }

    async fn get_evaluation_by_id(&self, evaluation_id: i64) -> Result<Option<Evaluation>> {
        self.get_evaluation_by_id_impl(evaluation_id).await
    }

    async fn list_evaluations_by_schedule(&self, schedule_id: i64) -> Result<Vec<Evaluation>> {
        self.list_evaluations_by_schedule_impl(schedule_id).await
    }

    async fn list_evaluation_scores(&self, evaluation_id: i64) -> Result<Vec<EvaluationScore>> {
        self.list_evaluation_scores_impl(evaluation_id).await
    }

    async fn list_evaluation_scores_for_evaluations(
        &self,
        evaluation_ids: &[i64],
    ) -> Result<Vec<EvaluationScore>> {
        self.list_evaluation_scores_for_evaluations_impl(evaluation_ids)
            .await
    }

    async fn save_evaluation_scores(
        &self,
        evaluation_id: i64,
        entries: Vec<ScoreEntry>,
        extras: Option<serde_json::Value>,
    ) -> Result<Evaluation> {
        self.save_evaluation_scores_impl(evaluation_id, entries, extras)
            .await
    }

    async fn submit_evaluation(
        &self,
        evaluation_id: i64,
        lock_on_submit: bool,
    ) -> Result<Evaluation> {
        self.submit_evaluation_impl(evaluation_id, lock_on_submit)
            .await
    }

    async fn lock_evaluation(&self, evaluation_id: i64) -> Result<Evaluation> {
        self.lock_evaluation_impl(evaluation_id).await
    }

    async fn unlock_evaluation(
        &self,
        evaluation_id: i64,
        actor_id: i64,
        reason: &str,
    ) -> Result<Evaluation> {
        self.unlock_evaluation_impl(evaluation_id, actor_id, reason)
            .await
    }

    async fn delete_evaluation(
        &self,
        evaluation_id: i64,
        force: bool,
        actor_id: i64,
        reason: Option<String>,
    ) -> Result<bool> {
        self.delete_evaluation_impl(evaluation_id, force, actor_id, reason)
            .await
    }

    async fn list_evaluation_audits(&self, entity_id: i64) -> Result<Vec<EvaluationAudit>> {
        self.list_evaluation_audits_impl(entity_id).await
    }

    // 学生自评模块
    async fn get_or_create_student_evaluation(
        &self,
        schedule_id: i64,
        student_id: i64,
    ) -> Result<(StudentEvaluation, bool)> {
        self.get_or_create_student_evaluation_impl(schedule_id, student_id)
            .await
    }

    async fn get_student_evaluation_by_id(&self, id: i64) -> Result<Option<StudentEvaluation>> {
        self.get_student_evaluation_by_id_impl(id).await
    }

    async fn submit_student_evaluation(
        &self,
        id: i64,
        content: Option<serde_json::Value>,
    ) -> Result<StudentEvaluation> {
        self.submit_student_evaluation_impl(id, content).await
    }

    async fn list_student_evaluations_by_schedule(
        &self,
        schedule_id: i64,
    ) -> Result<Vec<StudentEvaluation>> {
        self.list_student_evaluations_by_schedule_impl(schedule_id)
            .await
    }
}
