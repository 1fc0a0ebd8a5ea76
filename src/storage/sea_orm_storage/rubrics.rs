//! 评分细则存储操作

use super::SeaOrmStorage;
use crate::entity::rubric_criteria::{
    ActiveModel as CriterionActiveModel, Column as CriterionColumn, Entity as RubricCriteria,
};
use crate::entity::rubric_templates::{
    ActiveModel as TemplateActiveModel, Column as TemplateColumn, Entity as RubricTemplates,
};
use crate::errors::{DefSystemError, Result};
use crate::models::{
    PaginationInfo,
    rubrics::{
        entities::RubricCriterion,
        requests::{CreateRubricTemplateRequest, RubricListQuery},
        responses::{RubricListResponse, RubricTemplateResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建模板及其评分项（单事务）
    pub async fn create_rubric_template_impl(
        &self,
        req: CreateRubricTemplateRequest,
    ) -> Result<RubricTemplateResponse> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let template = TemplateActiveModel {
            name: Set(req.name),
            version: Set(req.version.unwrap_or(1)),
            active: Set(req.active.unwrap_or(true)),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| DefSystemError::database_operation(format!("创建模板失败: {e}")))?;

        let mut criteria = Vec::with_capacity(req.criteria.len());
        for (index, criterion) in req.criteria.into_iter().enumerate() {
            let inserted = CriterionActiveModel {
                template_id: Set(template.id),
                label: Set(criterion.label),
                weight: Set(criterion.weight),
                min_score: Set(criterion.min_score),
                max_score: Set(criterion.max_score),
                position: Set(index as i64),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("创建评分项失败: {e}")))?;
            criteria.push(inserted.into_criterion());
        }

        txn.commit()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(RubricTemplateResponse {
            template: template.into_template(),
            criteria,
        })
    }

    /// 获取模板详情（含评分项）
    pub async fn get_rubric_template_with_criteria_impl(
        &self,
        template_id: i64,
    ) -> Result<Option<RubricTemplateResponse>> {
        let template = RubricTemplates::find_by_id(template_id)
            .one(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询模板失败: {e}")))?;

        let Some(template) = template else {
            return Ok(None);
        };

        let criteria = self.list_rubric_criteria_impl(template_id).await?;

        Ok(Some(RubricTemplateResponse {
            template: template.into_template(),
            criteria,
        }))
    }

    /// 分页列出模板
    pub async fn list_rubric_templates_with_pagination_impl(
        &self,
        query: RubricListQuery,
    ) -> Result<RubricListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = RubricTemplates::find();

        if let Some(active) = query.active {
            select = select.filter(TemplateColumn::Active.eq(active));
        }

        // 排序
        select = select.order_by_desc(TemplateColumn::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询模板总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询模板页数失败: {e}")))?;

        let templates = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询模板列表失败: {e}")))?;

        Ok(RubricListResponse {
            items: templates.into_iter().map(|m| m.into_template()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出模板下的评分项（按展示顺序）
    pub async fn list_rubric_criteria_impl(&self, template_id: i64) -> Result<Vec<RubricCriterion>> {
        let criteria = RubricCriteria::find()
            .filter(CriterionColumn::TemplateId.eq(template_id))
            .order_by_asc(CriterionColumn::Position)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询评分项失败: {e}")))?;

        Ok(criteria.into_iter().map(|m| m.into_criterion()).collect())
    }
}
