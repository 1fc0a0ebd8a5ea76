//! 评分聚合与排名引擎
//!
//! 本模块是纯函数集合：同样的输入永远产生同样的输出，
//! 不读时钟、不读全局状态、不访问数据库。服务层负责取数，
//! 这里只做计算，因此可以在每次读排行榜时安全地反复调用。
//!
//! - `rubric`: 评分细则加权平均
//! - `extras`: 半结构化扩展字段的键名解析与数值转换
//! - `normalize`: 单条评审的规范化视图
//! - `aggregate`: 跨评委聚合
//! - `rank`: 竞赛排名

pub mod aggregate;
pub mod extras;
pub mod normalize;
pub mod rank;
pub mod rubric;

use std::fmt;

use crate::errors::DefSystemError;

/// 评分计算错误
///
/// 均为数据/配置问题：调用方要么把它作为校验错误返回给用户，
/// 要么（聚合读路径）降级为警告继续输出尽力而为的结果。
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// 评分引用了评分项集合之外的 criterion_id
    UnknownCriterion { criterion_id: i64 },
    /// 评分超出评分项允许的 [min_score, max_score] 范围，不静默截断
    ScoreOutOfRange {
        criterion_id: i64,
        score: f64,
        min: f64,
        max: f64,
    },
    /// 模板权重之和不在 100±1e-4 内，属模板配置错误，不自动归一化
    WeightSumMismatch { template_id: i64, weight_sum: f64 },
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringError::UnknownCriterion { criterion_id } => {
                write!(f, "评分引用了不存在的评分项: {criterion_id}")
            }
            ScoringError::ScoreOutOfRange {
                criterion_id,
                score,
                min,
                max,
            } => {
                write!(
                    f,
                    "评分项 {criterion_id} 的评分 {score} 超出允许范围 [{min}, {max}]"
                )
            }
            ScoringError::WeightSumMismatch {
                template_id,
                weight_sum,
            } => {
                write!(
                    f,
                    "模板 {template_id} 的权重之和为 {weight_sum}，应为 100"
                )
            }
        }
    }
}

impl std::error::Error for ScoringError {}

impl From<ScoringError> for DefSystemError {
    fn from(err: ScoringError) -> Self {
        DefSystemError::validation(err.to_string())
    }
}
