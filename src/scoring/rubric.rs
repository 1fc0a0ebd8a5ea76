//! 评分细则加权平均
//!
//! 部分完成策略：只对「评分与评分项同时存在」的交集计算，
//! 缺评的评分项同时从分子和分母中剔除，而不是按 0 分计。

use std::collections::{HashMap, HashSet};

use crate::models::rubrics::entities::RubricCriterion;
use crate::scoring::ScoringError;

/// 权重之和的目标值与容差
pub const EXPECTED_WEIGHT_SUM: f64 = 100.0;
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-4;

/// 校验模板权重之和是否为 100（容差 1e-4）
///
/// 空评分项集合视为「无模板参与计算」，不报错。
pub fn validate_weights(criteria: &[RubricCriterion]) -> Result<(), ScoringError> {
    if criteria.is_empty() {
        return Ok(());
    }
    let weight_sum: f64 = criteria.iter().map(|c| c.weight).sum();
    if (weight_sum - EXPECTED_WEIGHT_SUM).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(ScoringError::WeightSumMismatch {
            template_id: criteria[0].template_id,
            weight_sum,
        });
    }
    Ok(())
}

/// 计算加权平均分
///
/// - `scores` 引用的每个评分项必须存在于 `criteria` 中；
/// - 超出 [min_score, max_score] 的评分是校验错误，不静默截断；
/// - 交集为空时返回 `Ok(None)`：「无可评项」不同于「0 分」；
/// - 权重之和不为 100 时返回错误，绝不自动归一化。
///
/// 按 `criteria` 的给定顺序累加，保证结果与 `scores` 的
/// 迭代顺序无关（浮点加法不满足结合律）。
pub fn weighted_average(
    scores: &HashMap<i64, f64>,
    criteria: &[RubricCriterion],
) -> Result<Option<f64>, ScoringError> {
    if criteria.is_empty() {
        return Ok(None);
    }

    let known: HashSet<i64> = criteria.iter().map(|c| c.id).collect();
    if let Some(&criterion_id) = scores.keys().filter(|id| !known.contains(*id)).min() {
        return Err(ScoringError::UnknownCriterion { criterion_id });
    }

    validate_weights(criteria)?;

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for criterion in criteria {
        let Some(&score) = scores.get(&criterion.id) else {
            continue;
        };
        if score < criterion.min_score || score > criterion.max_score {
            return Err(ScoringError::ScoreOutOfRange {
                criterion_id: criterion.id,
                score,
                min: criterion.min_score,
                max: criterion.max_score,
            });
        }
        weighted_sum += score * criterion.weight;
        weight_total += criterion.weight;
    }

    if weight_total == 0.0 {
        return Ok(None);
    }
    Ok(Some(weighted_sum / weight_total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: i64, weight: f64, min: f64, max: f64) -> RubricCriterion {
        RubricCriterion {
            id,
            template_id: 1,
            label: format!("criterion-{id}"),
            weight,
            min_score: min,
            max_score: max,
            position: id,
        }
    }

    #[test]
    fn test_weighted_average() {
        // 权重 [40, 30, 30]，评分 [8, 6, 9]（0-10 制）
        // => (8*40 + 6*30 + 9*30) / 100 = 7.7
        let criteria = vec![
            criterion(1, 40.0, 0.0, 10.0),
            criterion(2, 30.0, 0.0, 10.0),
            criterion(3, 30.0, 0.0, 10.0),
        ];
        let scores = HashMap::from([(1, 8.0), (2, 6.0), (3, 9.0)]);
        let result = weighted_average(&scores, &criteria).unwrap().unwrap();
        assert!((result - 7.7).abs() < 1e-12);
    }

    #[test]
    fn test_partial_completion() {
        // 3 项中只评了 2 项：只按这 2 项的权重计算，不把第 3 项当 0 分
        let criteria = vec![
            criterion(1, 40.0, 0.0, 10.0),
            criterion(2, 30.0, 0.0, 10.0),
            criterion(3, 30.0, 0.0, 10.0),
        ];
        let scores = HashMap::from([(1, 8.0), (2, 6.0)]);
        let result = weighted_average(&scores, &criteria).unwrap().unwrap();
        let expected = (8.0 * 40.0 + 6.0 * 30.0) / 70.0;
        assert!((result - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_intersection_is_null() {
        let criteria = vec![criterion(1, 100.0, 0.0, 10.0)];
        let scores = HashMap::new();
        assert_eq!(weighted_average(&scores, &criteria).unwrap(), None);
    }

    #[test]
    fn test_no_criteria_is_null() {
        let scores = HashMap::new();
        assert_eq!(weighted_average(&scores, &[]).unwrap(), None);
    }

    #[test]
    fn test_weight_sum_mismatch() {
        let criteria = vec![
            criterion(1, 40.0, 0.0, 10.0),
            criterion(2, 30.0, 0.0, 10.0),
        ];
        let scores = HashMap::from([(1, 8.0)]);
        let err = weighted_average(&scores, &criteria).unwrap_err();
        assert_eq!(
            err,
            ScoringError::WeightSumMismatch {
                template_id: 1,
                weight_sum: 70.0
            }
        );
    }

    #[test]
    fn test_weight_sum_tolerance() {
        // 1e-4 容差内的浮点误差不报错
        let criteria = vec![
            criterion(1, 33.33335, 0.0, 10.0),
            criterion(2, 33.33335, 0.0, 10.0),
            criterion(3, 33.3333, 0.0, 10.0),
        ];
        let scores = HashMap::from([(1, 5.0)]);
        assert!(weighted_average(&scores, &criteria).is_ok());
    }

    #[test]
    fn test_score_out_of_range() {
        let criteria = vec![criterion(1, 100.0, 0.0, 10.0)];
        let scores = HashMap::from([(1, 11.0)]);
        let err = weighted_average(&scores, &criteria).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::ScoreOutOfRange { criterion_id: 1, .. }
        ));
    }

    #[test]
    fn test_unknown_criterion() {
        let criteria = vec![criterion(1, 100.0, 0.0, 10.0)];
        let scores = HashMap::from([(1, 5.0), (99, 5.0)]);
        let err = weighted_average(&scores, &criteria).unwrap_err();
        assert_eq!(err, ScoringError::UnknownCriterion { criterion_id: 99 });
    }
}
