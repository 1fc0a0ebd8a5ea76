//! 单条评审的规范化
//!
//! 不论评委客户端以哪种历史格式填写扩展字段，这里都解析出
//! 统一的 {小组分, 系统分, 个人分, 三类评语} 视图。
//!
//! 字段解析顺序（见 extras 模块的拼写表）：
//! 1. 顶层扩展字段（数字或数字样式字符串）
//! 2. 备选历史拼写，按序探测，第一个可用值生效
//! 3. 兜底：按评分细则的加权平均（仅小组分有此兜底）
//! 4. null

use std::collections::HashMap;

use crate::models::evaluations::entities::Evaluation;
use crate::models::rubrics::entities::RubricCriterion;
use crate::scoring::{ScoringError, extras, rubric};

/// 一条评审的规范化视图
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedScore {
    pub group_score: Option<f64>,
    pub system_score: Option<f64>,
    pub personal_score: Option<f64>,
    pub group_comment: Option<String>,
    pub system_comment: Option<String>,
    pub personal_comment: Option<String>,
}

/// 规范化一条评审
///
/// 纯函数：同样的 (evaluation, scores, criteria, subject_student_id)
/// 永远得到同样的结果。`subject_student_id` 给定时额外在成员
/// 子结构中查找该学生的个人得分与评语；成员条目没有数字得分
/// 时仍要带出评语。
pub fn normalize(
    evaluation: &Evaluation,
    scores: &HashMap<i64, f64>,
    criteria: &[RubricCriterion],
    subject_student_id: Option<i64>,
) -> Result<NormalizedScore, ScoringError> {
    let extras_payload = &evaluation.extras;

    let mut normalized = NormalizedScore {
        group_score: extras::first_number(extras_payload, extras::GROUP_SCORE_KEYS),
        system_score: extras::first_number(extras_payload, extras::SYSTEM_SCORE_KEYS),
        personal_score: extras::first_number(extras_payload, extras::PERSONAL_SCORE_KEYS),
        group_comment: extras::first_string(extras_payload, extras::GROUP_COMMENT_KEYS),
        system_comment: extras::first_string(extras_payload, extras::SYSTEM_COMMENT_KEYS),
        personal_comment: extras::first_string(extras_payload, extras::PERSONAL_COMMENT_KEYS),
    };

    // 小组分兜底：评分细则加权平均（其余字段没有兜底）
    if normalized.group_score.is_none() {
        normalized.group_score = rubric::weighted_average(scores, criteria)?;
    }

    // 个人字段：顶层拼写之后再查成员子结构
    if let Some(student_id) = subject_student_id {
        if let Some(entry) = extras::member_entry(extras_payload, student_id) {
            if normalized.personal_score.is_none() {
                normalized.personal_score = extras::coerce_number(entry)
                    .or_else(|| extras::first_number(entry, extras::MEMBER_SCORE_KEYS));
            }
            if normalized.personal_comment.is_none() {
                normalized.personal_comment =
                    extras::first_string(entry, extras::MEMBER_COMMENT_KEYS);
            }
        }
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::EvaluationStatus;
    use serde_json::json;

    fn evaluation_with_extras(extras: serde_json::Value) -> Evaluation {
        Evaluation {
            id: 1,
            schedule_id: 1,
            evaluator_id: 1,
            status: EvaluationStatus::Submitted,
            extras,
            submitted_at: None,
            locked_at: None,
            created_at: chrono::DateTime::<chrono::Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            updated_at: chrono::DateTime::<chrono::Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn criterion(id: i64, weight: f64) -> RubricCriterion {
        RubricCriterion {
            id,
            template_id: 1,
            label: format!("criterion-{id}"),
            weight,
            min_score: 0.0,
            max_score: 100.0,
            position: id,
        }
    }

    #[test]
    fn test_explicit_extras_win_over_rubric_fallback() {
        let evaluation = evaluation_with_extras(json!({"group_score": 95}));
        let criteria = vec![criterion(1, 100.0)];
        let scores = HashMap::from([(1, 60.0)]);
        let n = normalize(&evaluation, &scores, &criteria, None).unwrap();
        assert_eq!(n.group_score, Some(95.0));
    }

    #[test]
    fn test_rubric_fallback_for_group_score() {
        let evaluation = evaluation_with_extras(json!({}));
        let criteria = vec![criterion(1, 40.0), criterion(2, 60.0)];
        let scores = HashMap::from([(1, 80.0), (2, 90.0)]);
        let n = normalize(&evaluation, &scores, &criteria, None).unwrap();
        let expected = (80.0 * 40.0 + 90.0 * 60.0) / 100.0;
        assert_eq!(n.group_score, Some(expected));
    }

    #[test]
    fn test_empty_evaluation_normalizes_to_null() {
        // 没有评分明细也没有扩展字段 => 全 null，而不是 0
        let evaluation = evaluation_with_extras(json!({}));
        let n = normalize(&evaluation, &HashMap::new(), &[criterion(1, 100.0)], None).unwrap();
        assert_eq!(n, NormalizedScore::default());
    }

    #[test]
    fn test_numeric_string_coercion() {
        let evaluation = evaluation_with_extras(json!({"system_score": "87.5"}));
        let n = normalize(&evaluation, &HashMap::new(), &[], None).unwrap();
        assert_eq!(n.system_score, Some(87.5));
    }

    #[test]
    fn test_garbage_resolves_to_null() {
        let evaluation =
            evaluation_with_extras(json!({"system_score": {"oops": 1}, "group_score": "x"}));
        let n = normalize(&evaluation, &HashMap::new(), &[], None).unwrap();
        assert_eq!(n.system_score, None);
        assert_eq!(n.group_score, None);
    }

    #[test]
    fn test_personal_from_member_map() {
        let evaluation = evaluation_with_extras(json!({
            "members": {"17": {"score": 88, "comment": "答辩表现好"}}
        }));
        let n = normalize(&evaluation, &HashMap::new(), &[], Some(17)).unwrap();
        assert_eq!(n.personal_score, Some(88.0));
        assert_eq!(n.personal_comment, Some("答辩表现好".to_string()));

        // 其他学生查不到
        let other = normalize(&evaluation, &HashMap::new(), &[], Some(18)).unwrap();
        assert_eq!(other.personal_score, None);
        assert_eq!(other.personal_comment, None);
    }

    #[test]
    fn test_member_comment_without_score() {
        let evaluation = evaluation_with_extras(json!({
            "students": [{"student_id": 5, "comment": "建议补充实验"}]
        }));
        let n = normalize(&evaluation, &HashMap::new(), &[], Some(5)).unwrap();
        assert_eq!(n.personal_score, None);
        assert_eq!(n.personal_comment, Some("建议补充实验".to_string()));
    }

    #[test]
    fn test_top_level_personal_beats_member_entry() {
        let evaluation = evaluation_with_extras(json!({
            "personal_score": 66,
            "members": {"5": {"score": 99}}
        }));
        let n = normalize(&evaluation, &HashMap::new(), &[], Some(5)).unwrap();
        assert_eq!(n.personal_score, Some(66.0));
    }

    #[test]
    fn test_determinism() {
        let evaluation = evaluation_with_extras(json!({
            "group_score": "77", "members": {"3": {"score": 70}}
        }));
        let criteria = vec![criterion(1, 100.0)];
        let scores = HashMap::from([(1, 50.0)]);
        let a = normalize(&evaluation, &scores, &criteria, Some(3)).unwrap();
        let b = normalize(&evaluation, &scores, &criteria, Some(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_weight_sum_error_propagates() {
        let evaluation = evaluation_with_extras(json!({}));
        let criteria = vec![criterion(1, 40.0)];
        let scores = HashMap::from([(1, 50.0)]);
        let err = normalize(&evaluation, &scores, &criteria, None).unwrap_err();
        assert!(matches!(err, ScoringError::WeightSumMismatch { .. }));
    }
}
