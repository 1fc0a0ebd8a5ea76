//! 跨评委聚合
//!
//! 把一个答辩场次下全部评审的规范化结果合成小组/成员的综合
//! 得分。只读、无副作用，预览与排行榜可以反复调用。
//!
//! 官方聚合只统计 submitted/locked 的评审；pending 是评委
//! 自己的草稿，不参与。数据质量问题（孤儿评分、模板权重配置
//! 错误、越界评分）降级为 warnings + partial 标记，绝不让
//! 读路径整体失败。

use std::collections::{HashMap, HashSet};

use crate::models::evaluations::entities::{Evaluation, EvaluationScore};
use crate::models::rankings::entities::{MemberAggregate, ScheduleAggregate};
use crate::models::rubrics::entities::RubricCriterion;
use crate::models::schedules::entities::GroupMember;
use crate::scoring::normalize::{NormalizedScore, normalize};
use crate::scoring::rubric;

/// 聚合输入：一条评审及其评分明细
#[derive(Debug, Clone)]
pub struct EvaluationBundle {
    pub evaluation: Evaluation,
    pub scores: HashMap<i64, f64>,
}

impl EvaluationBundle {
    pub fn new(evaluation: Evaluation, scores: Vec<EvaluationScore>) -> Self {
        let scores = scores
            .into_iter()
            .map(|s| (s.criterion_id, s.score))
            .collect();
        Self { evaluation, scores }
    }
}

/// 非 null 值的算术平均；零条输入为 None 而不是 0
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// 仅按扩展字段规范化（不使用评分细则兜底，不会失败）
fn normalize_extras_only(evaluation: &Evaluation, subject: Option<i64>) -> NormalizedScore {
    normalize(evaluation, &HashMap::new(), &[], subject).unwrap_or_default()
}

/// 聚合一个答辩场次
pub fn aggregate_schedule(
    schedule_id: i64,
    group_id: i64,
    evaluations: &[EvaluationBundle],
    criteria: &[RubricCriterion],
    members: &[GroupMember],
) -> ScheduleAggregate {
    let mut warnings: Vec<String> = Vec::new();
    let mut partial = false;

    // 模板权重配置错误：上报警告，兜底计算退化为仅扩展字段
    let effective_criteria: &[RubricCriterion] = match rubric::validate_weights(criteria) {
        Ok(()) => criteria,
        Err(err) => {
            partial = true;
            warnings.push(err.to_string());
            &[]
        }
    };

    let known: HashSet<i64> = criteria.iter().map(|c| c.id).collect();

    // 预清洗：剔除引用已删除评分项的孤儿评分
    let qualifying: Vec<(&Evaluation, HashMap<i64, f64>)> = evaluations
        .iter()
        .filter(|b| b.evaluation.status.is_qualifying())
        .map(|bundle| {
            let mut orphaned: Vec<i64> = bundle
                .scores
                .keys()
                .filter(|id| !known.contains(*id))
                .copied()
                .collect();
            if !orphaned.is_empty() {
                orphaned.sort_unstable();
                partial = true;
                warnings.push(format!(
                    "评审 {} 引用了已不存在的评分项 {orphaned:?}，已从聚合中排除",
                    bundle.evaluation.id
                ));
            }
            let clean: HashMap<i64, f64> = bundle
                .scores
                .iter()
                .filter(|(id, _)| known.contains(*id))
                .map(|(id, score)| (*id, *score))
                .collect();
            (&bundle.evaluation, clean)
        })
        .collect();

    // 小组视角规范化；单条评审的数据问题不拖垮整场聚合
    let mut group_views: Vec<NormalizedScore> = Vec::with_capacity(qualifying.len());
    for (evaluation, clean_scores) in &qualifying {
        match normalize(evaluation, clean_scores, effective_criteria, None) {
            Ok(view) => group_views.push(view),
            Err(err) => {
                partial = true;
                warnings.push(format!("评审 {} 规范化失败: {err}", evaluation.id));
                group_views.push(normalize_extras_only(evaluation, None));
            }
        }
    }

    let group_values: Vec<f64> = group_views.iter().filter_map(|v| v.group_score).collect();
    let system_values: Vec<f64> = group_views.iter().filter_map(|v| v.system_score).collect();

    // 成员视角：个人字段不依赖评分细则兜底，直接按扩展字段解析
    let member_aggregates: Vec<MemberAggregate> = members
        .iter()
        .map(|member| {
            let mut personal_values: Vec<f64> = Vec::new();
            let mut comments: Vec<String> = Vec::new();
            for (evaluation, _) in &qualifying {
                let view = normalize_extras_only(evaluation, Some(member.student_id));
                if let Some(score) = view.personal_score {
                    personal_values.push(score);
                }
                if let Some(comment) = view.personal_comment {
                    comments.push(comment);
                }
            }
            MemberAggregate {
                student_id: member.student_id,
                display_name: member.display_name.clone(),
                personal_score: mean(&personal_values),
                personal_entries: personal_values.len() as i64,
                comments,
            }
        })
        .collect();

    ScheduleAggregate {
        schedule_id,
        group_id,
        group_score: mean(&group_values),
        system_score: mean(&system_values),
        members: member_aggregates,
        submitted_evaluations_count: qualifying.len() as i64,
        assigned_evaluations_count: evaluations.len() as i64,
        partial,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluations::entities::EvaluationStatus;
    use serde_json::json;

    fn evaluation(id: i64, status: EvaluationStatus, extras: serde_json::Value) -> Evaluation {
        Evaluation {
            id,
            schedule_id: 1,
            evaluator_id: id,
            status,
            extras,
            submitted_at: None,
            locked_at: None,
            created_at: chrono::DateTime::<chrono::Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
            updated_at: chrono::DateTime::<chrono::Utc>::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn bundle(
        id: i64,
        status: EvaluationStatus,
        extras: serde_json::Value,
        scores: &[(i64, f64)],
    ) -> EvaluationBundle {
        EvaluationBundle {
            evaluation: evaluation(id, status, extras),
            scores: scores.iter().copied().collect(),
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

    fn member(student_id: i64, name: &str) -> GroupMember {
        GroupMember {
            student_id,
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_pending_excluded_submitted_included() {
        let criteria = vec![criterion(1, 100.0)];
        // pending 即使填满了评分也不计入
        let pending = bundle(1, EvaluationStatus::Pending, json!({}), &[(1, 100.0)]);
        let aggregate = aggregate_schedule(1, 1, &[pending.clone()], &criteria, &[]);
        assert_eq!(aggregate.group_score, None);
        assert_eq!(aggregate.submitted_evaluations_count, 0);
        assert_eq!(aggregate.assigned_evaluations_count, 1);

        // 同一条评审提交后计入
        let mut submitted = pending;
        submitted.evaluation.status = EvaluationStatus::Submitted;
        let aggregate = aggregate_schedule(1, 1, &[submitted], &criteria, &[]);
        assert_eq!(aggregate.group_score, Some(100.0));
        assert_eq!(aggregate.submitted_evaluations_count, 1);
    }

    #[test]
    fn test_group_score_mean_across_evaluators() {
        let criteria = vec![criterion(1, 100.0)];
        let bundles = vec![
            bundle(1, EvaluationStatus::Submitted, json!({}), &[(1, 80.0)]),
            bundle(2, EvaluationStatus::Locked, json!({}), &[(1, 90.0)]),
            // 扩展字段显式给分的评审优先用显式值
            bundle(3, EvaluationStatus::Submitted, json!({"group_score": 70}), &[]),
        ];
        let aggregate = aggregate_schedule(1, 1, &bundles, &criteria, &[]);
        assert_eq!(aggregate.group_score, Some(80.0));
        assert_eq!(aggregate.submitted_evaluations_count, 3);
        assert!(!aggregate.partial);
    }

    #[test]
    fn test_zero_qualifying_is_null() {
        let aggregate = aggregate_schedule(1, 1, &[], &[criterion(1, 100.0)], &[]);
        assert_eq!(aggregate.group_score, None);
        assert_eq!(aggregate.system_score, None);
        assert_eq!(aggregate.submitted_evaluations_count, 0);
    }

    #[test]
    fn test_member_personal_scores() {
        let members = vec![member(5, "张三"), member(6, "李四")];
        let bundles = vec![
            bundle(
                1,
                EvaluationStatus::Submitted,
                json!({"members": {"5": {"score": 80, "comment": "好"}}}),
                &[],
            ),
            bundle(
                2,
                EvaluationStatus::Submitted,
                json!({"members": {"5": {"score": 90}}}),
                &[],
            ),
        ];
        let aggregate = aggregate_schedule(1, 1, &bundles, &[], &members);
        let zhang = &aggregate.members[0];
        assert_eq!(zhang.personal_score, Some(85.0));
        assert_eq!(zhang.personal_entries, 2);
        assert_eq!(zhang.comments, vec!["好".to_string()]);

        // 没有任何评委给个人分的成员是 null
        let li = &aggregate.members[1];
        assert_eq!(li.personal_score, None);
        assert_eq!(li.personal_entries, 0);
    }

    #[test]
    fn test_orphaned_scores_excluded_and_flagged() {
        let criteria = vec![criterion(1, 100.0)];
        // 评分项 99 已被删除，评分仍引用它
        let bundles = vec![bundle(
            1,
            EvaluationStatus::Submitted,
            json!({}),
            &[(1, 80.0), (99, 50.0)],
        )];
        let aggregate = aggregate_schedule(1, 1, &bundles, &criteria, &[]);
        assert_eq!(aggregate.group_score, Some(80.0));
        assert!(aggregate.partial);
        assert_eq!(aggregate.warnings.len(), 1);
        assert!(aggregate.warnings[0].contains("99"));
    }

    #[test]
    fn test_broken_template_degrades_to_extras() {
        // 权重之和 60 != 100：兜底不可用，显式扩展字段仍然生效
        let criteria = vec![criterion(1, 60.0)];
        let bundles = vec![
            bundle(1, EvaluationStatus::Submitted, json!({"group_score": 75}), &[(1, 80.0)]),
            bundle(2, EvaluationStatus::Submitted, json!({}), &[(1, 90.0)]),
        ];
        let aggregate = aggregate_schedule(1, 1, &bundles, &criteria, &[]);
        assert!(aggregate.partial);
        assert!(!aggregate.warnings.is_empty());
        // 只有显式给分的评审参与均值
        assert_eq!(aggregate.group_score, Some(75.0));
    }

    #[test]
    fn test_out_of_range_score_degrades_single_evaluation() {
        let criteria = vec![criterion(1, 100.0)];
        let bundles = vec![
            bundle(1, EvaluationStatus::Submitted, json!({}), &[(1, 150.0)]),
            bundle(2, EvaluationStatus::Submitted, json!({}), &[(1, 90.0)]),
        ];
        let aggregate = aggregate_schedule(1, 1, &bundles, &criteria, &[]);
        // 越界的评审被降级，另一条照常计入
        assert_eq!(aggregate.group_score, Some(90.0));
        assert!(aggregate.partial);
    }
}
