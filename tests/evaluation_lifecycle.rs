//! 评审状态机集成测试
//!
//! 使用内存 SQLite 跑完整存储层：幂等分配、提交校验、
//! 锁定不可变、审计解锁与强制删除。

use migration::{Migrator, MigratorTrait};
use rust_defsystem_next::entity;
use rust_defsystem_next::errors::DefSystemError;
use rust_defsystem_next::models::evaluations::entities::EvaluationStatus;
use rust_defsystem_next::models::evaluations::requests::ScoreEntry;
use rust_defsystem_next::storage::Storage;
use rust_defsystem_next::storage::sea_orm_storage::SeaOrmStorage;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

async fn setup() -> (DatabaseConnection, SeaOrmStorage) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect sqlite::memory:");
    Migrator::up(&db, None).await.expect("run migrations");
    (db.clone(), SeaOrmStorage::with_connection(db))
}

/// 造一个带两项评分细则的答辩场次，返回 (场次ID, 评委ID, 评分项IDs)
async fn seed_schedule(db: &DatabaseConnection) -> (i64, i64, Vec<i64>) {
    let now = chrono::Utc::now().timestamp();

    let evaluator = entity::users::ActiveModel {
        username: Set("panelist1".to_string()),
        email: Set("p1@example.com".to_string()),
        password_hash: Set("x".to_string()),
        role: Set("panelist".to_string()),
        status: Set("active".to_string()),
        profile_name: Set(Some("评委一".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed evaluator");

    let group = entity::defense_groups::ActiveModel {
        name: Set("第一小组".to_string()),
        thesis_title: Set(Some("分布式评审聚合系统".to_string())),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed group");

    let template = entity::rubric_templates::ActiveModel {
        name: Set("默认评分细则".to_string()),
        version: Set(1),
        active: Set(true),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed template");

    let mut criterion_ids = Vec::new();
    for (index, weight) in [40.0, 60.0].into_iter().enumerate() {
        let criterion = entity::rubric_criteria::ActiveModel {
            template_id: Set(template.id),
            label: Set(format!("criterion-{index}")),
            weight: Set(weight),
            min_score: Set(0.0),
            max_score: Set(100.0),
            position: Set(index as i64),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("seed criterion");
        criterion_ids.push(criterion.id);
    }

    let schedule = entity::defense_schedules::ActiveModel {
        group_id: Set(group.id),
        rubric_template_id: Set(template.id),
        defense_at: Set(now),
        room: Set(None),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed schedule");

    (schedule.id, evaluator.id, criterion_ids)
}

#[tokio::test]
async fn test_assignment_is_idempotent() {
    let (db, storage) = setup().await;
    let (schedule_id, evaluator_id, _) = seed_schedule(&db).await;

    let (first, created) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("first assign");
    assert!(created);
    assert_eq!(first.status, EvaluationStatus::Pending);

    // 重复分配：不报错，created=false，返回同一条记录
    let (second, created) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("second assign");
    assert!(!created);
    assert_eq!(second.id, first.id);

    let rows = storage
        .list_evaluations_by_schedule(schedule_id)
        .await
        .expect("list evaluations");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_submit_requires_all_criteria() {
    let (db, storage) = setup().await;
    let (schedule_id, evaluator_id, criterion_ids) = seed_schedule(&db).await;

    let (evaluation, _) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("assign");

    // 只评了一项就提交：校验错误，错误信息点名缺失的评分项
    storage
        .save_evaluation_scores(
            evaluation.id,
            vec![ScoreEntry {
                criterion_id: criterion_ids[0],
                score: 85.0,
            }],
            None,
        )
        .await
        .expect("save first score");

    let err = storage
        .submit_evaluation(evaluation.id, false)
        .await
        .expect_err("submit with missing criteria must fail");
    assert!(matches!(err, DefSystemError::Validation(_)));
    assert!(err.message().contains(&criterion_ids[1].to_string()));

    // 补齐后提交成功
    storage
        .save_evaluation_scores(
            evaluation.id,
            vec![ScoreEntry {
                criterion_id: criterion_ids[1],
                score: 90.0,
            }],
            None,
        )
        .await
        .expect("save second score");

    let submitted = storage
        .submit_evaluation(evaluation.id, false)
        .await
        .expect("submit");
    assert_eq!(submitted.status, EvaluationStatus::Submitted);
    assert!(submitted.submitted_at.is_some());
    assert!(submitted.locked_at.is_none());
}

#[tokio::test]
async fn test_lock_on_submit_policy() {
    let (db, storage) = setup().await;
    let (schedule_id, evaluator_id, criterion_ids) = seed_schedule(&db).await;

    let (evaluation, _) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("assign");
    let entries = criterion_ids
        .iter()
        .map(|&criterion_id| ScoreEntry {
            criterion_id,
            score: 80.0,
        })
        .collect();
    storage
        .save_evaluation_scores(evaluation.id, entries, None)
        .await
        .expect("save scores");

    let locked = storage
        .submit_evaluation(evaluation.id, true)
        .await
        .expect("submit with lock_on_submit");
    assert_eq!(locked.status, EvaluationStatus::Locked);
    assert!(locked.locked_at.is_some());
}

#[tokio::test]
async fn test_lock_requires_submitted() {
    let (db, storage) = setup().await;
    let (schedule_id, evaluator_id, _) = seed_schedule(&db).await;

    let (evaluation, _) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("assign");

    // pending 不能直接锁定
    let err = storage
        .lock_evaluation(evaluation.id)
        .await
        .expect_err("lock from pending must fail");
    assert!(matches!(err, DefSystemError::StateConflict(_)));
    assert!(err.message().contains("pending"));
}

#[tokio::test]
async fn test_locked_evaluation_is_immutable() {
    let (db, storage) = setup().await;
    let (schedule_id, evaluator_id, criterion_ids) = seed_schedule(&db).await;

    let (evaluation, _) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("assign");
    let entries: Vec<ScoreEntry> = criterion_ids
        .iter()
        .map(|&criterion_id| ScoreEntry {
            criterion_id,
            score: 75.0,
        })
        .collect();
    storage
        .save_evaluation_scores(evaluation.id, entries.clone(), None)
        .await
        .expect("save scores");
    storage
        .submit_evaluation(evaluation.id, false)
        .await
        .expect("submit");
    storage
        .lock_evaluation(evaluation.id)
        .await
        .expect("lock");

    // 锁定后写评分被拒绝
    let err = storage
        .save_evaluation_scores(evaluation.id, entries, None)
        .await
        .expect_err("write to locked evaluation must fail");
    assert!(matches!(err, DefSystemError::StateConflict(_)));

    // 不带 force 的删除同样被拒绝
    let err = storage
        .delete_evaluation(evaluation.id, false, 1, None)
        .await
        .expect_err("delete locked without force must fail");
    assert!(matches!(err, DefSystemError::StateConflict(_)));
}

#[tokio::test]
async fn test_admin_unlock_writes_audit() {
    let (db, storage) = setup().await;
    let (schedule_id, evaluator_id, criterion_ids) = seed_schedule(&db).await;

    let (evaluation, _) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("assign");
    let entries = criterion_ids
        .iter()
        .map(|&criterion_id| ScoreEntry {
            criterion_id,
            score: 60.0,
        })
        .collect();
    storage
        .save_evaluation_scores(evaluation.id, entries, None)
        .await
        .expect("save scores");
    storage
        .submit_evaluation(evaluation.id, true)
        .await
        .expect("submit and lock");

    let unlocked = storage
        .unlock_evaluation(evaluation.id, 99, "测试")
        .await
        .expect("unlock");
    assert_eq!(unlocked.status, EvaluationStatus::Submitted);
    assert!(unlocked.locked_at.is_none());

    // 解锁必有审计记录
    let audits = storage
        .list_evaluation_audits(evaluation.id)
        .await
        .expect("list audits");
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, "unlock");
    assert_eq!(audits[0].actor_id, 99);
    assert_eq!(audits[0].details["reason"], "测试");

    // 已解锁（submitted）状态再次解锁是状态冲突
    let err = storage
        .unlock_evaluation(evaluation.id, 99, "再试一次")
        .await
        .expect_err("unlock on submitted must fail");
    assert!(matches!(err, DefSystemError::StateConflict(_)));
}

#[tokio::test]
async fn test_forced_delete_writes_audit_snapshot() {
    let (db, storage) = setup().await;
    let (schedule_id, evaluator_id, criterion_ids) = seed_schedule(&db).await;

    let (evaluation, _) = storage
        .assign_evaluator(schedule_id, evaluator_id)
        .await
        .expect("assign");
    let entries = criterion_ids
        .iter()
        .map(|&criterion_id| ScoreEntry {
            criterion_id,
            score: 88.0,
        })
        .collect();
    storage
        .save_evaluation_scores(evaluation.id, entries, None)
        .await
        .expect("save scores");
    storage
        .submit_evaluation(evaluation.id, true)
        .await
        .expect("submit and lock");

    let deleted = storage
        .delete_evaluation(evaluation.id, true, 42, Some("成绩录入错误".to_string()))
        .await
        .expect("forced delete");
    assert!(deleted);

    // 评审与评分明细一并删除
    assert!(
        storage
            .get_evaluation_by_id(evaluation.id)
            .await
            .expect("reload")
            .is_none()
    );
    assert!(
        storage
            .list_evaluation_scores(evaluation.id)
            .await
            .expect("list scores")
            .is_empty()
    );

    // 审计记录带有删除前快照
    let audits = storage
        .list_evaluation_audits(evaluation.id)
        .await
        .expect("list audits");
    assert_eq!(audits.len(), 1);
    assert_eq!(audits[0].action, "force_delete");
    assert_eq!(audits[0].actor_id, 42);
    assert_eq!(audits[0].details["reason"], "成绩录入错误");
    assert_eq!(audits[0].details["prior"]["status"], "locked");
    assert_eq!(
        audits[0].details["prior"]["scores"]
            .as_array()
            .map(|s| s.len()),
        Some(criterion_ids.len())
    );
}

#[tokio::test]
async fn test_student_evaluation_claim_is_idempotent() {
    let (db, storage) = setup().await;
    let (schedule_id, _, _) = seed_schedule(&db).await;

    let now = chrono::Utc::now().timestamp();
    let student = entity::users::ActiveModel {
        username: Set("student1".to_string()),
        email: Set("s1@example.com".to_string()),
        password_hash: Set("x".to_string()),
        role: Set("student".to_string()),
        status: Set("active".to_string()),
        profile_name: Set(Some("学生一".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .expect("seed student");

    let (first, created) = storage
        .get_or_create_student_evaluation(schedule_id, student.id)
        .await
        .expect("claim");
    assert!(created);
    assert_eq!(first.status, EvaluationStatus::Pending);

    let (second, created) = storage
        .get_or_create_student_evaluation(schedule_id, student.id)
        .await
        .expect("claim again");
    assert!(!created);
    assert_eq!(second.id, first.id);

    let submitted = storage
        .submit_student_evaluation(first.id, Some(serde_json::json!({"feedback": "流程顺利"})))
        .await
        .expect("submit");
    assert_eq!(submitted.status, EvaluationStatus::Submitted);

    // 已提交的自评不能重复提交
    let err = storage
        .submit_student_evaluation(first.id, None)
        .await
        .expect_err("resubmit must fail");
    assert!(matches!(err, DefSystemError::StateConflict(_)));
}
