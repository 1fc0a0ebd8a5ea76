//! 实体 prelude，方便统一导入

pub use super::defense_groups::Entity as DefenseGroups;
pub use super::defense_schedules::Entity as DefenseSchedules;
pub use super::evaluation_audits::Entity as EvaluationAudits;
pub use super::evaluation_scores::Entity as EvaluationScores;
pub use super::evaluations::Entity as Evaluations;
pub use super::group_members::Entity as GroupMembers;
pub use super::rubric_criteria::Entity as RubricCriteria;
pub use super::rubric_templates::Entity as RubricTemplates;
pub use super::schedule_panelists::Entity as SchedulePanelists;
pub use super::student_evaluations::Entity as StudentEvaluations;
pub use super::users::Entity as Users;
