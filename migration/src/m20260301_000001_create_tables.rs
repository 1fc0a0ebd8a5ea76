use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::ProfileName).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建答辩小组表
        manager
            .create_table(
                Table::create()
                    .table(DefenseGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DefenseGroups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DefenseGroups::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DefenseGroups::ThesisTitle).text().null())
                    .col(
                        ColumnDef::new(DefenseGroups::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组成员表
        manager
            .create_table(
                Table::create()
                    .table(GroupMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GroupMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GroupMembers::GroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupMembers::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GroupMembers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GroupMembers::Table, GroupMembers::GroupId)
                            .to(DefenseGroups::Table, DefenseGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GroupMembers::Table, GroupMembers::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一学生在一个小组只有一条成员记录
        manager
            .create_index(
                Index::create()
                    .name("uniq-group-members-group-student")
                    .table(GroupMembers::Table)
                    .col(GroupMembers::GroupId)
                    .col(GroupMembers::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建评分细则模板表
        manager
            .create_table(
                Table::create()
                    .table(RubricTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RubricTemplates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RubricTemplates::Name).string().not_null())
                    .col(
                        ColumnDef::new(RubricTemplates::Version)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RubricTemplates::Active).boolean().not_null())
                    .col(
                        ColumnDef::new(RubricTemplates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分项表
        manager
            .create_table(
                Table::create()
                    .table(RubricCriteria::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RubricCriteria::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RubricCriteria::TemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RubricCriteria::Label).string().not_null())
                    .col(ColumnDef::new(RubricCriteria::Weight).double().not_null())
                    .col(
                        ColumnDef::new(RubricCriteria::MinScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RubricCriteria::MaxScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RubricCriteria::Position)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(RubricCriteria::Table, RubricCriteria::TemplateId)
                            .to(RubricTemplates::Table, RubricTemplates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建答辩场次表
        manager
            .create_table(
                Table::create()
                    .table(DefenseSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DefenseSchedules::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DefenseSchedules::GroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DefenseSchedules::RubricTemplateId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DefenseSchedules::DefenseAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DefenseSchedules::Room).string().null())
                    .col(
                        ColumnDef::new(DefenseSchedules::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DefenseSchedules::Table, DefenseSchedules::GroupId)
                            .to(DefenseGroups::Table, DefenseGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DefenseSchedules::Table, DefenseSchedules::RubricTemplateId)
                            .to(RubricTemplates::Table, RubricTemplates::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建场次评委表
        manager
            .create_table(
                Table::create()
                    .table(SchedulePanelists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchedulePanelists::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchedulePanelists::ScheduleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchedulePanelists::PanelistId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchedulePanelists::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchedulePanelists::Table, SchedulePanelists::ScheduleId)
                            .to(DefenseSchedules::Table, DefenseSchedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchedulePanelists::Table, SchedulePanelists::PanelistId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq-schedule-panelists-schedule-panelist")
                    .table(SchedulePanelists::Table)
                    .col(SchedulePanelists::ScheduleId)
                    .col(SchedulePanelists::PanelistId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建评审记录表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ScheduleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Evaluations::Status).string().not_null())
                    .col(ColumnDef::new(Evaluations::Extras).text().null())
                    .col(ColumnDef::new(Evaluations::SubmittedAt).big_integer().null())
                    .col(ColumnDef::new(Evaluations::LockedAt).big_integer().null())
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::ScheduleId)
                            .to(DefenseSchedules::Table, DefenseSchedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::EvaluatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 幂等分配的依据：一个评委在一个场次只有一条评审记录
        manager
            .create_index(
                Index::create()
                    .name("uniq-evaluations-schedule-evaluator")
                    .table(Evaluations::Table)
                    .col(Evaluations::ScheduleId)
                    .col(Evaluations::EvaluatorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建评分明细表（criterion_id 为弱引用，无外键）
        manager
            .create_table(
                Table::create()
                    .table(EvaluationScores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationScores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationScores::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationScores::CriterionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationScores::Score)
                            .double()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationScores::Table, EvaluationScores::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq-evaluation-scores-evaluation-criterion")
                    .table(EvaluationScores::Table)
                    .col(EvaluationScores::EvaluationId)
                    .col(EvaluationScores::CriterionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建学生自评表
        manager
            .create_table(
                Table::create()
                    .table(StudentEvaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentEvaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::ScheduleId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentEvaluations::Content).text().null())
                    .col(
                        ColumnDef::new(StudentEvaluations::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::LockedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentEvaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentEvaluations::Table, StudentEvaluations::ScheduleId)
                            .to(DefenseSchedules::Table, DefenseSchedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentEvaluations::Table, StudentEvaluations::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 一名学生在一个场次只有一份自评表
        manager
            .create_index(
                Index::create()
                    .name("uniq-student-evaluations-schedule-student")
                    .table(StudentEvaluations::Table)
                    .col(StudentEvaluations::ScheduleId)
                    .col(StudentEvaluations::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建审计日志表（只追加）
        manager
            .create_table(
                Table::create()
                    .table(EvaluationAudits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationAudits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationAudits::ActorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationAudits::Action).string().not_null())
                    .col(ColumnDef::new(EvaluationAudits::Entity).string().not_null())
                    .col(
                        ColumnDef::new(EvaluationAudits::EntityId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EvaluationAudits::Details).text().null())
                    .col(
                        ColumnDef::new(EvaluationAudits::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EvaluationAudits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentEvaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EvaluationScores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchedulePanelists::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DefenseSchedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RubricCriteria::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RubricTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DefenseGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    ProfileName,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum DefenseGroups {
    Table,
    Id,
    Name,
    ThesisTitle,
    CreatedAt,
}

#[derive(DeriveIden)]
enum GroupMembers {
    Table,
    Id,
    GroupId,
    StudentId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum RubricTemplates {
    Table,
    Id,
    Name,
    Version,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum RubricCriteria {
    Table,
    Id,
    TemplateId,
    Label,
    Weight,
    MinScore,
    MaxScore,
    Position,
}

#[derive(DeriveIden)]
enum DefenseSchedules {
    Table,
    Id,
    GroupId,
    RubricTemplateId,
    DefenseAt,
    Room,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SchedulePanelists {
    Table,
    Id,
    ScheduleId,
    PanelistId,
    AssignedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    Table,
    Id,
    ScheduleId,
    EvaluatorId,
    Status,
    Extras,
    SubmittedAt,
    LockedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationScores {
    Table,
    Id,
    EvaluationId,
    CriterionId,
    Score,
}

#[derive(DeriveIden)]
enum StudentEvaluations {
    Table,
    Id,
    ScheduleId,
    StudentId,
    Status,
    Content,
    SubmittedAt,
    LockedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum EvaluationAudits {
    Table,
    Id,
    ActorId,
    Action,
    Entity,
    EntityId,
    Details,
    CreatedAt,
}
