//! 答辩场次与小组存储操作
//!
//! 场次、小组、成员、评委名单由外部排程系统写入，这里只读。

use super::SeaOrmStorage;
use crate::entity::defense_groups::Entity as DefenseGroups;
use crate::entity::defense_schedules::{Column as ScheduleColumn, Entity as DefenseSchedules};
use crate::entity::group_members::{Column as MemberColumn, Entity as GroupMembers};
use crate::entity::schedule_panelists::{Column as PanelistColumn, Entity as SchedulePanelists};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{DefSystemError, Result};
use crate::models::schedules::entities::{DefenseGroup, DefenseSchedule, GroupMember};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

impl SeaOrmStorage {
    /// 通过 ID 获取场次
    pub async fn get_schedule_by_id_impl(
        &self,
        schedule_id: i64,
    ) -> Result<Option<DefenseSchedule>> {
        let result = DefenseSchedules::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询场次失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 列出所有场次（排行榜聚合用），按答辩时间升序
    pub async fn list_schedules_impl(&self) -> Result<Vec<DefenseSchedule>> {
        let schedules = DefenseSchedules::find()
            .order_by_asc(ScheduleColumn::DefenseAt)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询场次列表失败: {e}")))?;

        Ok(schedules.into_iter().map(|m| m.into_schedule()).collect())
    }

    /// 通过 ID 获取小组
    pub async fn get_group_by_id_impl(&self, group_id: i64) -> Result<Option<DefenseGroup>> {
        let result = DefenseGroups::find_by_id(group_id)
            .one(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询小组失败: {e}")))?;

        Ok(result.map(|m| m.into_group()))
    }

    /// 列出小组成员，展示名取用户资料名，缺省回退用户名
    pub async fn list_group_members_impl(&self, group_id: i64) -> Result<Vec<GroupMember>> {
        let member_rows = GroupMembers::find()
            .filter(MemberColumn::GroupId.eq(group_id))
            .order_by_asc(MemberColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询小组成员失败: {e}")))?;

        if member_rows.is_empty() {
            return Ok(vec![]);
        }

        let student_ids: Vec<i64> = member_rows.iter().map(|m| m.student_id).collect();
        let users = Users::find()
            .filter(UserColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询成员用户信息失败: {e}")))?;

        let members = member_rows
            .into_iter()
            .map(|row| {
                let display_name = users
                    .iter()
                    .find(|u| u.id == row.student_id)
                    .map(|u| {
                        u.profile_name
                            .clone()
                            .filter(|name| !name.is_empty())
                            .unwrap_or_else(|| u.username.clone())
                    })
                    .unwrap_or_else(|| format!("student-{}", row.student_id));
                GroupMember {
                    student_id: row.student_id,
                    display_name,
                }
            })
            .collect();

        Ok(members)
    }

    /// 列出场次评委 ID
    pub async fn list_schedule_panelists_impl(&self, schedule_id: i64) -> Result<Vec<i64>> {
        let rows = SchedulePanelists::find()
            .filter(PanelistColumn::ScheduleId.eq(schedule_id))
            .order_by_asc(PanelistColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| DefSystemError::database_operation(format!("查询场次评委失败: {e}")))?;

        Ok(rows.into_iter().map(|r| r.panelist_id).collect())
    }
}
