pub mod common;

pub mod evaluations;
pub mod rankings;
pub mod rubrics;
pub mod schedules;
pub mod student_evaluations;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

// 应用启动时间，注入 app_data 用于运行时长统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

// 统一的 API 业务错误码
//
// 分段约定：0 成功，1xxx 认证授权，2xxx 参数校验，
// 3xxx 状态冲突，4xxx 资源不存在，5xxx 服务内部错误。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,

    Validation = 2000,
    MissingCriterionScores = 2001,
    ScoreOutOfRange = 2002,
    WeightSumInvalid = 2003,

    StateConflict = 3000,
    EvaluationLocked = 3001,

    UserNotFound = 4001,
    GroupNotFound = 4002,
    ScheduleNotFound = 4003,
    TemplateNotFound = 4004,
    EvaluationNotFound = 4005,
    StudentEvaluationNotFound = 4006,

    InternalServerError = 5000,
}
