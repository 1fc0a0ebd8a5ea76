use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

/// 创建用户请求（仅用于启动期初始化，无对外端点）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String, // 已哈希
    pub role: UserRole,
    pub profile_name: Option<String>,
}
