//! 注册策略：决定新账号的角色，以及是否允许创建

use crate::{
    error::AppError,
    models::user::{User, UserRole},
};

/// 关闭自助注册时的提示信息
pub const REGISTRATION_CLOSED: &str =
    "Registration is disabled. Admin privileges required to create new users.";

/// 确定新账号的角色
///
/// 规则依次为：
/// 1. 用户表为空时，首个账号总是管理员；
/// 2. 开放注册时，只有管理员可以指定角色，其余一律为 `USER`；
/// 3. 关闭注册时，由管理员指定角色；
/// 4. 其余情况拒绝。
pub fn resolve_role(
    directory_empty: bool,
    open_registration: bool,
    requested: UserRole,
    actor: Option<&User>,
) -> Result<UserRole, AppError> {
    let actor_is_admin = actor.is_some_and(User::is_admin);

    if directory_empty {
        return Ok(UserRole::Admin);
    }

    if open_registration {
        return Ok(if actor_is_admin { requested } else { UserRole::User });
    }

    if actor_is_admin {
        return Ok(requested);
    }

    Err(AppError::forbidden(REGISTRATION_CLOSED))
}
