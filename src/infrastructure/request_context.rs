//! 请求上下文
//!
//! 每次 HTTP 调用都显式携带当前凭证，不从全局存储隐式读取

use crate::error::{AppError, AppResult, AuthError};
use crate::models::auth::{AuthState, Role};

/// 请求上下文：bearer token + 当前角色
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    token: Option<String>,
    role: Option<Role>,
}

impl RequestContext {
    /// 未登录的上下文（登录、注册、找回密码）
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn bearer(token: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            token: Some(token.into()),
            role,
        }
    }

    pub fn from_auth(state: &AuthState) -> Self {
        Self {
            token: state.token.clone(),
            role: state.role(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// 必须已登录
    pub fn require_login(&self) -> Result<&Self, AuthError> {
        if self.token.is_some() {
            Ok(self)
        } else {
            Err(AuthError::NotLoggedIn)
        }
    }

    /// 必须是讲师或管理员；学生会被拒绝
    pub fn require_manager(&self, action: &str) -> AppResult<&Self> {
        self.require_login()?;
        match self.role {
            Some(role) if role.can_manage() => Ok(self),
            role => Err(AppError::forbidden(
                role.map(Role::as_str).unwrap_or("Unknown"),
                action,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_cannot_manage() {
        let ctx = RequestContext::bearer("t", Some(Role::Student));
        let err = ctx.require_manager("删除分组").unwrap_err();
        assert!(matches!(err, AppError::Auth(AuthError::Forbidden { .. })));
    }

    #[test]
    fn anonymous_context_is_not_logged_in() {
        let ctx = RequestContext::anonymous();
        assert!(matches!(ctx.require_login(), Err(AuthError::NotLoggedIn)));
        assert!(matches!(
            ctx.require_manager("x"),
            Err(AppError::Auth(AuthError::NotLoggedIn))
        ));
    }

    #[test]
    fn instructor_and_admin_can_manage() {
        for role in [Role::Instructor, Role::Admin] {
            let ctx = RequestContext::bearer("t", Some(role));
            assert!(ctx.require_manager("x").is_ok());
        }
    }
}
