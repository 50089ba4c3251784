//! 认证服务 - 业务能力层
//!
//! 登录、注册、找回 / 重置 / 修改密码、退出登录

use tracing::{debug, info};

use crate::api::auth;
use crate::error::AppResult;
use crate::infrastructure::{ApiClient, RequestContext, SessionStore};
use crate::models::auth::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginData, LoginRequest, Profile,
    RegisterRequest, ResetPasswordRequest,
};
use crate::models::envelope::{ApiEnvelope, MessageOnly};
use crate::services::validation;

/// 认证服务
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 登录并把 token + 用户资料写入会话存储
    pub async fn login(
        &self,
        store: &mut SessionStore,
        email: &str,
        password: &str,
    ) -> AppResult<Profile> {
        let form = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        validation::login(&form)?;

        debug!("登录: {}", form.email);
        let res: ApiEnvelope<LoginData> = self
            .client
            .post(&RequestContext::anonymous(), auth::LOGIN, &form)
            .await?;

        let LoginData {
            access_token,
            profile,
        } = res.data;
        store.set(access_token, profile.clone())?;

        info!(
            "✓ {}",
            res.message.as_deref().unwrap_or("Login successful")
        );
        Ok(profile)
    }

    /// 注册新账号，返回后端提示
    pub async fn register(&self, form: &RegisterRequest) -> AppResult<String> {
        validation::register(form)?;
        let res: MessageOnly = self
            .client
            .post(&RequestContext::anonymous(), auth::REGISTER, form)
            .await?;
        Ok(res.message_or("Registered successfully"))
    }

    /// 发送找回密码验证码
    pub async fn forgot_password(&self, email: &str) -> AppResult<String> {
        validation::email(email)?;
        let form = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        let res: MessageOnly = self
            .client
            .post(&RequestContext::anonymous(), auth::FORGOT_PASSWORD, &form)
            .await?;
        Ok(res.message_or("Check your email for the OTP"))
    }

    /// 使用验证码重置密码
    pub async fn reset_password(&self, form: &ResetPasswordRequest) -> AppResult<String> {
        validation::reset_password(form)?;
        let res: MessageOnly = self
            .client
            .post(&RequestContext::anonymous(), auth::RESET_PASSWORD, form)
            .await?;
        Ok(res.message_or("Password reset successfully"))
    }

    /// 修改密码（需要登录）
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        form: &ChangePasswordRequest,
    ) -> AppResult<String> {
        ctx.require_login()?;
        validation::change_password(form)?;
        let res: MessageOnly = self
            .client
            .post(ctx, auth::CHANGE_PASSWORD, form)
            .await?;
        Ok(res.message_or("Password changed successfully"))
    }

    /// 退出登录
    pub fn logout(&self, store: &mut SessionStore) -> AppResult<()> {
        store.clear()?;
        info!("✓ 已退出登录");
        Ok(())
    }
}
