//! 登录状态持久化
//!
//! 把 token 和用户资料保存在本地 JSON 文件中，进程重启后恢复

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{AppResult, AuthError, FileError};
use crate::infrastructure::request_context::RequestContext;
use crate::models::auth::{AuthState, Profile};

/// 会话存储
pub struct SessionStore {
    path: PathBuf,
    state: AuthState,
}

impl SessionStore {
    /// 打开会话文件；文件不存在、为空或内容为 `undefined` 时视为未登录
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let state = read_state(&path)?;
        debug!(
            "会话已加载: {} (已登录: {})",
            path.display(),
            state.is_logged_in()
        );
        Ok(Self { path, state })
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.profile.as_ref()
    }

    /// 保存 token 和用户资料
    pub fn set(&mut self, token: impl Into<String>, profile: Profile) -> AppResult<()> {
        self.state = AuthState {
            token: Some(token.into()),
            profile: Some(profile),
        };
        let json = serde_json::to_string_pretty(&self.state).map_err(|source| {
            FileError::JsonParseFailed {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|source| FileError::WriteFailed {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    /// 清除登录状态（退出登录）
    pub fn clear(&mut self) -> AppResult<()> {
        self.state = AuthState::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FileError::DeleteFailed {
                path: self.path.display().to_string(),
                source,
            }
            .into()),
        }
    }

    /// 当前凭证对应的请求上下文
    pub fn context(&self) -> RequestContext {
        RequestContext::from_auth(&self.state)
    }

    /// 路由守卫：未登录时返回错误（调用方应跳转到登录）
    pub fn require_login(&self) -> Result<RequestContext, AuthError> {
        let ctx = self.context();
        ctx.require_login()?;
        Ok(ctx)
    }
}

fn read_state(path: &Path) -> AppResult<AuthState> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AuthState::default()),
        Err(source) => {
            return Err(FileError::ReadFailed {
                path: path.display().to_string(),
                source,
            }
            .into())
        }
    };

    let trimmed = content.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        return Ok(AuthState::default());
    }

    match serde_json::from_str(trimmed) {
        Ok(state) => Ok(state),
        Err(e) => {
            warn!("⚠️ 会话文件已损坏，按未登录处理 ({}): {}", path.display(), e);
            Ok(AuthState::default())
        }
    }
}
