use serde::{Deserialize, Serialize};
use std::fmt;

/// 用户角色
///
/// 后端返回字符串，无法识别的角色保留为 `Unknown`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Instructor,
    Student,
    Admin,
    User,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Instructor => "Instructor",
            Role::Student => "Student",
            Role::Admin => "Admin",
            Role::User => "User",
            Role::Unknown => "Unknown",
        }
    }

    /// 是否可以管理分组 / 学生 / 题库 / 测验
    pub fn can_manage(self) -> bool {
        matches!(self, Role::Instructor | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 登录用户资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.email.clone().unwrap_or_default(),
        }
    }
}

/// 持久化的认证状态（token + 用户资料）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub token: Option<String>,
    pub profile: Option<Profile>,
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().and_then(|p| p.role)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 登录接口 data 部分
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub profile: Profile,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordRequest {
    pub password: String,
    pub password_new: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_role_string_is_kept_as_unknown() {
        let profile: Profile =
            serde_json::from_str(r#"{"_id":"u1","role":"Superuser"}"#).unwrap();
        assert_eq!(profile.role, Some(Role::Unknown));
    }

    #[test]
    fn login_data_reads_access_token() {
        let data: LoginData = serde_json::from_str(
            r#"{"accessToken":"tok","profile":{"_id":"u1","email":"a@b.io","role":"Student"}}"#,
        )
        .unwrap();
        assert_eq!(data.access_token, "tok");
        assert_eq!(data.profile.role, Some(Role::Student));
    }
}
