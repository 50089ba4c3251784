use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 认证 / 权限错误
    #[error("认证错误: {0}")]
    Auth(#[from] AuthError),
    /// 考试流程错误
    #[error("考试错误: {0}")]
    Exam(#[from] ExamError),
    /// 表单校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败（连接、超时等）
    #[error("API请求失败 ({endpoint}): {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 后端返回非 2xx 状态
    #[error("API返回错误响应 ({endpoint}): status={status}, message={message}")]
    Status {
        endpoint: String,
        status: u16,
        message: String,
    },
    /// 响应体无法解析
    #[error("JSON解析失败 ({endpoint}): {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 响应中缺少必需字段
    #[error("API响应缺少字段 ({endpoint}): {field}")]
    MissingField { endpoint: String, field: String },
    /// 基础地址或路径无法拼接
    #[error("无效的请求地址: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// 后端返回的提示信息（如果有），用于直接展示给用户
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// 认证 / 权限错误
#[derive(Debug, Error)]
pub enum AuthError {
    /// 未登录（没有 token），需要跳转到登录
    #[error("尚未登录，请先登录")]
    NotLoggedIn,
    /// 当前角色无权访问
    #[error("角色 {role} 无权执行: {action}")]
    Forbidden { role: String, action: String },
}

/// 考试流程错误
#[derive(Debug, Error)]
pub enum ExamError {
    /// 没有提供测验ID
    #[error("Quiz ID is missing.")]
    MissingQuizId,
    /// 返回数据中没有题目数组
    #[error("Questions not found.")]
    QuestionsNotFound,
    /// 时长超出可计时范围
    #[error("无效的测验时长: {minutes} 分钟")]
    InvalidDuration { minutes: u64 },
    /// 选项不是 A-D
    #[error("无效的选项: {0}")]
    InvalidOption(String),
    /// 提交失败
    #[error("Failed to send answers. ({quiz_id}): {message}")]
    SubmitFailed { quiz_id: String, message: String },
}

/// 表单校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 删除文件失败
    #[error("删除文件失败 ({path}): {source}")]
    DeleteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// JSON 解析失败（会话文件）
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 命令行参数错误
    #[error("参数错误: {0}")]
    InvalidArgument(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建API请求失败错误
    pub fn api_request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Api(ApiError::Request {
            endpoint: endpoint.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建权限不足错误
    pub fn forbidden(role: impl Into<String>, action: impl Into<String>) -> Self {
        AppError::Auth(AuthError::Forbidden {
            role: role.into(),
            action: action.into(),
        })
    }

    /// 给用户看的提示文本：优先使用后端返回的 message
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(e) => e
                .backend_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string()),
            other => other.to_string(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
