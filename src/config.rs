use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端 API 基础地址
    pub api_base_url: String,
    /// 持久化登录状态的文件
    pub session_file: String,
    /// 单个请求超时（秒）
    pub request_timeout_secs: u64,
    // --- 考试提交配置 ---
    /// 倒计时触发的自动提交失败后的重试次数
    pub auto_submit_retries: u32,
    /// 首次重试前的等待时间（毫秒），之后每次翻倍
    pub auto_submit_backoff_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://upskilling-egypt.com:3005".to_string(),
            session_file: ".quizwiz_session.json".to_string(),
            request_timeout_secs: 30,
            auto_submit_retries: 3,
            auto_submit_backoff_ms: 1000,
            verbose_logging: false,
            output_log_file: "quizwiz.log".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置（会先读取 .env 文件），未设置的字段使用默认值
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let default = Self::default();
        Ok(Self {
            api_base_url: std::env::var("QUIZWIZ_API_BASE_URL").unwrap_or(default.api_base_url),
            session_file: std::env::var("QUIZWIZ_SESSION_FILE").unwrap_or(default.session_file),
            request_timeout_secs: parse_env("QUIZWIZ_REQUEST_TIMEOUT_SECS", "u64")?
                .unwrap_or(default.request_timeout_secs),
            auto_submit_retries: parse_env("QUIZWIZ_AUTO_SUBMIT_RETRIES", "u32")?
                .unwrap_or(default.auto_submit_retries),
            auto_submit_backoff_ms: parse_env("QUIZWIZ_AUTO_SUBMIT_BACKOFF_MS", "u64")?
                .unwrap_or(default.auto_submit_backoff_ms),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("QUIZWIZ_OUTPUT_LOG_FILE")
                .unwrap_or(default.output_log_file),
        })
    }

    /// 指定基础地址，其余保持默认（测试和脚本使用）
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }
}

fn parse_env<T: std::str::FromStr>(
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
