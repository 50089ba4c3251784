//! 后端接口路径
//!
//! 相对于 `Config::api_base_url`

/// 认证
pub mod auth {
    pub const LOGIN: &str = "/api/auth/login";
    pub const REGISTER: &str = "/api/auth/register";
    pub const FORGOT_PASSWORD: &str = "/api/auth/forgot-password";
    pub const RESET_PASSWORD: &str = "/api/auth/reset-password";
    pub const CHANGE_PASSWORD: &str = "/api/auth/change-password";
}

/// 分组
pub mod groups {
    pub const ALL: &str = "/api/group";

    pub fn by_id(id: &str) -> String {
        format!("/api/group/{}", id)
    }
}

/// 学生
pub mod students {
    pub const ALL: &str = "/api/student";
    pub const WITHOUT_GROUP: &str = "/api/student/without-group";
    pub const TOP_FIVE: &str = "/api/student/top-five";

    pub fn by_id(id: &str) -> String {
        format!("/api/student/{}", id)
    }
}

/// 题库
pub mod questions {
    pub const ALL: &str = "/api/question";

    pub fn by_id(id: &str) -> String {
        format!("/api/question/{}", id)
    }
}

/// 测验
pub mod quizzes {
    pub const ALL: &str = "/api/quiz";
    pub const COMPLETED: &str = "/api/quiz/completed";
    /// 后端路径拼写如此
    pub const INCOMING: &str = "/api/quiz/incomming";
    pub const JOIN: &str = "/api/quiz/join";
    pub const RESULTS: &str = "/api/quiz/result";

    pub fn by_id(id: &str) -> String {
        format!("/api/quiz/{}", id)
    }

    pub fn without_answers(id: &str) -> String {
        format!("/api/quiz/without-answers/{}", id)
    }

    pub fn submit(id: &str) -> String {
        format!("/api/quiz/submit/{}", id)
    }
}
