//! # QuizWiz
//!
//! 在线测验平台的 Rust 客户端：讲师管理分组、学生、题库和测验，学生加入测验、限时作答并查看成绩
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有 HTTP 客户端和登录状态，只暴露能力
//! - `ApiClient` - 统一的请求出口，按 `RequestContext` 附加 Bearer token
//! - `SessionStore` - 登录状态的持久化
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务对应一类后端资源
//! - `AuthService` / `GroupService` / `StudentService` / `QuestionService` / `QuizService`
//! - `validation` - 表单校验；`navigation` - 菜单与路由守卫
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一场考试"的完整流程
//! - `ExamSession` - 纯状态机（作答、倒计时、提交状态）
//! - `ExamRunner` - 倒计时任务 + 互斥交卷 + 自动交卷重试
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 命令分发，管理资源
//! - `orchestrator/exam_processor` - 按答题卡完成一场考试
//!
//! ## 模块结构

pub mod api;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ApiClient, RequestContext, SessionStore};
pub use models::question::Question;
pub use orchestrator::{App, Command};
pub use workflow::{ExamBackend, ExamHandle, ExamRunner, ExamSession, RetryPolicy};
