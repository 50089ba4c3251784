//! 业务能力层（Services）
//!
//! 每个服务只描述"我能对后端做什么"，凭证由调用方通过 `RequestContext` 传入

pub mod auth_service;
pub mod group_service;
pub mod navigation;
pub mod question_service;
pub mod quiz_service;
pub mod student_service;
pub mod validation;

pub use auth_service::AuthService;
pub use group_service::GroupService;
pub use navigation::{NavItem, RouteDecision, NAV_ITEMS};
pub use question_service::QuestionService;
pub use quiz_service::{HttpExamBackend, QuizService, StudentDashboard};
pub use student_service::StudentService;
