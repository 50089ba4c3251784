//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责命令分发和考试调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `command` - 命令行解析
//! - 把参数切分为 `Command`
//!
//! ### `app` - 应用入口
//! - 管理应用生命周期（日志文件、HTTP 客户端、会话存储）
//! - 把命令分发给各个服务
//! - 批量处理答题卡并输出统计
//!
//! ### `exam_processor` - 单份答题卡处理器
//! - 加入测验、开考、作答、交卷
//! - 输出单场考试的统计
//!
//! ## 层次关系
//!
//! ```text
//! app (处理 Command / Vec<AnswerSheet>)
//!     ↓
//! exam_processor (处理一份 AnswerSheet)
//!     ↓
//! workflow::ExamRunner (计时 + 交卷)
//!     ↓
//! services (能力层：auth / groups / students / questions / quizzes)
//!     ↓
//! infrastructure (基础设施：ApiClient / SessionStore)
//! ```

pub mod app;
pub mod command;
pub mod exam_processor;

pub use app::App;
pub use command::Command;
pub use exam_processor::{process_answer_sheet, ExamStats};
