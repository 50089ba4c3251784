//! 流程层（Workflow）
//!
//! 一次考试的完整流程：取题 → 计时 → 作答 → 交卷

pub mod countdown;
pub mod exam_backend;
pub mod exam_runner;
pub mod exam_session;

pub use countdown::{spawn_countdown, spawn_guarded, CountdownGuard};
pub use exam_backend::ExamBackend;
pub use exam_runner::{ExamHandle, ExamRunner, ExamStatus, RetryPolicy, SubmitOutcome};
pub use exam_session::{ExamSession, SubmissionState, Tick};
