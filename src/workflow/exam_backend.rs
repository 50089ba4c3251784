//! 考试流程依赖的后端能力

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::quiz::{ExamPaper, SubmitAnswersRequest};

/// 考试后端：取题、交卷
///
/// 生产环境由 HTTP 实现，测试中可替换为内存实现
#[async_trait]
pub trait ExamBackend: Send + Sync {
    /// 获取不含答案的试题
    async fn fetch_paper(&self, quiz_id: &str) -> AppResult<ExamPaper>;

    /// 提交答案（每次调用恰好一个网络请求，不做自动重试）
    async fn submit_answers(&self, quiz_id: &str, answers: &SubmitAnswersRequest)
        -> AppResult<()>;
}
