//! 单份答题卡处理器 - 编排层
//!
//! ## 核心功能
//!
//! 1. **确定测验**：答题卡给出 quiz_id 直接使用，否则用邀请码加入
//! 2. **开考**：取题、启动倒计时（`ExamRunner`）
//! 3. **作答**：按答题卡逐题选择
//! 4. **交卷**：到点手动交卷，或等待倒计时结束自动交卷
//! 5. **统计输出**：已作答数量与提交结果

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{AppResult, ExamError};
use crate::infrastructure::RequestContext;
use crate::models::answer_sheet::AnswerSheet;
use crate::services::QuizService;
use crate::utils::logging::print_exam_summary;
use crate::workflow::{ExamRunner, RetryPolicy, SubmissionState, SubmitOutcome};

/// 一场考试的结果
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExamStats {
    pub answered: usize,
    pub total: usize,
    pub submitted: bool,
}

/// 按答题卡完成一场考试
pub async fn process_answer_sheet(
    quizzes: &QuizService,
    ctx: &RequestContext,
    sheet: &AnswerSheet,
    policy: RetryPolicy,
) -> AppResult<ExamStats> {
    let answers = sheet.parsed_answers()?;
    let quiz_id = resolve_quiz_id(quizzes, ctx, sheet).await?;

    let backend = Arc::new(quizzes.exam_backend(ctx));
    let runner = ExamRunner::start(backend, &quiz_id, policy).await?;
    let handle = runner.handle();

    let snapshot = handle.snapshot().await;
    for (question_id, key) in answers {
        if !snapshot.questions().iter().any(|q| q.id == question_id) {
            warn!("⚠️ 题目 {} 不在本次测验中，仍会记录", question_id);
        }
        handle.select_answer(question_id, key).await;
    }
    info!(
        "✓ 已作答 {}/{}",
        handle.snapshot().await.answered_count(),
        snapshot.questions().len()
    );

    match sheet.submit_after_secs {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                    match handle.submit().await {
                        Ok(SubmitOutcome::Submitted) => {}
                        Ok(SubmitOutcome::Ignored) => info!("已有提交在进行中"),
                        Err(e) => warn!("⚠️ {}，等待倒计时结束后自动提交", e),
                    }
                }
                _ = runner.finished() => {}
            }
        }
        None => info!("⏳ 等待倒计时结束后自动提交..."),
    }

    let status = runner.finished().await;
    let session = handle.snapshot().await;
    let stats = ExamStats {
        answered: session.answered_count(),
        total: session.questions().len(),
        submitted: status.state == SubmissionState::Submitted,
    };
    print_exam_summary(stats.answered, stats.total, stats.submitted);
    Ok(stats)
}

async fn resolve_quiz_id(
    quizzes: &QuizService,
    ctx: &RequestContext,
    sheet: &AnswerSheet,
) -> AppResult<String> {
    if let Some(id) = sheet.quiz_id.as_deref().filter(|id| !id.trim().is_empty()) {
        return Ok(id.to_string());
    }
    match sheet.quiz_code.as_deref() {
        Some(code) => quizzes.join(ctx, code).await,
        None => Err(ExamError::MissingQuizId.into()),
    }
}
