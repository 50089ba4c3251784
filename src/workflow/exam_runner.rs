//! 考试流程 - 流程层
//!
//! 核心职责：把会话状态机、倒计时和后端连接起来
//!
//! 流程顺序：
//! 1. 取题 → 装载会话 → 启动倒计时
//! 2. 作答（随时覆盖）
//! 3. 手动交卷 或 倒计时归零自动交卷
//! 4. 自动交卷失败时按退避策略重试

use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{AppResult, ExamError};
use crate::models::question::OptionKey;
use crate::utils::logging::{format_countdown, log_exam_start};
use crate::workflow::countdown::{spawn_countdown, spawn_guarded, CountdownGuard};
use crate::workflow::exam_backend::ExamBackend;
use crate::workflow::exam_session::{ExamSession, SubmissionState, Tick};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// 自动交卷失败后的重试策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            retries: config.auto_submit_retries,
            backoff: Duration::from_millis(config.auto_submit_backoff_ms),
        }
    }

    pub fn none() -> Self {
        Self {
            retries: 0,
            backoff: Duration::ZERO,
        }
    }
}

/// 一次交卷调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 本次调用成功提交
    Submitted,
    /// 已有提交在进行中或已经提交过，本次没有发请求
    Ignored,
}

/// 对外广播的考试状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamStatus {
    pub state: SubmissionState,
    /// 自动交卷的重试已全部用完
    pub gave_up: bool,
}

impl ExamStatus {
    fn is_final(&self) -> bool {
        self.state == SubmissionState::Submitted || self.gave_up
    }
}

struct Inner {
    session: Mutex<ExamSession>,
    backend: Arc<dyn ExamBackend>,
    policy: RetryPolicy,
    status: watch::Sender<ExamStatus>,
}

impl Inner {
    /// 广播状态变化；调用方持有会话锁，保证广播顺序与状态变更一致
    fn publish(&self, state: SubmissionState, gave_up: bool) {
        self.status.send_modify(|s| {
            s.state = state;
            s.gave_up = s.gave_up || gave_up;
            if state == SubmissionState::Submitted {
                s.gave_up = false;
            }
        });
    }

    /// 提交中的请求被取消：退回失败状态，允许再次交卷
    fn abandon_submission(&self, session: &mut ExamSession) {
        if session.is_in_flight() {
            session.mark_failed();
            self.publish(session.state(), false);
        }
    }
}

/// 交卷请求的进行中标记
///
/// 请求在得到结果之前被丢弃（例如倒计时任务被取消）时，
/// 把会话从 `Submitting` 退回 `Failed`
struct InFlight {
    inner: Arc<Inner>,
    settled: bool,
}

impl InFlight {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!("⚠️ 交卷请求被取消");
        if let Ok(mut session) = self.inner.session.try_lock() {
            self.inner.abandon_submission(&mut session);
            return;
        }
        // 锁被占用时交给运行时稍后处理
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let inner = self.inner.clone();
            runtime.spawn(async move {
                let mut session = inner.session.lock().await;
                inner.abandon_submission(&mut session);
            });
        }
    }
}

/// 考试句柄：作答、交卷、查询状态
///
/// 可以自由克隆，所有克隆共享同一个会话
#[derive(Clone)]
pub struct ExamHandle {
    inner: Arc<Inner>,
}

impl ExamHandle {
    fn new(session: ExamSession, backend: Arc<dyn ExamBackend>, policy: RetryPolicy) -> Self {
        let (status, _) = watch::channel(ExamStatus {
            state: session.state(),
            gave_up: false,
        });
        Self {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                backend,
                policy,
                status,
            }),
        }
    }

    /// 记录选项；已交卷时返回 false
    pub async fn select_answer(&self, question_id: impl Into<String>, key: OptionKey) -> bool {
        let question_id = question_id.into();
        let accepted = self
            .inner
            .session
            .lock()
            .await
            .select_answer(question_id.clone(), key);
        if accepted {
            debug!("作答: {} = {}", question_id, key);
        }
        accepted
    }

    /// 手动交卷
    pub async fn submit(&self) -> AppResult<SubmitOutcome> {
        self.submit_once().await
    }

    pub async fn remaining(&self) -> Option<u64> {
        self.inner.session.lock().await.remaining()
    }

    pub async fn state(&self) -> SubmissionState {
        self.inner.session.lock().await.state()
    }

    /// 当前会话的快照
    pub async fn snapshot(&self) -> ExamSession {
        self.inner.session.lock().await.clone()
    }

    pub fn status(&self) -> ExamStatus {
        *self.inner.status.borrow()
    }

    /// 等待考试结束：交卷成功，或自动交卷重试用尽
    pub async fn finished(&self) -> ExamStatus {
        let mut rx = self.inner.status.subscribe();
        let status = match rx.wait_for(ExamStatus::is_final).await {
            Ok(status) => *status,
            // 发送端与 Inner 同生命周期，这里持有 Inner 不会关闭
            Err(_) => self.status(),
        };
        status
    }

    /// 交卷例程：比较并交换进入提交中状态，发送一次请求
    async fn submit_once(&self) -> AppResult<SubmitOutcome> {
        let (quiz_id, payload) = {
            let mut session = self.inner.session.lock().await;
            match session.begin_submission() {
                Some(payload) => {
                    self.inner.publish(SubmissionState::Submitting, false);
                    (session.quiz_id().to_string(), payload)
                }
                None => {
                    debug!("交卷请求被忽略，当前状态: {}", session.state());
                    return Ok(SubmitOutcome::Ignored);
                }
            }
        };

        let in_flight = InFlight {
            inner: self.inner.clone(),
            settled: false,
        };
        info!("📤 正在提交 {} 道题的答案...", payload.answers.len());

        match self.inner.backend.submit_answers(&quiz_id, &payload).await {
            Ok(()) => {
                let mut session = self.inner.session.lock().await;
                session.mark_submitted();
                self.inner.publish(SubmissionState::Submitted, false);
                in_flight.settle();
                drop(session);
                info!("✓ Answers sent successfully");
                Ok(SubmitOutcome::Submitted)
            }
            Err(e) => {
                {
                    let mut session = self.inner.session.lock().await;
                    session.mark_failed();
                    self.inner.publish(session.state(), false);
                    in_flight.settle();
                }
                warn!("⚠️ Failed to send answers: {}", e);
                Err(ExamError::SubmitFailed {
                    quiz_id,
                    message: e.user_message(),
                }
                .into())
            }
        }
    }

    /// 倒计时归零后的自动交卷，失败时按指数退避重试
    async fn auto_submit(&self) {
        let RetryPolicy { retries, backoff } = self.inner.policy;
        let mut delay = backoff;
        info!("⏰ 时间到，自动交卷");

        for attempt in 0..=retries {
            match self.submit_once().await {
                Ok(SubmitOutcome::Submitted) => return,
                Ok(SubmitOutcome::Ignored) => {
                    // 手动交卷正在进行，等它出结果
                    let mut rx = self.inner.status.subscribe();
                    let settled = rx
                        .wait_for(|s| s.state != SubmissionState::Submitting)
                        .await
                        .map(|s| s.state);
                    if matches!(settled, Ok(SubmissionState::Submitted)) {
                        return;
                    }
                }
                Err(e) => {
                    warn!("自动交卷失败 (尝试 {}/{}): {}", attempt + 1, retries + 1, e);
                }
            }

            if attempt < retries {
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
            }
        }

        error!("❌ 自动交卷失败，已重试 {} 次", retries);
        let session = self.inner.session.lock().await;
        self.inner.publish(session.state(), true);
    }

    /// 每秒调用一次
    async fn on_tick(&self) -> ControlFlow<()> {
        let tick = self.inner.session.lock().await.tick();
        match tick {
            Tick::NotLoaded => ControlFlow::Continue(()),
            Tick::Running(left) => {
                if left % 60 == 0 || left <= 10 {
                    info!("⏱ {}", format_countdown(left));
                }
                ControlFlow::Continue(())
            }
            Tick::Expired => {
                self.auto_submit().await;
                ControlFlow::Break(())
            }
            Tick::Stopped => ControlFlow::Break(()),
        }
    }
}

/// 一次进行中的考试
///
/// 持有倒计时任务和立即交卷任务；丢弃 `ExamRunner` 即结束计时（离开页面）
pub struct ExamRunner {
    handle: ExamHandle,
    countdown: CountdownGuard,
    immediate: Option<CountdownGuard>,
}

impl ExamRunner {
    /// 取题并开始考试
    pub async fn start(
        backend: Arc<dyn ExamBackend>,
        quiz_id: &str,
        policy: RetryPolicy,
    ) -> AppResult<Self> {
        let mut session = ExamSession::new(quiz_id).inspect_err(|e| warn!("⚠️ {}", e))?;

        let paper = backend
            .fetch_paper(quiz_id)
            .await
            .inspect_err(|e| warn!("⚠️ 获取题目失败: {}", e.user_message()))?;
        session.load(paper).inspect_err(|e| warn!("⚠️ {}", e))?;

        log_exam_start(
            session.title(),
            session.questions().len(),
            session.duration_secs(),
        );

        let expired_on_load = session.is_expired();
        let handle = ExamHandle::new(session, backend, policy);

        let ticker = handle.clone();
        let countdown = spawn_countdown(TICK_PERIOD, move || {
            let ticker = ticker.clone();
            async move { ticker.on_tick().await }
        });

        let immediate = if expired_on_load {
            // 时长为 0：立即交卷，不等待计时
            countdown.cancel();
            let submitter = handle.clone();
            Some(spawn_guarded(async move { submitter.auto_submit().await }))
        } else {
            None
        };

        Ok(Self {
            handle,
            countdown,
            immediate,
        })
    }

    pub fn handle(&self) -> ExamHandle {
        self.handle.clone()
    }

    /// 倒计时是否已停止
    pub fn countdown_stopped(&self) -> bool {
        self.countdown.is_finished()
    }

    /// 后台是否还有交卷任务在运行（仅时长为 0 的测验）
    pub fn immediate_submit_running(&self) -> bool {
        self.immediate.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// 等待考试结束
    pub async fn finished(&self) -> ExamStatus {
        self.handle.finished().await
    }
}
