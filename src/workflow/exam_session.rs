//! 考试会话状态机
//!
//! 纯状态，不做 IO：题目、作答、剩余时间、提交状态都在这里变更。
//! 并发控制由持有者（`ExamRunner`）的锁保证。

use std::collections::HashMap;
use std::fmt;

use crate::error::ExamError;
use crate::models::question::{OptionKey, Question};
use crate::models::quiz::{AnswerRecord, ExamPaper, SubmitAnswersRequest};

/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// 未提交
    Idle,
    /// 提交请求进行中
    Submitting,
    /// 已成功提交（终态）
    Submitted,
    /// 上次提交失败；`expired` 表示失败发生在倒计时结束之后
    Failed { expired: bool },
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Submitting => write!(f, "submitting"),
            SubmissionState::Submitted => write!(f, "submitted"),
            SubmissionState::Failed { expired: true } => write!(f, "failed (time expired)"),
            SubmissionState::Failed { expired: false } => write!(f, "failed"),
        }
    }
}

/// 一次倒计时的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 题目尚未加载，不计时
    NotLoaded,
    /// 仍在计时，附带剩余秒数
    Running(u64),
    /// 本次 tick 恰好归零，应触发自动提交
    Expired,
    /// 已经归零或已提交，计时器应停止
    Stopped,
}

/// 考试会话
#[derive(Debug, Clone)]
pub struct ExamSession {
    quiz_id: String,
    title: String,
    duration_secs: u64,
    questions: Vec<Question>,
    answers: HashMap<String, OptionKey>,
    remaining: Option<u64>,
    state: SubmissionState,
}

impl ExamSession {
    /// 创建未加载的会话
    pub fn new(quiz_id: impl Into<String>) -> Result<Self, ExamError> {
        let quiz_id = quiz_id.into();
        if quiz_id.trim().is_empty() {
            return Err(ExamError::MissingQuizId);
        }
        Ok(Self {
            quiz_id,
            title: String::new(),
            duration_secs: 0,
            questions: Vec::new(),
            answers: HashMap::new(),
            remaining: None,
            state: SubmissionState::Idle,
        })
    }

    /// 装载题目并开始计时：剩余时间 = 时长(分钟) × 60
    pub fn load(&mut self, paper: ExamPaper) -> Result<(), ExamError> {
        let questions = paper.questions.ok_or(ExamError::QuestionsNotFound)?;
        let duration_secs = paper
            .duration
            .checked_mul(60)
            .ok_or(ExamError::InvalidDuration {
                minutes: paper.duration,
            })?;
        self.title = paper.title;
        self.duration_secs = duration_secs;
        self.questions = questions;
        self.remaining = Some(self.duration_secs);
        Ok(())
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == Some(0)
    }

    pub fn answer_for(&self, question_id: &str) -> Option<OptionKey> {
        self.answers.get(question_id).copied()
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    /// 记录选择，覆盖之前的选项；提交成功后忽略
    ///
    /// 不校验题目ID是否属于本次考试
    pub fn select_answer(&mut self, question_id: impl Into<String>, key: OptionKey) -> bool {
        if self.state == SubmissionState::Submitted {
            return false;
        }
        self.answers.insert(question_id.into(), key);
        true
    }

    /// 倒计时走一秒
    pub fn tick(&mut self) -> Tick {
        if self.state == SubmissionState::Submitted {
            return Tick::Stopped;
        }
        match self.remaining {
            None => Tick::NotLoaded,
            Some(0) => Tick::Stopped,
            Some(n) => {
                let left = n - 1;
                self.remaining = Some(left);
                if left == 0 {
                    Tick::Expired
                } else {
                    Tick::Running(left)
                }
            }
        }
    }

    /// 按题目顺序生成提交内容，未作答的题目为 null
    pub fn build_payload(&self) -> SubmitAnswersRequest {
        SubmitAnswersRequest {
            answers: self
                .questions
                .iter()
                .map(|q| AnswerRecord {
                    question: q.id.clone(),
                    answer: self.answers.get(&q.id).map(|k| k.as_str().to_string()),
                })
                .collect(),
        }
    }

    /// 尝试进入提交中状态（比较并交换）
    ///
    /// 只有 `Idle` 或 `Failed` 可以开始提交；成功时返回要发送的内容
    pub fn begin_submission(&mut self) -> Option<SubmitAnswersRequest> {
        match self.state {
            SubmissionState::Idle | SubmissionState::Failed { .. } => {
                self.state = SubmissionState::Submitting;
                Some(self.build_payload())
            }
            SubmissionState::Submitting | SubmissionState::Submitted => None,
        }
    }

    pub fn mark_submitted(&mut self) {
        self.state = SubmissionState::Submitted;
    }

    /// 提交失败：清除进行中标记，作答保持不变
    pub fn mark_failed(&mut self) {
        self.state = SubmissionState::Failed {
            expired: self.is_expired(),
        };
    }
}
