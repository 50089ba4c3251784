//! 测验服务 - 业务能力层
//!
//! 讲师：测验的增删改查
//! 学生：加入测验、取题、交卷、查看成绩

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::{debug, info};

use crate::api::quizzes;
use crate::error::{ApiError, AppResult, ExamError, ValidationError};
use crate::infrastructure::{ApiClient, RequestContext};
use crate::models::envelope::{ApiEnvelope, MessageOnly};
use crate::models::quiz::{
    CreateQuizRequest, ExamPaper, JoinQuizData, JoinQuizRequest, Quiz, QuizForm, QuizResult,
    SubmitAnswersRequest, UpdateQuizRequest,
};
use crate::services::validation;
use crate::workflow::ExamBackend;

/// 学生首页数据：即将开始与最近完成的测验
#[derive(Debug, Clone, Default)]
pub struct StudentDashboard {
    pub incoming: Vec<Quiz>,
    pub completed: Vec<Quiz>,
}

pub struct QuizService {
    client: ApiClient,
}

impl QuizService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    // ========== 讲师 ==========

    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Quiz>> {
        ctx.require_manager("查看测验")?;
        self.client.get(ctx, quizzes::ALL).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<Quiz> {
        ctx.require_manager("查看测验")?;
        self.client.get(ctx, &quizzes::by_id(id)).await
    }

    /// 创建测验，返回生成的邀请码
    pub async fn create<Tz: TimeZone>(
        &self,
        ctx: &RequestContext,
        form: &QuizForm,
        tz: &Tz,
    ) -> AppResult<String> {
        ctx.require_manager("创建测验")?;
        let request = build_create_request(form, tz)?;
        debug!("创建测验: {:?}", request);

        let res: ApiEnvelope<Quiz> = self.client.post(ctx, quizzes::ALL, &request).await?;
        let code = res.data.code.ok_or_else(|| ApiError::MissingField {
            endpoint: quizzes::ALL.to_string(),
            field: "data.code".to_string(),
        })?;

        info!(
            "✓ {} (邀请码: {})",
            res.message.as_deref().unwrap_or("Quiz created"),
            code
        );
        Ok(code)
    }

    /// 修改测验标题
    pub async fn update_title(
        &self,
        ctx: &RequestContext,
        id: &str,
        title: &str,
    ) -> AppResult<String> {
        ctx.require_manager("修改测验")?;
        let body = UpdateQuizRequest {
            title: title.trim().to_string(),
        };
        if body.title.is_empty() {
            return Err(ValidationError::new("title", "Title is required").into());
        }
        let res: MessageOnly = self.client.put(ctx, &quizzes::by_id(id), &body).await?;
        Ok(res.message_or("Quiz updated successfully"))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<String> {
        ctx.require_manager("删除测验")?;
        let res: MessageOnly = self.client.delete(ctx, &quizzes::by_id(id)).await?;
        Ok(res.message_or("Quiz deleted successfully"))
    }

    // ========== 通用 ==========

    pub async fn completed(&self, ctx: &RequestContext) -> AppResult<Vec<Quiz>> {
        ctx.require_login()?;
        self.client.get(ctx, quizzes::COMPLETED).await
    }

    pub async fn incoming(&self, ctx: &RequestContext) -> AppResult<Vec<Quiz>> {
        ctx.require_login()?;
        self.client.get(ctx, quizzes::INCOMING).await
    }

    /// 成绩列表
    pub async fn results(&self, ctx: &RequestContext) -> AppResult<Vec<QuizResult>> {
        ctx.require_login()?;
        self.client.get(ctx, quizzes::RESULTS).await
    }

    /// 同时获取即将开始和已完成的测验
    pub async fn dashboard(&self, ctx: &RequestContext) -> AppResult<StudentDashboard> {
        let (incoming, completed) =
            futures::try_join!(self.incoming(ctx), self.completed(ctx))?;
        Ok(StudentDashboard {
            incoming,
            completed,
        })
    }

    // ========== 学生 ==========

    /// 用邀请码加入测验，返回测验ID
    pub async fn join(&self, ctx: &RequestContext, code: &str) -> AppResult<String> {
        ctx.require_login()?;
        let code = code.trim();
        if code.is_empty() {
            return Err(ValidationError::new("code", "Code is required").into());
        }
        let body = JoinQuizRequest {
            code: code.to_string(),
        };
        let res: ApiEnvelope<JoinQuizData> = self.client.post(ctx, quizzes::JOIN, &body).await?;
        info!(
            "✓ {}",
            res.message.as_deref().unwrap_or("Joined quiz successfully")
        );
        Ok(res.data.quiz)
    }

    /// 考试用的后端实现，绑定当前凭证
    pub fn exam_backend(&self, ctx: &RequestContext) -> HttpExamBackend {
        HttpExamBackend {
            client: self.client.clone(),
            ctx: ctx.clone(),
        }
    }
}

/// 过滤成绩：测验标题包含关键字（不区分大小写）
pub fn filter_results<'a>(results: &'a [QuizResult], keyword: &str) -> Vec<&'a QuizResult> {
    let needle = keyword.to_lowercase();
    results
        .iter()
        .filter(|r| r.quiz.title.to_lowercase().contains(&needle))
        .collect()
}

/// 把界面表单转换为后端请求
///
/// 日期 + 时间按 `tz` 解释，再转换为 UTC 的 ISO-8601 字符串；数字字段以字符串发送
pub fn build_create_request<Tz: TimeZone>(
    form: &QuizForm,
    tz: &Tz,
) -> Result<CreateQuizRequest, ValidationError> {
    validation::quiz(form)?;

    let date = NaiveDate::parse_from_str(form.schedule_date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::new("scheduleDate", "Invalid schedule date"))?;
    let time = NaiveTime::parse_from_str(form.schedule_time.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(form.schedule_time.trim(), "%H:%M:%S"))
        .map_err(|_| ValidationError::new("scheduleTime", "Invalid schedule time"))?;
    let local = tz
        .from_local_datetime(&date.and_time(time))
        .earliest()
        .ok_or_else(|| ValidationError::new("scheduleTime", "Invalid schedule time"))?;
    let schadule = local
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string();

    Ok(CreateQuizRequest {
        title: form.title.trim().to_string(),
        description: form.description.clone(),
        group: form.group_id.clone(),
        questions_number: form.number_of_questions.to_string(),
        difficulty: form.difficulty.clone(),
        category: form.category.clone(),
        schadule,
        duration: form.duration.to_string(),
        score_per_question: form.score_per_question.to_string(),
    })
}

/// 通过 REST 接口取题、交卷
pub struct HttpExamBackend {
    client: ApiClient,
    ctx: RequestContext,
}

#[async_trait]
impl ExamBackend for HttpExamBackend {
    async fn fetch_paper(&self, quiz_id: &str) -> AppResult<ExamPaper> {
        if quiz_id.trim().is_empty() {
            return Err(ExamError::MissingQuizId.into());
        }
        self.ctx.require_login()?;
        let res: ApiEnvelope<ExamPaper> = self
            .client
            .get(&self.ctx, &quizzes::without_answers(quiz_id))
            .await?;
        Ok(res.data)
    }

    async fn submit_answers(
        &self,
        quiz_id: &str,
        answers: &SubmitAnswersRequest,
    ) -> AppResult<()> {
        let _: MessageOnly = self
            .client
            .post(&self.ctx, &quizzes::submit(quiz_id), answers)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn form() -> QuizForm {
        QuizForm {
            title: "  Rust ownership ".to_string(),
            description: "borrowing".to_string(),
            group_id: "g1".to_string(),
            number_of_questions: 10,
            difficulty: "medium".to_string(),
            category: "BE".to_string(),
            schedule_date: "2026-11-01".to_string(),
            schedule_time: "10:30".to_string(),
            duration: 15,
            score_per_question: 2,
        }
    }

    #[test]
    fn create_request_sends_numbers_as_strings_and_utc_schedule() {
        let req = build_create_request(&form(), &Utc).unwrap();
        assert_eq!(req.title, "Rust ownership");
        assert_eq!(req.questions_number, "10");
        assert_eq!(req.duration, "15");
        assert_eq!(req.score_per_question, "2");
        assert_eq!(req.schadule, "2026-11-01T10:30:00.000Z");
    }

    #[test]
    fn schedule_is_converted_from_local_offset() {
        let cairo = FixedOffset::east_opt(2 * 3600).unwrap();
        let req = build_create_request(&form(), &cairo).unwrap();
        assert_eq!(req.schadule, "2026-11-01T08:30:00.000Z");
    }

    #[test]
    fn bad_schedule_date_is_a_validation_error() {
        let mut f = form();
        f.schedule_date = "01/11/2026".to_string();
        assert_eq!(
            build_create_request(&f, &Utc).unwrap_err().field,
            "scheduleDate"
        );
    }
}
