//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：日志文件、HTTP 客户端、会话存储
//! 2. **命令分发**：把命令交给对应的服务
//! 3. **结果输出**：列表与统计通过日志打印
//! 4. **批量考试**：逐份处理文件夹中的答题卡并汇总

use anyhow::Result;
use chrono::Local;
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AuthError};
use crate::infrastructure::{ApiClient, RequestContext, SessionStore};
use crate::models::roster::GroupMember;
use crate::models::{
    load_all_answer_sheets, load_answer_sheet, load_question_form, load_quiz_form,
};
use crate::orchestrator::command::{Command, USAGE};
use crate::orchestrator::exam_processor::{self, ExamStats};
use crate::services::navigation::{self, RouteDecision};
use crate::services::quiz_service::filter_results;
use crate::services::question_service::filter_questions;
use crate::services::{AuthService, GroupService, QuestionService, QuizService, StudentService};
use crate::utils::logging::{init_log_file, log_startup};
use crate::utils::truncate_text;
use crate::workflow::RetryPolicy;

/// 应用主结构
pub struct App {
    config: Config,
    client: ApiClient,
    store: SessionStore,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)?;
        log_startup(&config);

        let client = ApiClient::new(&config)?;
        let store = SessionStore::open(&config.session_file)?;
        if let Some(profile) = store.profile() {
            info!("👤 当前用户: {}", profile.display_name());
        }

        Ok(Self {
            config,
            client,
            store,
        })
    }

    /// 执行一条命令
    pub async fn run(&mut self, command: Command) -> Result<()> {
        match self.dispatch(command).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("❌ {}", e.user_message());
                Err(e.into())
            }
        }
    }

    fn ctx(&self) -> Result<RequestContext, AuthError> {
        self.store.require_login()
    }

    async fn dispatch(&mut self, command: Command) -> Result<(), AppError> {
        let auth = AuthService::new(self.client.clone());
        let groups = GroupService::new(self.client.clone());
        let students = StudentService::new(self.client.clone());
        let questions = QuestionService::new(self.client.clone());
        let quizzes = QuizService::new(self.client.clone());

        match command {
            Command::Help => info!("{}", USAGE),

            // ========== 认证 ==========
            Command::Login { email, password } => {
                let profile = auth.login(&mut self.store, &email, &password).await?;
                info!(
                    "👤 {} ({})",
                    profile.display_name(),
                    profile.role.map(|r| r.as_str()).unwrap_or("-")
                );
            }
            Command::Logout => {
                auth.logout(&mut self.store)?;
            }
            Command::Register(form) => info!("✓ {}", auth.register(&form).await?),
            Command::ForgotPassword { email } => {
                info!("✓ {}", auth.forgot_password(&email).await?)
            }
            Command::ResetPassword(form) => info!("✓ {}", auth.reset_password(&form).await?),
            Command::ChangePassword(form) => {
                let ctx = self.ctx()?;
                info!("✓ {}", auth.change_password(&ctx, &form).await?);
            }

            // ========== 导航 ==========
            Command::Menu => {
                let role = self.store.state().role();
                for item in navigation::visible_items(role) {
                    info!("  {:<12} {}", item.label, item.href);
                }
            }
            Command::Route { path } => {
                match navigation::guard(&path, self.store.state()) {
                    RouteDecision::Allow => info!("✓ {} 可以访问", path),
                    RouteDecision::RedirectLogin => warn!("↪ {} → /login", path),
                    RouteDecision::RedirectDashboard => warn!("↪ {} → /dashboard", path),
                }
            }

            // ========== 首页 ==========
            Command::Dashboard => {
                let ctx = self.ctx()?;
                if ctx.role().is_some_and(|r| r.can_manage()) {
                    let (incoming, top) =
                        futures::try_join!(quizzes.incoming(&ctx), students.top_five(&ctx))?;
                    info!("📅 即将开始的测验: {}", incoming.len());
                    for quiz in &incoming {
                        info!(
                            "  {} | {}",
                            quiz.title,
                            quiz.schedule.as_deref().unwrap_or("-")
                        );
                    }
                    info!("🏆 前五名学生:");
                    for s in &top {
                        info!(
                            "  {} {} | {:.1}",
                            s.first_name, s.last_name, s.avg_score
                        );
                    }
                } else {
                    let dashboard = quizzes.dashboard(&ctx).await?;
                    info!("📅 即将开始: {}", dashboard.incoming.len());
                    for quiz in &dashboard.incoming {
                        info!(
                            "  {} | {}",
                            quiz.title,
                            quiz.schedule.as_deref().unwrap_or("-")
                        );
                    }
                    info!("✅ 已完成: {}", dashboard.completed.len());
                    for quiz in &dashboard.completed {
                        info!("  {}", quiz.title);
                    }
                }
            }

            // ========== 讲师 ==========
            Command::Groups => {
                let ctx = self.ctx()?;
                for group in groups.list(&ctx).await? {
                    info!(
                        "  {} | {} | {} 名学生",
                        group.id,
                        group.name,
                        group.students.len()
                    );
                }
            }
            Command::GroupShow { id } => {
                let ctx = self.ctx()?;
                let group = groups.get(&ctx, &id).await?;
                info!("👥 {} ({} 名学生)", group.name, group.students.len());
                for member in &group.students {
                    match member {
                        GroupMember::Full(s) => info!("  {} | {}", s.id, s.full_name()),
                        GroupMember::Id(id) => info!("  {}", id),
                    }
                }
            }
            Command::GroupCreate(form) => {
                let ctx = self.ctx()?;
                info!("✓ {}", groups.create(&ctx, &form).await?);
            }
            Command::GroupUpdate { id, form } => {
                let ctx = self.ctx()?;
                info!("✓ {}", groups.update(&ctx, &id, &form).await?);
            }
            Command::GroupDelete { id } => {
                let ctx = self.ctx()?;
                info!("✓ {}", groups.delete(&ctx, &id).await?);
            }
            Command::Students { without_group } => {
                let ctx = self.ctx()?;
                let list = if without_group {
                    students.list_without_group(&ctx).await?
                } else {
                    students.list(&ctx).await?
                };
                for s in &list {
                    info!(
                        "  {} | {} | {}",
                        s.id,
                        s.full_name(),
                        s.group.as_ref().map(|g| g.name.as_str()).unwrap_or("-")
                    );
                }
                info!("共 {} 名学生", list.len());
            }
            Command::StudentShow { id } => {
                let ctx = self.ctx()?;
                let s = students.get(&ctx, &id).await?;
                info!(
                    "👤 {} | {} | 分组 {} | 平均分 {}",
                    s.full_name(),
                    s.email,
                    s.group.as_ref().map(|g| g.name.as_str()).unwrap_or("-"),
                    s.avg_score
                        .map(|v| format!("{:.1}", v))
                        .unwrap_or_else(|| "-".to_string())
                );
            }
            Command::StudentDelete { id } => {
                let ctx = self.ctx()?;
                info!("✓ {}", students.delete(&ctx, &id).await?);
            }
            Command::TopStudents => {
                let ctx = self.ctx()?;
                for s in students.top_five(&ctx).await? {
                    info!("  {} {} | {:.1}", s.first_name, s.last_name, s.avg_score);
                }
            }
            Command::Questions { keyword } => {
                let ctx = self.ctx()?;
                let all = questions.list(&ctx).await?;
                let shown = filter_questions(&all, keyword.as_deref().unwrap_or(""));
                for q in &shown {
                    info!(
                        "  {} | {} | {}",
                        q.id,
                        truncate_text(&q.title, 50),
                        q.answer.map(|k| k.as_str()).unwrap_or("-")
                    );
                }
                info!("显示 {}/{} 道题", shown.len(), all.len());
            }
            Command::QuestionCreate { form_file } => {
                let ctx = self.ctx()?;
                let form = load_question_form(&form_file).await?;
                info!("✓ {}", questions.create(&ctx, &form).await?);
            }
            Command::QuestionAnswer { id, answer } => {
                let ctx = self.ctx()?;
                info!("✓ {}", questions.update_answer(&ctx, &id, answer).await?);
            }
            Command::QuestionDelete { id } => {
                let ctx = self.ctx()?;
                info!("✓ {}", questions.delete(&ctx, &id).await?);
            }
            Command::Quizzes => {
                let ctx = self.ctx()?;
                for quiz in quizzes.list(&ctx).await? {
                    info!(
                        "  {} | {} | {} | {}",
                        quiz.id,
                        quiz.title,
                        quiz.code.as_deref().unwrap_or("-"),
                        quiz.schedule.as_deref().unwrap_or("-")
                    );
                }
            }
            Command::QuizShow { id } => {
                let ctx = self.ctx()?;
                let quiz = quizzes.get(&ctx, &id).await?;
                info!(
                    "📝 {} | 邀请码 {} | {} | {} 分钟 | {} 题",
                    quiz.title,
                    quiz.code.as_deref().unwrap_or("-"),
                    quiz.schedule.as_deref().unwrap_or("-"),
                    quiz.duration.unwrap_or(0),
                    quiz.questions_number.unwrap_or(0)
                );
            }
            Command::QuizCreate { form_file } => {
                let ctx = self.ctx()?;
                let form = load_quiz_form(&form_file).await?;
                let code = quizzes.create(&ctx, &form, &Local).await?;
                info!("🔑 邀请码: {}", code);
            }
            Command::QuizRename { id, title } => {
                let ctx = self.ctx()?;
                info!("✓ {}", quizzes.update_title(&ctx, &id, &title).await?);
            }
            Command::QuizDelete { id } => {
                let ctx = self.ctx()?;
                info!("✓ {}", quizzes.delete(&ctx, &id).await?);
            }

            // ========== 学生 ==========
            Command::Join { code } => {
                let ctx = self.ctx()?;
                let quiz_id = quizzes.join(&ctx, &code).await?;
                info!("📝 测验ID: {}", quiz_id);
            }
            Command::Exam { sheet } => {
                let ctx = self.ctx()?;
                self.run_sheet(&quizzes, &ctx, &sheet).await?;
            }
            Command::ExamAll { folder } => {
                let ctx = self.ctx()?;
                self.run_folder(&quizzes, &ctx, &folder).await?;
            }
            Command::Results { keyword } => {
                let ctx = self.ctx()?;
                let all = quizzes.results(&ctx).await?;
                for result in filter_results(&all, keyword.as_deref().unwrap_or("")) {
                    info!(
                        "📊 {} ({} 人参加)",
                        result.quiz.title,
                        result.participants.len()
                    );
                    for p in &result.participants {
                        info!(
                            "  {} {} | {}",
                            p.participant.first_name, p.participant.last_name, p.score
                        );
                    }
                }
            }
        }
        Ok(())
    }

    /// 处理单份答题卡
    async fn run_sheet(
        &self,
        quizzes: &QuizService,
        ctx: &RequestContext,
        path: &Path,
    ) -> Result<ExamStats, AppError> {
        let sheet = load_answer_sheet(path).await?;
        exam_processor::process_answer_sheet(
            quizzes,
            ctx,
            &sheet,
            RetryPolicy::from_config(&self.config),
        )
        .await
    }

    /// 逐份处理文件夹中的答题卡
    ///
    /// 同一时间只进行一场考试
    async fn run_folder(
        &self,
        quizzes: &QuizService,
        ctx: &RequestContext,
        folder: &str,
    ) -> Result<(), AppError> {
        info!("\n📁 正在扫描答题卡...");
        let sheets = load_all_answer_sheets(folder).await?;

        if sheets.is_empty() {
            warn!("⚠️ 没有找到答题卡，程序结束");
            return Ok(());
        }

        let policy = RetryPolicy::from_config(&self.config);
        let mut stats = RunStats {
            total: sheets.len(),
            ..Default::default()
        };

        for (idx, sheet) in sheets.iter().enumerate() {
            let name = sheet.file_path.as_deref().unwrap_or("-");
            info!("\n[{}/{}] {}", idx + 1, stats.total, name);
            match exam_processor::process_answer_sheet(quizzes, ctx, sheet, policy).await {
                Ok(exam) if exam.submitted => stats.success += 1,
                Ok(_) => stats.failed += 1,
                Err(e) => {
                    error!("[{}] ❌ {}", name, e.user_message());
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(&stats);
        Ok(())
    }
}

/// 批量考试统计
#[derive(Debug, Default)]
struct RunStats {
    success: usize,
    failed: usize,
    total: usize,
}

fn print_final_stats(stats: &RunStats) {
    info!("\n{}", "=".repeat(60));
    info!("🎉 所有答题卡处理完成！");
    info!(
        "📊 统计: 提交成功 {} | 失败 {} | 总计 {}",
        stats.success, stats.failed, stats.total
    );
    info!("{}", "=".repeat(60));
}
