/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use anyhow::Result;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 订阅者
///
/// 优先使用 `RUST_LOG`，否则按 `verbose_logging` 选择 debug / info
pub fn init(config: &Config) {
    let default_level = if config.verbose_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("quizwiz={}", default_level)));

    // 重复初始化（例如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\nQuizWiz 运行日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 QuizWiz 客户端启动");
    info!("🌐 后端地址: {}", config.api_base_url);
    info!("{}", "=".repeat(60));
}

/// 记录考试开始信息
///
/// # 参数
/// - `title`: 测验标题
/// - `question_count`: 题目数量
/// - `duration_secs`: 考试时长（秒）
pub fn log_exam_start(title: &str, question_count: usize, duration_secs: u64) {
    info!("\n{}", "=".repeat(60));
    info!("📝 Quiz: {}", title);
    info!("📄 题目数量: {}", question_count);
    info!("⏱ 考试时长: {}", format_countdown(duration_secs));
    info!("{}", "=".repeat(60));
}

/// 打印考试结束统计
///
/// # 参数
/// - `answered`: 已作答数量
/// - `total`: 题目总数
/// - `submitted`: 是否提交成功
pub fn print_exam_summary(answered: usize, total: usize, submitted: bool) {
    info!("\n{}", "─".repeat(60));
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 已作答: {}/{}", answered, total);
    if submitted {
        info!("📤 答案已提交");
    } else {
        info!("❌ 答案未能提交");
    }
    info!("{}", "─".repeat(60));
}

/// 把剩余秒数格式化为 `mm:ss`
pub fn format_countdown(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_pads_minutes_and_seconds() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(600), "10:00");
        assert_eq!(format_countdown(3725), "62:05");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("مرحبا بالعالم", 5), "مرحبا...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
