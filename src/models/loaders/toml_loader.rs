use crate::error::{AppError, AppResult, FileError};
use crate::models::answer_sheet::AnswerSheet;
use crate::models::question::QuestionForm;
use crate::models::quiz::QuizForm;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 读取并解析一个 TOML 文件
async fn read_toml<T: DeserializeOwned>(toml_file_path: &Path) -> AppResult<T> {
    let path = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|source| AppError::file_read_failed(path.clone(), source))?;

    toml::from_str(&content).map_err(|source| FileError::TomlParseFailed { path, source }.into())
}

/// 从 TOML 文件加载答题卡
pub async fn load_answer_sheet(toml_file_path: &Path) -> AppResult<AnswerSheet> {
    let mut sheet: AnswerSheet = read_toml(toml_file_path).await?;
    sheet.file_path = Some(toml_file_path.to_string_lossy().to_string());
    Ok(sheet)
}

/// 从 TOML 文件加载测验创建表单
pub async fn load_quiz_form(toml_file_path: &Path) -> AppResult<QuizForm> {
    read_toml(toml_file_path).await
}

/// 从 TOML 文件加载新题目表单
pub async fn load_question_form(toml_file_path: &Path) -> AppResult<QuestionForm> {
    read_toml(toml_file_path).await
}

/// 从文件夹中加载所有答题卡，解析失败的文件只记录警告
pub async fn load_all_answer_sheets(folder_path: &str) -> AppResult<Vec<AnswerSheet>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::NotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut sheets = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|source| AppError::file_read_failed(folder_path, source))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| AppError::file_read_failed(folder_path, source))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            tracing::info!(
                "正在加载: {}",
                path.file_name().unwrap_or_default().to_string_lossy()
            );

            match load_answer_sheet(&path).await {
                Ok(sheet) => {
                    tracing::info!("成功加载 {} 个答案", sheet.answers.len());
                    sheets.push(sheet);
                }
                Err(e) => {
                    tracing::warn!("加载文件失败 {}: {}", path.display(), e);
                }
            }
        }
    }

    sheets.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::OptionKey;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        std::fs::create_dir_all(&p).expect("create temp dir");
        p
    }

    #[tokio::test]
    async fn loads_sheets_and_skips_broken_files() {
        let dir = temp_dir("quizwiz-sheets");
        std::fs::write(
            dir.join("a.toml"),
            "quiz_code = \"ABC123\"\nsubmit_after_secs = 5\n[answers]\nq1 = \"B\"\n",
        )
        .unwrap();
        std::fs::write(dir.join("b.toml"), "quiz_code = ").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let sheets = load_all_answer_sheets(dir.to_str().unwrap()).await.unwrap();
        assert_eq!(sheets.len(), 1);
        assert_eq!(sheets[0].quiz_code.as_deref(), Some("ABC123"));
        assert_eq!(sheets[0].submit_after_secs, Some(5));
        assert_eq!(sheets[0].parsed_answers().unwrap(), vec![("q1".to_string(), OptionKey::B)]);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn loads_quiz_form() {
        let dir = temp_dir("quizwiz-form");
        let path = dir.join("quiz.toml");
        std::fs::write(
            &path,
            r#"
title = "Week 3"
group_id = "g1"
number_of_questions = 5
difficulty = "easy"
category = "FE"
schedule_date = "2026-11-01"
schedule_time = "09:00"
duration = 10
score_per_question = 1
"#,
        )
        .unwrap();

        let form = load_quiz_form(&path).await.unwrap();
        assert_eq!(form.title, "Week 3");
        assert_eq!(form.description, "");
        assert_eq!(form.duration, 10);

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn loads_question_form() {
        let dir = temp_dir("quizwiz-question");
        let path = dir.join("question.toml");
        std::fs::write(
            &path,
            r#"
title = "HTTP verbs"
description = "Which verb is idempotent?"
answer = "B"
difficulty = "hard"
type = "BE"

[options]
A = "POST"
B = "PUT"
C = "PATCH"
D = "CONNECT"
"#,
        )
        .unwrap();

        let form = load_question_form(&path).await.unwrap();
        assert_eq!(form.answer, OptionKey::B);
        assert_eq!(form.options.d, "CONNECT");
        assert_eq!(form.category.as_str(), "BE");

        std::fs::write(&path, "title = \"x\"\n").unwrap();
        let err = load_question_form(&path).await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::TomlParseFailed { .. })));

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn missing_folder_is_an_error() {
        let err = load_all_answer_sheets("/definitely/not/here").await.unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotFound { .. })));
    }
}
