//! 题库服务 - 业务能力层

use tracing::info;

use crate::api::questions;
use crate::error::{AppResult, ValidationError};
use crate::infrastructure::{ApiClient, RequestContext};
use crate::models::envelope::MessageOnly;
use crate::models::question::{OptionKey, Question, QuestionForm, UpdateAnswerRequest};

pub struct QuestionService {
    client: ApiClient,
}

impl QuestionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Question>> {
        ctx.require_manager("查看题库")?;
        self.client.get(ctx, questions::ALL).await
    }

    pub async fn create(&self, ctx: &RequestContext, form: &QuestionForm) -> AppResult<String> {
        ctx.require_manager("新增题目")?;
        validate(form)?;
        let res: MessageOnly = self.client.post(ctx, questions::ALL, form).await?;
        info!("✓ 题目已添加: {}", form.title);
        Ok(res.message_or("Question added successfully"))
    }

    /// 修改题目的正确答案
    pub async fn update_answer(
        &self,
        ctx: &RequestContext,
        id: &str,
        answer: OptionKey,
    ) -> AppResult<String> {
        ctx.require_manager("修改题目")?;
        let body = UpdateAnswerRequest { answer };
        let res: MessageOnly = self.client.put(ctx, &questions::by_id(id), &body).await?;
        Ok(res.message_or("Question updated successfully"))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<String> {
        ctx.require_manager("删除题目")?;
        let res: MessageOnly = self.client.delete(ctx, &questions::by_id(id)).await?;
        Ok(res.message_or("Question deleted successfully"))
    }
}

/// 本地搜索：标题、难度或分类包含关键字（不区分大小写）
pub fn filter_questions<'a>(questions: &'a [Question], keyword: &str) -> Vec<&'a Question> {
    let needle = keyword.trim().to_lowercase();
    if needle.is_empty() {
        return questions.iter().collect();
    }
    questions
        .iter()
        .filter(|q| {
            q.title.to_lowercase().contains(&needle)
                || q.difficulty
                    .is_some_and(|d| d.as_str().contains(&needle))
                || q.category
                    .is_some_and(|c| c.as_str().to_lowercase().contains(&needle))
        })
        .collect()
}

fn validate(form: &QuestionForm) -> Result<(), ValidationError> {
    if form.title.trim().is_empty() {
        return Err(ValidationError::new("title", "Title is required"));
    }
    if form.description.trim().is_empty() {
        return Err(ValidationError::new("description", "Description is required"));
    }
    if form.options.iter().any(|(_, text)| text.trim().is_empty()) {
        return Err(ValidationError::new("options", "All four options are required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{Category, Difficulty, QuestionOptions};

    fn question(id: &str, title: &str, difficulty: Difficulty, category: Category) -> Question {
        Question {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            options: QuestionOptions::default(),
            answer: Some(OptionKey::A),
            difficulty: Some(difficulty),
            category: Some(category),
            points: Some(1),
        }
    }

    #[test]
    fn filter_matches_title_difficulty_or_category() {
        let bank = vec![
            question("1", "Flexbox basics", Difficulty::Easy, Category::FE),
            question("2", "Docker volumes", Difficulty::Hard, Category::DO),
            question("3", "REST verbs", Difficulty::Medium, Category::BE),
        ];
        let ids = |kw: &str| -> Vec<String> {
            filter_questions(&bank, kw).iter().map(|q| q.id.clone()).collect()
        };
        assert_eq!(ids("docker"), vec!["2"]);
        assert_eq!(ids("hard"), vec!["2"]);
        assert_eq!(ids("be"), vec!["3"]);
        assert_eq!(ids(""), vec!["1", "2", "3"]);
    }

    #[test]
    fn blank_option_fails_validation() {
        let form = QuestionForm {
            title: "t".to_string(),
            description: "d".to_string(),
            options: QuestionOptions {
                a: "1".to_string(),
                b: "2".to_string(),
                c: " ".to_string(),
                d: "4".to_string(),
            },
            answer: OptionKey::A,
            difficulty: Difficulty::Easy,
            category: Category::FE,
        };
        assert_eq!(validate(&form).unwrap_err().field, "options");
    }
}
