use serde::{Deserialize, Serialize};

use crate::models::question::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizStatus {
    Open,
    Closed,
}

/// 测验
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<QuizStatus>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub questions_number: Option<u32>,
    /// 计划开始时间（后端字段名拼写如此）
    #[serde(rename = "schadule", default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub score_per_question: Option<u32>,
    #[serde(rename = "type", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub participants: Option<u32>,
}

/// 测验创建表单（界面字段）
///
/// 命令行下从 TOML 文件读取
#[derive(Debug, Clone, Deserialize)]
pub struct QuizForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub group_id: String,
    pub number_of_questions: u32,
    pub difficulty: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub schedule_date: String,
    /// `HH:MM`
    pub schedule_time: String,
    pub duration: u32,
    pub score_per_question: u32,
}

/// 发送给后端的测验创建请求：数字字段以字符串形式发送
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: String,
    pub group: String,
    pub questions_number: String,
    pub difficulty: String,
    #[serde(rename = "type")]
    pub category: String,
    pub schadule: String,
    pub duration: String,
    pub score_per_question: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateQuizRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinQuizRequest {
    pub code: String,
}

/// 加入测验返回
#[derive(Debug, Clone, Deserialize)]
pub struct JoinQuizData {
    pub quiz: String,
}

/// 考试题目（不含答案）
#[derive(Debug, Clone, Deserialize)]
pub struct ExamPaper {
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
    /// 时长（分钟）
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub title: String,
}

/// 单题提交
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question: String,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantResult {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub participant: Participant,
    pub score: f64,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub finished_at: Option<String>,
}

/// 测验成绩
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub quiz: Quiz,
    #[serde(default)]
    pub participants: Vec<ParticipantResult>,
}

/// 前五名学生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopStudent {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub avg_score: f64,
    #[serde(default)]
    pub group: Option<crate::models::roster::GroupRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanswered_question_serializes_as_null() {
        let body = SubmitAnswersRequest {
            answers: vec![AnswerRecord {
                question: "Q2".to_string(),
                answer: None,
            }],
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"answers":[{"question":"Q2","answer":null}]}"#
        );
    }

    #[test]
    fn exam_paper_without_questions_is_detectable() {
        let paper: ExamPaper = serde_json::from_str(r#"{"duration":10,"title":"x"}"#).unwrap();
        assert!(paper.questions.is_none());
    }
}
