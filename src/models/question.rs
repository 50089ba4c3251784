use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ExamError;

/// 选项键，只允许 A-D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::A => "A",
            OptionKey::B => "B",
            OptionKey::C => "C",
            OptionKey::D => "D",
        }
    }
}

impl std::str::FromStr for OptionKey {
    type Err = ExamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(OptionKey::A),
            "B" | "b" => Ok(OptionKey::B),
            "C" | "c" => Ok(OptionKey::C),
            "D" | "d" => Ok(OptionKey::D),
            other => Err(ExamError::InvalidOption(other.to_string())),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 四个选项的文本
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct QuestionOptions {
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
}

impl QuestionOptions {
    pub fn get(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }

    /// 按 A-D 顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL.into_iter().map(move |k| (k, self.get(k)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// 题目分类：前端 / 后端 / 运维
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    FE,
    BE,
    DO,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::FE => "FE",
            Category::BE => "BE",
            Category::DO => "DO",
        }
    }
}

/// 题目
///
/// 考试期间后端不返回正确答案，此时 `answer` 为 `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub options: QuestionOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<OptionKey>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(rename = "type", default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub points: Option<u32>,
}

/// 新建题目的表单
///
/// 命令行下从 TOML 文件读取
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionForm {
    pub title: String,
    pub description: String,
    pub options: QuestionOptions,
    pub answer: OptionKey,
    pub difficulty: Difficulty,
    #[serde(rename = "type")]
    pub category: Category,
}

/// 修改题目答案
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAnswerRequest {
    pub answer: OptionKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exam_question_without_answer_key_parses() {
        let q: Question = serde_json::from_str(
            r#"{"_id":"q1","title":"What is HTML?","options":{"A":"a","B":"b","C":"c","D":"d"},"difficulty":"easy","type":"FE","points":1}"#,
        )
        .unwrap();
        assert_eq!(q.answer, None);
        assert_eq!(q.options.get(OptionKey::C), "c");
        assert_eq!(q.category, Some(Category::FE));
    }

    #[test]
    fn option_key_rejects_anything_past_d() {
        assert_eq!("b".parse::<OptionKey>().unwrap(), OptionKey::B);
        assert!("E".parse::<OptionKey>().is_err());
        assert!("".parse::<OptionKey>().is_err());
    }
}
