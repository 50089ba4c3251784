use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ExamError;
use crate::models::question::OptionKey;

/// 脚本化作答用的答题卡（TOML）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerSheet {
    /// 加入测验用的邀请码
    #[serde(default)]
    pub quiz_code: Option<String>,
    /// 直接指定测验ID（跳过加入步骤）
    #[serde(default)]
    pub quiz_id: Option<String>,
    /// 开考后多少秒手动提交；不填则等倒计时结束自动提交
    #[serde(default)]
    pub submit_after_secs: Option<u64>,
    /// 题目ID → 选项
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl AnswerSheet {
    /// 把答案解析为选项键，遇到非 A-D 的值立即报错
    pub fn parsed_answers(&self) -> Result<Vec<(String, OptionKey)>, ExamError> {
        self.answers
            .iter()
            .map(|(question, key)| Ok((question.clone(), key.parse()?)))
            .collect()
    }
}
