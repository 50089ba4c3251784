//! 分组与学生名册

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub avg_score: Option<f64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub group: Option<GroupRef>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub students: Vec<GroupMember>,
    #[serde(default)]
    pub max_students: Option<u32>,
}

/// 分组里的学生：列表接口只给 id，详情接口给完整对象
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupMember {
    Id(String),
    Full(Student),
}

impl GroupMember {
    pub fn id(&self) -> &str {
        match self {
            GroupMember::Id(id) => id,
            GroupMember::Full(s) => &s.id,
        }
    }
}

/// 新建 / 修改分组
#[derive(Debug, Clone, Serialize)]
pub struct GroupForm {
    pub name: String,
    pub students: Vec<String>,
}
