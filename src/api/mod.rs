//! API 模块
//!
//! 后端所有接口路径的唯一出处

pub mod endpoints;

pub use endpoints::{auth, groups, questions, quizzes, students};
