//! 学生名册服务 - 业务能力层

use crate::api::students;
use crate::error::AppResult;
use crate::infrastructure::{ApiClient, RequestContext};
use crate::models::envelope::MessageOnly;
use crate::models::quiz::TopStudent;
use crate::models::roster::Student;

pub struct StudentService {
    client: ApiClient,
}

impl StudentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Student>> {
        ctx.require_manager("查看学生")?;
        self.client.get(ctx, students::ALL).await
    }

    /// 还没有分组的学生（建组时可选）
    pub async fn list_without_group(&self, ctx: &RequestContext) -> AppResult<Vec<Student>> {
        ctx.require_manager("查看学生")?;
        self.client.get(ctx, students::WITHOUT_GROUP).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<Student> {
        ctx.require_manager("查看学生")?;
        self.client.get(ctx, &students::by_id(id)).await
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<String> {
        ctx.require_manager("删除学生")?;
        let res: MessageOnly = self.client.delete(ctx, &students::by_id(id)).await?;
        Ok(res.message_or("Student deleted successfully"))
    }

    /// 首页的前五名学生
    pub async fn top_five(&self, ctx: &RequestContext) -> AppResult<Vec<TopStudent>> {
        ctx.require_login()?;
        self.client.get(ctx, students::TOP_FIVE).await
    }
}
