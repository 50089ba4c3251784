//! 分组服务 - 业务能力层

use tracing::info;

use crate::api::groups;
use crate::error::{AppResult, ValidationError};
use crate::infrastructure::{ApiClient, RequestContext};
use crate::models::envelope::MessageOnly;
use crate::models::roster::{Group, GroupForm};

/// 分组服务（仅讲师 / 管理员）
pub struct GroupService {
    client: ApiClient,
}

impl GroupService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Group>> {
        ctx.require_manager("查看分组")?;
        self.client.get(ctx, groups::ALL).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> AppResult<Group> {
        ctx.require_manager("查看分组")?;
        self.client.get(ctx, &groups::by_id(id)).await
    }

    pub async fn create(&self, ctx: &RequestContext, form: &GroupForm) -> AppResult<String> {
        ctx.require_manager("新建分组")?;
        validate(form)?;
        let res: MessageOnly = self.client.post(ctx, groups::ALL, form).await?;
        info!("✓ 分组已创建: {}", form.name);
        Ok(res.message_or("Group added successfully"))
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        form: &GroupForm,
    ) -> AppResult<String> {
        ctx.require_manager("修改分组")?;
        validate(form)?;
        let res: MessageOnly = self.client.put(ctx, &groups::by_id(id), form).await?;
        Ok(res.message_or("Group updated successfully"))
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> AppResult<String> {
        ctx.require_manager("删除分组")?;
        let res: MessageOnly = self.client.delete(ctx, &groups::by_id(id)).await?;
        Ok(res.message_or("Group deleted successfully"))
    }
}

fn validate(form: &GroupForm) -> Result<(), ValidationError> {
    if form.name.trim().is_empty() {
        return Err(ValidationError::new("name", "Group name is required"));
    }
    if form.students.is_empty() {
        return Err(ValidationError::new("students", "Select at least one student"));
    }
    Ok(())
}
