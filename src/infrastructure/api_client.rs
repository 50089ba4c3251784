//! HTTP 客户端 - 基础设施层
//!
//! 持有唯一的 reqwest::Client 和 API 基础地址，只暴露"发请求"的能力

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::infrastructure::request_context::RequestContext;

/// API 客户端
///
/// 职责：
/// - 持有唯一的 HTTP 连接池
/// - 给每个请求附加 `Authorization: Bearer <token>`
/// - 把非 2xx 响应转换为带后端 message 的错误
/// - 不认识 Quiz / Group 等业务对象
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// 创建新的 API 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::api_request_failed("client-builder", e))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 拼接完整地址；`path` 已是绝对地址时原样使用
    pub fn url(&self, path: &str) -> AppResult<String> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(path.to_string());
        }
        if !path.starts_with('/') {
            return Err(ApiError::InvalidUrl(path.to_string()).into());
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    pub async fn get<T: DeserializeOwned>(&self, ctx: &RequestContext, path: &str) -> AppResult<T> {
        self.send(ctx, Method::GET, path, None::<&()>).await
    }

    pub async fn post<B, T>(&self, ctx: &RequestContext, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ctx, Method::POST, path, Some(body)).await
    }

    pub async fn put<B, T>(&self, ctx: &RequestContext, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ctx, Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        ctx: &RequestContext,
        path: &str,
    ) -> AppResult<T> {
        self.send(ctx, Method::DELETE, path, None::<&()>).await
    }

    /// 发送请求并解析 JSON 响应
    async fn send<B, T>(
        &self,
        ctx: &RequestContext,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(token) = ctx.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::api_request_failed(path, e))?;

        if !status.is_success() {
            let message = extract_message(&bytes, status);
            warn!("请求失败 {} ({}): {}", path, status.as_u16(), message);
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        // 空响应体按空对象处理
        let payload: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
        serde_json::from_slice(payload).map_err(|source| {
            ApiError::Decode {
                endpoint: path.to_string(),
                source,
            }
            .into()
        })
    }
}

/// 从错误响应中提取后端 message，取不到时退回状态码说明
fn extract_message(bytes: &[u8], status: StatusCode) -> String {
    serde_json::from_slice::<JsonValue>(bytes)
        .ok()
        .and_then(|v| match v.get("message") {
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(JsonValue::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|i| i.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => None,
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_base_url() {
        let client = ApiClient::new(&Config::with_base_url("http://localhost:3005/")).unwrap();
        assert_eq!(
            client.url("/api/quiz").unwrap(),
            "http://localhost:3005/api/quiz"
        );
        assert_eq!(
            client.url("https://other.host/api/auth/login").unwrap(),
            "https://other.host/api/auth/login"
        );
        assert!(client.url("api/quiz").is_err());
    }

    #[test]
    fn message_is_taken_from_error_body() {
        let msg = extract_message(br#"{"message":"Quiz not found"}"#, StatusCode::NOT_FOUND);
        assert_eq!(msg, "Quiz not found");

        let msg = extract_message(b"<html>", StatusCode::BAD_GATEWAY);
        assert_eq!(msg, "Bad Gateway");

        let msg = extract_message(
            br#"{"message":["email is required","password is required"]}"#,
            StatusCode::BAD_REQUEST,
        );
        assert_eq!(msg, "email is required; password is required");
    }
}
