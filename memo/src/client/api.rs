use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::MemoApi;
use crate::{
    config::ServiceConfig,
    error::{MemoError, Result},
    models::{
        CreateMemoRequest, Memo, MemoFilter, MemoPage, RowStatus, UpdateMemoStateRequest, User,
        Visibility,
    },
};

const API_PREFIX: &str = "/api/v1";
const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone)]
pub struct MemosApiClient {
    client: Client,
    host: String,
    token: String,
    page_size: u32,
}

impl MemosApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let host = config
            .host
            .as_deref()
            .map(|host| host.trim_end_matches('/').to_string())
            .filter(|host| !host.is_empty())
            .ok_or_else(|| MemoError::Config("Memo host is not configured".to_string()))?;

        let token = config
            .token
            .clone()
            .ok_or_else(|| MemoError::Config("Memo access token is not configured".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MemoError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            host,
            token,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}/{}", self.host, API_PREFIX, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("Authorization", format!("Bearer {}", self.token))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        debug!("Memo API response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            return Err(MemoError::from_status(status, &error_body));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        response
            .json()
            .await
            .map_err(|e| MemoError::Network(format!("Failed to parse memo API response: {e}")))
    }

    fn map_transport_error(error: reqwest::Error) -> MemoError {
        if error.is_timeout() {
            MemoError::Network("Request timeout".to_string())
        } else {
            MemoError::Network(format!("Request failed: {error}"))
        }
    }

    fn require_id(id: &str) -> Result<&str> {
        let id = id.trim().trim_start_matches('/');
        if id.is_empty() {
            return Err(MemoError::Validation("Memo id cannot be empty".to_string()));
        }
        Ok(id)
    }
}

#[async_trait]
impl MemoApi for MemosApiClient {
    fn host(&self) -> &str {
        &self.host
    }

    async fn list_memos(&self, filter: &MemoFilter, page_token: Option<&str>) -> Result<MemoPage> {
        let url = self.endpoint("memos");
        let mut query = vec![
            ("pageSize", self.page_size.to_string()),
            ("filter", filter.to_expression()),
        ];
        if let Some(token) = page_token.filter(|t| !t.is_empty()) {
            query.push(("pageToken", token.to_string()));
        }

        debug!(
            filter = %filter.to_expression(),
            page_token = page_token.unwrap_or(""),
            "Listing memos"
        );

        self.send_json(self.client.get(&url).query(&query)).await
    }

    async fn current_user(&self) -> Result<User> {
        let url = self.endpoint("auth/status");
        debug!("Resolving current user at {}", url);
        self.send_json(self.client.post(&url)).await
    }

    async fn set_memo_state(&self, id: &str, state: RowStatus) -> Result<Memo> {
        let id = Self::require_id(id)?;
        let url = self.endpoint(id);
        let body = UpdateMemoStateRequest {
            name: id.to_string(),
            row_status: state,
        };

        debug!("Setting {} to {}", id, state);
        self.send_json(
            self.client
                .patch(&url)
                .query(&[("updateMask", "row_status")])
                .json(&body),
        )
        .await
    }

    async fn delete_memo(&self, id: &str) -> Result<()> {
        let id = Self::require_id(id)?;
        let url = self.endpoint(id);

        debug!("Deleting {}", id);
        self.execute(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn create_memo(&self, content: &str, visibility: Visibility) -> Result<Memo> {
        if content.trim().is_empty() {
            return Err(MemoError::Validation(
                "Memo content cannot be empty".to_string(),
            ));
        }

        let url = self.endpoint("memos");
        let body = CreateMemoRequest {
            content: content.to_string(),
            visibility,
        };

        debug!(len = content.len(), %visibility, "Creating memo");
        self.send_json(self.client.post(&url).json(&body)).await
    }
}
