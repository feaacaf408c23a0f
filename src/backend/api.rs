//! HTTP client for the research backend API

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{ChatRequest, ChatResponse, HealthResponse, SearchRequest, SearchResponse};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for communicating with the research backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        match Client::builder().timeout(timeout).build() {
            Ok(client) => Self {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
            },
            Err(e) => {
                tracing::warn!("Could not build HTTP client with timeout: {}", e);
                Self::new(base_url)
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if backend is reachable
    pub async fn health_check(&self) -> Result<HealthResponse, BackendError> {
        let url = self.endpoint("/");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| BackendError::Http { url: url.clone(), source })?;
        decode(url, response).await
    }

    /// Ask a research question
    pub async fn search(&self, search_term: &str) -> Result<SearchResponse, BackendError> {
        tracing::info!("Searching: {}", search_term);
        let request = SearchRequest {
            search_term: search_term.to_string(),
        };
        let response: SearchResponse = self.post("/search/", &request).await?;
        tracing::info!("Search returned {} references", response.references.len());
        Ok(response)
    }

    /// Ask a follow-up question about one paper
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, BackendError> {
        tracing::info!("Chat about {}: {}", request.url, request.question);
        self.post("/chat/", &request).await
    }

    /// Convenience wrapper building the [`ChatRequest`]
    pub async fn chat_about(
        &self,
        question: &str,
        url: &str,
        parsed_arxiv_results: Value,
    ) -> Result<ChatResponse, BackendError> {
        self.chat(ChatRequest {
            question: question.to_string(),
            url: url.to_string(),
            parsed_arxiv_results,
        })
        .await
    }

    async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| BackendError::Http { url: url.clone(), source })?;
        decode(url, response).await
    }
}

async fn decode<Resp: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<Resp, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("{} returned {}", url, status);
        return Err(BackendError::Status { status, body });
    }
    response
        .json()
        .await
        .map_err(|source| BackendError::Decode { url, source })
}
