use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{AskResponse, DocumentFile, ExampleCatalog, GraphInfo, HealthStatus, UploadReceipt};

/// Absolute URLs of every backend route, derived from the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn upload(&self) -> String {
        format!("{}/upload", self.base)
    }

    pub fn ask(&self) -> String {
        format!("{}/ask", self.base)
    }

    pub fn health(&self) -> String {
        format!("{}/health", self.base)
    }

    pub fn graph_info(&self) -> String {
        format!("{}/graph-info", self.base)
    }

    pub fn examples(&self) -> String {
        format!("{}/examples", self.base)
    }

    /// `t` is a cache-buster; the webview would otherwise keep showing a stale diagram.
    pub fn graph_image(&self, t: i64) -> String {
        format!("{}/graph-image?t={}", self.base, t)
    }
}

/// The inference backend as seen by the front-end.
#[async_trait]
pub trait AgentApi: Send + Sync {
    async fn upload(&self, file: &DocumentFile) -> Result<UploadReceipt, ApiError>;
    async fn ask(&self, question: &str) -> Result<AskResponse, ApiError>;
    async fn graph_info(&self) -> Result<GraphInfo, ApiError>;
    async fn examples(&self) -> Result<ExampleCatalog, ApiError>;
    async fn health(&self) -> Result<HealthStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpAgentApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpAgentApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoints: Endpoints::new(base_url),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl AgentApi for HttpAgentApi {
    async fn upload(&self, file: &DocumentFile) -> Result<UploadReceipt, ApiError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str("application/pdf")
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part);

        tracing::info!(file = %file.name, size = file.bytes.len(), "Uploading document");
        let response = self.client.post(self.endpoints.upload()).multipart(form).send().await?;
        decode(response).await
    }

    async fn ask(&self, question: &str) -> Result<AskResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoints.ask())
            .query(&[("question", question)])
            .send()
            .await?;
        decode(response).await
    }

    async fn graph_info(&self) -> Result<GraphInfo, ApiError> {
        self.get_json(self.endpoints.graph_info()).await
    }

    async fn examples(&self) -> Result<ExampleCatalog, ApiError> {
        self.get_json(self.endpoints.examples()).await
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json(self.endpoints.health()).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Backend returned an error status");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// FastAPI-style backends put the reason in `{"detail": ...}`.
fn error_message(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(msg)) => msg,
        Some(other) => other.to_string(),
        None if body.trim().is_empty() => "empty response".to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answers a single HTTP request with a canned response and hands back the request head.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let mut read = 0;
            loop {
                let n = socket.read(&mut buf[read..]).await.unwrap();
                read += n;
                if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&buf[..read]).into_owned()
        });
        (base, handle)
    }

    #[test]
    fn test_endpoints_join_without_double_slash() {
        let endpoints = Endpoints::new("http://localhost:8000/");
        assert_eq!(endpoints.base(), "http://localhost:8000");
        assert_eq!(endpoints.upload(), "http://localhost:8000/upload");
        assert_eq!(endpoints.ask(), "http://localhost:8000/ask");
        assert_eq!(endpoints.graph_info(), "http://localhost:8000/graph-info");
        assert_eq!(endpoints.examples(), "http://localhost:8000/examples");
        assert_eq!(endpoints.health(), "http://localhost:8000/health");
        assert_eq!(
            endpoints.graph_image(1_700_000_000_000),
            "http://localhost:8000/graph-image?t=1700000000000"
        );
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail": "Apenas arquivos PDF são aceitos"}"#),
            "Apenas arquivos PDF são aceitos"
        );
    }

    #[test]
    fn test_error_message_structured_detail_is_serialized() {
        let msg = error_message(r#"{"detail": [{"loc": ["query", "question"], "msg": "field required"}]}"#);
        assert!(msg.contains("field required"));
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        assert_eq!(error_message("Internal Server Error\n"), "Internal Server Error");
        assert_eq!(error_message("  "), "empty response");
        assert_eq!(error_message(r#"{"error": "boom"}"#), r#"{"error": "boom"}"#);
    }

    #[tokio::test]
    async fn test_error_status_carries_backend_detail() {
        let (base, server) = serve_once("500 Internal Server Error", r#"{"detail": "CV não carregado"}"#).await;

        let err = HttpAgentApi::new(base).health().await.unwrap_err();

        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "CV não carregado");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(server.await.unwrap().starts_with("GET /health "));
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_error() {
        let (base, _server) = serve_once("200 OK", "not json").await;

        let err = HttpAgentApi::new(base).graph_info().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_ask_posts_question_as_query() {
        let body = r#"{"answer": "Cinco anos", "confidence": 0.9, "workflow_path": ["classifier"], "question_type": "experience", "tools_used": [], "timestamp": "2024-05-03T14:07:09", "extracted_info": {}}"#;
        let (base, server) = serve_once("200 OK", body).await;

        let response = HttpAgentApi::new(base).ask("Onde trabalhou?").await.unwrap();

        assert_eq!(response.answer, "Cinco anos");
        assert_eq!(response.attempts, 1);
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /ask?question=Onde+trabalhou%3F "), "{request}");
    }
}
