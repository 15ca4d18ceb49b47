//! Resume persistence over the external REST API.
//!
//! `GET /resumes/:id`, `POST /resumes`, `PUT /resumes/:id`. Saves always send
//! the whole document; there is no version check.
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::stored::{SaveResumeRequest, StoredResume};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Resume '{0}' not found")]
    NotFound(String),

    #[error("Resume API returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not decode resume API response: {0}")]
    Decode(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Carried in `AppState` as `Arc<dyn ResumeRepository>`.
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<StoredResume, TransportError>;

    async fn create(&self, request: &SaveResumeRequest) -> Result<StoredResume, TransportError>;

    async fn update(&self, id: &str, request: &SaveResumeRequest) -> Result<StoredResume, TransportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP implementation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct HttpResumeRepository {
    client: Client,
    base_url: String,
}

impl HttpResumeRepository {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn resumes_url(&self) -> String {
        format!("{}/resumes", self.base_url)
    }

    fn resume_url(&self, id: &str) -> String {
        format!("{}/resumes/{id}", self.base_url)
    }

    async fn decode<T: DeserializeOwned>(id: &str, response: Response) -> Result<T, TransportError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(TransportError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "resume API call failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ResumeRepository for HttpResumeRepository {
    async fn fetch(&self, id: &str) -> Result<StoredResume, TransportError> {
        let response = self.client.get(self.resume_url(id)).send().await?;
        let stored: StoredResume = Self::decode(id, response).await?;
        debug!(resume_id = %stored.id, "fetched resume");
        Ok(stored)
    }

    async fn create(&self, request: &SaveResumeRequest) -> Result<StoredResume, TransportError> {
        let response = self.client.post(self.resumes_url()).json(request).send().await?;
        let stored: StoredResume = Self::decode("new", response).await?;
        debug!(resume_id = %stored.id, title = %stored.title, "created resume");
        Ok(stored)
    }

    async fn update(&self, id: &str, request: &SaveResumeRequest) -> Result<StoredResume, TransportError> {
        let response = self.client.put(self.resume_url(id)).json(request).send().await?;
        let stored: StoredResume = Self::decode(id, response).await?;
        debug!(resume_id = %stored.id, title = %stored.title, "updated resume");
        Ok(stored)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory implementation for tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use tokio::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryResumeRepository {
        resumes: Mutex<HashMap<String, StoredResume>>,
        fail: AtomicBool,
    }

    impl MemoryResumeRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every following call fail with a 503.
        pub fn fail_requests(&self, fail: bool) {
            self.fail.store(fail, Ordering::SeqCst);
        }

        pub async fn insert(&self, stored: StoredResume) {
            self.resumes.lock().await.insert(stored.id.clone(), stored);
        }

        pub async fn get(&self, id: &str) -> Option<StoredResume> {
            self.resumes.lock().await.get(id).cloned()
        }

        pub async fn len(&self) -> usize {
            self.resumes.lock().await.len()
        }

        fn check(&self) -> Result<(), TransportError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(TransportError::Status {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            Ok(())
        }

        fn stored(id: String, request: &SaveResumeRequest) -> StoredResume {
            StoredResume {
                id,
                title: request.title.clone(),
                data: request.data.clone(),
                template_id: Some(request.template_id.as_str().to_string()),
                created_at: None,
                updated_at: Some(chrono::Utc::now()),
            }
        }
    }

    #[async_trait]
    impl ResumeRepository for MemoryResumeRepository {
        async fn fetch(&self, id: &str) -> Result<StoredResume, TransportError> {
            self.check()?;
            self.get(id).await.ok_or_else(|| TransportError::NotFound(id.to_string()))
        }

        async fn create(&self, request: &SaveResumeRequest) -> Result<StoredResume, TransportError> {
            self.check()?;
            let stored = Self::stored(uuid::Uuid::new_v4().to_string(), request);
            self.insert(stored.clone()).await;
            Ok(stored)
        }

        async fn update(&self, id: &str, request: &SaveResumeRequest) -> Result<StoredResume, TransportError> {
            self.check()?;
            let mut resumes = self.resumes.lock().await;
            if !resumes.contains_key(id) {
                return Err(TransportError::NotFound(id.to_string()));
            }
            let stored = Self::stored(id.to_string(), request);
            resumes.insert(id.to_string(), stored.clone());
            Ok(stored)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ResumeDocument;
    use crate::templates::TemplateId;
    use axum::{
        extract::Path,
        http::StatusCode as AxumStatus,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn stored_json(id: &str, body: &Value) -> Value {
        json!({
            "_id": id,
            "title": body["title"],
            "data": body["data"],
            "templateId": body["templateId"],
            "createdAt": "2024-05-01T10:00:00Z",
        })
    }

    fn api() -> Router {
        Router::new()
            .route(
                "/resumes",
                post(|Json(body): Json<Value>| async move { Json(stored_json("r-1", &body)) }),
            )
            .route(
                "/resumes/:id",
                get(|Path(id): Path<String>| async move {
                    if id == "r-1" {
                        let doc = serde_json::to_value(ResumeDocument::minimal("Jane", "jane@example.com")).unwrap();
                        Ok(Json(stored_json("r-1", &json!({ "title": "Jane", "data": doc, "templateId": "elegant" }))))
                    } else {
                        Err(AxumStatus::NOT_FOUND)
                    }
                })
                .put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                    if id == "r-1" {
                        Ok(Json(stored_json(&id, &body)))
                    } else {
                        Err(AxumStatus::NOT_FOUND)
                    }
                }),
            )
            .route("/broken/resumes/:id", get(|| async { (AxumStatus::OK, "not json") }))
    }

    #[tokio::test]
    async fn test_fetch_existing_resume() {
        let repo = HttpResumeRepository::new(&spawn(api()).await);
        let stored = repo.fetch("r-1").await.unwrap();
        assert_eq!(stored.id, "r-1");
        assert_eq!(stored.template_id.as_deref(), Some("elegant"));
        assert_eq!(stored.data.personal_info.email, "jane@example.com");
        assert!(stored.created_at.is_some());
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let repo = HttpResumeRepository::new(&spawn(api()).await);
        assert!(matches!(repo.fetch("nope").await, Err(TransportError::NotFound(id)) if id == "nope"));
    }

    #[tokio::test]
    async fn test_create_and_update_send_full_payload() {
        let repo = HttpResumeRepository::new(&(spawn(api()).await + "/"));
        let request = SaveResumeRequest::new(
            ResumeDocument::minimal("Jane Doe", "jane@example.com"),
            TemplateId::RedlineChrono,
        );
        let created = repo.create(&request).await.unwrap();
        assert_eq!(created.title, "Jane Doe");
        assert_eq!(created.template_id.as_deref(), Some("redlineChrono"));

        let updated = repo.update("r-1", &request).await.unwrap();
        assert_eq!(updated.data, request.data);
        assert!(matches!(repo.update("r-2", &request).await, Err(TransportError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let base = spawn(api()).await;
        let repo = HttpResumeRepository::new(&format!("{base}/broken"));
        assert!(matches!(repo.fetch("x").await, Err(TransportError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let repo = HttpResumeRepository::new(&format!("http://{addr}"));
        assert!(matches!(repo.fetch("r-1").await, Err(TransportError::Http(_))));
    }
}
